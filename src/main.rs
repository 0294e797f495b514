use crossterm::terminal;
use rand::SeedableRng;
use rand::rngs::StdRng;
use shrugman::cli::{Cli, CliInterface, parse_cli};
use shrugman::logging;
use shrugman::tui::TuiInterface;
use shrugman::{GameError, RngSource, SessionEnd, SessionOptions, WordStore, game_loop};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    if let Some(path) = logging::log_path(cli.log_file.clone(), rust_log_set) {
        if let Err(e) = logging::init(&path) {
            eprintln!("Logging disabled, cannot open '{}': {e}", path.display());
        }
    }

    match run(&cli) {
        Ok(SessionEnd::Finished(summary)) => {
            log::info!("Exiting after {} played words", summary.len());
            ExitCode::SUCCESS
        }
        Ok(SessionEnd::Quit) => {
            log::info!("Player quit");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<SessionEnd, GameError> {
    let store = match &cli.words_path {
        Some(path) => WordStore::from_file(path)?,
        None => WordStore::embedded()?,
    };
    log::info!("Loaded {} categories", store.len());

    let options = SessionOptions {
        skip_intro: cli.skip_intro,
        category: cli.category.as_deref().map(|q| store.find(q)).transpose()?,
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut rng = RngSource(rng);

    if cli.tui {
        let mut ui = TuiInterface::new()?;
        game_loop(&store, &mut ui, &mut rng, &options)
    } else {
        let stdout = io::stdout();
        let color = !cli.no_color && stdout.is_terminal();
        let width = terminal::size().ok().map(|(columns, _)| usize::from(columns));
        let mut ui = CliInterface::new(io::stdin().lock(), stdout)
            .with_color(color)
            .with_width(width);
        game_loop(&store, &mut ui, &mut rng, &options)
    }
}
