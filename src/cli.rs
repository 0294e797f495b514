use crate::engine::{GuessResult, Outcome};
use crate::game_state::{BoardView, GameInterface, INTRO_MESSAGE, WELCOME_MESSAGE};
use crate::debug_log;
use clap::Parser;
use crossterm::style::{Color, Stylize};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Shrugman: guess the hidden word before the shrug is complete
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Category to play, by name or number (skips the menu)
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Path to a word list with "[Category]" headers
    #[arg(short = 'w', long = "words")]
    pub words_path: Option<PathBuf>,

    /// Seed for reproducible word selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the welcome screen
    #[arg(long)]
    pub skip_intro: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log file (without it, logs go to the user cache directory only when RUST_LOG is set)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[derive(Debug, PartialEq, Eq)]
enum ChoiceInput {
    Selected(usize),
    Cancel,
    Invalid,
}

/// Menu entries are numbered from 1; 0 cancels.
fn parse_choice(input: &str, option_count: usize) -> ChoiceInput {
    match input.trim().parse::<usize>() {
        Ok(0) => ChoiceInput::Cancel,
        Ok(n) if n <= option_count => ChoiceInput::Selected(n - 1),
        _ => ChoiceInput::Invalid,
    }
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Pad every line so it sits in the middle of `width` columns.
fn center(text: &str, width: usize) -> String {
    text.lines()
        .map(|line| {
            let padding = width.saturating_sub(line.chars().count()) / 2;
            format!("{}{}", " ".repeat(padding), line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line-oriented interface over any reader/writer pair.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    color: bool,
    width: Option<usize>,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: false,
            width: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Terminal width used to center the intro screen.
    #[must_use]
    pub fn with_width(mut self, width: Option<usize>) -> Self {
        self.width = width;
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            debug_log!("write failed: {}", e);
        }
    }

    fn write_prompt(&mut self, prompt: &str) {
        let result = write!(self.writer, "{prompt}").and_then(|()| self.writer.flush());
        if let Err(e) = result {
            debug_log!("prompt write failed: {}", e);
        }
    }

    /// Next input line without its line ending; `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display(&mut self, text: &str) {
        self.write_line(&format!("\n{text}"));
    }

    fn prompt_letter(&mut self, prompt: &str) -> Option<String> {
        let prompt = self.paint(prompt, Color::Blue);
        self.write_prompt(&format!("\n{prompt}"));
        self.read_line()
    }

    fn prompt_choice(&mut self, prompt: &str, options: &[&str]) -> Option<usize> {
        self.write_line("");
        for (i, option) in options.iter().enumerate() {
            self.write_line(&format!("[{}] {}", i + 1, option));
        }
        self.write_line("[0] CANCEL");

        let prompt = self.paint(prompt, Color::Cyan);
        loop {
            self.write_prompt(&format!("\n{prompt} [1...{} / 0]: ", options.len()));
            let input = self.read_line()?;
            match parse_choice(&input, options.len()) {
                ChoiceInput::Selected(index) => return Some(index),
                ChoiceInput::Cancel => return None,
                ChoiceInput::Invalid => {
                    self.write_line(&format!(
                        "Please enter a number between 0 and {}.",
                        options.len()
                    ));
                }
            }
        }
    }

    fn prompt_yes_no(&mut self, prompt: &str) -> bool {
        loop {
            self.write_prompt(&format!("\n{prompt} [y/n]: "));
            let Some(input) = self.read_line() else {
                return false;
            };
            match parse_yes_no(&input) {
                Some(answer) => return answer,
                None => self.write_line("Please answer y or n."),
            }
        }
    }

    fn display_intro(&mut self) {
        let (welcome, intro) = match self.width {
            Some(width) => (center(WELCOME_MESSAGE, width), center(INTRO_MESSAGE, width)),
            None => (WELCOME_MESSAGE.to_string(), INTRO_MESSAGE.to_string()),
        };
        let welcome = if self.color {
            welcome.red().bold().to_string()
        } else {
            welcome
        };
        let intro = self.paint(&intro, Color::Green);
        self.display(&format!("{welcome}\n\n{intro}"));
    }

    fn display_quit(&mut self) {
        let text = self.paint("You chose to quit. Goodbye!", Color::Blue);
        self.display(&text);
    }

    fn display_board(&mut self, board: &BoardView) {
        let revealed = self.paint(&board.revealed, Color::Green);
        let indicator = self.paint(&board.indicator, Color::Red);
        self.display(&format!("{revealed}\n{indicator}"));
    }

    fn display_guess_result(&mut self, result: &GuessResult) {
        match result {
            GuessResult::Invalid => self.display("Please enter a single letter."),
            GuessResult::Duplicate(letter) => self.display(&format!(
                "You've already guessed '{letter}'. Choose another one."
            )),
            _ => {}
        }
    }

    fn display_outcome(&mut self, outcome: Outcome, target: &str) {
        let text = match outcome {
            Outcome::Win => self.paint("Hey you win!", Color::Green),
            Outcome::Loss => self.paint(
                &format!("Better luck next time! The word was {target}."),
                Color::Magenta,
            ),
        };
        self.display(&text);
    }

    fn display_replay(&mut self) {
        let text = self.paint("Good luck!", Color::Yellow);
        self.display(&text);
    }
}
