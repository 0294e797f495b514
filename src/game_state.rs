use crate::engine::{GuessResult, Outcome, RandomSource, Round, select_target};
use crate::error::GameError;
use crate::wordbank::{Category, WordStore};
use crate::{debug_log, info_log};

pub const WELCOME_MESSAGE: &str = "Welcome to Shrugman Game!";
pub const INTRO_MESSAGE: &str = "The goal is straightforward: guess the hidden word by guessing letters one at a time.\n\nThe rule is simple: You choose one category and be presented with a mysterious word represented by a series of dashes, with each dash representing a letter. Each correct guess will expose the corresponding letters. But beware of the Shrugman! For every incorrect guess, a piece of shrugman will appear, shrugging in response to your inaccuracy.\n\n🤷 Can you solve the word before the Shrugman completes his nonchalant pose?";
pub const READY_PROMPT: &str = "Are you ready? 🚀";
pub const CATEGORY_PROMPT: &str = "Please choose one of the categories for the game.";
pub const GUESS_PROMPT: &str = "Guess a letter → ";

/// Snapshot of a round handed to the presentation layer after each guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub revealed: String,
    pub indicator: String,
    pub guessed: Vec<char>,
    pub failures: usize,
    pub max_failures: usize,
}

impl BoardView {
    pub fn from_round(round: &Round) -> Self {
        Self {
            revealed: round.revealed(),
            indicator: round.indicator_progress(),
            guessed: round.guessed_letters().to_vec(),
            failures: round.failures(),
            max_failures: round.max_failures(),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// Player declined another round; the played words with their results.
    Finished(Vec<(String, Outcome)>),
    /// Player cancelled at a prompt.
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub skip_intro: bool,
    /// Category chosen up front; skips the menu.
    pub category: Option<usize>,
}

/// Presentation collaborator used by the session controller.
///
/// Implementations supply the four primitives; the remaining hooks have
/// plain-text defaults built on [`GameInterface::display`] and may be
/// overridden for richer rendering.
pub trait GameInterface {
    fn display(&mut self, text: &str);

    /// Read one line of input. `None` means the player quit.
    fn prompt_letter(&mut self, prompt: &str) -> Option<String>;

    /// Pick one of `options`. `None` means the player cancelled.
    fn prompt_choice(&mut self, prompt: &str, options: &[&str]) -> Option<usize>;

    fn prompt_yes_no(&mut self, prompt: &str) -> bool;

    fn display_intro(&mut self) {
        self.display(&format!("{WELCOME_MESSAGE}\n\n{INTRO_MESSAGE}"));
    }

    fn display_quit(&mut self) {
        self.display("You chose to quit. Goodbye!");
    }

    fn display_category(&mut self, category: &Category) {
        self.display(&format!("➡️ Let's guess a {}", category.label));
    }

    fn display_board(&mut self, board: &BoardView) {
        if board.indicator.is_empty() {
            self.display(&board.revealed);
        } else {
            self.display(&format!("{}\n{}", board.revealed, board.indicator));
        }
    }

    fn display_guess_result(&mut self, result: &GuessResult) {
        match result {
            GuessResult::Invalid => self.display("Please enter a single letter."),
            GuessResult::Duplicate(_) => {
                self.display("You've already guessed this letter. Choose another one.");
            }
            _ => {}
        }
    }

    fn display_outcome(&mut self, outcome: Outcome, target: &str) {
        match outcome {
            Outcome::Win => self.display("Hey you win!"),
            Outcome::Loss => self.display(&format!("Better luck next time! The word was {target}.")),
        }
    }

    fn display_replay(&mut self) {
        self.display("Good luck!");
    }

    fn display_summary(&mut self, played: &[(String, Outcome)]) {
        let mut text = String::new();
        for (i, (word, outcome)) in played.iter().enumerate() {
            text.push_str(&format!("{}. {} - {}\n", i + 1, word, outcome));
        }
        text.push_str("--- THE END ---\nNice to meet you. Goodbye!");
        self.display(&text);
    }
}

/// Play history of one category, owned for the lifetime of a session.
#[derive(Debug)]
pub struct Session<'a> {
    store: &'a WordStore,
    category: usize,
    played_words: Vec<String>,
    results: Vec<Outcome>,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a WordStore, category: usize) -> Result<Self, GameError> {
        let words = store.words_for(category)?;
        if words.is_empty() {
            return Err(GameError::EmptyCategory(store.category(category)?.name.clone()));
        }
        Ok(Self {
            store,
            category,
            played_words: Vec::new(),
            results: Vec::new(),
        })
    }

    pub fn category(&self) -> &Category {
        &self.store.categories()[self.category]
    }

    pub fn played_words(&self) -> &[String] {
        &self.played_words
    }

    pub fn results(&self) -> &[Outcome] {
        &self.results
    }

    pub fn summary(&self) -> Vec<(String, Outcome)> {
        self.played_words
            .iter()
            .cloned()
            .zip(self.results.iter().copied())
            .collect()
    }

    /// A round was started and has neither finished nor been abandoned.
    pub fn round_in_progress(&self) -> bool {
        self.played_words.len() > self.results.len()
    }

    /// Select a fresh target and start a round on it.
    ///
    /// The word is recorded as played right away; a cycle reset clears the
    /// results alongside the played words. Fails while another round is
    /// still in progress.
    pub fn start_round<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<Round, GameError> {
        if self.round_in_progress() {
            return Err(GameError::RoundInProgress);
        }
        let words = self.store.words_for(self.category)?;
        let selection = select_target(words, &mut self.played_words, rng)?;
        if selection.reset {
            info_log!("All words in '{}' played, starting a new cycle", self.category().name);
            self.results.clear();
        }
        let round = Round::new(&selection.word);
        self.played_words.push(selection.word);
        Ok(round)
    }

    /// Record the outcome of the round started last.
    pub fn finish_round(&mut self, outcome: Outcome) -> Result<(), GameError> {
        if !self.round_in_progress() {
            return Err(GameError::NoRoundInProgress);
        }
        self.results.push(outcome);
        Ok(())
    }

    /// Forget the round started last without recording an outcome.
    pub fn abandon_round(&mut self) {
        if self.round_in_progress() {
            self.played_words.pop();
        }
    }

    /// Play one round to completion. `None` when the player quit mid-round.
    pub fn play_round<I, R>(&mut self, ui: &mut I, rng: &mut R) -> Result<Option<Outcome>, GameError>
    where
        I: GameInterface + ?Sized,
        R: RandomSource + ?Sized,
    {
        let mut round = self.start_round(rng)?;
        info_log!(
            "Round {} in '{}': {} letters to find",
            self.played_words.len(),
            self.category().name,
            round.remaining()
        );
        ui.display_board(&BoardView::from_round(&round));

        let outcome = loop {
            if let Some(outcome) = round.outcome() {
                break outcome;
            }
            let Some(input) = ui.prompt_letter(GUESS_PROMPT) else {
                info_log!("Player quit during a round");
                self.abandon_round();
                return Ok(None);
            };
            let result = round.guess(&input);
            debug_log!("Guess {:?} -> {:?}", input, result);
            match result {
                GuessResult::Correct { .. } | GuessResult::Incorrect(_) => {
                    ui.display_board(&BoardView::from_round(&round));
                }
                GuessResult::Invalid | GuessResult::Duplicate(_) | GuessResult::RoundOver => {
                    ui.display_guess_result(&result);
                }
            }
        };

        self.finish_round(outcome)?;
        info_log!("Round finished: {} ({})", round.target(), outcome);
        ui.display_outcome(outcome, round.target());
        Ok(Some(outcome))
    }
}

/// Run a whole session: intro, category choice, rounds until the player stops.
pub fn game_loop<I, R>(
    store: &WordStore,
    ui: &mut I,
    rng: &mut R,
    options: &SessionOptions,
) -> Result<SessionEnd, GameError>
where
    I: GameInterface + ?Sized,
    R: RandomSource + ?Sized,
{
    if !options.skip_intro {
        ui.display_intro();
        if !ui.prompt_yes_no(READY_PROMPT) {
            ui.display_quit();
            return Ok(SessionEnd::Quit);
        }
    }

    let category = match options.category {
        Some(index) => {
            store.category(index)?;
            index
        }
        None => {
            let names = store.names();
            loop {
                match ui.prompt_choice(CATEGORY_PROMPT, &names) {
                    Some(index) if index < store.len() => break index,
                    Some(index) => {
                        log::warn!("Interface returned category {index} outside the menu");
                        ui.display("Please choose one of the listed categories.");
                    }
                    None => {
                        ui.display_quit();
                        return Ok(SessionEnd::Quit);
                    }
                }
            }
        }
    };

    let mut session = Session::new(store, category)?;
    info_log!("Session started in category '{}'", session.category().name);
    ui.display_category(session.category());

    loop {
        if session.play_round(ui, rng)?.is_none() {
            ui.display_quit();
            return Ok(SessionEnd::Quit);
        }

        let prompt = format!("Another round in same category {} ?", session.category().label);
        if ui.prompt_yes_no(&prompt) {
            ui.display_replay();
        } else {
            let summary = session.summary();
            ui.display_summary(&summary);
            info_log!("Session finished after {} words", summary.len());
            return Ok(SessionEnd::Finished(summary));
        }
    }
}
