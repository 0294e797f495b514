// Library interface for shrugman
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{
    GuessResult, Outcome, RandomSource, RngSource, Round, RoundStatus, Selection, letter_count,
    mask, select_target,
};
pub use error::GameError;
pub use game_state::{GameInterface, Session, SessionEnd, SessionOptions, game_loop};
pub use wordbank::{Category, WordStore};
