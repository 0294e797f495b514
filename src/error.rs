use std::io;

/// Errors surfaced by the word store and the session controller.
///
/// Malformed or repeated guesses are not errors; the round engine reports
/// them as [`crate::engine::GuessResult`] values and keeps going.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Category index outside the known set.
    #[error("invalid category index {0}")]
    InvalidCategory(usize),

    /// No category matches the given name or number.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// Category has no candidate words to select from.
    #[error("category '{0}' has no words")]
    EmptyCategory(String),

    /// Word list could not be parsed.
    #[error("word list error on line {line}: {message}")]
    WordList { line: usize, message: String },

    /// A round was started while the previous one has no outcome yet.
    #[error("a round is already in progress")]
    RoundInProgress,

    /// An outcome was recorded with no round in progress.
    #[error("no round in progress")]
    NoRoundInProgress,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
