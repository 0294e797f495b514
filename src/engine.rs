//! Round engine for Shrugman
//!
//! Target selection without repetition inside a cycle, masking, and the
//! per-guess state machine of a single round.
//!
//! # State Machine
//! Every submitted input moves `AwaitingGuess` through one of
//! `Invalid | Duplicate | Correct | Incorrect` and back to `AwaitingGuess`.
//! Terminal states: `Won`, `Lost` (win is checked first).

use crate::error::GameError;
use rand::Rng;
use std::fmt;

pub const PLACEHOLDER: char = '_';
pub const SHRUG: &str = "¯\\_(:/)_/¯";

/// Source of uniform indices used to pick a target word.
pub trait RandomSource {
    /// Return an index in `0..count`. `count` is never zero.
    fn pick(&mut self, count: usize) -> usize;
}

impl<F> RandomSource for F
where
    F: FnMut(usize) -> usize,
{
    fn pick(&mut self, count: usize) -> usize {
        self(count)
    }
}

/// Adapts any `rand` generator into a [`RandomSource`].
pub struct RngSource<R: Rng>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, count: usize) -> usize {
        self.0.gen_range(0..count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub word: String,
    /// All words had been played, so `played` was cleared before picking.
    pub reset: bool,
}

/// Pick the next target from `words`, skipping the ones in `played`.
///
/// When every word has been played the cycle restarts: `played` is cleared
/// and the whole category is available again. The caller appends the chosen
/// word to `played` afterwards.
pub fn select_target<R: RandomSource + ?Sized>(
    words: &[String],
    played: &mut Vec<String>,
    rng: &mut R,
) -> Result<Selection, GameError> {
    if words.is_empty() {
        return Err(GameError::EmptyCategory(String::new()));
    }

    let mut available: Vec<&String> = words.iter().filter(|w| !played.contains(w)).collect();
    let reset = available.is_empty();
    if reset {
        played.clear();
        available = words.iter().collect();
    }

    // Clamp so a misbehaving source cannot index out of bounds.
    let index = rng.pick(available.len()).min(available.len() - 1);
    Ok(Selection {
        word: available[index].clone(),
        reset,
    })
}

/// Initial reveal state: ASCII letters hidden, everything else shown.
pub fn mask(word: &str) -> Vec<char> {
    word.chars()
        .map(|c| if c.is_ascii_alphabetic() { PLACEHOLDER } else { c })
        .collect()
}

pub fn letter_count(word: &str) -> usize {
    word.chars().filter(char::is_ascii_alphabetic).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "Win"),
            Self::Loss => write!(f, "Loss"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    AwaitingGuess,
    Won,
    Lost,
}

/// Result of submitting one input to a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// Not exactly one letter; no turn consumed.
    Invalid,
    /// Letter already tried this round; no turn consumed.
    Duplicate(char),
    Correct { letter: char, revealed: usize },
    Incorrect(char),
    /// The round already terminated.
    RoundOver,
}

/// One play of a target word.
#[derive(Debug, Clone)]
pub struct Round {
    target: String,
    target_chars: Vec<char>,
    reveal: Vec<char>,
    remaining: usize,
    guessed: Vec<char>,
    failures: usize,
    indicator: Vec<char>,
}

impl Round {
    pub fn new(target: &str) -> Self {
        Self::with_indicator(target, SHRUG)
    }

    /// Build a round whose failure budget is the symbol count of `indicator`.
    pub fn with_indicator(target: &str, indicator: &str) -> Self {
        Self {
            target: target.to_string(),
            target_chars: target.chars().collect(),
            reveal: mask(target),
            remaining: letter_count(target),
            guessed: Vec::new(),
            failures: 0,
            indicator: indicator.chars().collect(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn reveal_state(&self) -> &[char] {
        &self.reveal
    }

    pub fn revealed(&self) -> String {
        self.reveal.iter().collect()
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn max_failures(&self) -> usize {
        self.indicator.len()
    }

    /// Accepted letters, lowercase, in the order they were guessed.
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed
    }

    /// The failure indicator symbols revealed so far.
    pub fn indicator_progress(&self) -> String {
        self.indicator[..self.failures].iter().collect()
    }

    pub fn status(&self) -> RoundStatus {
        if self.remaining == 0 {
            RoundStatus::Won
        } else if self.failures >= self.max_failures() {
            RoundStatus::Lost
        } else {
            RoundStatus::AwaitingGuess
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status() {
            RoundStatus::Won => Some(Outcome::Win),
            RoundStatus::Lost => Some(Outcome::Loss),
            RoundStatus::AwaitingGuess => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.status() != RoundStatus::AwaitingGuess
    }

    pub fn guess(&mut self, input: &str) -> GuessResult {
        if self.is_over() {
            return GuessResult::RoundOver;
        }

        let Some(letter) = parse_letter(input) else {
            return GuessResult::Invalid;
        };
        if self.guessed.contains(&letter) {
            return GuessResult::Duplicate(letter);
        }
        self.guessed.push(letter);

        let mut revealed = 0;
        for (slot, &c) in self.reveal.iter_mut().zip(&self.target_chars) {
            if c.to_ascii_lowercase() == letter {
                *slot = c;
                revealed += 1;
            }
        }

        if revealed > 0 {
            self.remaining -= revealed;
            GuessResult::Correct { letter, revealed }
        } else {
            self.failures += 1;
            GuessResult::Incorrect(letter)
        }
    }
}

/// A guess is exactly one ASCII letter once surrounding whitespace is removed.
fn parse_letter(input: &str) -> Option<char> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}
