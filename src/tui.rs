//! TUI (Terminal User Interface) module for Shrugman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the round and turns key presses into the answers
//!   the session controller asks for through `GameInterface`
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `Confirming` (ready?) → `ChoosingCategory` → `EnteringGuess` → `Confirming` (again?) → back to `EnteringGuess`
//! - Terminal state: `Summary`

use crate::engine::{GuessResult, Outcome, PLACEHOLDER};
use crate::game_state::{BoardView, GameInterface, INTRO_MESSAGE, WELCOME_MESSAGE};
use crate::wordbank::Category;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);
const INDICATOR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Yellow);
const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

#[derive(Debug, Clone, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    ChoosingCategory { selected: usize },
    Confirming,
    Summary,
}

/// What a key press means while a letter is requested.
#[derive(Debug, PartialEq, Eq)]
enum LetterKey {
    Submit(char),
    Quit,
    Ignore,
}

#[derive(Debug, PartialEq, Eq)]
enum ChoiceKey {
    Move(usize),
    Select(usize),
    Cancel,
    Ignore,
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn letter_key(key: &KeyEvent) -> LetterKey {
    if key.code == KeyCode::Esc || is_interrupt(key) {
        return LetterKey::Quit;
    }
    match key.code {
        // Any printable key is submitted; the round decides whether it is a letter.
        KeyCode::Char(c) if !has_modifier_keys(key) && !c.is_control() && c != '\u{FFFD}' => {
            LetterKey::Submit(c)
        }
        _ => LetterKey::Ignore,
    }
}

fn choice_key(key: &KeyEvent, selected: usize, option_count: usize) -> ChoiceKey {
    if key.code == KeyCode::Esc || is_interrupt(key) {
        return ChoiceKey::Cancel;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            ChoiceKey::Move(selected.checked_sub(1).unwrap_or(option_count - 1))
        }
        KeyCode::Down | KeyCode::Char('j') => ChoiceKey::Move((selected + 1) % option_count),
        KeyCode::Enter => ChoiceKey::Select(selected),
        KeyCode::Char(c) => match c.to_digit(10) {
            Some(0) => ChoiceKey::Cancel,
            Some(n) if (n as usize) <= option_count => ChoiceKey::Select(n as usize - 1),
            _ => ChoiceKey::Ignore,
        },
        _ => ChoiceKey::Ignore,
    }
}

fn yes_no_key(key: &KeyEvent) -> Option<bool> {
    if is_interrupt(key) {
        return Some(false);
    }
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(true),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: &'a TuiState,
    category: Option<&'a str>,
    board: Option<&'a BoardView>,
    show_intro: bool,
    options: &'a [String],
    summary: &'a [String],
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface<B: Backend = CrosstermBackend<io::Stdout>> {
    terminal: Terminal<B>,
    state: TuiState,
    category: Option<String>,
    board: Option<BoardView>,
    show_intro: bool,
    options: Vec<String>,
    summary: Vec<String>,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
    owns_terminal: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        let mut tui = Self::with_terminal(terminal);
        tui.owns_terminal = true;
        Ok(tui)
    }
}

impl<B: Backend> TuiInterface<B> {
    /// Wrap an already prepared terminal. The caller keeps responsibility for
    /// raw mode and the alternate screen.
    pub fn with_terminal(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            state: TuiState::Confirming,
            category: None,
            board: None,
            show_intro: false,
            options: Vec::new(),
            summary: Vec::new(),
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: "Ready to start".to_string(),
            owns_terminal: false,
        }
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: &self.state,
            category: self.category.as_deref(),
            board: self.board.as_ref(),
            show_intro: self.show_intro,
            options: &self.options,
            summary: &self.summary,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal
            .draw(|f| {
                Self::render_static(f, &ctx);
            })
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn set_message(&mut self, message: impl Into<String>, style: Style) {
        self.message = message.into();
        self.message_style = style;
    }

    /// Block until a key is pressed. Non-key events and key releases are skipped.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    debug_log!(
                        "next_key() - code={:?}, modifiers={:?}",
                        key.code,
                        key.modifiers
                    );
                    return Ok(key);
                }
                Event::Resize(_, _) => self.draw_or_log(),
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(8), // Word board
                Constraint::Min(6),    // Info panel (takes remaining space)
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.category);
        Self::render_board(f, chunks[1], ctx.board);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, category: Option<&str>) {
        let title = match category {
            Some(label) => format!("SHRUGMAN - {label}"),
            None => "SHRUGMAN".to_string(),
        };
        let paragraph = Paragraph::new(title)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_board(f: &mut Frame, area: Rect, board: Option<&BoardView>) {
        let block = Block::default().title("Word").borders(Borders::ALL);
        let Some(board) = board else {
            f.render_widget(block, area);
            return;
        };

        let mut tiles = Vec::new();
        for c in board.revealed.chars() {
            let span = if c == PLACEHOLDER {
                Span::styled("   ", Style::default().bg(Color::DarkGray))
            } else if c.is_ascii_alphabetic() {
                Span::styled(
                    format!(" {} ", c.to_ascii_uppercase()),
                    Style::default().fg(Color::Black).bg(Color::Green),
                )
            } else {
                Span::raw(format!(" {c} "))
            };
            tiles.push(span);
            tiles.push(Span::raw(" "));
        }

        let guessed: String = board
            .guessed
            .iter()
            .map(|c| c.to_ascii_uppercase().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let lines = vec![
            Line::from(tiles),
            Line::from(""),
            Line::from(Span::styled(board.indicator.clone(), INDICATOR_STYLE)),
            Line::from(format!(
                "Misses: {}/{}   Guessed: {}",
                board.failures, board.max_failures, guessed
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if ctx.show_intro {
            lines.push(Line::from(Span::styled(WELCOME_MESSAGE, SUCCESS_STYLE)));
            lines.push(Line::from(""));
            for paragraph in INTRO_MESSAGE.lines() {
                lines.push(Line::from(paragraph));
            }
            lines.push(Line::from(""));
        }

        if let TuiState::ChoosingCategory { selected } = ctx.state {
            for (i, option) in ctx.options.iter().enumerate() {
                let text = format!(" {}. {} ", i + 1, option);
                if i == *selected {
                    lines.push(Line::from(Span::styled(text, SELECTED_STYLE)));
                } else {
                    lines.push(Line::from(text));
                }
            }
            lines.push(Line::from(""));
        }

        if matches!(ctx.state, TuiState::Summary) {
            for line in ctx.summary {
                lines.push(Line::from(line.as_str()));
            }
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.message, ctx.message_style)));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "Type a letter to guess | ESC: Quit",
            TuiState::ChoosingCategory { .. } => {
                "UP/DOWN: Move | ENTER or 1-9: Choose | ESC or 0: Quit"
            }
            TuiState::Confirming => "Y/ENTER: Yes | N/ESC: No",
            TuiState::Summary => "Press any key to exit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }
}

impl<B: Backend> GameInterface for TuiInterface<B> {
    fn display(&mut self, text: &str) {
        self.set_message(text, MESSAGE_STYLE);
        self.draw_or_log();
    }

    fn prompt_letter(&mut self, prompt: &str) -> Option<String> {
        self.state = TuiState::EnteringGuess;
        self.status = prompt.to_string();
        loop {
            if self.draw().is_err() {
                info_log!("prompt_letter() - Draw failed, quitting");
                return None;
            }
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    info_log!("prompt_letter() - Input error: {}", e);
                    return None;
                }
            };
            match letter_key(&key) {
                LetterKey::Submit(c) => {
                    self.error_message.clear();
                    return Some(c.to_string());
                }
                LetterKey::Quit => return None,
                LetterKey::Ignore => {}
            }
        }
    }

    fn prompt_choice(&mut self, prompt: &str, options: &[&str]) -> Option<usize> {
        if options.is_empty() {
            return None;
        }
        self.options = options.iter().map(|o| (*o).to_string()).collect();
        self.state = TuiState::ChoosingCategory { selected: 0 };
        self.show_intro = false;
        self.status = prompt.to_string();

        let chosen = loop {
            if self.draw().is_err() {
                break None;
            }
            let TuiState::ChoosingCategory { selected } = self.state else {
                break None;
            };
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    info_log!("prompt_choice() - Input error: {}", e);
                    break None;
                }
            };
            match choice_key(&key, selected, options.len()) {
                ChoiceKey::Move(selected) => {
                    self.state = TuiState::ChoosingCategory { selected };
                }
                ChoiceKey::Select(index) => break Some(index),
                ChoiceKey::Cancel => break None,
                ChoiceKey::Ignore => {}
            }
        };
        self.options.clear();
        self.state = TuiState::Confirming;
        chosen
    }

    fn prompt_yes_no(&mut self, prompt: &str) -> bool {
        self.state = TuiState::Confirming;
        self.status = prompt.to_string();
        loop {
            if self.draw().is_err() {
                return false;
            }
            match self.next_key() {
                Ok(key) => {
                    if let Some(answer) = yes_no_key(&key) {
                        self.show_intro = false;
                        return answer;
                    }
                }
                Err(e) => {
                    info_log!("prompt_yes_no() - Input error: {}", e);
                    return false;
                }
            }
        }
    }

    fn display_intro(&mut self) {
        self.show_intro = true;
        self.draw_or_log();
    }

    fn display_category(&mut self, category: &Category) {
        self.category = Some(category.label.clone());
        self.set_message(format!("Let's guess a {}", category.label), MESSAGE_STYLE);
        self.draw_or_log();
    }

    fn display_board(&mut self, board: &BoardView) {
        self.board = Some(board.clone());
        self.error_message.clear();
        self.draw_or_log();
    }

    fn display_guess_result(&mut self, result: &GuessResult) {
        self.error_message = match result {
            GuessResult::Invalid => "Please enter a single letter.".to_string(),
            GuessResult::Duplicate(letter) => format!(
                "You've already guessed '{}'. Choose another one.",
                letter.to_ascii_uppercase()
            ),
            _ => return,
        };
        self.draw_or_log();
    }

    fn display_outcome(&mut self, outcome: Outcome, target: &str) {
        match outcome {
            Outcome::Win => self.set_message(format!("Hey you win! It was {target}."), SUCCESS_STYLE),
            Outcome::Loss => self.set_message(
                format!("Better luck next time! The word was {target}."),
                LOSS_STYLE,
            ),
        }
        self.draw_or_log();
    }

    fn display_replay(&mut self) {
        self.set_message("Good luck!", MESSAGE_STYLE);
        self.draw_or_log();
    }

    fn display_summary(&mut self, played: &[(String, Outcome)]) {
        self.summary = played
            .iter()
            .enumerate()
            .map(|(i, (word, outcome))| format!("{}. {} - {}", i + 1, word, outcome))
            .collect();
        self.summary.push("--- THE END ---".to_string());
        self.state = TuiState::Summary;
        self.status = "Game over".to_string();
        self.set_message("Nice to meet you. Goodbye!", MESSAGE_STYLE);
        self.draw_or_log();

        // Keep the summary on screen until the player has seen it.
        if self.owns_terminal {
            let _ = self.next_key();
        }
    }
}

impl<B: Backend> Drop for TuiInterface<B> {
    fn drop(&mut self) {
        if self.owns_terminal {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_tui() -> TuiInterface<TestBackend> {
        TuiInterface::with_terminal(Terminal::new(TestBackend::new(100, 30)).unwrap())
    }

    fn screen(tui: &TuiInterface<TestBackend>) -> String {
        let buffer = tui.terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_letter_key() {
        assert_eq!(letter_key(&key(KeyCode::Char('a'))), LetterKey::Submit('a'));
        assert_eq!(letter_key(&key(KeyCode::Char('7'))), LetterKey::Submit('7'));
        assert_eq!(letter_key(&key(KeyCode::Esc)), LetterKey::Quit);
        assert_eq!(
            letter_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            LetterKey::Quit
        );
        assert_eq!(
            letter_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)),
            LetterKey::Ignore
        );
        assert_eq!(letter_key(&key(KeyCode::Char('\u{FFFD}'))), LetterKey::Ignore);
        assert_eq!(letter_key(&key(KeyCode::Enter)), LetterKey::Ignore);
    }

    #[test]
    fn test_choice_key() {
        assert_eq!(choice_key(&key(KeyCode::Down), 0, 3), ChoiceKey::Move(1));
        assert_eq!(choice_key(&key(KeyCode::Down), 2, 3), ChoiceKey::Move(0));
        assert_eq!(choice_key(&key(KeyCode::Up), 0, 3), ChoiceKey::Move(2));
        assert_eq!(choice_key(&key(KeyCode::Enter), 1, 3), ChoiceKey::Select(1));
        assert_eq!(choice_key(&key(KeyCode::Char('3')), 0, 3), ChoiceKey::Select(2));
        assert_eq!(choice_key(&key(KeyCode::Char('4')), 0, 3), ChoiceKey::Ignore);
        assert_eq!(choice_key(&key(KeyCode::Char('0')), 0, 3), ChoiceKey::Cancel);
        assert_eq!(choice_key(&key(KeyCode::Esc), 0, 3), ChoiceKey::Cancel);
    }

    #[test]
    fn test_yes_no_key() {
        assert_eq!(yes_no_key(&key(KeyCode::Char('Y'))), Some(true));
        assert_eq!(yes_no_key(&key(KeyCode::Enter)), Some(true));
        assert_eq!(yes_no_key(&key(KeyCode::Char('n'))), Some(false));
        assert_eq!(yes_no_key(&key(KeyCode::Esc)), Some(false));
        assert_eq!(yes_no_key(&key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_renders_board_and_indicator() {
        let mut tui = test_tui();
        tui.display_category(&Category {
            name: "Cities".to_string(),
            label: "City".to_string(),
            words: vec!["Paris".to_string()],
        });
        tui.display_board(&BoardView {
            revealed: "__r__".to_string(),
            indicator: "¯\\_".to_string(),
            guessed: vec!['r', 'z', 'q', 'x'],
            failures: 3,
            max_failures: 10,
        });
        let text = screen(&tui);
        assert!(text.contains("SHRUGMAN - City"));
        assert!(text.contains(" R "));
        assert!(text.contains("Misses: 3/10"));
        assert!(text.contains("Guessed: R Z Q X"));
    }

    #[test]
    fn test_renders_guess_feedback() {
        let mut tui = test_tui();
        tui.display_guess_result(&GuessResult::Duplicate('p'));
        assert!(screen(&tui).contains("already guessed 'P'"));
        tui.display_guess_result(&GuessResult::Invalid);
        assert!(screen(&tui).contains("single letter"));
    }

    #[test]
    fn test_renders_summary_without_waiting() {
        let mut tui = test_tui();
        tui.display_summary(&[
            ("Paris".to_string(), Outcome::Win),
            ("Rome".to_string(), Outcome::Loss),
        ]);
        let text = screen(&tui);
        assert!(text.contains("1. Paris - Win"));
        assert!(text.contains("2. Rome - Loss"));
        assert!(text.contains("--- THE END ---"));
        assert!(text.contains("Press any key to exit"));
    }

    #[test]
    fn test_renders_intro() {
        let mut tui = test_tui();
        tui.display_intro();
        assert!(screen(&tui).contains(WELCOME_MESSAGE));
    }
}
