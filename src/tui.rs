//! TUI (Terminal User Interface) module for Hangman
//!
//! Full-screen front end built on Ratatui.
//!
//! # Input
//! - Letter keys guess directly (ignored once the game is over)
//! - Arrow keys move over the on-screen keyboard, ENTER/SPACE presses the highlighted key
//! - On the game-over screen N or ENTER starts a new game
//! - ESC quits

use crate::engine::{GameInterface, UserAction};
use crate::game_state::{ALPHABET, GameState, INITIAL_TRIES, Outcome};
use crate::input::{CursorMove, KEYBOARD_COLUMNS, key_action, move_cursor, virtual_key_action};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const DEBUG_STYLE: Style = Style::new().fg(Color::DarkGray);

#[derive(Clone, Copy, PartialEq, Debug)]
enum KeyState {
    Available,
    Used,
}

impl KeyState {
    fn colors(self, selected: bool) -> (Color, Color) {
        match (self, selected) {
            (Self::Available, false) => (Color::DarkGray, Color::White),
            (Self::Available, true) => (Color::Cyan, Color::Black),
            (Self::Used, false) => (Color::Black, Color::Gray),
            (Self::Used, true) => (Color::Gray, Color::Black),
        }
    }
}

/// Main TUI interface component.
///
/// Keeps a snapshot of the last displayed game for rendering and owns the
/// on-screen keyboard cursor.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: Option<GameState>,
    cursor: usize,
    show_word: bool,
    status: String,
}

impl TuiInterface {
    pub fn new(show_word: bool) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            state: None,
            cursor: 0,
            show_word,
            status: "Ready".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let Some(state) = self.state.as_ref() else {
            return Ok(());
        };
        let cursor = self.cursor;
        let show_word = self.show_word;
        let status = self.status.as_str();

        self.terminal.draw(|f| {
            Self::render(f, state, cursor, show_word, status);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render(f: &mut Frame, state: &GameState, cursor: usize, show_word: bool, status: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Tries
                Constraint::Min(10),   // Board or game over
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_tries(f, chunks[1], state, show_word);
        if state.is_game_over() {
            Self::render_game_over(f, chunks[2], state);
        } else {
            Self::render_board(f, chunks[2], state, cursor);
        }
        Self::render_status(f, chunks[3], status);
        Self::render_instructions(f, chunks[4], state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_tries(f: &mut Frame, area: Rect, state: &GameState, show_word: bool) {
        let mut spans = vec![Span::styled(
            format!("Tries left: {}/{INITIAL_TRIES}", state.tries()),
            INFO_STYLE,
        )];
        if show_word {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("Word: {}", state.chosen_word()),
                DEBUG_STYLE,
            ));
        }
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_board(f: &mut Frame, area: Rect, state: &GameState, cursor: usize) {
        let rows = ALPHABET.len().div_ceil(KEYBOARD_COLUMNS);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Word
                Constraint::Length(rows as u16 + 2), // Keyboard
                Constraint::Min(3), // Used letters
            ])
            .split(area);

        let word = Paragraph::new(Line::from(Span::styled(
            state.masked_word_with("  "),
            WORD_STYLE,
        )))
        .alignment(Alignment::Center)
        .block(Block::default().title("Word").borders(Borders::ALL));
        f.render_widget(word, chunks[0]);

        Self::render_keyboard(f, chunks[1], state, cursor);
        Self::render_used_letters(f, chunks[2], state);
    }

    fn render_keyboard(f: &mut Frame, area: Rect, state: &GameState, cursor: usize) {
        let lines: Vec<Line> = ALPHABET
            .chunks(KEYBOARD_COLUMNS)
            .enumerate()
            .map(|(row, letters)| {
                let mut spans = Vec::new();
                for (col, &letter) in letters.iter().enumerate() {
                    let key_state = if state.is_letter_used(letter) {
                        KeyState::Used
                    } else {
                        KeyState::Available
                    };
                    let selected = row * KEYBOARD_COLUMNS + col == cursor;
                    let (bg, fg) = key_state.colors(selected);
                    spans.push(Span::styled(
                        format!(" {letter} "),
                        Style::default().fg(fg).bg(bg),
                    ));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Keyboard").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_used_letters(f: &mut Frame, area: Rect, state: &GameState) {
        let paragraph = Paragraph::new(state.used_letters_text())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Used letters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_game_over(f: &mut Frame, area: Rect, state: &GameState) {
        let banner = match state.outcome() {
            Some(Outcome::Won) => Span::styled("You won! 🎉", SUCCESS_STYLE),
            _ => Span::styled("You lost!", ERROR_STYLE),
        };
        let lines = vec![
            Line::from(""),
            Line::from(banner),
            Line::from(""),
            Line::from(vec![
                Span::raw("The word was: "),
                Span::styled(state.chosen_word(), WORD_STYLE),
            ]),
            Line::from(""),
            Line::from("Press N to play again"),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Game Over").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &GameState) {
        let text = if state.is_game_over() {
            "N / ENTER: New game | ESC: Quit"
        } else {
            "Type a letter | ARROWS + ENTER: On-screen keyboard | ESC: Quit"
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let paragraph = Paragraph::new(status)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self, state: &GameState) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                debug_log!(
                    "handle_input() - Key event: code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                if state.is_game_over() {
                    Ok(game_over_action(key))
                } else {
                    Ok(self.handle_playing_input(key, state))
                }
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_playing_input(&mut self, key: KeyEvent, state: &GameState) -> Option<UserAction> {
        match playing_key(key, state, self.cursor) {
            PlayingKey::Action(action) => {
                if let UserAction::Guess(letter) = action
                    && state.is_letter_used(letter)
                {
                    self.status = format!("{letter} has already been used");
                }
                Some(action)
            }
            PlayingKey::Disabled(letter) => {
                self.status = format!("{letter} has already been used");
                None
            }
            PlayingKey::Move(direction) => {
                self.cursor = move_cursor(self.cursor, direction);
                self.draw_or_log();
                None
            }
            PlayingKey::Ignored => {
                debug_log!("handle_playing_input() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }
}

/// What a key press means while a game is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayingKey {
    Action(UserAction),
    /// The highlighted on-screen key was already used.
    Disabled(char),
    Move(CursorMove),
    Ignored,
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

fn playing_key(key: KeyEvent, state: &GameState, cursor: usize) -> PlayingKey {
    match key.code {
        KeyCode::Esc => PlayingKey::Action(UserAction::Exit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            PlayingKey::Action(UserAction::Exit)
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            let letter = ALPHABET[cursor];
            virtual_key_action(letter, state)
                .map_or(PlayingKey::Disabled(letter), PlayingKey::Action)
        }
        KeyCode::Char(c) if !has_modifier_keys(&key) => key_action(c, state.is_game_over())
            .map_or(PlayingKey::Ignored, PlayingKey::Action),
        KeyCode::Left => PlayingKey::Move(CursorMove::Left),
        KeyCode::Right => PlayingKey::Move(CursorMove::Right),
        KeyCode::Up => PlayingKey::Move(CursorMove::Up),
        KeyCode::Down => PlayingKey::Move(CursorMove::Down),
        _ => PlayingKey::Ignored,
    }
}

fn game_over_action(key: KeyEvent) -> Option<UserAction> {
    match key.code {
        KeyCode::Char('n' | 'N') | KeyCode::Enter => Some(UserAction::Reset),
        KeyCode::Esc | KeyCode::Char('q') => Some(UserAction::Exit),
        _ => None,
    }
}

impl GameInterface for TuiInterface {
    fn display_state(&mut self, state: &GameState) {
        let previous = self.state.replace(state.clone());
        let new_game = previous
            .as_ref()
            .is_none_or(|p| p.is_game_over() && !state.is_game_over());
        if new_game {
            self.cursor = 0;
        }
        self.status = match state.outcome() {
            Some(Outcome::Won) => "Game over - you won".to_string(),
            Some(Outcome::Lost) => "Game over - out of tries".to_string(),
            None if new_game => format!("New game - {} letters", state.word_len()),
            None if previous.as_ref() == Some(state) => self.status.clone(),
            None => format!("{} tries left", state.tries()),
        };
        self.draw_or_log();
    }

    fn read_action(&mut self, state: &GameState) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input(state) {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(_e) => {
                    info_log!("read_action() - Error handling input, returning Exit");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn lost_game() -> GameState {
        "ABC"
            .chars()
            .fold(GameState::new("PUZZLE"), |s, c| s.apply_guess(c))
    }

    #[test]
    fn test_game_over_keys() {
        assert_eq!(game_over_action(press(KeyCode::Char('n'))), Some(UserAction::Reset));
        assert_eq!(game_over_action(press(KeyCode::Char('N'))), Some(UserAction::Reset));
        assert_eq!(game_over_action(press(KeyCode::Enter)), Some(UserAction::Reset));
        assert_eq!(game_over_action(press(KeyCode::Char('q'))), Some(UserAction::Exit));
        assert_eq!(game_over_action(press(KeyCode::Esc)), Some(UserAction::Exit));
        assert_eq!(game_over_action(press(KeyCode::Char('a'))), None);
    }

    #[test]
    fn test_letter_keys_guess_uppercase() {
        let state = GameState::new("DEMOO");
        assert_eq!(
            playing_key(press(KeyCode::Char('d')), &state, 0),
            PlayingKey::Action(UserAction::Guess('D'))
        );
    }

    #[test]
    fn test_letter_keys_with_modifiers_ignored() {
        let state = GameState::new("DEMOO");
        let alt_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::ALT);
        assert_eq!(playing_key(alt_d, &state, 0), PlayingKey::Ignored);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            playing_key(ctrl_c, &state, 0),
            PlayingKey::Action(UserAction::Exit)
        );
    }

    #[test]
    fn test_enter_presses_highlighted_key() {
        let state = GameState::new("DEMOO");
        // Cursor 3 is 'D'.
        assert_eq!(
            playing_key(press(KeyCode::Enter), &state, 3),
            PlayingKey::Action(UserAction::Guess('D'))
        );
        assert_eq!(
            playing_key(press(KeyCode::Char(' ')), &state, 25),
            PlayingKey::Action(UserAction::Guess('Z'))
        );
    }

    #[test]
    fn test_used_on_screen_key_is_disabled() {
        let state = GameState::new("DEMOO").apply_guess('D');
        assert_eq!(
            playing_key(press(KeyCode::Enter), &state, 3),
            PlayingKey::Disabled('D')
        );
    }

    #[test]
    fn test_arrow_keys_move_cursor() {
        let state = GameState::new("DEMOO");
        assert_eq!(
            playing_key(press(KeyCode::Down), &state, 0),
            PlayingKey::Move(CursorMove::Down)
        );
        assert_eq!(
            playing_key(press(KeyCode::Left), &state, 0),
            PlayingKey::Move(CursorMove::Left)
        );
        assert_eq!(playing_key(press(KeyCode::Tab), &state, 0), PlayingKey::Ignored);
    }

    #[test]
    fn test_letter_keys_ignored_after_game_over() {
        assert_eq!(
            playing_key(press(KeyCode::Char('p')), &lost_game(), 0),
            PlayingKey::Ignored
        );
    }
}
