// Translation of raw key presses into game actions.
// Both the physical keyboard and the on-screen one end up as `UserAction::Guess`.

use crate::engine::UserAction;
use crate::game_state::{ALPHABET, GameState};

/// Columns of the on-screen keyboard.
pub const KEYBOARD_COLUMNS: usize = 7;

/// Physical key press. Ignored entirely once the game is over.
#[must_use]
pub fn key_action(c: char, is_game_over: bool) -> Option<UserAction> {
    if is_game_over {
        return None;
    }
    Some(UserAction::Guess(c.to_ascii_uppercase()))
}

/// On-screen key press. Used letters are disabled.
#[must_use]
pub fn virtual_key_action(letter: char, state: &GameState) -> Option<UserAction> {
    if state.is_game_over() || state.is_letter_used(letter) {
        return None;
    }
    Some(UserAction::Guess(letter))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
}

/// Move the on-screen keyboard cursor, clamped to the alphabet.
#[must_use]
pub fn move_cursor(cursor: usize, direction: CursorMove) -> usize {
    let last = ALPHABET.len() - 1;
    match direction {
        CursorMove::Left => cursor.saturating_sub(1),
        CursorMove::Right => (cursor + 1).min(last),
        CursorMove::Up => cursor.checked_sub(KEYBOARD_COLUMNS).unwrap_or(cursor),
        CursorMove::Down => {
            let next = cursor + KEYBOARD_COLUMNS;
            if next <= last { next } else { cursor }
        }
    }
}
