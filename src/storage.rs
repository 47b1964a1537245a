//! Durable game storage.
//!
//! A game is stored as a single JSON record:
//!
//! ```json
//! {
//!   "chosenWord": "DEMOO",
//!   "guessedLetters": ["D", "", "", "O", "O"],
//!   "usedLetters": ["D", "Z", "O"],
//!   "tries": 2,
//!   "isGameOver": false,
//!   "hasWon": false
//! }
//! ```
//!
//! Loading never fails: a missing or malformed record is reported as "no saved game".

use crate::game_state::{GameState, INITIAL_TRIES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the durable record.
pub const STORAGE_KEY: &str = "hangmanGameState";

const APP_DIR: &str = "hangman";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedState {
    #[error("chosen word must be non-empty uppercase A-Z, got {0:?}")]
    BadWord(String),
    #[error("expected {expected} guessed slots, found {found}")]
    SlotCount { expected: usize, found: usize },
    #[error("slot {index} holds {value:?}, which does not match the word")]
    BadSlot { index: usize, value: String },
    #[error("{0:?} is not a single uppercase letter")]
    BadUsedLetter(String),
    #[error("revealed letters disagree with used letters at slot {0}")]
    RevealMismatch(usize),
    #[error("tries {0} exceeds the initial budget")]
    TooManyTries(u8),
    #[error("terminal flags are inconsistent with the board")]
    InconsistentFlags,
}

/// On-disk shape of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub chosen_word: String,
    pub guessed_letters: Vec<String>,
    pub used_letters: Vec<String>,
    pub tries: u8,
    pub is_game_over: bool,
    pub has_won: bool,
}

impl From<&GameState> for SavedGame {
    fn from(state: &GameState) -> Self {
        Self {
            chosen_word: state.chosen_word(),
            guessed_letters: state
                .guessed_letters()
                .iter()
                .map(|slot| slot.map(String::from).unwrap_or_default())
                .collect(),
            used_letters: state.used_letters().iter().map(|&c| c.to_string()).collect(),
            tries: state.tries(),
            is_game_over: state.is_game_over(),
            has_won: state.has_won(),
        }
    }
}

fn single_letter(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(c),
        _ => None,
    }
}

impl TryFrom<SavedGame> for GameState {
    type Error = MalformedState;

    fn try_from(saved: SavedGame) -> Result<Self, Self::Error> {
        let word: Vec<char> = saved.chosen_word.chars().collect();
        if word.is_empty() || !word.iter().all(char::is_ascii_uppercase) {
            return Err(MalformedState::BadWord(saved.chosen_word));
        }

        if saved.guessed_letters.len() != word.len() {
            return Err(MalformedState::SlotCount {
                expected: word.len(),
                found: saved.guessed_letters.len(),
            });
        }

        let mut used = Vec::with_capacity(saved.used_letters.len());
        for value in &saved.used_letters {
            let letter =
                single_letter(value).ok_or_else(|| MalformedState::BadUsedLetter(value.clone()))?;
            if !used.contains(&letter) {
                used.push(letter);
            }
        }

        let mut guessed = Vec::with_capacity(word.len());
        for (index, (value, &expected)) in saved.guessed_letters.iter().zip(&word).enumerate() {
            let slot = if value.is_empty() {
                None
            } else {
                match single_letter(value) {
                    Some(c) if c == expected => Some(c),
                    _ => {
                        return Err(MalformedState::BadSlot {
                            index,
                            value: value.clone(),
                        });
                    }
                }
            };
            if slot.is_some() != used.contains(&expected) {
                return Err(MalformedState::RevealMismatch(index));
            }
            guessed.push(slot);
        }

        if saved.tries > INITIAL_TRIES {
            return Err(MalformedState::TooManyTries(saved.tries));
        }

        let revealed = guessed.iter().all(Option::is_some);
        if saved.has_won != revealed || saved.is_game_over != (revealed || saved.tries == 0) {
            return Err(MalformedState::InconsistentFlags);
        }

        Ok(GameState::from_parts(
            word,
            guessed,
            used,
            saved.tries,
            saved.is_game_over,
            saved.has_won,
        ))
    }
}

/// Serialize a state to its JSON record.
pub fn encode(state: &GameState) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(&SavedGame::from(state))?)
}

/// Parse a JSON record, returning `None` when it is not a usable game.
pub fn decode(data: &str) -> Option<GameState> {
    let saved: SavedGame = match serde_json::from_str(data) {
        Ok(saved) => saved,
        Err(e) => {
            log::warn!("Ignoring unreadable saved game: {e}");
            return None;
        }
    };
    match GameState::try_from(saved) {
        Ok(state) => Some(state),
        Err(e) => {
            log::warn!("Ignoring malformed saved game: {e}");
            None
        }
    }
}

/// Persistence seam used by the engine.
pub trait GameStore {
    /// Previously saved game, or `None` when there is none or it cannot be used.
    fn load(&mut self) -> Option<GameState>;

    fn save(&mut self, state: &GameState) -> Result<(), StorageError>;
}

/// Stores the game as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `<local data dir>/hangman/hangmanGameState.json`, if the platform has one.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join(format!("{STORAGE_KEY}.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GameStore for FileStore {
    fn load(&mut self) -> Option<GameState> {
        match fs::read_to_string(&self.path) {
            Ok(data) => decode(&data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No saved game at {}", self.path.display());
                None
            }
            Err(e) => {
                log::warn!("Could not read saved game {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&mut self, state: &GameState) -> Result<(), StorageError> {
        let json = encode(state)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        log::debug!("Saved game to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the JSON record in memory; used for `--no-save` and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw record, as if it had been written earlier.
    #[must_use]
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
        }
    }

    #[must_use]
    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl GameStore for MemoryStore {
    fn load(&mut self) -> Option<GameState> {
        self.record.as_deref().and_then(decode)
    }

    fn save(&mut self, state: &GameState) -> Result<(), StorageError> {
        self.record = Some(encode(state)?);
        Ok(())
    }
}
