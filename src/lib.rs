// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod game_state;
pub mod input;
pub mod logging;
pub mod storage;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{GameEngine, GameInterface, UserAction, game_loop};
pub use game_state::{ALPHABET, GameState, INITIAL_TRIES, Outcome};
pub use storage::{FileStore, GameStore, MemoryStore, STORAGE_KEY, StorageError};
pub use wordbank::{RngPicker, VOCABULARY, WordPicker, pick_word};
