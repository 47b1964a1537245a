use crate::game_state::GameState;
use crate::storage::GameStore;
use crate::wordbank::{WordPicker, pick_word};
use crate::{debug_log, info_log};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    Reset,
    Exit,
}

/// Front end driven by [`game_loop`]: observes the state and turns user input into actions.
pub trait GameInterface {
    fn display_state(&mut self, state: &GameState);

    /// Next action, or `None` if the input did not produce one.
    fn read_action(&mut self, state: &GameState) -> Option<UserAction>;

    fn display_exit_message(&mut self);
}

/// Owns the current game and keeps the store in step with it.
pub struct GameEngine<S, P> {
    state: GameState,
    store: S,
    picker: P,
}

impl<S: GameStore, P: WordPicker> GameEngine<S, P> {
    /// Restore the saved game, or start a new one if there is none.
    pub fn start(mut store: S, mut picker: P) -> Self {
        let state = match store.load() {
            Some(state) => {
                log::info!("Restored saved game ({} letters)", state.word_len());
                state
            }
            None => {
                log::info!("No usable saved game, starting a new one");
                GameState::new(pick_word(&mut picker))
            }
        };
        let mut engine = Self {
            state,
            store,
            picker,
        };
        engine.persist();
        engine
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply a guess. Returns `true` if the game changed.
    pub fn guess(&mut self, letter: char) -> bool {
        let next = self.state.apply_guess(letter);
        if next == self.state {
            debug_log!("guess() - '{}' ignored", letter);
            return false;
        }
        self.state = next;
        info_log!(
            "guess() - '{}' -> {} ({} tries left)",
            letter,
            self.state.masked_word(),
            self.state.tries()
        );
        if let Some(outcome) = self.state.outcome() {
            log::info!("Game over: {outcome:?}");
        }
        self.persist();
        true
    }

    /// Throw the current game away and start over with a new word.
    pub fn reset(&mut self) {
        self.state = GameState::new(pick_word(&mut self.picker));
        log::info!("New game started ({} letters)", self.state.word_len());
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            log::warn!("Could not save game, continuing in memory: {e}");
        }
    }
}

pub fn game_loop<S, P, I>(engine: &mut GameEngine<S, P>, interface: &mut I)
where
    S: GameStore,
    P: WordPicker,
    I: GameInterface + ?Sized,
{
    loop {
        interface.display_state(engine.state());
        match interface.read_action(engine.state()) {
            Some(UserAction::Guess(letter)) => {
                engine.guess(letter);
            }
            Some(UserAction::Reset) => engine.reset(),
            Some(UserAction::Exit) => {
                interface.display_exit_message();
                break;
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::INITIAL_TRIES;
    use crate::storage::{MemoryStore, StorageError, encode};
    use std::collections::VecDeque;
    use std::io;

    struct FixedPicker(usize);

    impl WordPicker for FixedPicker {
        fn pick_index(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    #[derive(Default)]
    struct FailingStore {
        attempts: usize,
    }

    impl GameStore for FailingStore {
        fn load(&mut self) -> Option<GameState> {
            None
        }

        fn save(&mut self, _state: &GameState) -> Result<(), StorageError> {
            self.attempts += 1;
            Err(io::Error::other("disk full").into())
        }
    }

    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        shown: Vec<GameState>,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: impl IntoIterator<Item = Option<UserAction>>) -> Self {
            Self {
                actions: actions.into_iter().collect(),
                shown: Vec::new(),
                exited: false,
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_state(&mut self, state: &GameState) {
            self.shown.push(state.clone());
        }

        fn read_action(&mut self, _state: &GameState) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    // FixedPicker(2) always picks DEMOO.
    fn demoo_engine() -> GameEngine<MemoryStore, FixedPicker> {
        GameEngine::start(MemoryStore::new(), FixedPicker(2))
    }

    #[test]
    fn test_start_without_save_picks_word_and_saves() {
        let engine = demoo_engine();
        assert_eq!(engine.state(), &GameState::new("DEMOO"));
        assert_eq!(engine.store().clone().load(), Some(GameState::new("DEMOO")));
    }

    #[test]
    fn test_start_restores_saved_game() {
        let saved = GameState::new("PUZZLE").apply_guess('Z').apply_guess('Q');
        let store = MemoryStore::with_record(encode(&saved).unwrap());
        let engine = GameEngine::start(store, FixedPicker(2));
        assert_eq!(engine.state(), &saved);
    }

    #[test]
    fn test_start_with_malformed_save_starts_fresh() {
        let store = MemoryStore::with_record(r#"{"chosenWord":"DEMOO"}"#);
        let mut engine = GameEngine::start(store, FixedPicker(5));
        assert_eq!(engine.state(), &GameState::new("PUZZLE"));
        // The recovery write replaced the bad record.
        assert_eq!(engine.store.load(), Some(GameState::new("PUZZLE")));
    }

    #[test]
    fn test_guess_persists_every_change() {
        let mut engine = demoo_engine();
        assert!(engine.guess('D'));
        assert!(engine.guess('Z'));
        let mut store = engine.store().clone();
        assert_eq!(store.load().as_ref(), Some(engine.state()));
        assert_eq!(engine.state().tries(), INITIAL_TRIES - 1);
    }

    #[test]
    fn test_ignored_guess_reports_no_change() {
        let mut engine = demoo_engine();
        assert!(engine.guess('D'));
        assert!(!engine.guess('D'));
        assert!(!engine.guess('d'));
        assert!(!engine.guess('#'));
    }

    #[test]
    fn test_reset_starts_clean_game() {
        let mut engine = demoo_engine();
        for c in "ABC".chars() {
            engine.guess(c);
        }
        assert!(engine.state().is_game_over());

        engine.picker = FixedPicker(6);
        engine.reset();
        let state = engine.state();
        assert_eq!(state.tries(), INITIAL_TRIES);
        assert!(state.used_letters().is_empty());
        assert!(!state.is_game_over());
        assert!(!state.has_won());
        assert_eq!(state.guessed_letters(), vec![None::<char>; "GAMING".len()].as_slice());
        assert_eq!(engine.store.load().as_ref(), Some(engine.state()));
    }

    #[test]
    fn test_save_failures_are_swallowed() {
        let mut engine = GameEngine::start(FailingStore::default(), FixedPicker(2));
        assert!(engine.guess('D'));
        engine.reset();
        assert_eq!(engine.store().attempts, 3);
        assert_eq!(engine.state().tries(), INITIAL_TRIES);
    }

    #[test]
    fn test_game_loop_dispatches_actions() {
        let mut engine = demoo_engine();
        let mut ui = ScriptedInterface::new([
            Some(UserAction::Guess('D')),
            None,
            Some(UserAction::Guess('E')),
            Some(UserAction::Guess('M')),
            Some(UserAction::Guess('O')),
            Some(UserAction::Exit),
        ]);
        game_loop(&mut engine, &mut ui);

        assert!(ui.exited);
        assert!(engine.state().has_won());
        assert_eq!(ui.shown.len(), 6);
        assert_eq!(ui.shown[0], GameState::new("DEMOO"));
    }

    #[test]
    fn test_game_loop_reset() {
        let mut engine = demoo_engine();
        let mut ui = ScriptedInterface::new([
            Some(UserAction::Guess('X')),
            Some(UserAction::Reset),
            Some(UserAction::Exit),
        ]);
        game_loop(&mut engine, &mut ui);
        assert_eq!(engine.state(), &GameState::new("DEMOO"));
    }
}
