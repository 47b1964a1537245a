/// Wrong guesses allowed before the game is lost.
pub const INITIAL_TRIES: u8 = 3;

pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Snapshot of one game session.
///
/// Only [`GameState::apply_guess`] produces a modified state; everything else
/// either builds a fresh game or reads from it.
///
/// Used letters are kept in the order they were guessed, but two states are
/// equal whenever they hold the same set of used letters.
#[derive(Clone, Debug)]
pub struct GameState {
    chosen_word: Vec<char>,
    guessed_letters: Vec<Option<char>>,
    used_letters: Vec<char>,
    tries: u8,
    is_game_over: bool,
    has_won: bool,
}

impl GameState {
    /// Start a fresh game around `word`. The word is expected to be uppercase ASCII.
    #[must_use]
    pub fn new(word: &str) -> Self {
        let chosen_word: Vec<char> = word.chars().collect();
        Self {
            guessed_letters: vec![None; chosen_word.len()],
            chosen_word,
            used_letters: Vec::new(),
            tries: INITIAL_TRIES,
            is_game_over: false,
            has_won: false,
        }
    }

    /// Rebuild a state from already validated parts (see `storage`).
    pub(crate) fn from_parts(
        chosen_word: Vec<char>,
        guessed_letters: Vec<Option<char>>,
        used_letters: Vec<char>,
        tries: u8,
        is_game_over: bool,
        has_won: bool,
    ) -> Self {
        Self {
            chosen_word,
            guessed_letters,
            used_letters,
            tries,
            is_game_over,
            has_won,
        }
    }

    /// Apply a single letter guess and return the resulting state.
    ///
    /// Anything that is not an uppercase `A-Z`, a letter already tried, or any
    /// guess after the game has ended leaves the state untouched.
    #[must_use]
    pub fn apply_guess(&self, letter: char) -> Self {
        if self.is_game_over
            || !letter.is_ascii_uppercase()
            || self.used_letters.contains(&letter)
        {
            return self.clone();
        }

        let mut next = self.clone();
        next.used_letters.push(letter);

        if next.chosen_word.contains(&letter) {
            for (slot, &c) in next.guessed_letters.iter_mut().zip(&next.chosen_word) {
                if c == letter {
                    *slot = Some(letter);
                }
            }
        } else {
            next.tries = next.tries.saturating_sub(1);
            if next.tries == 0 {
                next.is_game_over = true;
                next.has_won = false;
            }
        }

        // Win is checked last so it overrides an exhausted budget.
        if next.is_fully_revealed() {
            next.is_game_over = true;
            next.has_won = true;
        }

        next
    }

    #[must_use]
    pub fn chosen_word(&self) -> String {
        self.chosen_word.iter().collect()
    }

    #[must_use]
    pub fn word_len(&self) -> usize {
        self.chosen_word.len()
    }

    pub(crate) fn word_chars(&self) -> &[char] {
        &self.chosen_word
    }

    #[must_use]
    pub fn guessed_letters(&self) -> &[Option<char>] {
        &self.guessed_letters
    }

    /// Used letters in guess order.
    #[must_use]
    pub fn used_letters(&self) -> &[char] {
        &self.used_letters
    }

    /// Used letters separated by spaces, or `None yet`.
    #[must_use]
    pub fn used_letters_text(&self) -> String {
        if self.used_letters.is_empty() {
            return "None yet".to_string();
        }
        self.used_letters
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn is_letter_used(&self, letter: char) -> bool {
        self.used_letters.contains(&letter)
    }

    #[must_use]
    pub fn tries(&self) -> u8 {
        self.tries
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.has_won
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match (self.is_game_over, self.has_won) {
            (false, _) => None,
            (true, true) => Some(Outcome::Won),
            (true, false) => Some(Outcome::Lost),
        }
    }

    #[must_use]
    pub fn is_fully_revealed(&self) -> bool {
        self.guessed_letters.iter().all(Option::is_some)
    }

    /// Revealed word with `_` for hidden positions, e.g. `D _ _ O O`.
    #[must_use]
    pub fn masked_word(&self) -> String {
        self.masked_word_with(" ")
    }

    #[must_use]
    pub fn masked_word_with(&self, separator: &str) -> String {
        self.guessed_letters
            .iter()
            .map(|slot| slot.unwrap_or('_').to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.chosen_word == other.chosen_word
            && self.guessed_letters == other.guessed_letters
            && self.tries == other.tries
            && self.is_game_over == other.is_game_over
            && self.has_won == other.has_won
            && self.used_letters.len() == other.used_letters.len()
            && self
                .used_letters
                .iter()
                .all(|c| other.used_letters.contains(c))
    }
}

impl Eq for GameState {}
