use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Words a game can be played with. Uppercase ASCII, never empty.
pub const VOCABULARY: &[&str] = &[
    "EXAMPLE", "SAMPLEE", "DEMOO", "TESTIING", "WORDLEE", "PUZZLE", "GAMING",
];

/// Source of uniformly distributed indices used to choose a word.
pub trait WordPicker {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// [`WordPicker`] backed by any `rand` generator.
pub struct RngPicker<R> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<StdRng> {
    /// Deterministic picker; the same seed always yields the same words.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> WordPicker for RngPicker<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Choose a word from [`VOCABULARY`].
pub fn pick_word<P: WordPicker + ?Sized>(picker: &mut P) -> &'static str {
    let index = picker.pick_index(VOCABULARY.len()) % VOCABULARY.len();
    VOCABULARY[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPicker(usize);

    impl WordPicker for FixedPicker {
        fn pick_index(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn test_vocabulary_is_uppercase_words() {
        assert!(!VOCABULARY.is_empty());
        for word in VOCABULARY {
            assert!(!word.is_empty());
            assert!(
                word.chars().all(|c| c.is_ascii_uppercase()),
                "'{word}' is not uppercase A-Z"
            );
        }
    }

    #[test]
    fn test_pick_word_uses_picker_index() {
        assert_eq!(pick_word(&mut FixedPicker(0)), "EXAMPLE");
        assert_eq!(pick_word(&mut FixedPicker(2)), "DEMOO");
        assert_eq!(pick_word(&mut FixedPicker(6)), "GAMING");
    }

    #[test]
    fn test_pick_word_wraps_out_of_range_index() {
        assert_eq!(pick_word(&mut FixedPicker(VOCABULARY.len())), "EXAMPLE");
    }

    #[test]
    fn test_seeded_picker_is_deterministic() {
        let mut a = RngPicker::seeded(42);
        let mut b = RngPicker::seeded(42);
        for _ in 0..20 {
            assert_eq!(pick_word(&mut a), pick_word(&mut b));
        }
    }

    #[test]
    fn test_rng_picker_stays_in_vocabulary() {
        let mut picker = RngPicker::from_entropy();
        for _ in 0..100 {
            let index = picker.pick_index(VOCABULARY.len());
            assert!(index < VOCABULARY.len());
        }
    }
}
