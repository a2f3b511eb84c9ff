//! Vocabulary and repeat-avoiding word selection

use std::collections::HashSet;

use serde::Serialize;

use super::rng::RandomSource;

/// Bundled word list (mixed case on purpose: matching is case-sensitive)
pub const VOCABULARY: &[&str] = &[
    "Punishing", "Keyboard", "Factory", "Conveyor", "Machine",
    "Typing", "Challenge", "Adventure", "Building", "Creative",
    "Platinum", "Thunder", "Whisper", "Gravity", "Diamond",
    "Spectrum", "Voltage", "Crystal", "Phantom", "Nebula",
    "Crimson", "Harmony", "Eclipse", "Breaker", "Zenith",
    "POWER", "swift", "QuickType", "BLAZE", "echo",
    "StarLight", "COSMIC", "puzzle", "MixCase", "rhythm",
];

/// A non-empty list of words that can be typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::bundled()
    }
}

impl Vocabulary {
    /// The bundled word list
    pub fn bundled() -> Self {
        Self {
            words: VOCABULARY.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// Build a custom vocabulary.
    ///
    /// Returns `None` for an empty list, or if any word is empty or contains
    /// whitespace (whitespace is reserved for separators).
    pub fn new<I, S>(words: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return None;
        }
        if let Some(bad) = words
            .iter()
            .find(|w| w.is_empty() || w.chars().any(char::is_whitespace))
        {
            log::warn!("Rejecting vocabulary: invalid word {:?}", bad);
            return None;
        }
        Some(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Redraws allowed before `pick_word` stops asking the source
const MAX_REDRAWS: usize = 256;

/// Draw a word uniformly, redrawing while the draw is in `excluded`.
///
/// If `excluded` already covers the whole vocabulary any draw is accepted.
/// A source that keeps landing on excluded indices (a short fixed script,
/// say) gets `MAX_REDRAWS` tries; after that the first free index at or
/// after the last draw is taken.
pub fn pick_word<'v, R: RandomSource + ?Sized>(
    vocabulary: &'v Vocabulary,
    excluded: &HashSet<usize>,
    rng: &mut R,
) -> (&'v str, usize) {
    let len = vocabulary.len();
    let saturated = excluded.len() >= len;
    let mut index = rng.index(len);
    let mut redraws = 0;
    while !saturated && excluded.contains(&index) {
        if redraws == MAX_REDRAWS {
            log::debug!("Word source stuck on excluded draws, scanning from {}", index);
            index = (1..len)
                .map(|offset| (index + offset) % len)
                .find(|i| !excluded.contains(i))
                .unwrap_or(index);
            break;
        }
        index = rng.index(len);
        redraws += 1;
    }
    (vocabulary.words[index].as_str(), index)
}

/// Word source with a full-cycle exclusion set
#[derive(Debug, Clone)]
pub struct WordSource {
    vocabulary: Vocabulary,
    excluded: HashSet<usize>,
}

impl WordSource {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            excluded: HashSet::new(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Indices drawn so far in the current cycle
    pub fn excluded(&self) -> &HashSet<usize> {
        &self.excluded
    }

    /// Draw the next word and record it.
    ///
    /// Once every index has been drawn the exclusion set clears, so the word
    /// that completed the cycle may come up again on the very next draw.
    pub fn draw<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> (String, usize) {
        let (word, index) = pick_word(&self.vocabulary, &self.excluded, rng);
        let word = word.to_string();
        self.excluded.insert(index);
        if self.excluded.len() >= self.vocabulary.len() {
            self.excluded.clear();
        }
        (word, index)
    }

    /// Start a fresh cycle
    pub fn reset(&mut self) {
        self.excluded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedSource, SeededSource};

    #[test]
    fn test_bundled_words_are_unique_and_typeable() {
        let vocab = Vocabulary::bundled();
        assert_eq!(vocab.len(), VOCABULARY.len());
        let unique: HashSet<&str> = vocab.iter().collect();
        assert_eq!(unique.len(), vocab.len(), "duplicate word in VOCABULARY");
        for word in vocab.iter() {
            assert!(!word.is_empty());
            assert!(word.chars().all(|c| c.is_ascii_alphabetic()), "{word}");
        }
    }

    #[test]
    fn test_custom_vocabulary_validation() {
        assert!(Vocabulary::new(Vec::<String>::new()).is_none());
        assert!(Vocabulary::new(["cat", ""]).is_none());
        assert!(Vocabulary::new(["two words"]).is_none());
        let vocab = Vocabulary::new(["cat", "dog"]).unwrap();
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.get(1), Some("dog"));
        assert_eq!(vocab.get(2), None);
    }

    #[test]
    fn test_pick_word_redraws_excluded() {
        let vocab = Vocabulary::new(["a", "b", "c"]).unwrap();
        let excluded: HashSet<usize> = [0, 1].into_iter().collect();
        let mut rng = ScriptedSource::new(vec![0, 1, 0, 2]);
        assert_eq!(pick_word(&vocab, &excluded, &mut rng), ("c", 2));
        assert_eq!(rng.taken(), 4);
    }

    #[test]
    fn test_pick_word_accepts_any_when_saturated() {
        let vocab = Vocabulary::new(["a", "b"]).unwrap();
        let excluded: HashSet<usize> = [0, 1].into_iter().collect();
        let mut rng = ScriptedSource::new(vec![1]);
        assert_eq!(pick_word(&vocab, &excluded, &mut rng), ("b", 1));
        assert_eq!(rng.taken(), 1);
    }

    #[test]
    fn test_pick_word_scans_past_a_stuck_source() {
        let vocab = Vocabulary::new(["a", "b", "c"]).unwrap();
        let excluded: HashSet<usize> = [0, 1].into_iter().collect();
        let mut rng = ScriptedSource::new(vec![0]);
        assert_eq!(pick_word(&vocab, &excluded, &mut rng), ("c", 2));
        assert_eq!(rng.taken(), MAX_REDRAWS + 1);
    }

    #[test]
    fn test_no_repeat_within_cycle() {
        let mut source = WordSource::new(Vocabulary::bundled());
        let mut rng = SeededSource::new(2024);
        let n = source.vocabulary().len();

        for _cycle in 0..3 {
            let mut seen = HashSet::new();
            for _ in 0..n {
                let (_, index) = source.draw(&mut rng);
                assert!(seen.insert(index), "index {index} repeated within a cycle");
            }
            assert_eq!(seen.len(), n);
            assert!(source.excluded().is_empty());
        }
    }

    #[test]
    fn test_cycle_closing_word_may_repeat_immediately() {
        let vocab = Vocabulary::new(["cat", "dog"]).unwrap();
        let mut source = WordSource::new(vocab);
        let mut rng = ScriptedSource::new(vec![0, 1, 1]);

        assert_eq!(source.draw(&mut rng).1, 0);
        // "dog" closes the cycle and clears the exclusion set...
        assert_eq!(source.draw(&mut rng).1, 1);
        assert!(source.excluded().is_empty());
        // ...so it is a legal first draw of the next cycle.
        assert_eq!(source.draw(&mut rng), ("dog".to_string(), 1));
    }

    #[test]
    fn test_single_word_vocabulary_never_stalls() {
        let mut source = WordSource::new(Vocabulary::new(["solo"]).unwrap());
        let mut rng = SeededSource::new(1);
        for _ in 0..5 {
            assert_eq!(source.draw(&mut rng).0, "solo");
        }
    }

    #[test]
    fn test_reset_clears_cycle() {
        let mut source = WordSource::new(Vocabulary::bundled());
        let mut rng = SeededSource::new(3);
        source.draw(&mut rng);
        source.draw(&mut rng);
        assert_eq!(source.excluded().len(), 2);
        source.reset();
        assert!(source.excluded().is_empty());
    }
}
