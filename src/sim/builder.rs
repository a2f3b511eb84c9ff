//! Queue builder: expands drawn words into belt units and keeps the belt topped up

use super::belt::{BallColor, Belt, Unit, UnitKind, WordEntry};
use super::rng::RandomSource;
use super::words::{Vocabulary, WordSource};
use crate::consts::*;

/// Owns the word source and the unit/word counters for one session
#[derive(Debug, Clone)]
pub struct QueueBuilder {
    source: WordSource,
    next_unit_id: u32,
    next_word_index: u32,
}

impl QueueBuilder {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            source: WordSource::new(vocabulary),
            next_unit_id: 0,
            next_word_index: 0,
        }
    }

    pub fn source(&self) -> &WordSource {
        &self.source
    }

    /// Clear the exclusion set and restart unit/word numbering
    pub fn reset(&mut self) {
        self.source.reset();
        self.next_unit_id = 0;
        self.next_word_index = 0;
    }

    fn next_unit_id(&mut self) -> u32 {
        let id = self.next_unit_id;
        self.next_unit_id += 1;
        id
    }

    /// Append `count` words to the belt and return their entries.
    ///
    /// Every word after the first on the belt is preceded by a separator.
    pub fn extend<R: RandomSource + ?Sized>(
        &mut self,
        belt: &mut Belt,
        rng: &mut R,
        count: usize,
    ) -> Vec<WordEntry> {
        let mut added = Vec::with_capacity(count);

        for _ in 0..count {
            if !belt.is_empty() {
                let id = self.next_unit_id();
                belt.push_unit(Unit {
                    id,
                    kind: UnitKind::Separator,
                    consumed: false,
                    color: BallColor::Slate,
                    word: None,
                });
            }

            let (text, _) = self.source.draw(rng);
            let index = self.next_word_index;
            self.next_word_index += 1;

            let start = belt.len();
            for c in text.chars() {
                let id = self.next_unit_id();
                let color = BallColor::PALETTE[rng.index(BallColor::PALETTE.len())];
                belt.push_unit(Unit {
                    id,
                    kind: UnitKind::Letter(c),
                    consumed: false,
                    color,
                    word: Some(index),
                });
            }

            let entry = WordEntry {
                text,
                index,
                start,
                end: belt.len(),
                completed: false,
            };
            belt.push_word(entry.clone());
            added.push(entry);
        }

        added
    }

    /// Apply the refill policy, returning the number of words appended
    pub fn refill<R: RandomSource + ?Sized>(&mut self, belt: &mut Belt, rng: &mut R) -> usize {
        let mut appended = 0;
        while needs_refill(belt) {
            appended += self.extend(belt, rng, REFILL_WORDS).len();
        }
        if appended > 0 {
            log::debug!(
                "Refilled belt with {} words ({} units total)",
                appended,
                belt.len()
            );
        }
        appended
    }
}

/// True when the cursor is within `REFILL_MARGIN` units of the last word's
/// start, or fewer than `BUFFER_WORDS` words remain ahead of it
pub fn needs_refill(belt: &Belt) -> bool {
    match belt.last_word() {
        None => true,
        Some(last) => {
            belt.cursor() + REFILL_MARGIN >= last.start || belt.words_ahead() < BUFFER_WORDS
        }
    }
}
