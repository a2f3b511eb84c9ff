//! Belt data model: units (balls), word entries and the cursor

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Ball color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallColor {
    Blue,
    Red,
    Green,
    /// Separator balls only
    Slate,
}

impl BallColor {
    /// Colors letter balls are drawn from
    pub const PALETTE: [BallColor; 3] = [BallColor::Blue, BallColor::Red, BallColor::Green];

    /// CSS color
    pub fn hex(&self) -> &'static str {
        match self {
            BallColor::Blue => "#3b82f6",
            BallColor::Red => "#ef4444",
            BallColor::Green => "#22c55e",
            BallColor::Slate => "#94a3b8",
        }
    }
}

/// What a unit asks the player to type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    /// A letter of a word, matched case-sensitively
    Letter(char),
    /// Word boundary, requires a space
    Separator,
}

/// One ball on the belt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u32,
    pub kind: UnitKind,
    pub consumed: bool,
    pub color: BallColor,
    /// Index of the owning word entry (`None` for separators)
    pub word: Option<u32>,
}

impl Unit {
    pub fn is_separator(&self) -> bool {
        self.kind == UnitKind::Separator
    }

    pub fn letter(&self) -> Option<char> {
        match self.kind {
            UnitKind::Letter(c) => Some(c),
            UnitKind::Separator => None,
        }
    }

    /// Character that consumes this unit
    pub fn expected(&self) -> char {
        self.letter().unwrap_or(' ')
    }
}

/// A word placed on the belt, occupying units `start..end`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub text: String,
    /// Sequential word number within the session
    pub index: u32,
    pub start: usize,
    pub end: usize,
    pub completed: bool,
}

impl WordEntry {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Append-only sequence of units plus the cursor.
///
/// Units before the cursor are consumed, units at or after it are not.
#[derive(Debug, Clone, Default)]
pub struct Belt {
    units: Vec<Unit>,
    words: Vec<WordEntry>,
    cursor: usize,
}

impl Belt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Word entries, ordered by word index
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit awaiting input
    pub fn current(&self) -> Option<&Unit> {
        self.units.get(self.cursor)
    }

    pub fn word(&self, index: u32) -> Option<&WordEntry> {
        self.words.get(index as usize)
    }

    pub fn last_word(&self) -> Option<&WordEntry> {
        self.words.last()
    }

    /// Words not yet fully passed by the cursor
    pub fn words_ahead(&self) -> usize {
        self.words
            .iter()
            .rev()
            .take_while(|w| w.end > self.cursor)
            .count()
    }

    /// Units from the cursor to the end of the belt
    pub fn remaining(&self) -> &[Unit] {
        &self.units[self.cursor..]
    }

    /// Text still to be typed, with separators rendered as spaces
    pub fn pending_text(&self) -> String {
        self.remaining().iter().map(Unit::expected).collect()
    }

    pub(crate) fn push_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    pub(crate) fn push_word(&mut self, entry: WordEntry) {
        debug_assert_eq!(entry.index as usize, self.words.len());
        self.words.push(entry);
    }

    /// Consume the unit at the cursor and step past it
    pub(crate) fn advance(&mut self) -> Option<Unit> {
        let unit = self.units.get_mut(self.cursor)?;
        unit.consumed = true;
        let unit = *unit;
        self.cursor += 1;
        Some(unit)
    }

    /// Mark a word completed once the cursor sits on its end.
    ///
    /// Returns the entry only on the first completion.
    pub(crate) fn complete_word(&mut self, index: u32) -> Option<&WordEntry> {
        let cursor = self.cursor;
        let entry = self.words.get_mut(index as usize)?;
        if entry.completed || entry.end != cursor {
            return None;
        }
        entry.completed = true;
        Some(&*entry)
    }

    pub(crate) fn clear(&mut self) {
        self.units.clear();
        self.words.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn belt_with(word: &str) -> Belt {
        let mut belt = Belt::new();
        for (i, c) in word.chars().enumerate() {
            belt.push_unit(Unit {
                id: i as u32,
                kind: UnitKind::Letter(c),
                consumed: false,
                color: BallColor::Blue,
                word: Some(0),
            });
        }
        belt.push_word(WordEntry {
            text: word.to_string(),
            index: 0,
            start: 0,
            end: word.chars().count(),
            completed: false,
        });
        belt
    }

    #[test]
    fn test_advance_consumes_in_order() {
        let mut belt = belt_with("ab");
        assert_eq!(belt.current().and_then(Unit::letter), Some('a'));

        let unit = belt.advance().unwrap();
        assert!(unit.consumed);
        assert_eq!(belt.cursor(), 1);
        assert!(belt.units()[0].consumed);
        assert!(!belt.units()[1].consumed);

        belt.advance();
        assert_eq!(belt.cursor(), 2);
        assert!(belt.current().is_none());
        assert!(belt.advance().is_none());
        assert_eq!(belt.cursor(), 2);
    }

    #[test]
    fn test_complete_word_only_at_end_and_once() {
        let mut belt = belt_with("ab");
        belt.advance();
        assert!(belt.complete_word(0).is_none());
        belt.advance();
        assert_eq!(belt.complete_word(0).map(WordEntry::len), Some(2));
        assert!(belt.complete_word(0).is_none());
        assert!(belt.word(0).unwrap().completed);
    }

    #[test]
    fn test_words_ahead_and_pending_text() {
        let mut belt = belt_with("hi");
        assert_eq!(belt.words_ahead(), 1);
        assert_eq!(belt.pending_text(), "hi");
        belt.advance();
        assert_eq!(belt.pending_text(), "i");
        belt.advance();
        assert_eq!(belt.words_ahead(), 0);
        assert_eq!(belt.pending_text(), "");
    }

    #[test]
    fn test_palette_hex() {
        assert_eq!(BallColor::PALETTE.len(), 3);
        assert_eq!(BallColor::Green.hex(), "#22c55e");
        assert!(!BallColor::PALETTE.contains(&BallColor::Slate));
    }
}
