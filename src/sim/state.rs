//! Session state and controller
//!
//! Everything a running game owns lives in `Session`: the belt, counters,
//! archived colors, the queue builder and the random source.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::belt::{BallColor, Belt};
use super::builder::QueueBuilder;
use super::rng::{RandomSource, SeededSource};
use super::words::Vocabulary;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Belt built, waiting for the game to start
    #[default]
    Idle,
    /// Keys are matched against the belt
    Active,
    /// Key handling suspended
    Paused,
}

impl GamePhase {
    pub fn accepts_input(&self) -> bool {
        *self == GamePhase::Active
    }
}

/// Session counters, reset together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u64,
    pub errors: u32,
    pub words_completed: u32,
}

/// Colors of completed words.
///
/// Only the most recent `ARCHIVE_DISPLAY_CAP` are retained; `total` keeps
/// counting every archived color.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ColorArchive {
    recent: VecDeque<BallColor>,
    total: u64,
}

impl ColorArchive {
    pub fn extend(&mut self, colors: impl IntoIterator<Item = BallColor>) {
        for color in colors {
            self.recent.push_back(color);
            self.total += 1;
        }
        while self.recent.len() > ARCHIVE_DISPLAY_CAP {
            self.recent.pop_front();
        }
    }

    /// Retained colors, oldest first
    pub fn recent(&self) -> impl Iterator<Item = BallColor> + '_ {
        self.recent.iter().copied()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.total = 0;
    }
}

/// Events emitted by the matcher for the presentation layer (sound, splash, smoke)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A unit was consumed
    Correct { color: BallColor, separator: bool },
    /// A letter was mistyped
    Incorrect { expected: char, typed: char },
    /// A word's last letter was typed
    WordCompleted { word: u32, letters: usize },
}

/// A single game session
#[derive(Debug, Clone)]
pub struct Session<R = SeededSource> {
    pub(crate) rng: R,
    pub(crate) builder: QueueBuilder,
    pub(crate) belt: Belt,
    pub(crate) stats: SessionStats,
    pub(crate) archive: ColorArchive,
    pub(crate) phase: GamePhase,
    pub(crate) events: VecDeque<GameEvent>,
}

impl Session<SeededSource> {
    /// Create a session over the bundled vocabulary with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_source(Vocabulary::bundled(), SeededSource::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Create an idle session with a freshly built belt
    pub fn with_source(vocabulary: Vocabulary, rng: R) -> Self {
        let mut session = Self {
            rng,
            builder: QueueBuilder::new(vocabulary),
            belt: Belt::new(),
            stats: SessionStats::default(),
            archive: ColorArchive::default(),
            phase: GamePhase::Idle,
            events: VecDeque::new(),
        };
        session.rebuild();
        session
    }

    pub fn belt(&self) -> &Belt {
        &self.belt
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn archive(&self) -> &ColorArchive {
        &self.archive
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.builder.source().vocabulary()
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Begin matching keys (no-op unless idle)
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Active;
            log::info!("Session started");
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Active {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Active;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Active => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::Idle => {}
        }
    }

    /// Zero counters, clear the archive, rebuild the belt and resume play
    pub fn reset(&mut self) {
        self.stats = SessionStats::default();
        self.archive.clear();
        self.events.clear();
        self.rebuild();
        self.phase = GamePhase::Active;
        log::info!("Session reset ({} units queued)", self.belt.len());
    }

    /// Take the events emitted since the last drain.
    ///
    /// Front ends drain once per key. Only the newest `EVENT_QUEUE_CAP`
    /// events are kept for a caller that never drains.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_QUEUE_CAP {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn rebuild(&mut self) {
        self.builder.reset();
        self.belt.clear();
        self.builder.extend(&mut self.belt, &mut self.rng, BUFFER_WORDS);
        self.builder.refill(&mut self.belt, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedSource;

    #[test]
    fn test_new_session_is_idle_with_buffer() {
        let session = Session::new(12345);
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.belt().cursor(), 0);
        assert!(session.belt().words().len() >= BUFFER_WORDS);
        assert_eq!(session.stats(), SessionStats::default());
        assert!(session.archive().is_empty());
        assert_eq!(session.rng().seed(), 12345);
    }

    #[test]
    fn test_phase_transitions() {
        let mut session = Session::new(1);
        session.toggle_pause();
        assert_eq!(session.phase(), GamePhase::Idle);

        session.start();
        assert_eq!(session.phase(), GamePhase::Active);
        session.toggle_pause();
        assert!(session.is_paused());
        session.start();
        assert!(session.is_paused());
        session.toggle_pause();
        assert_eq!(session.phase(), GamePhase::Active);
    }

    #[test]
    fn test_same_seed_same_belt() {
        let a = Session::new(99999);
        let b = Session::new(99999);
        assert_eq!(a.belt().units(), b.belt().units());
        assert_eq!(a.belt().words(), b.belt().words());
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut session = Session::new(4);
        session.start();
        for _ in 0..EVENT_QUEUE_CAP + 10 {
            session.emit(GameEvent::Incorrect { expected: 'a', typed: 'b' });
        }
        session.emit(GameEvent::WordCompleted { word: 7, letters: 3 });

        let events = session.drain_events();
        assert_eq!(events.len(), EVENT_QUEUE_CAP);
        assert_eq!(events.last(), Some(&GameEvent::WordCompleted { word: 7, letters: 3 }));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_stuck_script_still_builds_belt() {
        let vocab = Vocabulary::new(["cat", "dog"]).unwrap();
        let session = Session::with_source(vocab, ScriptedSource::new(vec![0]));
        assert!(session.belt().pending_text().starts_with("cat dog cat dog"));
        assert!(session.belt().words_ahead() >= BUFFER_WORDS);
    }

    #[test]
    fn test_archive_caps_display_but_counts_all() {
        let mut archive = ColorArchive::default();
        archive.extend(std::iter::repeat_n(BallColor::Red, ARCHIVE_DISPLAY_CAP));
        archive.extend([BallColor::Blue, BallColor::Green]);

        assert_eq!(archive.total(), ARCHIVE_DISPLAY_CAP as u64 + 2);
        let recent: Vec<BallColor> = archive.recent().collect();
        assert_eq!(recent.len(), ARCHIVE_DISPLAY_CAP);
        assert_eq!(recent[recent.len() - 2..], [BallColor::Blue, BallColor::Green]);

        archive.clear();
        assert!(archive.is_empty());
        assert_eq!(archive.recent().count(), 0);
    }
}
