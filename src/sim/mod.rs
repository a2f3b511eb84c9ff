//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through an injected `RandomSource`
//! - One key event processed to completion at a time
//! - No rendering, audio, or platform dependencies

pub mod belt;
pub mod builder;
pub mod matcher;
pub mod rng;
pub mod state;
pub mod words;

pub use belt::{BallColor, Belt, Unit, UnitKind, WordEntry};
pub use builder::{QueueBuilder, needs_refill};
pub use matcher::{KeyOutcome, handle_key};
pub use rng::{RandomSource, ScriptedSource, SeededSource};
pub use state::{ColorArchive, GameEvent, GamePhase, Session, SessionStats};
pub use words::{VOCABULARY, Vocabulary, WordSource, pick_word};
