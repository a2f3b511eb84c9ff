//! Belt Typer - a conveyor-belt typing game
//!
//! Core modules:
//! - `sim`: Deterministic game core (word queue, belt, input matching)
//! - `feedback`: Transient splash/smoke pulses observed from game events
//! - `snapshot`: Read-only view handed to the presentation layer
//! - `settings`: Runtime configuration
//! - `audio`: Web Audio feedback sounds (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod feedback;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use feedback::Feedback;
pub use settings::Settings;
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Points for each correctly typed letter
    pub const POINTS_PER_LETTER: u64 = 10;
    /// Bonus points when a word is finished
    pub const WORD_BONUS: u64 = 50;

    /// Words queued when a session starts
    pub const BUFFER_WORDS: usize = 4;
    /// Words appended per refill
    pub const REFILL_WORDS: usize = 2;
    /// Refill once the cursor is this many units from the last word's start
    pub const REFILL_MARGIN: usize = 50;

    /// Completed-word colors retained for display
    pub const ARCHIVE_DISPLAY_CAP: usize = 60;

    /// Undrained events kept by a session; the oldest are dropped past this
    pub const EVENT_QUEUE_CAP: usize = 256;

    /// Balls visible on the belt at once
    pub const VISIBLE_COUNT: usize = 14;

    /// Splash pulse after a correct letter (ms)
    pub const SPLASH_DURATION_MS: f64 = 400.0;
    /// Smoke pulse after a mistake (ms)
    pub const SMOKE_DURATION_MS: f64 = 1200.0;
}

/// Interpret a key name as a single typed character.
///
/// Browser key names like `"Shift"` or `"ArrowLeft"` are longer than one
/// character and yield `None`.
#[inline]
pub fn key_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
