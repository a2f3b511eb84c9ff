//! Transient visual feedback
//!
//! Splash (correct letter) and smoke (mistake) pulses decay on their own
//! timeline, advanced by the frame loop. Nothing here feeds back into the
//! game core.

use serde::Serialize;

use crate::consts::{SMOKE_DURATION_MS, SPLASH_DURATION_MS};
use crate::sim::{BallColor, GameEvent};

#[derive(Debug, Clone, Serialize)]
pub struct Feedback {
    enabled: bool,
    /// Last splash color (the machine keeps dripping it while idle)
    splash_color: BallColor,
    splash_ms: f64,
    smoke_ms: f64,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Feedback {
    /// `enabled = false` suppresses pulses (reduced motion)
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            splash_color: BallColor::Green,
            splash_ms: 0.0,
            smoke_ms: 0.0,
        }
    }

    /// React to a game event. A new pulse restarts its timer.
    pub fn observe(&mut self, event: &GameEvent) {
        if !self.enabled {
            return;
        }
        match *event {
            GameEvent::Correct {
                color,
                separator: false,
            } => {
                self.splash_color = color;
                self.splash_ms = SPLASH_DURATION_MS;
            }
            GameEvent::Incorrect { .. } => self.smoke_ms = SMOKE_DURATION_MS,
            _ => {}
        }
    }

    /// Advance pulse timers. Returns true if a pulse ended this step.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        let was = (self.splash_active(), self.smoking());
        self.splash_ms = (self.splash_ms - dt_ms).max(0.0);
        self.smoke_ms = (self.smoke_ms - dt_ms).max(0.0);
        was != (self.splash_active(), self.smoking())
    }

    pub fn splash_active(&self) -> bool {
        self.splash_ms > 0.0
    }

    pub fn splash_color(&self) -> BallColor {
        self.splash_color
    }

    pub fn smoking(&self) -> bool {
        self.smoke_ms > 0.0
    }

    /// Drop any running pulses
    pub fn clear(&mut self) {
        self.splash_ms = 0.0;
        self.smoke_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRECT: GameEvent = GameEvent::Correct {
        color: BallColor::Red,
        separator: false,
    };
    const WRONG: GameEvent = GameEvent::Incorrect {
        expected: 'a',
        typed: 'b',
    };

    #[test]
    fn test_splash_decays() {
        let mut fb = Feedback::default();
        fb.observe(&CORRECT);
        assert!(fb.splash_active());
        assert_eq!(fb.splash_color(), BallColor::Red);

        assert!(!fb.advance(SPLASH_DURATION_MS - 1.0));
        assert!(fb.splash_active());
        assert!(fb.advance(1.0));
        assert!(!fb.splash_active());
        // Color sticks after the pulse ends
        assert_eq!(fb.splash_color(), BallColor::Red);
    }

    #[test]
    fn test_smoke_outlasts_splash() {
        let mut fb = Feedback::default();
        fb.observe(&CORRECT);
        fb.observe(&WRONG);
        fb.advance(SPLASH_DURATION_MS);
        assert!(!fb.splash_active());
        assert!(fb.smoking());
        fb.advance(SMOKE_DURATION_MS);
        assert!(!fb.smoking());
    }

    #[test]
    fn test_new_pulse_restarts_timer() {
        let mut fb = Feedback::default();
        fb.observe(&WRONG);
        fb.advance(SMOKE_DURATION_MS - 100.0);
        fb.observe(&WRONG);
        fb.advance(200.0);
        assert!(fb.smoking());
    }

    #[test]
    fn test_separator_and_disabled_do_not_splash() {
        let mut fb = Feedback::default();
        fb.observe(&GameEvent::Correct {
            color: BallColor::Slate,
            separator: true,
        });
        assert!(!fb.splash_active());

        let mut quiet = Feedback::new(false);
        quiet.observe(&CORRECT);
        quiet.observe(&WRONG);
        assert!(!quiet.splash_active());
        assert!(!quiet.smoking());
    }
}
