//! Input matcher
//!
//! Matches one key event against the unit at the cursor. Each call runs to
//! completion; the belt and counters are only touched here and by the
//! session controller.

use super::belt::{BallColor, UnitKind};
use super::rng::RandomSource;
use super::state::{GameEvent, Session};
use crate::consts::*;
use crate::key_char;

/// Result of handling a single key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a single character, not active, or a non-space key on a separator
    Ignored,
    /// The unit at the cursor was consumed
    Correct {
        color: BallColor,
        word_completed: bool,
    },
    /// The key did not match the letter at the cursor
    Incorrect,
}

/// Process one key event (`KeyboardEvent.key` style name)
pub fn handle_key<R: RandomSource>(session: &mut Session<R>, key: &str) -> KeyOutcome {
    if !session.phase.accepts_input() {
        return KeyOutcome::Ignored;
    }
    let Some(typed) = key_char(key) else {
        return KeyOutcome::Ignored;
    };
    let Some(unit) = session.belt.current().copied() else {
        return KeyOutcome::Ignored;
    };

    let outcome = match unit.kind {
        UnitKind::Separator => {
            if typed != ' ' {
                return KeyOutcome::Ignored;
            }
            session.belt.advance();
            session.emit(GameEvent::Correct {
                color: unit.color,
                separator: true,
            });
            KeyOutcome::Correct {
                color: unit.color,
                word_completed: false,
            }
        }
        UnitKind::Letter(expected) if expected == typed => {
            session.belt.advance();
            session.stats.score += POINTS_PER_LETTER;
            session.emit(GameEvent::Correct {
                color: unit.color,
                separator: false,
            });
            let word_completed = unit.word.is_some_and(|w| complete_word(session, w));
            KeyOutcome::Correct {
                color: unit.color,
                word_completed,
            }
        }
        UnitKind::Letter(expected) => {
            session.stats.errors += 1;
            session.emit(GameEvent::Incorrect { expected, typed });
            return KeyOutcome::Incorrect;
        }
    };

    session.builder.refill(&mut session.belt, &mut session.rng);
    outcome
}

/// Award the word bonus and archive colors if the cursor just passed the
/// word's last letter
fn complete_word<R: RandomSource>(session: &mut Session<R>, word: u32) -> bool {
    let Some(entry) = session.belt.complete_word(word) else {
        return false;
    };
    let range = entry.range();
    let letters = entry.len();
    log::debug!("Word {} completed: {:?}", word, entry.text);

    session.stats.words_completed += 1;
    session.stats.score += WORD_BONUS;
    let colors = session.belt.units()[range].iter().map(|u| u.color);
    session.archive.extend(colors);
    session.emit(GameEvent::WordCompleted { word, letters });
    true
}
