//! Read-only view of a session for the presentation layer

use serde::Serialize;

use crate::feedback::Feedback;
use crate::sim::{RandomSource, Session, SessionStats, Unit};

/// One ball as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitView {
    pub id: u32,
    pub index: usize,
    /// `None` for separators
    pub letter: Option<char>,
    pub separator: bool,
    pub consumed: bool,
    /// At the cursor
    pub active: bool,
    pub color: &'static str,
}

impl UnitView {
    fn new(index: usize, unit: &Unit, cursor: usize) -> Self {
        Self {
            id: unit.id,
            index,
            letter: unit.letter(),
            separator: unit.is_separator(),
            consumed: unit.consumed,
            active: index == cursor,
            color: unit.color.hex(),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub units: Vec<UnitView>,
    pub cursor: usize,
    pub stats: SessionStats,
    pub paused: bool,
    pub started: bool,
    pub splash_active: bool,
    pub splash_color: &'static str,
    pub smoking: bool,
    /// Most recent completed-word colors, oldest first
    pub archive: Vec<&'static str>,
    pub archived_total: u64,
}

impl Snapshot {
    /// Snapshot with every unit on the belt
    pub fn capture<R: RandomSource>(session: &Session<R>, feedback: &Feedback) -> Self {
        let len = session.belt().len();
        Self::window(session, feedback, len, len)
    }

    /// Snapshot with at most `behind` consumed units and `ahead` units from
    /// the cursor onward
    pub fn window<R: RandomSource>(
        session: &Session<R>,
        feedback: &Feedback,
        behind: usize,
        ahead: usize,
    ) -> Self {
        let belt = session.belt();
        let cursor = belt.cursor();
        let start = cursor.saturating_sub(behind);
        let end = cursor.saturating_add(ahead).min(belt.len());

        let units = belt.units()[start..end]
            .iter()
            .enumerate()
            .map(|(offset, unit)| UnitView::new(start + offset, unit, cursor))
            .collect();

        Self {
            units,
            cursor,
            stats: session.stats(),
            paused: session.is_paused(),
            started: session.phase() != crate::sim::GamePhase::Idle,
            splash_active: feedback.splash_active(),
            splash_color: feedback.splash_color().hex(),
            smoking: feedback.smoking(),
            archive: session.archive().recent().map(|c| c.hex()).collect(),
            archived_total: session.archive().total(),
        }
    }

    pub fn to_json(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Failed to serialize snapshot: {}", e);
                None
            }
        }
    }
}
