// src/history.rs
use serde::Serialize;

use crate::moves::{Move, MoveOutcome};
use crate::types::{Color, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub requested: Move,
    pub taken: Move,
    pub capture_square: Option<Square>,
}

impl From<MoveOutcome> for MoveRecord {
    fn from(outcome: MoveOutcome) -> Self {
        MoveRecord { requested: outcome.requested, taken: outcome.taken, capture_square: outcome.capture_square }
    }
}

/// What each side did, one entry per completed turn. A turn without a
/// sense records `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameHistory {
    senses: [Vec<Option<Square>>; 2],
    moves: [Vec<MoveRecord>; 2],
}

impl GameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_turn(&mut self, color: Color, sense: Option<Square>, outcome: MoveOutcome) {
        self.senses[color.index()].push(sense);
        self.moves[color.index()].push(outcome.into());
    }

    pub fn senses(&self, color: Color) -> &[Option<Square>] {
        &self.senses[color.index()]
    }

    pub fn moves(&self, color: Color) -> &[MoveRecord] {
        &self.moves[color.index()]
    }

    pub fn turns(&self, color: Color) -> usize {
        self.moves[color.index()].len()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
