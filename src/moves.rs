// src/moves.rs
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::types::{PieceType, Square};

lazy_static! {
    static ref UCI_MOVE: Regex = Regex::new(r"^([a-h][1-8])([a-h][1-8])([qrbnQRBN])?$").unwrap();
}

// --- Move Representation ---
/// A requested or executed move in coordinate form. The null move (a pass)
/// is encoded as `from == to == a1` and prints as `0000`.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to, promotion: None }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: PieceType) -> Self {
        Move { from, to, promotion: Some(promotion) }
    }

    pub fn null() -> Self {
        Move { from: Square::A1, to: Square::A1, promotion: None }
    }

    pub fn is_null(&self) -> bool {
        *self == Move::null()
    }

    /// Coordinate notation, e.g. `e2e4`, `a7a8q`, or `0000` for a pass.
    pub fn uci(&self) -> String {
        if self.is_null() {
            return "0000".to_string();
        }
        match self.promotion {
            Some(p) => format!("{}{}{}", self.from, self.to, p.symbol()),
            None => format!("{}{}", self.from, self.to),
        }
    }

}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uci())
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "0000" {
            return Ok(Move::null());
        }
        let caps = UCI_MOVE
            .captures(trimmed)
            .ok_or_else(|| GameError::Parse(format!("invalid move notation '{}'", trimmed)))?;
        let from: Square = caps[1].parse()?;
        let to: Square = caps[2].parse()?;
        if from == to {
            return Err(GameError::Parse(format!("move '{}' does not change square", trimmed)));
        }
        let promotion = match caps.get(3) {
            Some(m) => m.as_str().chars().next().and_then(PieceType::from_symbol),
            None => None,
        };
        Ok(Move { from, to, promotion })
    }
}

/// Outcome of resolving a requested move against the true board.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub requested: Move,
    /// What was actually applied to the board.
    pub taken: Move,
    /// Square of the piece removed; differs from `taken.to` for en passant.
    pub capture_square: Option<Square>,
}

impl MoveOutcome {
    pub fn pass(requested: Move) -> Self {
        MoveOutcome { requested, taken: Move::null(), capture_square: None }
    }

    pub fn was_capture(&self) -> bool {
        self.capture_square.is_some()
    }
}
