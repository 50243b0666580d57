// src/error.rs
use std::io;
use thiserror::Error;

use crate::moves::Move;
use crate::types::{Color, Square};

pub type Result<T> = std::result::Result<T, GameError>;

/// Errors raised by the game engine. Every validation failure is reported
/// before any state is touched.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("cannot sense {square}: only the 36 interior squares may be sensed")]
    InvalidSense { square: Square },

    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: Move, reason: String },

    #[error("out of turn: {reason}")]
    OutOfTurn { reason: String },

    #[error("{color} has run out of time")]
    TimeExpired { color: Color },

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GameError {
    pub(crate) fn invalid_move(mv: Move, reason: impl Into<String>) -> Self {
        GameError::InvalidMove { mv, reason: reason.into() }
    }

    pub(crate) fn out_of_turn(reason: impl Into<String>) -> Self {
        GameError::OutOfTurn { reason: reason.into() }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN board '{0}'")]
    Board(String),
    #[error("invalid FEN side to move '{0}'")]
    Turn(String),
    #[error("invalid FEN castling rights '{0}'")]
    Castling(String),
    #[error("invalid FEN en passant square '{0}'")]
    EnPassant(String),
    #[error("invalid FEN move counter '{0}'")]
    Counter(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error with config file '{0}': {1}")]
    Io(String, #[source] io::Error),
    #[error("config parse error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}
