// src/lib.rs
//! Local engine for Reconnaissance Blind Chess: the true board, sensing,
//! the set of moves a side may attempt, resolution of an attempted move into
//! the move actually played, and per-side clocks.

pub mod actions;
pub mod bitboard;
pub mod board;
pub mod bots;
pub mod clock;
pub mod config;
pub mod error;
pub mod fen;
pub mod game;
pub mod history;
pub mod moves;
pub mod player;
pub mod resolve;
pub mod sense;
pub mod types;

pub use actions::valid_moves;
pub use board::{Board, CastleSide, CastlingRights};
pub use bots::RandomBot;
pub use clock::TurnClock;
pub use config::GameConfig;
pub use error::{ConfigError, FenError, GameError, Result};
pub use game::{GameStatus, LocalGame, WinReason};
pub use history::{GameHistory, MoveRecord};
pub use moves::{Move, MoveOutcome};
pub use player::{play_local_game, MatchResult, Player};
pub use resolve::resolve_move;
pub use sense::{sense, valid_senses, SenseResult};
pub use types::{Color, Piece, PieceType, Square};
