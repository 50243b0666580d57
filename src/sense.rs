// src/sense.rs
use crate::bitboard::{Squares, INTERIOR};
use crate::board::Board;
use crate::error::{GameError, Result};
use crate::types::{Piece, Square};

/// Nine `(square, occupant)` pairs: the row above the sensed square first,
/// then its own row, then the row below, each row a-to-h.
pub type SenseResult = Vec<(Square, Option<Piece>)>;

/// The 36 squares whose 3x3 window lies fully on the board, ascending.
pub fn valid_senses() -> Vec<Square> {
    Squares(INTERIOR).collect()
}

pub fn is_valid_sense(square: Square) -> bool {
    INTERIOR & square.bb() != 0
}

/// Reveals the 3x3 block centred on `square`. Reads the board only.
pub fn sense(board: &Board, square: Square) -> Result<SenseResult> {
    if !is_valid_sense(square) {
        return Err(GameError::InvalidSense { square });
    }
    let mut result = Vec::with_capacity(9);
    for dr in [1i8, 0, -1] {
        for df in [-1i8, 0, 1] {
            // Interior squares always have all eight neighbours.
            if let Some(sq) = square.offset(df, dr) {
                result.push((sq, board.piece_at(sq)));
            }
        }
    }
    log::trace!("sense {} -> {:?}", square, result);
    Ok(result)
}
