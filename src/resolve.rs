// src/resolve.rs
//! Turns a requested move into the move that actually happens on the true
//! board. Sliders stop at the first piece in their way, pawns auto-promote,
//! and en passant reports the square of the pawn it removes.

use log::{debug, trace};

use crate::bitboard::{line_step, KING_ATTACKS, KNIGHT_ATTACKS};
use crate::board::{Board, CastleSide};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::moves::{Move, MoveOutcome};
use crate::types::{Color, Piece, PieceType, Square};

/// Resolves `requested` for the side to move. Reads the board only; the
/// caller commits `taken`.
pub fn resolve_move(board: &Board, requested: &Move, config: &GameConfig) -> Result<MoveOutcome> {
    if requested.is_null() {
        return Ok(MoveOutcome::pass(*requested));
    }

    let color = board.turn;
    let piece = match board.piece_at(requested.from) {
        Some(p) if p.color == color => p,
        Some(_) => return Err(GameError::invalid_move(*requested, "the piece on the from square is not yours")),
        None => return Err(GameError::invalid_move(*requested, "there is no piece on the from square")),
    };

    if piece.kind != PieceType::Pawn && requested.promotion.is_some() {
        return Err(GameError::invalid_move(*requested, "only pawns promote"));
    }

    let outcome = match piece.kind {
        PieceType::Bishop | PieceType::Rook | PieceType::Queen => resolve_slide(board, requested, piece),
        PieceType::Knight => resolve_step(board, requested, KNIGHT_ATTACKS[requested.from.index()], "knight"),
        PieceType::King => match board.castle_side(requested) {
            Some(side) => resolve_castle(board, requested, side, config),
            None => resolve_step(board, requested, KING_ATTACKS[requested.from.index()], "king"),
        },
        PieceType::Pawn => resolve_pawn(board, requested, color),
    }?;

    debug!(
        "resolved {} {} -> taken {} capture {:?}",
        color, outcome.requested, outcome.taken, outcome.capture_square
    );
    Ok(outcome)
}

fn resolve_slide(board: &Board, requested: &Move, piece: Piece) -> Result<MoveOutcome> {
    let (from, to) = (requested.from, requested.to);
    let (df, dr, diagonal) = line_step(from, to)
        .ok_or_else(|| GameError::invalid_move(*requested, "not on a straight or diagonal line"))?;
    let shape_ok = match piece.kind {
        PieceType::Bishop => diagonal,
        PieceType::Rook => !diagonal,
        _ => true,
    };
    if !shape_ok {
        return Err(GameError::invalid_move(*requested, format!("{:?} cannot move in that direction", piece.kind)));
    }

    let own = board.occupied_by(piece.color);
    let opp = board.occupied_by(piece.color.opponent());
    let distance = from.file().abs_diff(to.file()).max(from.rank().abs_diff(to.rank())) as i8;

    let mut last_empty: Option<Square> = None;
    for step in 1..=distance {
        let Some(sq) = from.offset(df * step, dr * step) else { break };
        trace!("slide {} via {}", requested, sq);
        if opp & sq.bb() != 0 {
            return Ok(MoveOutcome { requested: *requested, taken: Move::new(from, sq), capture_square: Some(sq) });
        }
        if own & sq.bb() != 0 {
            return match last_empty {
                Some(stop) => Ok(MoveOutcome { requested: *requested, taken: Move::new(from, stop), capture_square: None }),
                None => Err(GameError::invalid_move(*requested, "blocked by your own piece")),
            };
        }
        last_empty = Some(sq);
    }
    Ok(MoveOutcome { requested: *requested, taken: Move::new(from, to), capture_square: None })
}

fn resolve_step(board: &Board, requested: &Move, pattern: u64, name: &str) -> Result<MoveOutcome> {
    let to = requested.to;
    if pattern & to.bb() == 0 {
        return Err(GameError::invalid_move(*requested, format!("not a {} move", name)));
    }
    let color = board.turn;
    if board.occupied_by(color) & to.bb() != 0 {
        return Err(GameError::invalid_move(*requested, "destination holds your own piece"));
    }
    let capture_square = (board.occupied_by(color.opponent()) & to.bb() != 0).then_some(to);
    Ok(MoveOutcome { requested: *requested, taken: Move::new(requested.from, to), capture_square })
}

fn resolve_pawn(board: &Board, requested: &Move, color: Color) -> Result<MoveOutcome> {
    let (from, to) = (requested.from, requested.to);
    let forward = color.forward();
    let (start_rank, last_rank) = match color { Color::White => (1, 7), Color::Black => (6, 0) };

    let promotion = if to.rank() == last_rank {
        Some(PieceType::Queen)
    } else if requested.promotion.is_some() {
        return Err(GameError::invalid_move(*requested, "promotion is only possible on the last rank"));
    } else {
        None
    };
    let taken = Move { from, to, promotion };

    let df = to.file() as i8 - from.file() as i8;
    let dr = to.rank() as i8 - from.rank() as i8;
    let occupied = board.occupied();

    if df == 0 && dr == forward {
        if occupied & to.bb() != 0 {
            return Err(GameError::invalid_move(*requested, "the square in front of the pawn is occupied"));
        }
        return Ok(MoveOutcome { requested: *requested, taken, capture_square: None });
    }

    if df == 0 && dr == 2 * forward && from.rank() == start_rank {
        let mid = from.offset(0, forward).map_or(0, |sq| sq.bb());
        if occupied & (mid | to.bb()) != 0 {
            return Err(GameError::invalid_move(*requested, "the pawn's path is occupied"));
        }
        return Ok(MoveOutcome { requested: *requested, taken, capture_square: None });
    }

    if df.abs() == 1 && dr == forward {
        if board.occupied_by(color.opponent()) & to.bb() != 0 {
            return Ok(MoveOutcome { requested: *requested, taken, capture_square: Some(to) });
        }
        if board.en_passant_square == Some(to) {
            let victim = Square::from_coords(to.file(), from.rank());
            if board.piece_at(victim) == Some(Piece::new(PieceType::Pawn, color.opponent())) {
                return Ok(MoveOutcome { requested: *requested, taken, capture_square: Some(victim) });
            }
        }
        return Err(GameError::invalid_move(*requested, "a pawn only moves diagonally to capture"));
    }

    Err(GameError::invalid_move(*requested, "not a pawn move"))
}

fn resolve_castle(board: &Board, requested: &Move, side: CastleSide, config: &GameConfig) -> Result<MoveOutcome> {
    let color = board.turn;
    if !board.castling_rights.has(color, side) {
        return Err(GameError::invalid_move(*requested, "that castling right is gone"));
    }
    if board.piece_at(side.rook_from(color)) != Some(Piece::new(PieceType::Rook, color)) {
        return Err(GameError::invalid_move(*requested, "the castling rook is not on its home square"));
    }
    if board.occupied() & side.between(color) != 0 {
        return Err(GameError::invalid_move(*requested, "pieces stand between king and rook"));
    }
    if config.castling_requires_safe_path {
        if let Some(sq) = side.king_path(color).into_iter().find(|&sq| board.is_square_attacked(sq, color.opponent())) {
            return Err(GameError::invalid_move(*requested, format!("the king would cross attacked square {}", sq)));
        }
    }
    Ok(MoveOutcome { requested: *requested, taken: *requested, capture_square: None })
}
