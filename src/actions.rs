// src/actions.rs
use crate::bitboard::{pawn_attacks, Squares};
use crate::board::{push_pawn_move, Board};
use crate::moves::Move;
use crate::types::PieceType;

/// Every move the side to move may attempt, derived only from what that
/// side knows: its own pieces, castling rights and the en passant target.
///
/// Moves are generated on a copy of the board with the opponent removed,
/// so sliders may aim past hidden pieces, and every forward-diagonal pawn
/// move is offered whether or not anything stands there. The result is a
/// superset of the true pseudo-legal moves and always contains the null
/// move. Sorted, no duplicates.
pub fn valid_moves(board: &Board) -> Vec<Move> {
    let color = board.turn;
    let mut own_view = board.clone();
    own_view.clear_color(color.opponent());

    let mut moves = own_view.generate_pseudo_legal_moves();

    let own = board.occupied_by(color);
    for from in Squares(board.pieces(PieceType::Pawn, color)) {
        for to in Squares(pawn_attacks(from, color) & !own) {
            push_pawn_move(from, to, &mut moves);
        }
    }

    moves.push(Move::null());
    moves.sort();
    moves.dedup();
    moves
}
