// src/bitboard.rs
use lazy_static::lazy_static;

use crate::types::{Color, Square};

// --- Bitboard Constants ---
pub const FILE_A: u64 = 0x0101010101010101;
pub const FILE_B: u64 = FILE_A << 1;
pub const FILE_G: u64 = FILE_A << 6;
pub const FILE_H: u64 = FILE_A << 7;

pub const RANK_1: u64 = 0x00000000000000FF;
pub const RANK_2: u64 = RANK_1 << 8;
pub const RANK_7: u64 = RANK_1 << 48;
pub const RANK_8: u64 = RANK_1 << 56;

const NOT_FILE_A: u64 = !FILE_A;
const NOT_FILE_B: u64 = !FILE_B;
const NOT_FILE_G: u64 = !FILE_G;
const NOT_FILE_H: u64 = !FILE_H;
const NOT_RANK_1: u64 = !RANK_1;
const NOT_RANK_2: u64 = !RANK_2;
const NOT_RANK_7: u64 = !RANK_7;
const NOT_RANK_8: u64 = !RANK_8;

/// Files b-g on ranks 2-7: the squares whose 3x3 window stays on the board.
pub const INTERIOR: u64 = !(FILE_A | FILE_H | RANK_1 | RANK_8);

// (dr, df, is_diagonal)
pub const DIRECTIONS: &[(i8, i8, bool)] = &[
    ( 1,  0, false), ( -1,  0, false), ( 0,  1, false), ( 0, -1, false),
    ( 1,  1, true),  ( 1, -1, true),  (-1,  1, true),  (-1, -1, true),
];

// --- Precomputed Attack Tables ---
lazy_static! {
    pub static ref KNIGHT_ATTACKS: [u64; 64] = compute_knight_attacks();
    pub static ref KING_ATTACKS: [u64; 64] = compute_king_attacks();
}

fn compute_knight_attacks() -> [u64; 64] {
    let mut attacks = [0u64; 64];
    for (sq, entry) in attacks.iter_mut().enumerate() {
        let from_bb = 1u64 << sq;
        let mut moves: u64 = 0;
        // Masks keep jumps from wrapping across the a/h files
        moves |= (from_bb & NOT_FILE_H & NOT_RANK_7 & NOT_RANK_8).wrapping_shl(17); // 2 up, 1 right
        moves |= (from_bb & NOT_FILE_A & NOT_RANK_7 & NOT_RANK_8).wrapping_shl(15); // 2 up, 1 left
        moves |= (from_bb & NOT_FILE_G & NOT_FILE_H & NOT_RANK_8).wrapping_shl(10); // 1 up, 2 right
        moves |= (from_bb & NOT_FILE_A & NOT_FILE_B & NOT_RANK_8).wrapping_shl(6);  // 1 up, 2 left
        moves |= (from_bb & NOT_FILE_A & NOT_RANK_1 & NOT_RANK_2).wrapping_shr(17); // 2 down, 1 left
        moves |= (from_bb & NOT_FILE_H & NOT_RANK_1 & NOT_RANK_2).wrapping_shr(15); // 2 down, 1 right
        moves |= (from_bb & NOT_FILE_A & NOT_FILE_B & NOT_RANK_1).wrapping_shr(10); // 1 down, 2 left
        moves |= (from_bb & NOT_FILE_G & NOT_FILE_H & NOT_RANK_1).wrapping_shr(6);  // 1 down, 2 right
        *entry = moves;
    }
    attacks
}

fn compute_king_attacks() -> [u64; 64] {
    let mut attacks = [0u64; 64];
    for (sq, entry) in attacks.iter_mut().enumerate() {
        let from_bb = 1u64 << sq;
        let mut moves: u64 = 0;
        moves |= (from_bb & NOT_FILE_A & NOT_RANK_8).wrapping_shl(7); // up-left
        moves |= (from_bb              & NOT_RANK_8).wrapping_shl(8); // up
        moves |= (from_bb & NOT_FILE_H & NOT_RANK_8).wrapping_shl(9); // up-right
        moves |= (from_bb & NOT_FILE_A             ).wrapping_shr(1); // left
        moves |= (from_bb & NOT_FILE_H             ).wrapping_shl(1); // right
        moves |= (from_bb & NOT_FILE_A & NOT_RANK_1).wrapping_shr(9); // down-left
        moves |= (from_bb              & NOT_RANK_1).wrapping_shr(8); // down
        moves |= (from_bb & NOT_FILE_H & NOT_RANK_1).wrapping_shr(7); // down-right
        *entry = moves;
    }
    attacks
}

/// Squares a pawn of `color` on `from` attacks (its forward diagonals).
#[inline]
pub fn pawn_attacks(from: Square, color: Color) -> u64 {
    let bb = from.bb();
    match color {
        Color::White => ((bb & NOT_FILE_A) << 7 | (bb & NOT_FILE_H) << 9) & NOT_RANK_1, // up-left, up-right
        Color::Black => ((bb & NOT_FILE_A) >> 9 | (bb & NOT_FILE_H) >> 7) & NOT_RANK_8, // down-left, down-right
    }
}

/// Squares reached from `from` along the selected ray families. Each ray
/// includes the first occupied square it meets.
pub fn sliding_attacks(from: Square, occupied: u64, diagonals: bool, orthogonals: bool) -> u64 {
    let mut attacks: u64 = 0;
    for &(dr, df, is_diagonal) in DIRECTIONS {
        if (diagonals && is_diagonal) || (orthogonals && !is_diagonal) {
            let mut current = from;
            while let Some(next) = current.offset(df, dr) {
                attacks |= next.bb();
                if next.bb() & occupied != 0 { break; } // Blocked
                current = next;
            }
        }
    }
    attacks
}

/// Unit step `(df, dr)` from `from` towards `to` when they share a rank,
/// file, or diagonal.
pub fn line_step(from: Square, to: Square) -> Option<(i8, i8, bool)> {
    let df = to.file() as i8 - from.file() as i8;
    let dr = to.rank() as i8 - from.rank() as i8;
    if df == 0 && dr == 0 {
        return None;
    }
    if df == 0 || dr == 0 {
        Some((df.signum(), dr.signum(), false))
    } else if df.abs() == dr.abs() {
        Some((df.signum(), dr.signum(), true))
    } else {
        None
    }
}

/// Iterates the set squares of a bitboard, lowest index first.
#[derive(Debug, Clone, Copy)]
pub struct Squares(pub u64);

impl Iterator for Squares {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let sq = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1; // Clear lowest set bit
        Square::new(sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_table_corners_and_center() {
        assert_eq!(KNIGHT_ATTACKS[Square::A1.index()], Square::B3.bb() | Square::C2.bb());
        assert_eq!(KNIGHT_ATTACKS[Square::D4.index()].count_ones(), 8);
        assert_eq!(KNIGHT_ATTACKS[Square::H8.index()], Square::G6.bb() | Square::F7.bb());
    }

    #[test]
    fn king_table_edges() {
        assert_eq!(KING_ATTACKS[Square::A1.index()].count_ones(), 3);
        assert_eq!(KING_ATTACKS[Square::E4.index()].count_ones(), 8);
        assert_eq!(KING_ATTACKS[Square::H5.index()].count_ones(), 5);
    }

    #[test]
    fn interior_has_thirty_six_squares() {
        assert_eq!(INTERIOR.count_ones(), 36);
        assert!(INTERIOR & Square::B2.bb() != 0);
        assert!(INTERIOR & Square::G7.bb() != 0);
        assert!(INTERIOR & Square::A4.bb() == 0);
    }

    #[test]
    fn pawn_attacks_do_not_wrap() {
        assert_eq!(pawn_attacks(Square::A2, Color::White), Square::B3.bb());
        assert_eq!(pawn_attacks(Square::H7, Color::Black), Square::G6.bb());
        assert_eq!(pawn_attacks(Square::D4, Color::Black), Square::C3.bb() | Square::E3.bb());
    }

    #[test]
    fn sliding_attacks_stop_at_blockers() {
        let occupied = Square::D7.bb() | Square::B5.bb();
        let rook = sliding_attacks(Square::D5, occupied, false, true);
        assert!(rook & Square::D7.bb() != 0);
        assert!(rook & Square::D8.bb() == 0);
        assert!(rook & Square::B5.bb() != 0);
        assert!(rook & Square::A5.bb() == 0);
        assert!(rook & Square::D1.bb() != 0);
    }

    #[test]
    fn line_step_shapes() {
        assert_eq!(line_step(Square::D5, Square::A5), Some((-1, 0, false)));
        assert_eq!(line_step(Square::D5, Square::H1), Some((1, -1, true)));
        assert_eq!(line_step(Square::B1, Square::C3), None);
        assert_eq!(line_step(Square::E4, Square::E4), None);
    }

    #[test]
    fn squares_iterates_in_order() {
        let set: Vec<Square> = Squares(Square::H8.bb() | Square::A1.bb() | Square::E4.bb()).collect();
        assert_eq!(set, vec![Square::A1, Square::E4, Square::H8]);
    }
}
