// src/board.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bitboard::{
    pawn_attacks, sliding_attacks, Squares, KING_ATTACKS, KNIGHT_ATTACKS, RANK_2, RANK_7,
};
use crate::moves::Move;
use crate::types::{Color, Piece, PieceType, Square};

const PROMOTIONS: [PieceType; 4] = [PieceType::Queen, PieceType::Knight, PieceType::Rook, PieceType::Bishop];

/// Home square of each colour's king, the only square castling starts from.
pub fn king_start(color: Color) -> Square {
    match color { Color::White => Square::E1, Color::Black => Square::E8 }
}

fn back_rank(color: Color) -> u8 {
    match color { Color::White => 0, Color::Black => 7 }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastleSide { Kingside, Queenside }

impl CastleSide {
    pub fn king_to(&self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::from_coords(6, back_rank(color)),
            CastleSide::Queenside => Square::from_coords(2, back_rank(color)),
        }
    }

    pub fn rook_from(&self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::from_coords(7, back_rank(color)),
            CastleSide::Queenside => Square::from_coords(0, back_rank(color)),
        }
    }

    pub fn rook_to(&self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::from_coords(5, back_rank(color)),
            CastleSide::Queenside => Square::from_coords(3, back_rank(color)),
        }
    }

    /// Squares strictly between king and rook.
    pub fn between(&self, color: Color) -> u64 {
        let files: &[u8] = match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[1, 2, 3],
        };
        files.iter().fold(0, |bb, &f| bb | Square::from_coords(f, back_rank(color)).bb())
    }

    /// Squares the king stands on, crosses, and lands on.
    pub fn king_path(&self, color: Color) -> [Square; 3] {
        let rank = back_rank(color);
        match self {
            CastleSide::Kingside => [4, 5, 6].map(|f| Square::from_coords(f, rank)),
            CastleSide::Queenside => [4, 3, 2].map(|f| Square::from_coords(f, rank)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub fn initial() -> Self {
        Self { white_kingside: true, white_queenside: true, black_kingside: true, black_queenside: true }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    pub fn king_moved(&mut self, color: Color) {
        if color == Color::White {
            self.white_kingside = false;
            self.white_queenside = false;
        } else {
            self.black_kingside = false;
            self.black_queenside = false;
        }
    }

    /// Drops the right tied to a rook corner once anything leaves or lands on it.
    pub fn corner_touched(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.white_queenside = false,
            Square::H1 => self.white_kingside = false,
            Square::A8 => self.black_queenside = false,
            Square::H8 => self.black_kingside = false,
            _ => {}
        }
    }
}

/// The full-information position: the single true board of a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    // pieces[color][piece_type]
    pieces: [[u64; 6]; 2],
    occupied_co: [u64; 2],
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl Board {
    /// A board with no pieces, white to move, no castling rights.
    pub fn empty() -> Self {
        Board {
            pieces: [[0; 6]; 2],
            occupied_co: [0; 2],
            turn: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard starting position.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        let back = [
            PieceType::Rook, PieceType::Knight, PieceType::Bishop, PieceType::Queen,
            PieceType::King, PieceType::Bishop, PieceType::Knight, PieceType::Rook,
        ];
        board.pieces[Color::White.index()][PieceType::Pawn.index()] = RANK_2;
        board.pieces[Color::Black.index()][PieceType::Pawn.index()] = RANK_7;
        for (file, kind) in back.iter().enumerate() {
            let file = file as u8;
            board.pieces[Color::White.index()][kind.index()] |= Square::from_coords(file, 0).bb();
            board.pieces[Color::Black.index()][kind.index()] |= Square::from_coords(file, 7).bb();
        }
        board.castling_rights = CastlingRights::initial();
        board.update_occupancy();
        board
    }

    #[inline(always)]
    fn update_occupancy(&mut self) {
        for color in Color::ALL {
            self.occupied_co[color.index()] = self.pieces[color.index()].iter().fold(0, |acc, bb| acc | bb);
        }
    }

    #[inline(always)]
    pub fn pieces(&self, kind: PieceType, color: Color) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline(always)]
    pub fn occupied_by(&self, color: Color) -> u64 {
        self.occupied_co[color.index()]
    }

    #[inline(always)]
    pub fn occupied(&self) -> u64 {
        self.occupied_co[0] | self.occupied_co[1]
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let bb = sq.bb();
        for color in Color::ALL {
            if self.occupied_co[color.index()] & bb == 0 {
                continue;
            }
            for kind in PieceType::ALL {
                if self.pieces[color.index()][kind.index()] & bb != 0 {
                    return Some(Piece::new(kind, color));
                }
            }
        }
        None
    }

    /// Clears the square and returns whatever stood on it.
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        let removed = self.piece_at(sq)?;
        self.pieces[removed.color.index()][removed.kind.index()] &= !sq.bb();
        self.occupied_co[removed.color.index()] &= !sq.bb();
        Some(removed)
    }

    /// Places `piece` on `sq`, replacing any occupant.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.remove_piece_at(sq);
        self.pieces[piece.color.index()][piece.kind.index()] |= sq.bb();
        self.occupied_co[piece.color.index()] |= sq.bb();
    }

    /// Removes every piece of `color`.
    pub fn clear_color(&mut self, color: Color) {
        self.pieces[color.index()] = [0; 6];
        self.occupied_co[color.index()] = 0;
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        Squares(self.pieces(PieceType::King, color)).next()
    }

    // --- Attack Generation ---
    /// Pieces of `attacker` that attack `target` on the current occupancy.
    pub fn attackers(&self, target: Square, attacker: Color) -> u64 {
        let occupied = self.occupied();
        let queens = self.pieces(PieceType::Queen, attacker);
        // A pawn attacks `target` iff a pawn of the other colour on `target` would attack it
        let mut attackers = pawn_attacks(target, attacker.opponent()) & self.pieces(PieceType::Pawn, attacker);
        attackers |= KNIGHT_ATTACKS[target.index()] & self.pieces(PieceType::Knight, attacker);
        attackers |= KING_ATTACKS[target.index()] & self.pieces(PieceType::King, attacker);
        attackers |= sliding_attacks(target, occupied, true, false) & (self.pieces(PieceType::Bishop, attacker) | queens);
        attackers |= sliding_attacks(target, occupied, false, true) & (self.pieces(PieceType::Rook, attacker) | queens);
        attackers
    }

    pub fn is_square_attacked(&self, target: Square, attacker: Color) -> bool {
        self.attackers(target, attacker) != 0
    }

    /// Whether the side to move has a king under attack. A side with no
    /// king is never in check.
    pub fn is_check(&self) -> bool {
        match self.king_square(self.turn) {
            Some(king) => self.is_square_attacked(king, self.turn.opponent()),
            None => false,
        }
    }

    /// The castle a king move describes, judged on shape and ownership only.
    pub fn castle_side(&self, mv: &Move) -> Option<CastleSide> {
        let color = self.turn;
        if mv.from != king_start(color) {
            return None;
        }
        let piece = self.piece_at(mv.from)?;
        if piece != Piece::new(PieceType::King, color) {
            return None;
        }
        [CastleSide::Kingside, CastleSide::Queenside]
            .into_iter()
            .find(|side| side.king_to(color) == mv.to)
    }

    // --- Move Generation (Pseudo-Legal) ---
    /// All moves for the side to move that follow piece movement rules,
    /// ignoring whether they leave the mover's king attacked. Castling is
    /// included when the right is held, the rook is home, and the squares
    /// between are empty.
    pub fn generate_pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        let color = self.turn;
        let own = self.occupied_by(color);
        let opp = self.occupied_by(color.opponent());
        let occupied = own | opp;

        for from in Squares(self.pieces(PieceType::Pawn, color)) {
            self.generate_pawn_moves(from, color, opp, occupied, &mut moves);
        }
        for from in Squares(self.pieces(PieceType::Knight, color)) {
            push_targets(from, KNIGHT_ATTACKS[from.index()] & !own, &mut moves);
        }
        for from in Squares(self.pieces(PieceType::Bishop, color)) {
            push_targets(from, sliding_attacks(from, occupied, true, false) & !own, &mut moves);
        }
        for from in Squares(self.pieces(PieceType::Rook, color)) {
            push_targets(from, sliding_attacks(from, occupied, false, true) & !own, &mut moves);
        }
        for from in Squares(self.pieces(PieceType::Queen, color)) {
            push_targets(from, sliding_attacks(from, occupied, true, true) & !own, &mut moves);
        }
        for from in Squares(self.pieces(PieceType::King, color)) {
            push_targets(from, KING_ATTACKS[from.index()] & !own, &mut moves);
            self.generate_castling_moves(from, color, occupied, &mut moves);
        }
        moves
    }

    fn generate_pawn_moves(&self, from: Square, color: Color, opp: u64, occupied: u64, moves: &mut Vec<Move>) {
        let forward = color.forward();
        let start_rank = match color { Color::White => 1, Color::Black => 6 }; // Ranks 2 and 7

        if let Some(one) = from.offset(0, forward) {
            if one.bb() & occupied == 0 {
                push_pawn_move(from, one, moves);
                if from.rank() == start_rank {
                    if let Some(two) = from.offset(0, 2 * forward) {
                        if two.bb() & occupied == 0 {
                            moves.push(Move::new(from, two));
                        }
                    }
                }
            }
        }

        for target in Squares(pawn_attacks(from, color)) {
            if target.bb() & opp != 0 || Some(target) == self.en_passant_square {
                push_pawn_move(from, target, moves);
            }
        }
    }

    fn generate_castling_moves(&self, from: Square, color: Color, occupied: u64, moves: &mut Vec<Move>) {
        if from != king_start(color) {
            return;
        }
        let rooks = self.pieces(PieceType::Rook, color);
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if self.castling_rights.has(color, side)
                && rooks & side.rook_from(color).bb() != 0
                && occupied & side.between(color) == 0
            {
                moves.push(Move::new(from, side.king_to(color)));
            }
        }
    }

    // --- Move Application ---
    /// Applies an already-resolved move and passes the turn. The null move
    /// only passes. Returns the removed piece and the square it stood on.
    pub fn push(&mut self, mv: &Move) -> Option<(Square, Piece)> {
        let color = self.turn;
        let ep_square = self.en_passant_square.take(); // Only valid for one half-move

        let moving = if mv.is_null() { None } else { self.remove_piece_at(mv.from) };
        let Some(moving) = moving else {
            self.halfmove_clock += 1;
            self.finish_turn(color);
            return None;
        };

        let mut captured: Option<(Square, Piece)> = None;
        let is_pawn = moving.kind == PieceType::Pawn;

        if is_pawn && Some(mv.to) == ep_square && mv.from.file() != mv.to.file() && self.piece_at(mv.to).is_none() {
            // The victim sits beside the mover, not on the target square
            let victim_sq = Square::from_coords(mv.to.file(), mv.from.rank());
            captured = self.remove_piece_at(victim_sq).map(|p| (victim_sq, p));
        }
        if let Some(p) = self.remove_piece_at(mv.to) {
            captured = Some((mv.to, p));
        }

        if moving.kind == PieceType::King && mv.from == king_start(color) && mv.from.rank() == mv.to.rank() {
            let side = match mv.to.file() as i8 - mv.from.file() as i8 {
                2 => Some(CastleSide::Kingside),
                -2 => Some(CastleSide::Queenside),
                _ => None,
            };
            if let Some(side) = side {
                if let Some(rook) = self.remove_piece_at(side.rook_from(color)) {
                    self.set_piece_at(side.rook_to(color), rook);
                }
            }
        }

        let placed = match mv.promotion {
            Some(kind) if is_pawn => Piece::new(kind, color),
            _ => moving,
        };
        self.set_piece_at(mv.to, placed);

        if moving.kind == PieceType::King {
            self.castling_rights.king_moved(color);
        }
        self.castling_rights.corner_touched(mv.from); // Rook moved away
        self.castling_rights.corner_touched(mv.to); // Rook captured
        if let Some((_, victim)) = captured {
            if victim.kind == PieceType::King {
                self.castling_rights.king_moved(victim.color);
            }
        }

        if is_pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            self.en_passant_square = mv.from.offset(0, color.forward());
        }

        if is_pawn || captured.is_some() {
            self.halfmove_clock = 0; // Reset on pawn move or capture
        } else {
            self.halfmove_clock += 1;
        }
        self.finish_turn(color);
        captured
    }

    fn finish_turn(&mut self, mover: Color) {
        if mover == Color::Black {
            self.fullmove_number += 1;
        }
        self.turn = mover.opponent();
    }
}

#[inline]
fn push_targets(from: Square, targets: u64, moves: &mut Vec<Move>) {
    moves.extend(Squares(targets).map(|to| Move::new(from, to)));
}

/// Adds the move, expanded into every promotion when it reaches a last rank.
#[inline]
pub(crate) fn push_pawn_move(from: Square, to: Square, moves: &mut Vec<Move>) {
    if to.rank() == 0 || to.rank() == 7 {
        moves.extend(PROMOTIONS.iter().map(|&p| Move::with_promotion(from, to, p)));
    } else {
        moves.push(Move::new(from, to));
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for rank in (0..8).rev() {
            write!(f, "{} | ", rank + 1)?;
            for file in 0..8 {
                match self.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    a b c d e f g h")?;
        writeln!(f, "Turn: {}", self.turn)
    }
}
