// src/fen.rs
//! FEN import and export for [`Board`]. Only used to seed positions; the
//! live game never round-trips through text.

use crate::board::{Board, CastlingRights};
use crate::error::FenError;
use crate::types::{Color, Piece, Square};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parses a full FEN, or just its piece-placement field (white to move,
    /// no castling rights, no en passant).
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or_else(|| FenError::Board(fen.to_string()))?;

        let mut board = Board::empty();
        board.set_board_fen(placement)?;

        if let Some(turn) = fields.next() {
            board.turn = match turn {
                "w" => Color::White,
                "b" => Color::Black,
                other => return Err(FenError::Turn(other.to_string())),
            };
        }
        if let Some(castling) = fields.next() {
            board.set_castling_fen(castling)?;
        }
        if let Some(ep) = fields.next() {
            board.en_passant_square = match ep {
                "-" => None,
                other => Some(other.parse::<Square>().map_err(|_| FenError::EnPassant(other.to_string()))?),
            };
        }
        if let Some(halfmove) = fields.next() {
            board.halfmove_clock = halfmove.parse().map_err(|_| FenError::Counter(halfmove.to_string()))?;
        }
        if let Some(fullmove) = fields.next() {
            board.fullmove_number = fullmove.parse().map_err(|_| FenError::Counter(fullmove.to_string()))?;
        }
        Ok(board)
    }

    /// Replaces the piece placement, keeping turn, rights and counters.
    pub fn set_board_fen(&mut self, placement: &str) -> Result<(), FenError> {
        let err = || FenError::Board(placement.to_string());
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(err());
        }

        let mut parsed: Vec<(Square, Piece)> = Vec::with_capacity(32);
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file: u8 = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(err());
                    }
                    file += skip as u8;
                } else {
                    let piece = Piece::from_char(c).ok_or_else(err)?;
                    if file >= 8 {
                        return Err(err());
                    }
                    parsed.push((Square::from_coords(file, rank), piece));
                    file += 1;
                }
                if file > 8 {
                    return Err(err());
                }
            }
            if file != 8 {
                return Err(err());
            }
        }

        for color in Color::ALL {
            self.clear_color(color);
        }
        for (sq, piece) in parsed {
            self.set_piece_at(sq, piece);
        }
        Ok(())
    }

    /// Replaces castling rights from a FEN castling field such as `KQkq`,
    /// `Kq` or `-`.
    pub fn set_castling_fen(&mut self, castling: &str) -> Result<(), FenError> {
        let mut rights = CastlingRights::none();
        if castling != "-" {
            for c in castling.chars() {
                match c {
                    'K' => rights.white_kingside = true,
                    'Q' => rights.white_queenside = true,
                    'k' => rights.black_kingside = true,
                    'q' => rights.black_queenside = true,
                    _ => return Err(FenError::Castling(castling.to_string())),
                }
            }
        }
        self.castling_rights = rights;
        Ok(())
    }

    /// Piece-placement field only.
    pub fn board_fen(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    pub fn castling_fen(&self) -> String {
        let r = &self.castling_rights;
        let mut out = String::new();
        if r.white_kingside { out.push('K'); }
        if r.white_queenside { out.push('Q'); }
        if r.black_kingside { out.push('k'); }
        if r.black_queenside { out.push('q'); }
        if out.is_empty() { out.push('-'); }
        out
    }

    pub fn fen(&self) -> String {
        let turn = match self.turn { Color::White => "w", Color::Black => "b" };
        let ep = self.en_passant_square.map_or("-".to_string(), |sq| sq.to_string());
        format!(
            "{} {} {} {} {} {}",
            self.board_fen(), turn, self.castling_fen(), ep, self.halfmove_clock, self.fullmove_number
        )
    }
}
