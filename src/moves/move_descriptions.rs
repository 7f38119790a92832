//! The `Move` value object.
//!
//! A move is built by the generators against the board it leaves from and is
//! immutable afterwards. Two moves compare equal when their coordinate-derived
//! ids match, so a move rebuilt by a UI from clicked squares finds its twin in
//! the generated list.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_rules::promotion_row;
use crate::game_state::chess_types::{piece_at, Board, CastleSide, Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub piece_moved: Piece,
    /// For en passant this is the opposing pawn, even though it does not stand on `end`.
    pub piece_captured: Option<Piece>,
    pub is_promotion: bool,
    pub is_en_passant: bool,
    pub is_castle: bool,
    id: u16,
}

impl Move {
    /// Ordinary move (quiet, capture or promotion); the captured piece is read off `board`.
    pub fn new(start: Square, end: Square, piece_moved: Piece, board: &Board) -> Self {
        Self::build(start, end, piece_moved, piece_at(board, end), false, false)
    }

    pub fn en_passant(start: Square, end: Square, piece_moved: Piece) -> Self {
        let captured = Piece::new(piece_moved.color.opposite(), PieceKind::Pawn);
        Self::build(start, end, piece_moved, Some(captured), true, false)
    }

    pub fn castle(start: Square, end: Square, piece_moved: Piece) -> Self {
        Self::build(start, end, piece_moved, None, false, true)
    }

    fn build(
        start: Square,
        end: Square,
        piece_moved: Piece,
        piece_captured: Option<Piece>,
        is_en_passant: bool,
        is_castle: bool,
    ) -> Self {
        let is_promotion = piece_moved.kind == PieceKind::Pawn
            && end.row == promotion_row(piece_moved.color);
        Self {
            start,
            end,
            piece_moved,
            piece_captured,
            is_promotion,
            is_en_passant,
            is_castle,
            id: move_id(start, end),
        }
    }

    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        if !self.is_castle {
            return None;
        }
        if self.end.col > self.start.col {
            Some(CastleSide::KingSide)
        } else {
            Some(CastleSide::QueenSide)
        }
    }

    /// Square of the pawn removed by an en-passant capture: beside the mover,
    /// on the destination file.
    #[inline]
    pub fn en_passant_victim_square(&self) -> Square {
        Square::new(self.start.row, self.end.col)
    }

    /// Short move text.
    ///
    /// Promotions always read as `<dest>Q`, castles as `0-0` / `0-0-0`, en
    /// passant as `<file>x<dest> e.p.`. Two identical pieces able to reach the
    /// same square are not disambiguated.
    pub fn notation(&self) -> String {
        if self.is_promotion {
            return format!("{}Q", self.end);
        }
        if let Some(side) = self.castle_side() {
            return match side {
                CastleSide::KingSide => "0-0".to_owned(),
                CastleSide::QueenSide => "0-0-0".to_owned(),
            };
        }
        if self.is_en_passant {
            return format!("{}x{} e.p.", self.start.file_char(), self.end);
        }
        let is_pawn = self.piece_moved.kind == PieceKind::Pawn;
        match (self.is_capture(), is_pawn) {
            (true, true) => format!("{}x{}", self.start.file_char(), self.end),
            (true, false) => format!("{}x{}", self.piece_moved.kind.letter(), self.end),
            (false, true) => self.end.to_string(),
            (false, false) => format!("{}{}", self.piece_moved.kind.letter(), self.end),
        }
    }
}

/// `start.row*1000 + start.col*100 + end.row*10 + end.col`.
#[inline]
pub fn move_id(start: Square, end: Square) -> u16 {
    start.row as u16 * 1000 + start.col as u16 * 100 + end.row as u16 * 10 + end.col as u16
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn mv(game: &GameState, from: &str, to: &str) -> Move {
        let piece = piece_at(&game.board, sq(from)).expect("origin should be occupied");
        Move::new(sq(from), sq(to), piece, &game.board)
    }

    #[test]
    fn ids_are_derived_from_coordinates_only() {
        let game = GameState::new_game();
        let a = mv(&game, "e2", "e4");
        let b = mv(&game, "e2", "e4");
        assert_eq!(a, b);
        assert_eq!(a.id(), 6 * 1000 + 4 * 100 + 4 * 10 + 4);
        assert_ne!(a, mv(&game, "e2", "e3"));
    }

    #[test]
    fn quiet_and_capture_notation() {
        let game = GameState::from_fen("4k3/8/8/3p4/4P3/5N2/8/4K3 w - - 0 1")
            .expect("fen should parse");
        assert_eq!(mv(&game, "e4", "e5").notation(), "e5");
        assert_eq!(mv(&game, "e4", "d5").notation(), "exd5");
        assert_eq!(mv(&game, "f3", "g5").notation(), "Ng5");
        assert_eq!(mv(&game, "f3", "d4").to_string(), "Nd4");
        assert_eq!(mv(&game, "e1", "e2").notation(), "Ke2");
    }

    #[test]
    fn special_move_notation() {
        let game = GameState::from_fen("r3k2r/1P6/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1")
            .expect("fen should parse");
        let light_king = Piece::new(Color::Light, PieceKind::King);
        assert_eq!(Move::castle(sq("e1"), sq("g1"), light_king).notation(), "0-0");
        assert_eq!(Move::castle(sq("e1"), sq("c1"), light_king).notation(), "0-0-0");
        assert_eq!(Move::castle(sq("e8"), sq("c8"), Piece::new(Color::Dark, PieceKind::King)).notation(), "0-0-0");

        let ep = Move::en_passant(sq("e5"), sq("d6"), Piece::new(Color::Light, PieceKind::Pawn));
        assert_eq!(ep.notation(), "exd6 e.p.");
        assert_eq!(ep.piece_captured, Some(Piece::new(Color::Dark, PieceKind::Pawn)));
        assert_eq!(ep.en_passant_victim_square(), sq("d5"));

        let promo = mv(&game, "b7", "a8");
        assert!(promo.is_promotion);
        assert_eq!(promo.notation(), "a8Q");
    }
}
