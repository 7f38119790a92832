//! Core value types shared by the board model and the move generators.
//!
//! The board is a mailbox grid addressed by `(row, col)`. Row 0 is the dark
//! back rank (rank 8) and row 7 the light back rank (rank 1), so row indices
//! grow toward the light side the way a board is drawn with light at the bottom.

use std::fmt;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move. `Light` is white and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a single pawn advance for this color.
    #[inline]
    pub const fn pawn_advance(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Upper-case notation letter. Pawns have none in move text and return `'P'`.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// A ray or jump step as `(d_row, d_col)`.
pub type Direction = (i8, i8);

/// Board coordinate. Always in `0..8` on both axes once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Self { row, col }
    }

    /// Step by `(d_row, d_col)` times `distance`, or `None` when that leaves the board.
    #[inline]
    pub fn offset(self, direction: Direction, distance: i8) -> Option<Square> {
        let row = self.row as i8 + direction.0 * distance;
        let col = self.col as i8 + direction.1 * distance;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// 8x8 grid indexed `[row][col]`.
pub type Board = [[Option<Piece>; 8]; 8];

#[inline]
pub fn piece_at(board: &Board, square: Square) -> Option<Piece> {
    board[square.row as usize][square.col as usize]
}

#[inline]
pub fn set_piece(board: &mut Board, square: Square, piece: Option<Piece>) {
    board[square.row as usize][square.col as usize] = piece;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// Four independent castling permissions. Once cleared a right is never re-set
/// by play; only undo restores an earlier snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights {
    pub light_kingside: bool,
    pub light_queenside: bool,
    pub dark_kingside: bool,
    pub dark_queenside: bool,
}

impl CastleRights {
    pub const ALL: CastleRights = CastleRights {
        light_kingside: true,
        light_queenside: true,
        dark_kingside: true,
        dark_queenside: true,
    };

    pub const NONE: CastleRights = CastleRights {
        light_kingside: false,
        light_queenside: false,
        dark_kingside: false,
        dark_queenside: false,
    };

    #[inline]
    pub fn holds(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::Light, CastleSide::KingSide) => self.light_kingside,
            (Color::Light, CastleSide::QueenSide) => self.light_queenside,
            (Color::Dark, CastleSide::KingSide) => self.dark_kingside,
            (Color::Dark, CastleSide::QueenSide) => self.dark_queenside,
        }
    }

    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::Light, CastleSide::KingSide) => self.light_kingside = false,
            (Color::Light, CastleSide::QueenSide) => self.light_queenside = false,
            (Color::Dark, CastleSide::KingSide) => self.dark_kingside = false,
            (Color::Dark, CastleSide::QueenSide) => self.dark_queenside = false,
        }
    }

    #[inline]
    pub fn revoke_both(&mut self, color: Color) {
        self.revoke(color, CastleSide::KingSide);
        self.revoke(color, CastleSide::QueenSide);
    }
}

/// A friendly piece standing alone between its king and an enemy slider.
/// `direction` points from the king toward the pinned piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    pub direction: Direction,
}

/// An enemy piece giving check. For sliders `direction` points from the king
/// toward the attacker; for knights it is the jump offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub attacker: Square,
    pub direction: Direction,
    pub attacker_kind: PieceKind,
}
