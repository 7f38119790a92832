//! Canonical chess-rule constants.
//!
//! Static rule literals: the starting position, home rows and columns, and the
//! step tables every generator walks.

use crate::game_state::chess_types::{Color, Direction, PieceKind};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Rays out of a square. The first four are orthogonal, the last four diagonal.
pub const RAY_DIRECTIONS: [Direction; 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const ORTHOGONAL_DIRECTIONS: [Direction; 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

pub const DIAGONAL_DIRECTIONS: [Direction; 4] = [(-1, -1), (-1, 1), (1, 1), (1, -1)];

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, -1),
    (2, 1),
    (-1, -2),
    (1, -2),
];

pub const KING_OFFSETS: [Direction; 8] = RAY_DIRECTIONS;

pub const KING_HOME_COL: u8 = 4;
pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;

/// Promotion applied when the caller does not choose one.
pub const DEFAULT_PROMOTION: PieceKind = PieceKind::Queen;

#[inline]
pub const fn back_rank_row(color: Color) -> u8 {
    match color {
        Color::Light => 7,
        Color::Dark => 0,
    }
}

#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::Light => 6,
        Color::Dark => 1,
    }
}

#[inline]
pub const fn promotion_row(color: Color) -> u8 {
    back_rank_row(color.opposite())
}

#[inline]
pub const fn is_orthogonal(direction: Direction) -> bool {
    direction.0 == 0 || direction.1 == 0
}
