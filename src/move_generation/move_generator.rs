use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoves;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    /// The move is not in the legal list of the current position.
    IllegalMove(String),
    /// `undo_move` was called with an empty history.
    NothingToUndo,
    /// Pawns may only become a knight, bishop, rook or queen.
    InvalidPromotion(PieceKind),
    InvalidState(String),
}

impl fmt::Display for MoveGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveGenerationError::IllegalMove(mv) => write!(f, "illegal move: {mv}"),
            MoveGenerationError::NothingToUndo => write!(f, "no move to undo"),
            MoveGenerationError::InvalidPromotion(kind) => {
                write!(f, "cannot promote to {kind:?}")
            }
            MoveGenerationError::InvalidState(msg) => write!(f, "invalid game state: {msg}"),
        }
    }
}

impl Error for MoveGenerationError {}

/// Produces the legal moves of a position.
///
/// Generation needs `&mut` only to refresh the derived check data stored on
/// the state; the position itself is left as found.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &mut GameState) -> LegalMoves;
}
