//! Uniformly random legal-move walks.
//!
//! Used to reach many positions cheaply when exercising apply/undo; the
//! walk plays whatever the legal list offers, promotion pieces included.

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::trace;

use crate::game_state::{chess_types::PieceKind, game_state::GameState};
use crate::move_generation::legal_move_generator::GameStatus;
use crate::move_generation::move_generator::MoveGenResult;

pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playout {
    pub plies: usize,
    /// Status of the final position.
    pub status: GameStatus,
}

/// Play up to `max_plies` random legal moves, stopping early on mate or stalemate.
pub fn random_playout<R: Rng + ?Sized>(
    game_state: &mut GameState,
    max_plies: usize,
    rng: &mut R,
) -> MoveGenResult<Playout> {
    let mut plies = 0;
    loop {
        let legal = game_state.legal_moves();
        if plies == max_plies || legal.status.is_terminal() {
            trace!(plies, status = ?legal.status, "playout finished");
            return Ok(Playout {
                plies,
                status: legal.status,
            });
        }

        let Some(mv) = legal.moves.choose(rng).copied() else {
            return Ok(Playout {
                plies,
                status: legal.status,
            });
        };
        let promotion = PROMOTION_CHOICES
            .choose(rng)
            .copied()
            .unwrap_or(PieceKind::Queen);
        game_state.apply_move_with_promotion(&mv, promotion)?;
        plies += 1;
    }
}
