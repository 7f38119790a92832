use crate::game_state::chess_rules::KNIGHT_OFFSETS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_step_moves, GenerationContext};
use crate::moves::move_descriptions::Move;

/// A pinned knight can never stay on its pin line, so it has no moves.
pub fn generate_knight_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    if ctx.pins.is_pinned(from) {
        return;
    }
    let knight = Piece::new(ctx.side, PieceKind::Knight);
    push_step_moves(ctx, from, knight, &KNIGHT_OFFSETS, out);
}
