use crate::game_state::chess_rules::ORTHOGONAL_DIRECTIONS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_sliding_moves, GenerationContext};
use crate::moves::move_descriptions::Move;

pub fn generate_rook_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    let rook = Piece::new(ctx.side, PieceKind::Rook);
    push_sliding_moves(ctx, from, rook, &ORTHOGONAL_DIRECTIONS, out);
}
