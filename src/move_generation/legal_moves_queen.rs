use crate::game_state::chess_rules::RAY_DIRECTIONS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_sliding_moves, GenerationContext};
use crate::moves::move_descriptions::Move;

pub fn generate_queen_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    let queen = Piece::new(ctx.side, PieceKind::Queen);
    push_sliding_moves(ctx, from, queen, &RAY_DIRECTIONS, out);
}
