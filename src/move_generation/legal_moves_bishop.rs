use crate::game_state::chess_rules::DIAGONAL_DIRECTIONS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_sliding_moves, GenerationContext};
use crate::moves::move_descriptions::Move;

pub fn generate_bishop_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    let bishop = Piece::new(ctx.side, PieceKind::Bishop);
    push_sliding_moves(ctx, from, bishop, &DIAGONAL_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_checks::scan_side_to_move;
    use crate::move_generation::legal_move_shared::{GenerationContext, PinMap};
    use crate::utils::algebraic::algebraic_to_square;

    fn bishop_targets(fen: &str, from: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("fen should parse");
        let pins = PinMap::from_pins(&scan_side_to_move(&game).pins);
        let ctx = GenerationContext::for_side_to_move(&game, pins);
        let mut out = Vec::new();
        generate_bishop_moves(&ctx, algebraic_to_square(from).expect("square"), &mut out);
        let mut targets: Vec<String> = out.iter().map(|mv| mv.end.to_string()).collect();
        targets.sort();
        targets
    }

    #[test]
    fn bishop_stops_on_capture_and_before_friends() {
        let targets = bishop_targets("7k/8/5p2/8/3B4/2P5/8/K7 w - - 0 1", "d4");
        assert_eq!(targets, vec!["a7", "b6", "c5", "e3", "e5", "f2", "f6", "g1"]);
    }

    #[test]
    fn diagonally_pinned_bishop_slides_along_the_pin() {
        let targets = bishop_targets("7k/8/8/8/3b4/8/1B6/K7 w - - 0 1", "b2");
        assert_eq!(targets, vec!["c3", "d4"]);
    }
}
