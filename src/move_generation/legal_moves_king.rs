use crate::game_state::chess_rules::{
    back_rank_row, KING_HOME_COL, KING_OFFSETS, KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{detect_pins_and_checks, square_covered_by};
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::move_descriptions::Move;

/// King steps onto empty or enemy squares that would not be in check.
///
/// Each destination is checked by scanning from it as though the king already
/// stood there; the king's current square is looked through by the scan.
pub fn generate_king_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    let board = ctx.board();
    let king = Piece::new(ctx.side, PieceKind::King);

    for offset in KING_OFFSETS {
        let Some(to) = from.offset(offset, 1) else {
            continue;
        };
        if piece_at(board, to).is_some_and(|target| target.color == ctx.side) {
            continue;
        }
        if !detect_pins_and_checks(board, ctx.side, to).in_check {
            out.push(Move::new(from, to, king, board));
        }
    }
}

/// Castling for the king on `from`, offered only from its home square.
///
/// Requires the right, an empty path between king and rook, the rook on its
/// corner, and neither the king's square nor the squares it crosses covered by
/// the opponent.
pub fn generate_castle_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    let side = ctx.side;
    let home = Square::new(back_rank_row(side), KING_HOME_COL);
    if from != home || piece_at(ctx.board(), home) != Some(Piece::new(side, PieceKind::King)) {
        return;
    }

    let rights = ctx.state.castling_rights;
    let can_kingside = rights.holds(side, CastleSide::KingSide);
    let can_queenside = rights.holds(side, CastleSide::QueenSide);
    if !can_kingside && !can_queenside {
        return;
    }

    let enemy = side.opposite();
    if square_covered_by(ctx.state, from, enemy) {
        return;
    }

    if can_kingside {
        push_castle(ctx, from, CastleSide::KingSide, out);
    }
    if can_queenside {
        push_castle(ctx, from, CastleSide::QueenSide, out);
    }
}

fn push_castle(ctx: &GenerationContext<'_>, from: Square, castle_side: CastleSide, out: &mut Vec<Move>) {
    let board = ctx.board();
    let (step, rook_col) = match castle_side {
        CastleSide::KingSide => (1i8, KINGSIDE_ROOK_COL),
        CastleSide::QueenSide => (-1i8, QUEENSIDE_ROOK_COL),
    };

    let rook_square = Square::new(from.row, rook_col);
    if piece_at(board, rook_square) != Some(Piece::new(ctx.side, PieceKind::Rook)) {
        return;
    }

    let between = from.col.abs_diff(rook_col) as i8 - 1;
    let path_clear = (1..=between)
        .filter_map(|distance| from.offset((0, step), distance))
        .all(|square| piece_at(board, square).is_none());
    if !path_clear {
        return;
    }

    let enemy = ctx.side.opposite();
    let transit_safe = (1..=2)
        .filter_map(|distance| from.offset((0, step), distance))
        .all(|square| !square_covered_by(ctx.state, square, enemy));
    if !transit_safe {
        return;
    }

    if let Some(to) = from.offset((0, step), 2) {
        out.push(Move::castle(from, to, Piece::new(ctx.side, PieceKind::King)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_shared::PinMap;
    use crate::utils::algebraic::algebraic_to_square;

    fn king_targets(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("fen should parse");
        let ctx = GenerationContext::for_side_to_move(&game, PinMap::empty());
        let mut out = Vec::new();
        generate_king_moves(&ctx, ctx.king_square(), &mut out);
        let mut targets: Vec<String> = out.iter().map(|mv| mv.end.to_string()).collect();
        targets.sort();
        targets
    }

    fn castles(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("fen should parse");
        let ctx = GenerationContext::for_side_to_move(&game, PinMap::empty());
        let mut out = Vec::new();
        generate_castle_moves(&ctx, ctx.king_square(), &mut out);
        out.iter().map(Move::notation).collect()
    }

    #[test]
    fn king_avoids_covered_squares() {
        // Rook on d8 covers the d-file.
        assert_eq!(king_targets("3r3k/8/8/8/8/8/8/4K3 w - - 0 1"), vec!["e2", "f1", "f2"]);
    }

    #[test]
    fn king_cannot_step_back_along_a_checking_ray() {
        // Rook a1 checks along the first rank; f1 stays on the ray.
        assert_eq!(
            king_targets("7k/8/8/8/8/8/8/r3K3 w - - 0 1"),
            vec!["d2", "e2", "f2"]
        );
    }

    #[test]
    fn king_may_capture_an_undefended_piece() {
        let targets = king_targets("7k/8/8/8/8/8/4q3/4K3 w - - 0 1");
        assert_eq!(targets, vec!["e2"]);
    }

    #[test]
    fn both_castles_on_a_clear_back_rank() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), vec!["0-0", "0-0-0"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), vec!["0-0", "0-0-0"]);
    }

    #[test]
    fn castling_needs_the_right() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1"), vec!["0-0-0"]);
        assert!(castles("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1").is_empty());
    }

    #[test]
    fn castling_needs_an_empty_path() {
        // Knight on b1 blocks the long castle even though the king never crosses b1.
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1"), vec!["0-0"]);
    }

    #[test]
    fn castling_through_a_covered_square_is_refused() {
        // Rook on f8 covers f1.
        assert_eq!(castles("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1"), vec!["0-0-0"]);
        // Rook on b8 covers b1, which the king never crosses.
        assert_eq!(castles("1r2k2r/8/8/8/8/8/8/R3K2R w KQk - 0 1"), vec!["0-0", "0-0-0"]);
    }

    #[test]
    fn pawn_diagonal_onto_an_empty_square_does_not_block_castling() {
        // Castling safety counts pawn moves, not pawn attacks: b2 hits c1 but
        // has no capture there, so the long castle stays available.
        let fen = "4k3/8/8/8/8/8/1p6/R3K3 w Q - 0 1";
        assert_eq!(castles(fen), vec!["0-0-0"]);

        let mut game = GameState::from_fen(fen).expect("fen should parse");
        let e1 = algebraic_to_square("e1").expect("square");
        let c1 = algebraic_to_square("c1").expect("square");
        let long_castle = game
            .find_legal_move(e1, c1)
            .expect("long castle should be generated");
        assert!(long_castle.is_castle);
    }

    #[test]
    fn no_castling_out_of_check() {
        assert!(castles("r3k2r/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").is_empty());
    }

    #[test]
    fn castling_only_from_the_home_square() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R4K1R w KQkq - 0 1")
            .expect("fen should parse");
        let ctx = GenerationContext::for_side_to_move(&game, PinMap::empty());
        let mut out = Vec::new();
        generate_castle_moves(&ctx, algebraic_to_square("f1").expect("square"), &mut out);
        assert!(out.is_empty());
    }
}
