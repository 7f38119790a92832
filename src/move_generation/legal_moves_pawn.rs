use crate::game_state::chess_rules::pawn_start_row;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::detect_pins_and_checks;
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::move_descriptions::Move;

pub fn generate_pawn_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    let board = ctx.board();
    let side = ctx.side;
    let pawn = Piece::new(side, PieceKind::Pawn);
    let advance = side.pawn_advance();

    let forward = (advance, 0);
    if ctx.pins.allows(from, forward) {
        if let Some(one_step) = from.offset(forward, 1) {
            if piece_at(board, one_step).is_none() {
                out.push(Move::new(from, one_step, pawn, board));

                if from.row == pawn_start_row(side) {
                    if let Some(two_step) = from.offset(forward, 2) {
                        if piece_at(board, two_step).is_none() {
                            out.push(Move::new(from, two_step, pawn, board));
                        }
                    }
                }
            }
        }
    }

    // captures and en-passant
    for col_delta in [-1i8, 1i8] {
        let direction = (advance, col_delta);
        if !ctx.pins.allows(from, direction) {
            continue;
        }
        let Some(to) = from.offset(direction, 1) else {
            continue;
        };

        match piece_at(board, to) {
            Some(target) if target.color != side => out.push(Move::new(from, to, pawn, board)),
            Some(_) => {}
            None => {
                if ctx.en_passant_target == Some(to) && en_passant_is_safe(ctx, from, to) {
                    out.push(Move::en_passant(from, to, pawn));
                }
            }
        }
    }
}

/// Checks the en-passant victim is really there and that lifting both pawns
/// off the board does not open the king to an enemy slider.
fn en_passant_is_safe(ctx: &GenerationContext<'_>, from: Square, to: Square) -> bool {
    let board = ctx.board();
    let victim = Square::new(from.row, to.col);
    if piece_at(board, victim) != Some(Piece::new(ctx.side.opposite(), PieceKind::Pawn)) {
        return false;
    }

    let king = ctx.king_square();
    if king.row == from.row {
        return rank_stays_closed(ctx, king, from, victim);
    }

    // The victim may also have been shielding a diagonal.
    if king.row.abs_diff(victim.row) == king.col.abs_diff(victim.col) {
        let mut after = *board;
        set_piece(&mut after, from, None);
        set_piece(&mut after, victim, None);
        set_piece(&mut after, to, Some(Piece::new(ctx.side, PieceKind::Pawn)));
        return !detect_pins_and_checks(&after, ctx.side, king).in_check;
    }
    true
}

/// Walks from the king toward both pawns, skipping their squares; the first
/// piece met must not be an enemy rook or queen.
fn rank_stays_closed(ctx: &GenerationContext<'_>, king: Square, from: Square, victim: Square) -> bool {
    let board = ctx.board();
    let step = if from.col > king.col { 1 } else { -1 };
    let mut distance = 1;
    while let Some(square) = king.offset((0, step), distance) {
        distance += 1;
        if square == from || square == victim {
            continue;
        }
        match piece_at(board, square) {
            None => continue,
            Some(piece) => {
                let slider = matches!(piece.kind, PieceKind::Rook | PieceKind::Queen);
                return !(piece.color != ctx.side && slider);
            }
        }
    }
    true
}
