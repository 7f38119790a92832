//! Applying and taking back moves.
//!
//! `make_move` and `take_back` share one transition model: every board edit
//! made on the way forward is reversed from the pushed `UndoState` frame on the
//! way back, so a position survives any apply/undo pair unchanged.

use tracing::debug;

use crate::game_state::chess_rules::{back_rank_row, KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::{chess_types::*, game_state::GameState, undo_state::UndoState};
use crate::move_generation::legal_move_checks::scan_side_to_move;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::move_descriptions::Move;
use crate::utils::long_algebraic::move_to_long_algebraic;

/// Apply `mv` if it is legal in the current position.
///
/// The move is matched by id against the legal moves generated from the
/// position as it stands now, and the generated twin is applied, so a move
/// rebuilt from two squares works as well as one taken from the list. The
/// promotion piece is only checked for promotion moves. On error the position
/// is left untouched.
pub fn apply_move(game_state: &mut GameState, mv: &Move, promotion: PieceKind) -> MoveGenResult<()> {
    let canonical = generate_legal_moves(game_state)
        .moves
        .into_iter()
        .find(|candidate| candidate.id() == mv.id());
    let Some(canonical) = canonical else {
        return Err(MoveGenerationError::IllegalMove(move_to_long_algebraic(mv)));
    };
    if canonical.is_promotion && !promotion.is_promotion_target() {
        return Err(MoveGenerationError::InvalidPromotion(promotion));
    }

    make_move(game_state, &canonical, promotion);
    debug!(
        side = ?canonical.piece_moved.color,
        mv = %canonical.notation(),
        ply = game_state.ply(),
        "applied move"
    );
    Ok(())
}

/// Take back the most recent move.
pub fn undo_move(game_state: &mut GameState) -> MoveGenResult<UndoState> {
    let frame = take_back(game_state).ok_or(MoveGenerationError::NothingToUndo)?;
    debug!(
        side = ?frame.mv.piece_moved.color,
        mv = %frame.notation(),
        ply = game_state.ply(),
        "undid move"
    );
    Ok(frame)
}

/// Unchecked apply. `mv` must come from the legal list of the current position.
pub(crate) fn make_move(game_state: &mut GameState, mv: &Move, promotion: PieceKind) {
    let side = mv.piece_moved.color;
    let promoted_to = mv.is_promotion.then_some(promotion);

    game_state.undo_stack.push(UndoState {
        mv: *mv,
        promoted_to,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_target: game_state.en_passant_target,
    });

    let landing = match promoted_to {
        Some(kind) => Piece::new(side, kind),
        None => mv.piece_moved,
    };
    let board = &mut game_state.board;
    set_piece(board, mv.start, None);
    set_piece(board, mv.end, Some(landing));

    if mv.is_en_passant {
        set_piece(board, mv.en_passant_victim_square(), None);
    }
    if let Some(castle_side) = mv.castle_side() {
        let (rook_from, rook_to) = castle_rook_squares(mv.start.row, castle_side);
        let rook = piece_at(board, rook_from);
        set_piece(board, rook_from, None);
        set_piece(board, rook_to, rook);
    }

    if mv.piece_moved.kind == PieceKind::King {
        game_state.set_king_square(side, mv.end);
    }

    let double_push = mv.piece_moved.kind == PieceKind::Pawn && mv.start.row.abs_diff(mv.end.row) == 2;
    game_state.en_passant_target =
        double_push.then(|| Square::new((mv.start.row + mv.end.row) / 2, mv.start.col));

    update_castling_rights(&mut game_state.castling_rights, mv);

    game_state.side_to_move = side.opposite();
    refresh_derived(game_state);
}

/// Exact inverse of `make_move` for the top frame.
pub(crate) fn take_back(game_state: &mut GameState) -> Option<UndoState> {
    let frame = game_state.undo_stack.pop()?;
    let mv = frame.mv;
    let side = mv.piece_moved.color;

    let board = &mut game_state.board;
    set_piece(board, mv.start, Some(mv.piece_moved));
    if mv.is_en_passant {
        set_piece(board, mv.end, None);
        set_piece(board, mv.en_passant_victim_square(), mv.piece_captured);
    } else {
        set_piece(board, mv.end, mv.piece_captured);
    }
    if let Some(castle_side) = mv.castle_side() {
        let (rook_from, rook_to) = castle_rook_squares(mv.start.row, castle_side);
        let rook = piece_at(board, rook_to);
        set_piece(board, rook_to, None);
        set_piece(board, rook_from, rook);
    }

    if mv.piece_moved.kind == PieceKind::King {
        game_state.set_king_square(side, mv.start);
    }

    game_state.castling_rights = frame.prev_castling_rights;
    game_state.en_passant_target = frame.prev_en_passant_target;
    game_state.side_to_move = side;
    refresh_derived(game_state);

    Some(frame)
}

/// Rook origin and destination for a castle from a king on `row`.
fn castle_rook_squares(row: u8, castle_side: CastleSide) -> (Square, Square) {
    match castle_side {
        CastleSide::KingSide => (Square::new(row, KINGSIDE_ROOK_COL), Square::new(row, 5)),
        CastleSide::QueenSide => (Square::new(row, QUEENSIDE_ROOK_COL), Square::new(row, 3)),
    }
}

/// Which castle a `color` rook on `square` still guards, if it is a home corner.
fn rook_home_side(color: Color, square: Square) -> Option<CastleSide> {
    if square.row != back_rank_row(color) {
        return None;
    }
    match square.col {
        KINGSIDE_ROOK_COL => Some(CastleSide::KingSide),
        QUEENSIDE_ROOK_COL => Some(CastleSide::QueenSide),
        _ => None,
    }
}

fn update_castling_rights(rights: &mut CastleRights, mv: &Move) {
    let mover = mv.piece_moved.color;
    match mv.piece_moved.kind {
        PieceKind::King => rights.revoke_both(mover),
        PieceKind::Rook => {
            if let Some(side) = rook_home_side(mover, mv.start) {
                rights.revoke(mover, side);
            }
        }
        _ => {}
    }

    // Capturing onto a rook's corner removes the opponent's right there.
    if mv.is_capture() && !mv.is_en_passant {
        let opponent = mover.opposite();
        if let Some(side) = rook_home_side(opponent, mv.end) {
            rights.revoke(opponent, side);
        }
    }
}

/// Derived data goes stale on every transition.
fn refresh_derived(game_state: &mut GameState) {
    let scan = scan_side_to_move(game_state);
    game_state.in_check = scan.in_check;
    game_state.pins = scan.pins;
    game_state.checks = scan.checks;
    game_state.checkmate = false;
    game_state.stalemate = false;
}
