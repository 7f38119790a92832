//! Full legal move generation pipeline.
//!
//! Scans the side to move's king for pins and checks, then picks one of three
//! paths: double check (king moves only), single check (pseudo-legal moves that
//! move the king or block/capture the checker), or no check (pseudo-legal moves
//! plus castling). An empty result is checkmate when in check and stalemate
//! otherwise.

use tracing::trace;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{detect_pins_and_checks, CheckScan};
use crate::move_generation::legal_move_shared::{GenerationContext, PinMap};
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{generate_castle_moves, generate_king_moves};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::Move;

/// Status of a position, derived each time its legal moves are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves {
    pub moves: Vec<Move>,
    pub status: GameStatus,
}

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &mut GameState) -> LegalMoves {
        generate_legal_moves(game_state)
    }
}

/// Legal moves of the side to move. Refreshes the state's check data and
/// terminal flags; the position itself is untouched.
pub fn generate_legal_moves(game_state: &mut GameState) -> LegalMoves {
    let side = game_state.side_to_move;
    let king = game_state.king_square(side);
    let scan = detect_pins_and_checks(&game_state.board, side, king);
    let moves = assemble_legal_moves(game_state, &scan, king);

    let status = match (moves.is_empty(), scan.in_check) {
        (true, true) => GameStatus::Checkmate,
        (true, false) => GameStatus::Stalemate,
        (false, true) => GameStatus::Check,
        (false, false) => GameStatus::Normal,
    };
    trace!(side = ?side, count = moves.len(), status = ?status, "generated legal moves");

    game_state.in_check = scan.in_check;
    game_state.pins = scan.pins;
    game_state.checks = scan.checks;
    game_state.checkmate = status == GameStatus::Checkmate;
    game_state.stalemate = status == GameStatus::Stalemate;

    LegalMoves { moves, status }
}

fn assemble_legal_moves(game_state: &GameState, scan: &CheckScan, king: Square) -> Vec<Move> {
    let ctx = GenerationContext::for_side_to_move(game_state, PinMap::from_pins(&scan.pins));
    let mut moves = Vec::with_capacity(64);

    match scan.checks.as_slice() {
        [] => {
            generate_pseudo_legal_moves(&ctx, &mut moves);
            generate_castle_moves(&ctx, king, &mut moves);
        }
        [check] => {
            generate_pseudo_legal_moves(&ctx, &mut moves);
            let targets = check_resolution_squares(king, check);
            moves.retain(|mv| {
                mv.piece_moved.kind == PieceKind::King
                    || targets.contains(&mv.end)
                    || (mv.is_en_passant && mv.en_passant_victim_square() == check.attacker)
            });
        }
        _ => generate_king_moves(&ctx, king, &mut moves),
    }

    moves
}

/// Squares a non-king move may land on to answer `check`: the checker's own
/// square, plus for sliders every square between it and the king.
pub fn check_resolution_squares(king: Square, check: &Check) -> Vec<Square> {
    if check.attacker_kind == PieceKind::Knight {
        return vec![check.attacker];
    }

    let mut squares = Vec::with_capacity(7);
    for distance in 1..8 {
        let Some(square) = king.offset(check.direction, distance) else {
            break;
        };
        squares.push(square);
        if square == check.attacker {
            break;
        }
    }
    squares
}

/// Pseudo-legal moves for `ctx.side`, honouring the context's pins. Castling is
/// not included.
pub fn generate_pseudo_legal_moves(ctx: &GenerationContext<'_>, out: &mut Vec<Move>) {
    let board = ctx.board();
    for row in 0..8u8 {
        for col in 0..8u8 {
            let square = Square::new(row, col);
            match piece_at(board, square) {
                Some(piece) if piece.color == ctx.side => {
                    generate_piece_moves(ctx, square, piece.kind, out)
                }
                _ => {}
            }
        }
    }
}

fn generate_piece_moves(
    ctx: &GenerationContext<'_>,
    from: Square,
    kind: PieceKind,
    out: &mut Vec<Move>,
) {
    match kind {
        PieceKind::Pawn => generate_pawn_moves(ctx, from, out),
        PieceKind::Knight => generate_knight_moves(ctx, from, out),
        PieceKind::Bishop => generate_bishop_moves(ctx, from, out),
        PieceKind::Rook => generate_rook_moves(ctx, from, out),
        PieceKind::Queen => generate_queen_moves(ctx, from, out),
        PieceKind::King => generate_king_moves(ctx, from, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::long_algebraic::apply_long_algebraic;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn legal(fen: &str) -> (GameState, LegalMoves) {
        let mut game = GameState::from_fen(fen).expect("fen should parse");
        let legal = game.legal_moves();
        (game, legal)
    }

    fn texts(moves: &[Move]) -> Vec<String> {
        let mut out: Vec<String> = moves.iter().map(|mv| format!("{}{}", mv.start, mv.end)).collect();
        out.sort();
        out
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let mut game = GameState::new_game();
        let legal = game.legal_moves();
        assert_eq!(legal.moves.len(), 20);
        assert_eq!(legal.status, GameStatus::Normal);
        assert!(!game.in_check && !game.checkmate && !game.stalemate);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut game = GameState::new_game();
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            apply_long_algebraic(&mut game, text).expect("scripted move should be legal");
        }
        let legal = game.legal_moves();
        assert!(legal.moves.is_empty());
        assert_eq!(legal.status, GameStatus::Checkmate);
        assert!(game.checkmate);
        assert!(game.in_check);
        assert!(!game.stalemate);
        assert_eq!(game.side_to_move, Color::Light);
    }

    #[test]
    fn cornered_lone_king_is_stalemated() {
        let (mut game, legal) = legal("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1");
        assert!(legal.moves.is_empty());
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert_eq!(legal.status, GameStatus::Stalemate);
        assert!(game.stalemate);
        assert!(!game.in_check);
        assert!(!game.checkmate);
    }

    #[test]
    fn single_check_is_answered_by_block_capture_or_king_move() {
        // Rook e8 checks the e1 king: the knight blocks on e2 or e4, the bishop on e2.
        let (_, legal) = legal("4r2k/8/8/8/8/2N5/8/3BK3 w - - 0 1");
        assert_eq!(legal.status, GameStatus::Check);
        assert_eq!(
            texts(&legal.moves),
            vec!["c3e2", "c3e4", "d1e2", "e1d2", "e1f1", "e1f2"]
        );
    }

    #[test]
    fn knight_check_cannot_be_blocked() {
        let (_, legal) = legal("7k/8/8/8/8/3n4/8/R3K3 w - - 0 1");
        assert_eq!(legal.status, GameStatus::Check);
        assert!(legal
            .moves
            .iter()
            .all(|mv| mv.piece_moved.kind == PieceKind::King || mv.end == sq("d3")));
        assert!(!legal.moves.iter().any(|mv| mv.is_castle));
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let (game, legal) = legal("4r2k/8/8/8/8/3n4/8/R3K2R w KQ - 0 1");
        assert_eq!(game.checks.len(), 2);
        assert!(!legal.moves.is_empty());
        assert!(legal.moves.iter().all(|mv| mv.piece_moved.kind == PieceKind::King));
        assert!(!legal.moves.iter().any(|mv| mv.is_castle));
    }

    #[test]
    fn en_passant_can_capture_the_checking_pawn() {
        // The pawn that just reached d5 checks the e4 king; exd6 e.p. removes it.
        let (_, legal) = legal("4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1");
        assert_eq!(legal.status, GameStatus::Check);
        assert!(legal.moves.iter().any(|mv| mv.is_en_passant));
    }

    #[test]
    fn en_passant_exposing_the_king_on_its_rank_is_excluded() {
        let (_, legal) = legal("8/8/8/KPp4r/8/8/8/7k w - c6 0 1");
        assert!(!legal.moves.iter().any(|mv| mv.is_en_passant));
        assert!(legal.moves.iter().any(|mv| mv.start == sq("b5") && mv.end == sq("b6")));
    }

    #[test]
    fn pinned_pieces_stay_on_the_pin_line() {
        // Rook d2 pinned on the file, bishop c2 and knight e2 pinned on diagonals.
        let (game, legal) = legal("3q3k/8/8/7b/b7/8/2BRN3/3K4 w - - 0 1");
        let king = game.king_square(Color::Light);
        assert_eq!(game.pins.len(), 3);
        for pin in &game.pins {
            for mv in legal.moves.iter().filter(|mv| mv.start == pin.square) {
                let on_line =
                    (1..8).any(|distance| king.offset(pin.direction, distance) == Some(mv.end));
                assert!(on_line, "{} leaves the pin line", mv.notation());
            }
        }
        let from = |text: &str| legal.moves.iter().filter(|mv| mv.start == sq(text)).count();
        assert_eq!(from("d2"), 6);
        assert_eq!(from("c2"), 2);
        assert_eq!(from("e2"), 0);
    }

    #[test]
    fn castles_offered_only_when_not_in_check() {
        let (_, legal) = legal("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(legal.moves.iter().filter(|mv| mv.is_castle).count(), 2);
        assert_eq!(legal.moves.len(), 26);
    }

    #[test]
    fn legal_moves_do_not_disturb_the_position() {
        let mut game = GameState::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("fen should parse");
        let before = game.snapshot();
        let _ = game.legal_moves();
        assert_eq!(game.snapshot(), before);
    }
}
