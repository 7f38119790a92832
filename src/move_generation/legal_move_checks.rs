//! Check and pin detection.
//!
//! Rays are scanned outward from a king square. The first friendly piece on a
//! ray is a pin candidate; a second one closes the ray. The first enemy piece
//! either attacks along that ray (check, or pin when a candidate stands in
//! between) or closes it. Knights are looked up directly since they jump pins.

use crate::game_state::chess_rules::{is_orthogonal, KNIGHT_OFFSETS, RAY_DIRECTIONS};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::generate_pseudo_legal_moves;
use crate::move_generation::legal_move_shared::GenerationContext;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckScan {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl CheckScan {
    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }
}

/// Scan for pins against, and checks on, a `color` king standing on `king_square`.
///
/// `king_square` need not be where the king actually is: the king generator
/// asks about candidate squares. Friendly kings are looked through, so the
/// king's real square does not shield the candidate from a slider behind it.
pub fn detect_pins_and_checks(board: &Board, color: Color, king_square: Square) -> CheckScan {
    let mut scan = CheckScan::default();

    for direction in RAY_DIRECTIONS {
        let mut possible_pin: Option<Square> = None;
        for distance in 1..8 {
            let Some(square) = king_square.offset(direction, distance) else {
                break;
            };
            let Some(piece) = piece_at(board, square) else {
                continue;
            };

            if piece.color == color {
                if piece.kind == PieceKind::King {
                    continue;
                }
                if possible_pin.is_none() {
                    possible_pin = Some(square);
                    continue;
                }
                break;
            }

            if attacks_along_ray(piece, direction, distance) {
                match possible_pin {
                    None => {
                        scan.in_check = true;
                        scan.checks.push(Check {
                            attacker: square,
                            direction,
                            attacker_kind: piece.kind,
                        });
                    }
                    Some(pinned) => scan.pins.push(Pin {
                        square: pinned,
                        direction,
                    }),
                }
            }
            break;
        }
    }

    for offset in KNIGHT_OFFSETS {
        let Some(square) = king_square.offset(offset, 1) else {
            continue;
        };
        if piece_at(board, square) == Some(Piece::new(color.opposite(), PieceKind::Knight)) {
            scan.in_check = true;
            scan.checks.push(Check {
                attacker: square,
                direction: offset,
                attacker_kind: PieceKind::Knight,
            });
        }
    }

    scan
}

/// Whether an enemy `piece` met `distance` steps out along `direction` from
/// the king attacks back down that ray.
fn attacks_along_ray(piece: Piece, direction: Direction, distance: i8) -> bool {
    let orthogonal = is_orthogonal(direction);
    match piece.kind {
        PieceKind::Rook => orthogonal,
        PieceKind::Bishop => !orthogonal,
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        // A pawn sits one row behind the squares it attacks.
        PieceKind::Pawn => {
            distance == 1 && !orthogonal && direction.0 == -piece.color.pawn_advance()
        }
        PieceKind::Knight => false,
    }
}

/// Scan the side to move's own king.
pub fn scan_side_to_move(game_state: &GameState) -> CheckScan {
    let side = game_state.side_to_move;
    detect_pins_and_checks(&game_state.board, side, game_state.king_square(side))
}

/// Whether the opponent of the side to move covers `square`.
///
/// This is a coverage query over the opponent's pseudo-legal moves: pawn
/// pushes count, pawn diagonals onto empty squares do not, and the king of the
/// side to move is left on the board.
pub fn square_under_attack(game_state: &GameState, square: Square) -> bool {
    square_covered_by(game_state, square, game_state.side_to_move.opposite())
}

pub fn square_covered_by(game_state: &GameState, square: Square, attacker: Color) -> bool {
    let ctx = GenerationContext::coverage(game_state, attacker);
    let mut moves = Vec::with_capacity(64);
    generate_pseudo_legal_moves(&ctx, &mut moves);
    moves.iter().any(|mv| mv.end == square)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn scan(fen: &str) -> CheckScan {
        let game = GameState::from_fen(fen).expect("fen should parse");
        scan_side_to_move(&game)
    }

    #[test]
    fn quiet_start_has_no_checks_or_pins() {
        let result = scan_side_to_move(&GameState::new_game());
        assert_eq!(result, CheckScan::default());
    }

    #[test]
    fn rook_behind_a_friendly_piece_pins_it() {
        let result = scan("4r2k/8/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(!result.in_check);
        assert_eq!(
            result.pins,
            vec![Pin {
                square: sq("e2"),
                direction: (-1, 0),
            }]
        );
    }

    #[test]
    fn two_friendly_pieces_close_the_ray() {
        let result = scan("4r2k/8/8/8/4N3/8/4B3/4K3 w - - 0 1");
        assert!(result.pins.is_empty());
        assert!(!result.in_check);
    }

    #[test]
    fn bishop_does_not_pin_along_a_file() {
        let result = scan("4b2k/8/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(result.pins.is_empty());
    }

    #[test]
    fn pawns_check_only_toward_their_attack_side() {
        // Dark pawn on d2 attacks e1.
        assert!(scan("7k/8/8/8/8/8/3p4/4K3 w - - 0 1").in_check);
        // Dark pawn on d1 beside the king does not.
        assert!(!scan("7k/8/8/8/8/8/8/3pK3 w - - 0 1").in_check);
        // Light pawn on f7 attacks e8.
        assert!(scan("4k3/5P2/8/8/8/8/8/K7 b - - 0 1").in_check);
        // Light pawn on f7 attacks e8 and g8, not the king on e6.
        assert!(!scan("8/5P2/4k3/8/8/8/8/K7 b - - 0 1").in_check);
    }

    #[test]
    fn knight_and_slider_give_double_check() {
        let result = scan("4r2k/8/8/8/8/3n4/8/4K3 w - - 0 1");
        assert!(result.in_check);
        assert!(result.is_double_check());
        let kinds: Vec<PieceKind> = result.checks.iter().map(|c| c.attacker_kind).collect();
        assert!(kinds.contains(&PieceKind::Rook));
        assert!(kinds.contains(&PieceKind::Knight));
    }

    #[test]
    fn relocated_king_looks_through_its_own_square() {
        let game = GameState::from_fen("7k/8/8/8/8/8/8/r3K3 w - - 0 1").expect("fen should parse");
        let result = detect_pins_and_checks(&game.board, Color::Light, sq("f1"));
        assert!(result.in_check);
        assert_eq!(result.checks[0].attacker, sq("a1"));
    }

    #[test]
    fn coverage_counts_pseudo_legal_targets() {
        let game = GameState::new_game();
        // Dark knights cover the sixth rank squares a6, c6, f6, h6.
        assert!(square_under_attack(&game, sq("c6")));
        // Dark pawns push to e6 and e5.
        assert!(square_under_attack(&game, sq("e5")));
        assert!(!square_under_attack(&game, sq("e4")));
    }
}
