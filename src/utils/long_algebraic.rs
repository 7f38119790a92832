//! Coordinate move text such as `e2e4` or `e7e8n`.
//!
//! The text names only the two squares plus an optional promotion letter;
//! everything else about the move is recovered from the legal move list.

use crate::game_state::chess_rules::DEFAULT_PROMOTION;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// `<from><to>` for a move, without a promotion letter.
pub fn move_to_long_algebraic(mv: &Move) -> String {
    format!("{}{}", square_to_algebraic(mv.start), square_to_algebraic(mv.end))
}

/// `<from><to>` with the promotion letter appended when there is one.
pub fn move_with_promotion_to_long_algebraic(mv: &Move, promotion: Option<PieceKind>) -> Result<String, String> {
    let mut out = move_to_long_algebraic(mv);
    if let Some(piece_kind) = promotion.filter(|_| mv.is_promotion) {
        out.push(promotion_to_char(piece_kind)?);
    }
    Ok(out)
}

/// Split move text into its squares and optional promotion piece.
pub fn parse_long_algebraic(long_algebraic: &str) -> Result<(Square, Square, Option<PieceKind>), String> {
    let len = long_algebraic.len();
    if (len != 4 && len != 5) || !long_algebraic.is_ascii() {
        return Err(format!("Invalid long algebraic move: {long_algebraic}"));
    }

    let from = algebraic_to_square(&long_algebraic[0..2])?;
    let to = algebraic_to_square(&long_algebraic[2..4])?;
    let promotion = match long_algebraic[4..].chars().next() {
        Some(ch) => Some(char_to_promotion(ch)?),
        None => None,
    };

    Ok((from, to, promotion))
}

/// Look `long_algebraic` up among the legal moves and apply it. A missing
/// promotion letter promotes to a queen.
pub fn apply_long_algebraic(game_state: &mut GameState, long_algebraic: &str) -> MoveGenResult<()> {
    let (from, to, promotion) = parse_long_algebraic(long_algebraic)
        .map_err(|err| MoveGenerationError::IllegalMove(format!("{long_algebraic} ({err})")))?;

    let mv = game_state
        .find_legal_move(from, to)
        .ok_or_else(|| MoveGenerationError::IllegalMove(long_algebraic.to_owned()))?;

    if promotion.is_some() && !mv.is_promotion {
        return Err(MoveGenerationError::IllegalMove(format!(
            "{long_algebraic} (only a pawn reaching the last rank promotes)"
        )));
    }

    game_state.apply_move_with_promotion(&mv, promotion.unwrap_or(DEFAULT_PROMOTION))
}

fn promotion_to_char(piece_kind: PieceKind) -> Result<char, String> {
    match piece_kind {
        PieceKind::Knight => Ok('n'),
        PieceKind::Bishop => Ok('b'),
        PieceKind::Rook => Ok('r'),
        PieceKind::Queen => Ok('q'),
        _ => Err(format!("Invalid promotion piece: {piece_kind:?}")),
    }
}

fn char_to_promotion(ch: char) -> Result<PieceKind, String> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(format!("Invalid promotion piece character: {ch}")),
    }
}
