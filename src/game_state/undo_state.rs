use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Single undo record for `apply_move` / `undo_move`.
///
/// One frame is pushed per applied move and holds everything needed to invert
/// it, so the history depth always equals the number of moves played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    /// Piece the pawn became, when `mv` was a promotion.
    pub promoted_to: Option<PieceKind>,

    pub prev_castling_rights: CastleRights,
    pub prev_en_passant_target: Option<Square>,
}

impl UndoState {
    /// Move text with the promotion letter actually chosen.
    pub fn notation(&self) -> String {
        match self.promoted_to {
            Some(kind) if self.mv.is_promotion => format!("{}{}", self.mv.end, kind.letter()),
            _ => self.mv.notation(),
        }
    }
}
