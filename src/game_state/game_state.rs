//! Mailbox game state.
//!
//! `GameState` owns the grid, the side to move, the cached king squares, the
//! castling rights, the en-passant target and the undo stack. Check data
//! (`in_check`, `pins`, `checks`) and the terminal flags are derived and get
//! refreshed whenever legal moves are requested.

use crate::game_state::chess_rules::{DEFAULT_PROMOTION, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply;
use crate::move_generation::legal_move_generator::{self, GameStatus, LegalMoves};
use crate::move_generation::move_generator::MoveGenResult;
use crate::moves::move_descriptions::{move_id, Move};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Everything apply/undo must restore exactly, for comparing positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub board: Board,
    pub side_to_move: Color,
    pub light_king_square: Square,
    pub dark_king_square: Square,
    pub castling_rights: CastleRights,
    pub en_passant_target: Option<Square>,
    pub history_depth: usize,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,

    // Always equal to the square actually holding each king.
    pub light_king_square: Square,
    pub dark_king_square: Square,

    pub castling_rights: CastleRights,
    pub en_passant_target: Option<Square>,

    pub undo_stack: Vec<UndoState>,

    // FEN clocks of the position the history starts from.
    pub start_halfmove_clock: u16,
    pub start_fullmove_number: u16,

    // --- Derived check data ---
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
    pub checkmate: bool,
    pub stalemate: bool,
}

impl GameState {
    /// State with an empty board and kings cached on their home squares.
    /// Callers filling the board must keep the king caches in step.
    pub(crate) fn new_empty() -> Self {
        Self {
            board: [[None; 8]; 8],
            side_to_move: Color::Light,
            light_king_square: Square::new(7, 4),
            dark_king_square: Square::new(0, 4),
            castling_rights: CastleRights::NONE,
            en_passant_target: None,
            undo_stack: Vec::new(),
            start_halfmove_clock: 0,
            start_fullmove_number: 1,
            in_check: false,
            pins: Vec::new(),
            checks: Vec::new(),
            checkmate: false,
            stalemate: false,
        }
    }

    /// Standard initial position: light to move, all rights held, no history.
    pub fn new_game() -> Self {
        let mut game = Self::new_empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, kind) in back_rank.into_iter().enumerate() {
            game.board[0][col] = Some(Piece::new(Color::Dark, kind));
            game.board[1][col] = Some(Piece::new(Color::Dark, PieceKind::Pawn));
            game.board[6][col] = Some(Piece::new(Color::Light, PieceKind::Pawn));
            game.board[7][col] = Some(Piece::new(Color::Light, kind));
        }
        game.castling_rights = CastleRights::ALL;
        game
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Compares the position fields only; clocks are ignored.
    pub fn is_starting_position(&self) -> bool {
        let fen = self.get_fen();
        fen.split_whitespace()
            .take(4)
            .eq(STARTING_POSITION_FEN.split_whitespace().take(4))
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        piece_at(&self.board, square)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::Light => self.light_king_square,
            Color::Dark => self.dark_king_square,
        }
    }

    #[inline]
    pub(crate) fn set_king_square(&mut self, color: Color, square: Square) {
        match color {
            Color::Light => self.light_king_square = square,
            Color::Dark => self.dark_king_square = square,
        }
    }

    /// Legal moves for the side to move, with the position's status.
    pub fn legal_moves(&mut self) -> LegalMoves {
        legal_move_generator::generate_legal_moves(self)
    }

    /// Status of the current position; computes the legal moves if needed.
    pub fn status(&mut self) -> GameStatus {
        self.legal_moves().status
    }

    /// Legal move going from `start` to `end`, if any.
    pub fn find_legal_move(&mut self, start: Square, end: Square) -> Option<Move> {
        let id = move_id(start, end);
        self.legal_moves().moves.into_iter().find(|mv| mv.id() == id)
    }

    /// Apply a legal move, promoting to a queen.
    pub fn apply_move(&mut self, mv: &Move) -> MoveGenResult<()> {
        legal_move_apply::apply_move(self, mv, DEFAULT_PROMOTION)
    }

    pub fn apply_move_with_promotion(
        &mut self,
        mv: &Move,
        promotion: PieceKind,
    ) -> MoveGenResult<()> {
        legal_move_apply::apply_move(self, mv, promotion)
    }

    /// Take back the most recent move and return its frame.
    pub fn undo_move(&mut self) -> MoveGenResult<UndoState> {
        legal_move_apply::undo_move(self)
    }

    /// Moves played so far, oldest first.
    pub fn move_history(&self) -> impl Iterator<Item = &Move> + '_ {
        self.undo_stack.iter().map(|frame| &frame.mv)
    }

    /// Notation of the moves played so far, with the promotion pieces actually chosen.
    pub fn notation_history(&self) -> Vec<String> {
        self.undo_stack.iter().map(UndoState::notation).collect()
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u16 {
        let mut quiet = 0u16;
        for frame in self.undo_stack.iter().rev() {
            if frame.mv.is_capture() || frame.mv.piece_moved.kind == PieceKind::Pawn {
                return quiet;
            }
            quiet = quiet.saturating_add(1);
        }
        quiet.saturating_add(self.start_halfmove_clock)
    }

    /// Move number, incremented after each dark move.
    pub fn fullmove_number(&self) -> u16 {
        let dark_moves = self
            .undo_stack
            .iter()
            .filter(|frame| frame.mv.piece_moved.color == Color::Dark)
            .count();
        self.start_fullmove_number
            .saturating_add(u16::try_from(dark_moves).unwrap_or(u16::MAX))
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            board: self.board,
            side_to_move: self.side_to_move,
            light_king_square: self.light_king_square,
            dark_king_square: self.dark_king_square,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            history_depth: self.undo_stack.len(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn new_game_matches_the_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert!(game.is_starting_position());
        assert_eq!(game.side_to_move, Color::Light);
        assert_eq!(game.castling_rights, CastleRights::ALL);
        assert_eq!(game.en_passant_target, None);
        assert_eq!(game.ply(), 0);
    }

    #[test]
    fn king_caches_point_at_the_kings() {
        let game = GameState::new_game();
        for color in [Color::Light, Color::Dark] {
            let square = game.king_square(color);
            assert_eq!(game.piece_at(square), Some(Piece::new(color, PieceKind::King)));
        }
    }

    #[test]
    fn starting_position_counts_thirty_two_pieces() {
        let game = GameState::new_game();
        let pieces = game.board.iter().flatten().filter(|p| p.is_some()).count();
        assert_eq!(pieces, 32);
    }

    #[test]
    fn clocks_follow_the_history() {
        let mut game = GameState::new_game();
        for text in ["g1f3", "g8f6", "f3g1"] {
            crate::utils::long_algebraic::apply_long_algebraic(&mut game, text).expect("legal");
        }
        assert_eq!(game.halfmove_clock(), 3);
        assert_eq!(game.fullmove_number(), 2);
        assert!(!game.is_starting_position());

        crate::utils::long_algebraic::apply_long_algebraic(&mut game, "e7e5").expect("legal");
        assert_eq!(game.halfmove_clock(), 0);
        assert_eq!(game.fullmove_number(), 3);
    }

    #[test]
    fn snapshot_tracks_the_history_depth() {
        let mut game = GameState::new_game();
        let before = game.snapshot();
        crate::utils::long_algebraic::apply_long_algebraic(&mut game, "e2e4").expect("legal");
        assert_ne!(game.snapshot(), before);
        game.undo_move().expect("undo");
        assert_eq!(game.snapshot(), before);
        assert!(game.is_starting_position());
    }
}
