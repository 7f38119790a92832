//! FEN-to-GameState parser.
//!
//! Builds a game state from a Forsyth-Edwards Notation string: the grid, the
//! side to move, castling rights, the en-passant target and the king caches.
//! The two clock fields are optional.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::scan_side_to_move;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, String> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or("Missing board layout in FEN")?;
    let side_part = parts.next().ok_or("Missing side-to-move in FEN")?;
    let castling_part = parts.next().ok_or("Missing castling rights in FEN")?;
    let en_passant_part = parts.next().ok_or("Missing en-passant square in FEN")?;
    let halfmove_part = parts.next();
    let fullmove_part = parts.next();

    if halfmove_part.is_some() && fullmove_part.is_none() {
        return Err("Missing fullmove number in FEN".to_owned());
    }
    if parts.next().is_some() {
        return Err("FEN has extra trailing fields".to_owned());
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_target = parse_en_passant_square(en_passant_part)?;
    if let (Some(halfmove), Some(fullmove)) = (halfmove_part, fullmove_part) {
        game_state.start_halfmove_clock = halfmove
            .parse::<u16>()
            .map_err(|_| format!("Invalid halfmove clock: {halfmove}"))?;
        game_state.start_fullmove_number = fullmove
            .parse::<u16>()
            .map_err(|_| format!("Invalid fullmove number: {fullmove}"))?;
    }

    let scan = scan_side_to_move(&game_state);
    game_state.in_check = scan.in_check;
    game_state.pins = scan.pins;
    game_state.checks = scan.checks;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("Board layout must contain 8 ranks".to_owned());
    }

    let mut kings_found = [0usize; 2];

    // FEN lists rank 8 first, which is grid row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                let step = usize::try_from(empty_count).map_err(|_| "Digit conversion failed")?;
                if !(1..=8).contains(&step) {
                    return Err(format!("Invalid empty-square count '{ch}'"));
                }
                col += step;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| format!("Invalid piece character '{ch}' in board layout"))?;

            if col >= 8 {
                return Err("Board rank has too many files".to_owned());
            }

            // Both indices are below 8 here.
            let square = Square::new(row as u8, col as u8);
            set_piece(&mut game_state.board, square, Some(piece));
            if piece.kind == PieceKind::King {
                kings_found[piece.color.index()] += 1;
                game_state.set_king_square(piece.color, square);
            }
            col += 1;
        }

        if col != 8 {
            return Err("Board rank does not sum to 8 files".to_owned());
        }
    }

    if kings_found != [1, 1] {
        return Err(format!(
            "Board must hold exactly one king per side, found {} light and {} dark",
            kings_found[Color::Light.index()],
            kings_found[Color::Dark.index()]
        ));
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, String> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(format!("Invalid side-to-move field: {side_part}")),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastleRights, String> {
    if castling_part == "-" {
        return Ok(CastleRights::NONE);
    }

    let mut rights = CastleRights::NONE;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.light_kingside = true,
            'Q' => rights.light_queenside = true,
            'k' => rights.dark_kingside = true,
            'q' => rights.dark_queenside = true,
            _ => return Err(format!("Invalid castling rights character: {ch}")),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    // Targets sit on rank 3 or rank 6.
    if square.row != 2 && square.row != 5 {
        return Err(format!("En-passant square must be on rank 3 or 6: {en_passant_part}"));
    }
    Ok(Some(square))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
