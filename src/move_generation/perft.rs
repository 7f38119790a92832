use std::thread;

use tracing::debug;

use crate::game_state::{chess_types::PieceKind, game_state::GameState};
use crate::move_generation::legal_move_apply::{make_move, take_back};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
use crate::moves::move_descriptions::Move;
use crate::utils::long_algebraic::move_with_promotion_to_long_algebraic;
use crate::utils::random_playout::PROMOTION_CHOICES;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count the leaves `depth` plies below the current position, walking the
/// tree with apply/undo on `game_state` itself. Each promotion counts once
/// per piece it can become.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }

    for (mv, promotion) in expanded_moves(generator, game_state) {
        count_move(generator, game_state, &mv, promotion, depth, &mut total)?;
    }
    Ok(total)
}

/// Leaf count below each root move, keyed by its long-algebraic text.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> MoveGenResult<Vec<(String, u64)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for (mv, promotion) in expanded_moves(generator, game_state) {
        let mut counts = PerftCounts::default();
        count_move(generator, game_state, &mv, promotion, depth, &mut counts)?;
        let text = move_with_promotion_to_long_algebraic(&mv, promotion)
            .map_err(MoveGenerationError::InvalidState)?;
        out.push((text, counts.nodes));
    }
    out.sort();
    Ok(out)
}

/// `perft` with the root moves split across `threads` workers, each owning a
/// clone of the position.
pub fn perft_parallel<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
    threads: usize,
) -> MoveGenResult<PerftCounts> {
    let mut root = game_state.clone();
    if depth == 0 {
        return perft(generator, &mut root, depth);
    }

    let root_moves = expanded_moves(generator, &mut root);
    if root_moves.is_empty() {
        return Ok(PerftCounts::default());
    }
    let chunk_len = root_moves.len().div_ceil(threads.max(1));
    debug!(depth, threads, roots = root_moves.len(), "parallel perft");

    thread::scope(|scope| -> MoveGenResult<PerftCounts> {
        let handles: Vec<_> = root_moves
            .chunks(chunk_len)
            .map(|chunk| {
                let mut local_state = root.clone();
                scope.spawn(move || -> MoveGenResult<PerftCounts> {
                    let mut local = PerftCounts::default();
                    for (mv, promotion) in chunk {
                        count_move(generator, &mut local_state, mv, *promotion, depth, &mut local)?;
                    }
                    Ok(local)
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            let local = handle.join().map_err(|_| {
                MoveGenerationError::InvalidState("perft worker thread panicked".to_owned())
            })?;
            total.merge(local?);
        }
        Ok(total)
    })
}

/// Legal moves with each promotion repeated once per promotion piece.
fn expanded_moves<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
) -> Vec<(Move, Option<PieceKind>)> {
    let moves = generator.generate_legal_moves(game_state).moves;
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        if mv.is_promotion {
            out.extend(PROMOTION_CHOICES.iter().map(|&kind| (mv, Some(kind))));
        } else {
            out.push((mv, None));
        }
    }
    out
}

fn count_move<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    mv: &Move,
    promotion: Option<PieceKind>,
    depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    make_move(game_state, mv, promotion.unwrap_or(PieceKind::Queen));

    if depth == 1 {
        counts.nodes += 1;
        if mv.is_capture() {
            counts.captures += 1;
        }
        if mv.is_en_passant {
            counts.en_passant += 1;
        }
        if mv.is_castle {
            counts.castles += 1;
        }
        if mv.is_promotion {
            counts.promotions += 1;
        }
        if game_state.in_check {
            counts.checks += 1;
            if generator.generate_legal_moves(game_state).moves.is_empty() {
                counts.checkmates += 1;
            }
        }
    } else {
        counts.merge(perft(generator, game_state, depth - 1)?);
    }

    take_back(game_state)
        .map(|_| ())
        .ok_or_else(|| MoveGenerationError::InvalidState("perft lost its undo frame".to_owned()))
}
