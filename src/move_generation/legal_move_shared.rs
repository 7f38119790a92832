use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;

/// Square → pin direction lookup built once per generation pass.
///
/// Generators only read it, so a queen consulted for both its rook and bishop
/// rays sees the same pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PinMap {
    directions: [[Option<Direction>; 8]; 8],
}

impl PinMap {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pins(pins: &[Pin]) -> Self {
        let mut map = Self::default();
        for pin in pins {
            map.directions[pin.square.row as usize][pin.square.col as usize] = Some(pin.direction);
        }
        map
    }

    #[inline]
    pub fn pin_direction(&self, square: Square) -> Option<Direction> {
        self.directions[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn is_pinned(&self, square: Square) -> bool {
        self.pin_direction(square).is_some()
    }

    /// Whether the piece on `square` may step along `direction`: always when
    /// unpinned, otherwise only along the pin line in either sense.
    #[inline]
    pub fn allows(&self, square: Square, direction: Direction) -> bool {
        match self.pin_direction(square) {
            None => true,
            Some(pin) => pin == direction || pin == (-direction.0, -direction.1),
        }
    }
}

/// Everything a per-piece generator needs to know about the side it generates for.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub state: &'a GameState,
    pub side: Color,
    pub pins: PinMap,
    pub en_passant_target: Option<Square>,
}

impl<'a> GenerationContext<'a> {
    /// Context for the side to move, honouring its pins and en-passant target.
    pub fn for_side_to_move(state: &'a GameState, pins: PinMap) -> Self {
        Self {
            state,
            side: state.side_to_move,
            pins,
            en_passant_target: state.en_passant_target,
        }
    }

    /// Context for `side` used as attack coverage: no pins, no en passant.
    pub fn coverage(state: &'a GameState, side: Color) -> Self {
        Self {
            state,
            side,
            pins: PinMap::empty(),
            en_passant_target: None,
        }
    }

    #[inline]
    pub fn board(&self) -> &'a Board {
        &self.state.board
    }

    #[inline]
    pub fn king_square(&self) -> Square {
        self.state.king_square(self.side)
    }
}

/// Walk each direction from `from` until the edge, a friendly piece (excluded)
/// or an enemy piece (included). Directions the pin forbids are skipped.
pub fn push_sliding_moves(
    ctx: &GenerationContext<'_>,
    from: Square,
    piece: Piece,
    directions: &[Direction],
    out: &mut Vec<Move>,
) {
    let board = ctx.board();
    for &direction in directions {
        if !ctx.pins.allows(from, direction) {
            continue;
        }
        for distance in 1..8 {
            let Some(to) = from.offset(direction, distance) else {
                break;
            };
            match piece_at(board, to) {
                None => out.push(Move::new(from, to, piece, board)),
                Some(target) if target.color != ctx.side => {
                    out.push(Move::new(from, to, piece, board));
                    break;
                }
                Some(_) => break,
            }
        }
    }
}

/// Fixed-offset steps onto empty or enemy squares.
pub fn push_step_moves(
    ctx: &GenerationContext<'_>,
    from: Square,
    piece: Piece,
    offsets: &[Direction],
    out: &mut Vec<Move>,
) {
    let board = ctx.board();
    for &offset in offsets {
        let Some(to) = from.offset(offset, 1) else {
            continue;
        };
        if piece_at(board, to).map_or(true, |target| target.color != ctx.side) {
            out.push(Move::new(from, to, piece, board));
        }
    }
}
