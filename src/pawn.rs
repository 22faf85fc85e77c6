//! Pawn pushes and captures.
//!
//! Computed directly on every query: pawns have few, color-dependent targets
//! and a double push that depends on the single push square.
//!
//! Promotion and en passant are left to the caller. A pawn standing on its
//! own back rank (rank 8 for white, rank 1 for black) has already promoted
//! and gets no moves.

use crate::bitboard::sq_to_bb;
use crate::types::{Color, Coordinate, BOARD_LENGTH};

/// Forward pushes of a pawn on `coord`. `blocked` holds every occupied square.
pub fn pawn_pushes(coord: Coordinate, blocked: u64, color: Color) -> u64 {
    let Some(sq) = coord.square() else {
        return 0;
    };
    if coord.rank == color.pawn_back_rank() {
        return 0;
    }

    let from = sq_to_bb(sq);
    let single = forward(from, color) & !blocked;

    // single is empty when blocked, which also blocks the double push
    let double = if coord.rank == color.pawn_start_rank() {
        forward(single, color) & !blocked
    } else {
        0
    };

    single | double
}

#[inline(always)]
fn forward(bitboard: u64, color: Color) -> u64 {
    match color {
        Color::White => bitboard << BOARD_LENGTH,
        Color::Black => bitboard >> BOARD_LENGTH,
    }
}

/// Diagonal captures of a pawn on `coord`, only onto squares in `enemy`.
pub fn pawn_captures(coord: Coordinate, enemy: u64, color: Color) -> u64 {
    if !coord.is_valid() || coord.rank == color.pawn_back_rank() {
        return 0;
    }

    let rank = color.pawn_direction();
    let targets = [Coordinate::new(rank, -1), Coordinate::new(rank, 1)]
        .into_iter()
        .filter_map(|delta| coord.offset(delta).square())
        .fold(0u64, |captures, target| captures | sq_to_bb(target));
    targets & enemy
}

/// Squares a pawn on `coord` attacks, whether or not anything stands there.
pub fn pawn_attacks(coord: Coordinate, color: Color) -> u64 {
    pawn_captures(coord, u64::MAX, color)
}
