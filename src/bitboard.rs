//! Bitboard helpers.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the chess board.
//! Square indexing: a1 = 0, b1 = 1, ..., h1 = 7, a2 = 8, ..., h8 = 63
//! This corresponds to: square_index = rank * 8 + file where rank/file are 0-indexed.

use crate::types::{Coordinate, BOARD_LENGTH};

pub const RANK_1: u64 = 0x0000_0000_0000_00FF;
pub const RANK_8: u64 = 0xFF00_0000_0000_0000;
pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_H: u64 = 0x8080_8080_8080_8080;

/// Every square except the four corners
const NOT_CORNERS: u64 = 0x7EFF_FFFF_FFFF_FF7E;

/// Convert a 0-indexed rank/file to a square index (0-63)
#[inline(always)]
pub const fn pos_to_sq(rank: u8, file: u8) -> u8 {
    rank * 8 + file
}

/// Convert a square index to a bitboard with that single bit set
#[inline(always)]
pub const fn sq_to_bb(sq: u8) -> u64 {
    1u64 << sq
}

/// Squares of the rim a ray from `coord` runs into without the square's own
/// rank or file counting as rim.
///
/// A sliding piece always stops at the border, so those squares never decide
/// where a ray ends and are left out of relevant masks. Edges the piece itself
/// stands on stay in, since rays run along them.
pub const fn edge_exclusion_mask(coord: Coordinate) -> u64 {
    let mut mask = NOT_CORNERS;
    if coord.rank != 0 {
        mask &= !RANK_1;
    }
    if coord.rank != BOARD_LENGTH - 1 {
        mask &= !RANK_8;
    }
    if coord.file != 0 {
        mask &= !FILE_A;
    }
    if coord.file != BOARD_LENGTH - 1 {
        mask &= !FILE_H;
    }
    mask
}

/// Iterate over set bits in a bitboard, returning square indices
pub struct BitboardIter(pub u64);

impl Iterator for BitboardIter {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let sq = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1; // Clear the lowest set bit
            Some(sq)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

/// Render a bitboard as an 8x8 grid, rank 8 on top, `#` for set squares.
pub fn render(bitboard: u64) -> String {
    let mut out = String::from("  A B C D E F G H\n");
    for rank in (0..BOARD_LENGTH).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..BOARD_LENGTH {
            out.push(if Coordinate::new(rank, file).is_set(bitboard) { '#' } else { '.' });
            out.push(' ');
        }
        out.pop();
        out.push('\n');
    }
    out
}
