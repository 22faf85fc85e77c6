//! Attack pattern generators.
//!
//! These are the slow, authoritative paths: they walk offsets and rays square
//! by square. [`crate::tables`] runs them once to fill the lookup tables; the
//! query path never calls them.
//!
//! Every generator takes its offset or direction set as a parameter so the
//! same code serves knights and kings, bishops and rooks.

use crate::bitboard::edge_exclusion_mask;
use crate::types::{Coordinate, BOARD_AREA};

pub const JUMPING_OFFSETS: usize = 8;
pub const SLIDING_DIRECTIONS: usize = 4;

const fn delta(rank: i8, file: i8) -> Coordinate {
    Coordinate::new(rank, file)
}

pub const KNIGHT_OFFSETS: [Coordinate; JUMPING_OFFSETS] = [
    delta(2, 1), delta(2, -1), delta(-2, 1), delta(-2, -1),
    delta(1, 2), delta(1, -2), delta(-1, 2), delta(-1, -2),
];

pub const KING_OFFSETS: [Coordinate; JUMPING_OFFSETS] = [
    delta(1, 0), delta(-1, 0),   // vertical
    delta(0, 1), delta(0, -1),   // horizontal
    delta(1, 1), delta(1, -1),   // diagonal
    delta(-1, 1), delta(-1, -1),
];

pub const BISHOP_DIRECTIONS: [Coordinate; SLIDING_DIRECTIONS] = [
    delta(1, 1),
    delta(1, -1),
    delta(-1, 1),
    delta(-1, -1),
];

pub const ROOK_DIRECTIONS: [Coordinate; SLIDING_DIRECTIONS] = [
    delta(1, 0),
    delta(-1, 0),
    delta(0, 1),
    delta(0, -1),
];

/// Squares reachable from `sq` by one jump of any of `offsets`.
pub fn jumping_attack(offsets: &[Coordinate; JUMPING_OFFSETS], sq: u8) -> u64 {
    let Some(coord) = Coordinate::from_square(sq) else {
        return 0;
    };

    offsets
        .iter()
        .filter_map(|&offset| coord.offset(offset).square())
        .fold(0u64, |attack, target| attack | (1u64 << target))
}

/// Jumping attacks for every square.
pub fn jumping_attack_map(offsets: &[Coordinate; JUMPING_OFFSETS]) -> [u64; BOARD_AREA] {
    let mut map = [0u64; BOARD_AREA];
    for (sq, attack) in map.iter_mut().enumerate() {
        *attack = jumping_attack(offsets, sq as u8);
    }
    map
}

/// Walk every direction from `sq` until the board edge or the first occupied
/// square. The blocker itself is included; the caller decides whether it is
/// a capture or a friendly piece.
pub fn ray_attack(sq: u8, occupancy: u64, directions: &[Coordinate; SLIDING_DIRECTIONS]) -> u64 {
    let Some(coord) = Coordinate::from_square(sq) else {
        return 0;
    };

    let mut attack = 0u64;
    for &direction in directions {
        let mut target = coord.offset(direction);
        while let Some(target_sq) = target.square() {
            let bit = 1u64 << target_sq;
            attack |= bit;
            if occupancy & bit != 0 {
                break;
            }
            target = target.offset(direction);
        }
    }
    attack
}

/// Occupancy bits that can change the attack set of a slider on `sq`:
/// the empty-board rays minus the rim squares the rays end on anyway.
pub fn relevant_mask(sq: u8, directions: &[Coordinate; SLIDING_DIRECTIONS]) -> u64 {
    let Some(coord) = Coordinate::from_square(sq) else {
        return 0;
    };
    ray_attack(sq, 0, directions) & edge_exclusion_mask(coord)
}

pub fn relevant_masks(directions: &[Coordinate; SLIDING_DIRECTIONS]) -> [u64; BOARD_AREA] {
    let mut masks = [0u64; BOARD_AREA];
    for (sq, mask) in masks.iter_mut().enumerate() {
        *mask = relevant_mask(sq as u8, directions);
    }
    masks
}
