//! Pseudo-legal move generation on bitboards.
//!
//! Knight and king moves come from per-square tables, bishop and rook moves
//! from per-square occupancy-variant tables indexed by a compression of the
//! board occupancy, queen moves from both, and pawn moves are computed
//! directly.
//!
//! ```
//! use rust_movegen::movegen::pseudo_legal_moves;
//! use rust_movegen::types::{Color, Coordinate, PieceType};
//!
//! let e2 = Coordinate::from_algebraic("e2").unwrap();
//! let moves = pseudo_legal_moves(Some(PieceType::Pawn), e2, 0, 0, Color::White);
//! assert_eq!(moves.quiet.count_ones(), 2);
//! ```

pub mod error;
pub mod types;
pub mod bitboard;
pub mod attacks;
pub mod variants;
pub mod compress;
pub mod tables;
pub mod pawn;
pub mod movegen;
pub mod bake;
