//! Pseudo-legal move queries.
//!
//! Moves are legal by piece geometry only. Callers must still:
//! * remove squares attacked by the enemy from king moves,
//! * expand pawn moves onto the last rank into promotions,
//! * add en passant captures.

use crate::compress::Compression;
use crate::pawn::{pawn_captures, pawn_pushes};
use crate::tables::{attack_tables, AttackTables, SlidingTable};
use crate::types::{Color, Coordinate, Move, PieceType, BOARD_AREA};

pub struct MoveGenerator<'a> {
    tables: &'a AttackTables,
    compression: Compression,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(tables: &'a AttackTables) -> Self {
        Self {
            tables,
            compression: Compression::current(),
        }
    }

    /// Force a compression strategy for sliding lookups.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Quiet and capturing destinations of `piece` on `coord`.
    ///
    /// `None` for the piece, or a coordinate off the board, gives an empty
    /// move. A square present in both `friendly` and `enemy` counts as
    /// friendly.
    pub fn pseudo_legal(
        &self,
        piece: Option<PieceType>,
        coord: Coordinate,
        friendly: u64,
        enemy: u64,
        color: Color,
    ) -> Move {
        let enemy = enemy & !friendly;
        let blocked = friendly | enemy;

        let Some(piece) = piece else {
            return Move::EMPTY;
        };

        match piece {
            PieceType::Pawn => Move {
                quiet: pawn_pushes(coord, blocked, color),
                kills: pawn_captures(coord, enemy, color),
            },
            PieceType::Knight => Self::jumping(&self.tables.knight, coord, blocked, enemy),
            PieceType::King => Self::jumping(&self.tables.king, coord, blocked, enemy),
            PieceType::Bishop => self.sliding(&self.tables.bishop, coord, friendly, enemy),
            PieceType::Rook => self.sliding(&self.tables.rook, coord, friendly, enemy),
            PieceType::Queen => {
                self.sliding(&self.tables.rook, coord, friendly, enemy)
                    | self.sliding(&self.tables.bishop, coord, friendly, enemy)
            }
        }
    }

    #[inline(always)]
    fn jumping(table: &[u64; BOARD_AREA], coord: Coordinate, blocked: u64, enemy: u64) -> Move {
        let Some(sq) = coord.square() else {
            return Move::EMPTY;
        };
        let attacks = table[sq as usize];
        Move {
            quiet: attacks & !blocked,
            kills: attacks & enemy,
        }
    }

    #[inline(always)]
    fn sliding(&self, table: &SlidingTable, coord: Coordinate, friendly: u64, enemy: u64) -> Move {
        let Some(sq) = coord.square() else {
            return Move::EMPTY;
        };
        let attacks = table.attacks_with(self.compression, sq, friendly | enemy) & !friendly;
        Move {
            quiet: attacks & !enemy,
            kills: attacks & enemy,
        }
    }
}

impl Default for MoveGenerator<'static> {
    fn default() -> Self {
        MoveGenerator::new(attack_tables())
    }
}

/// Pseudo-legal moves using the process-wide tables.
pub fn pseudo_legal_moves(
    piece: Option<PieceType>,
    coord: Coordinate,
    friendly: u64,
    enemy: u64,
    color: Color,
) -> Move {
    MoveGenerator::default().pseudo_legal(piece, coord, friendly, enemy, color)
}
