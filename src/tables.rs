//! Precomputed attack tables.
//!
//! Jumping pieces get one bitboard per square. Sliding pieces get, per square,
//! one bitboard per occupancy variant of the square's relevant mask, so a
//! lookup is a compression index plus an array read.
//!
//! Tables are built once and never mutated. [`attack_tables`] builds the
//! process-wide copy on first use unless [`install_attack_tables`] supplied
//! one first (for example from a persisted file, see [`crate::bake`]).

use crate::attacks::{
    jumping_attack_map, ray_attack, relevant_masks, BISHOP_DIRECTIONS, KING_OFFSETS,
    KNIGHT_OFFSETS, ROOK_DIRECTIONS, SLIDING_DIRECTIONS,
};
use crate::compress::{variant_index, Compression};
use crate::error::MovegenError;
use crate::types::{Coordinate, BOARD_AREA};
use crate::variants::{occupancy_variants, variant_count};
use log::{debug, info};
use std::sync::OnceLock;
use std::time::Instant;

/// Slots per square in the bishop table (`2^9`, the largest bishop mask)
pub const BISHOP_POSSIBLE_VARIANTS: usize = 512;
/// Slots per square in the rook table (`2^12`, the largest rook mask)
pub const ROOK_POSSIBLE_VARIANTS: usize = 4096;

/// Attack table of one sliding piece.
///
/// Every square gets `width` slots; slots past the square's own variant count
/// are zero and unreachable through a compression index.
#[derive(Clone, PartialEq, Eq)]
pub struct SlidingTable {
    relevant_masks: [u64; BOARD_AREA],
    width: usize,
    entries: Box<[u64]>,
}

impl SlidingTable {
    /// Enumerate every occupancy variant of every square and store the ray
    /// attack for it at the variant's index.
    pub fn assemble(directions: &[Coordinate; SLIDING_DIRECTIONS], width: usize) -> Self {
        let relevant_masks = relevant_masks(directions);
        let mut entries = vec![0u64; BOARD_AREA * width].into_boxed_slice();

        for (sq, &mask) in relevant_masks.iter().enumerate() {
            assert!(
                variant_count(mask) <= width,
                "square {sq} has {} variants but the table holds {width}",
                variant_count(mask)
            );
            let row = &mut entries[sq * width..(sq + 1) * width];
            for (idx, occupancy) in occupancy_variants(mask).into_iter().enumerate() {
                row[idx] = ray_attack(sq as u8, occupancy, directions);
            }
        }

        SlidingTable {
            relevant_masks,
            width,
            entries,
        }
    }

    /// Rebuild a table from raw parts. Used by the persisted-table loader,
    /// which validates `width` against the masks first.
    pub(crate) fn from_parts(relevant_masks: [u64; BOARD_AREA], width: usize, entries: Box<[u64]>) -> Self {
        debug_assert_eq!(entries.len(), BOARD_AREA * width);
        SlidingTable {
            relevant_masks,
            width,
            entries,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn relevant_masks(&self) -> &[u64; BOARD_AREA] {
        &self.relevant_masks
    }

    /// Relevant mask of `sq`, empty off the board
    #[inline(always)]
    pub fn relevant_mask(&self, sq: u8) -> u64 {
        self.relevant_masks.get(sq as usize).copied().unwrap_or(0)
    }

    /// The `width` slots of square `sq`
    pub fn row(&self, sq: u8) -> &[u64] {
        let sq = sq as usize;
        if sq >= BOARD_AREA {
            return &[];
        }
        &self.entries[sq * self.width..(sq + 1) * self.width]
    }

    pub(crate) fn entries(&self) -> &[u64] {
        &self.entries
    }

    /// Attacks from `sq` with the given occupancy, blockers included.
    #[inline(always)]
    pub fn attacks(&self, sq: u8, occupied: u64) -> u64 {
        let Some(&mask) = self.relevant_masks.get(sq as usize) else {
            return 0;
        };
        self.lookup(sq as usize, variant_index(occupied, mask))
    }

    /// [`SlidingTable::attacks`] with an explicit compression strategy.
    #[inline(always)]
    pub fn attacks_with(&self, compression: Compression, sq: u8, occupied: u64) -> u64 {
        let Some(&mask) = self.relevant_masks.get(sq as usize) else {
            return 0;
        };
        self.lookup(sq as usize, compression.variant_index(occupied, mask))
    }

    /// Attacks from `sq` given friendly and enemy occupancy, friendly squares
    /// removed. Enemy blockers stay in as capture targets.
    #[inline(always)]
    pub fn attacks_by_occupancy(&self, sq: u8, friendly: u64, enemy: u64) -> u64 {
        self.attacks(sq, friendly | enemy) & !friendly
    }

    #[inline(always)]
    fn lookup(&self, sq: usize, idx: usize) -> u64 {
        debug_assert!(idx < self.width, "variant index {idx} out of table width {}", self.width);
        self.entries[sq * self.width + idx]
    }
}

impl std::fmt::Debug for SlidingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidingTable")
            .field("width", &self.width)
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// All lookup tables the move generator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackTables {
    /// Knight attacks for each square
    pub knight: [u64; BOARD_AREA],
    /// King attacks for each square
    pub king: [u64; BOARD_AREA],
    pub bishop: SlidingTable,
    pub rook: SlidingTable,
}

impl AttackTables {
    /// Build every table in memory.
    pub fn new() -> Self {
        let start = Instant::now();
        let tables = AttackTables {
            knight: jumping_attack_map(&KNIGHT_OFFSETS),
            king: jumping_attack_map(&KING_OFFSETS),
            bishop: SlidingTable::assemble(&BISHOP_DIRECTIONS, BISHOP_POSSIBLE_VARIANTS),
            rook: SlidingTable::assemble(&ROOK_DIRECTIONS, ROOK_POSSIBLE_VARIANTS),
        };
        debug!("Built attack tables in {:?}", start.elapsed());
        tables
    }

    #[inline(always)]
    pub fn knight_attacks(&self, sq: u8) -> u64 {
        self.knight.get(sq as usize).copied().unwrap_or(0)
    }

    #[inline(always)]
    pub fn king_attacks(&self, sq: u8) -> u64 {
        self.king.get(sq as usize).copied().unwrap_or(0)
    }

    #[inline(always)]
    pub fn bishop_attacks(&self, sq: u8, occupied: u64) -> u64 {
        self.bishop.attacks(sq, occupied)
    }

    #[inline(always)]
    pub fn rook_attacks(&self, sq: u8, occupied: u64) -> u64 {
        self.rook.attacks(sq, occupied)
    }

    /// Get queen attacks (combines bishop and rook)
    #[inline(always)]
    pub fn queen_attacks(&self, sq: u8, occupied: u64) -> u64 {
        self.bishop_attacks(sq, occupied) | self.rook_attacks(sq, occupied)
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Global attack tables (lazily initialized at runtime)
static ATTACK_TABLES: OnceLock<AttackTables> = OnceLock::new();

/// Get the global attack tables, building them if needed
#[inline]
pub fn attack_tables() -> &'static AttackTables {
    ATTACK_TABLES.get_or_init(AttackTables::new)
}

/// Provide the global tables from another source, such as a persisted file.
///
/// Must happen before the first query; afterwards the tables are fixed.
pub fn install_attack_tables(tables: AttackTables) -> Result<(), MovegenError> {
    ATTACK_TABLES
        .set(tables)
        .map_err(|_| MovegenError::TablesAlreadyInitialized)?;
    info!("Installed precomputed attack tables");
    Ok(())
}
