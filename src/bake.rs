//! Persisted attack tables.
//!
//! Tables can be written once and loaded later instead of being rebuilt at
//! startup. Loaded tables are bit-for-bit the ones [`AttackTables::new`]
//! produces.
//!
//! Binary layout, all integers little-endian:
//!
//! | field                | size                  |
//! |----------------------|-----------------------|
//! | magic `MVGENLUT`     | 8 bytes               |
//! | version              | u16                   |
//! | knight attacks       | 64 x u64              |
//! | king attacks         | 64 x u64              |
//! | bishop masks         | 64 x u64              |
//! | rook masks           | 64 x u64              |
//! | bishop width         | u32                   |
//! | bishop entries       | 64 x width x u64      |
//! | rook width           | u32                   |
//! | rook entries         | 64 x width x u64      |

use crate::attacks::{
    jumping_attack_map, relevant_masks, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
    ROOK_DIRECTIONS,
};
use crate::error::{MovegenError, Result};
use crate::tables::{AttackTables, SlidingTable, ROOK_POSSIBLE_VARIANTS};
use crate::types::BOARD_AREA;
use crate::variants::variant_count;
use itertools::Itertools;
use log::debug;
use std::io::{self, Read, Write};

pub const MAGIC: &[u8; 8] = b"MVGENLUT";
pub const VERSION: u16 = 1;

pub fn write_binary<W: Write>(tables: &AttackTables, mut out: W) -> Result<()> {
    out.write_all(MAGIC)?;
    out.write_all(&VERSION.to_le_bytes())?;
    write_words(&mut out, &tables.knight)?;
    write_words(&mut out, &tables.king)?;
    write_words(&mut out, tables.bishop.relevant_masks())?;
    write_words(&mut out, tables.rook.relevant_masks())?;
    for table in [&tables.bishop, &tables.rook] {
        out.write_all(&(table.width() as u32).to_le_bytes())?;
        write_words(&mut out, table.entries())?;
    }
    out.flush()?;
    Ok(())
}

pub fn read_binary<R: Read>(mut input: R) -> Result<AttackTables> {
    let mut magic = [0u8; 8];
    read_exact(&mut input, &mut magic)?;
    if &magic != MAGIC {
        return Err(MovegenError::BadMagic);
    }

    let mut version = [0u8; 2];
    read_exact(&mut input, &mut version)?;
    let version = u16::from_le_bytes(version);
    if version != VERSION {
        return Err(MovegenError::UnsupportedVersion(version));
    }

    let knight = read_board(&mut input)?;
    let king = read_board(&mut input)?;
    let bishop_masks = read_board(&mut input)?;
    let rook_masks = read_board(&mut input)?;
    check_board("knight", &knight, &jumping_attack_map(&KNIGHT_OFFSETS))?;
    check_board("king", &king, &jumping_attack_map(&KING_OFFSETS))?;
    check_board("bishop", &bishop_masks, &relevant_masks(&BISHOP_DIRECTIONS))?;
    check_board("rook", &rook_masks, &relevant_masks(&ROOK_DIRECTIONS))?;
    let bishop = read_sliding(&mut input, "bishop", bishop_masks)?;
    let rook = read_sliding(&mut input, "rook", rook_masks)?;

    let mut rest = [0u8; 1];
    if input.read(&mut rest)? != 0 {
        return Err(MovegenError::TrailingBytes);
    }

    debug!(
        "Loaded attack tables (bishop width {}, rook width {})",
        bishop.width(),
        rook.width()
    );
    Ok(AttackTables {
        knight,
        king,
        bishop,
        rook,
    })
}

fn write_words<W: Write>(out: &mut W, words: &[u64]) -> io::Result<()> {
    for word in words {
        out.write_all(&word.to_le_bytes())?;
    }
    Ok(())
}

/// `read_exact` with an early end of input reported as truncation
fn read_exact<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<()> {
    input.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => MovegenError::Truncated,
        _ => MovegenError::Io(e),
    })
}

fn read_words<R: Read>(input: &mut R, words: &mut [u64]) -> Result<()> {
    let mut buf = [0u8; 8];
    for word in words.iter_mut() {
        read_exact(input, &mut buf)?;
        *word = u64::from_le_bytes(buf);
    }
    Ok(())
}

fn read_board<R: Read>(input: &mut R) -> Result<[u64; BOARD_AREA]> {
    let mut board = [0u64; BOARD_AREA];
    read_words(input, &mut board)?;
    Ok(board)
}

/// Knight/king maps and relevant masks are cheap to derive, so a stored copy
/// must match the derived one exactly.
fn check_board(
    piece: &'static str,
    found: &[u64; BOARD_AREA],
    expected: &[u64; BOARD_AREA],
) -> Result<()> {
    match found.iter().zip(expected).position(|(f, e)| f != e) {
        Some(sq) => Err(MovegenError::MaskMismatch {
            piece,
            square: sq as u8,
        }),
        None => Ok(()),
    }
}

fn read_sliding<R: Read>(
    input: &mut R,
    piece: &'static str,
    masks: [u64; BOARD_AREA],
) -> Result<SlidingTable> {
    let mut width = [0u8; 4];
    read_exact(input, &mut width)?;
    let width = u32::from_le_bytes(width) as usize;
    validate_width(piece, width, &masks)?;

    let mut entries = vec![0u64; BOARD_AREA * width].into_boxed_slice();
    read_words(input, &mut entries)?;
    Ok(SlidingTable::from_parts(masks, width, entries))
}

/// Every compression index a mask can produce must fit in the table.
fn validate_width(piece: &'static str, width: usize, masks: &[u64; BOARD_AREA]) -> Result<()> {
    let invalid = |square: u8, needed: usize| MovegenError::InvalidWidth {
        piece,
        width,
        square,
        needed,
    };

    if !width.is_power_of_two() || width > ROOK_POSSIBLE_VARIANTS {
        return Err(invalid(0, variant_count(masks[0])));
    }
    for (sq, &mask) in masks.iter().enumerate() {
        let needed = variant_count(mask);
        if needed > width {
            return Err(invalid(sq as u8, needed));
        }
    }
    Ok(())
}

/// Render the tables as Rust statics, for embedding them in a crate.
pub fn render_rust_source(tables: &AttackTables) -> String {
    let mut out = String::new();
    out.push_str("// This file stores generated attack tables. DO NOT MODIFY!\n\n");
    push_board(&mut out, "KNIGHT_ATTACK_MAP", &tables.knight);
    push_board(&mut out, "KING_ATTACK_MAP", &tables.king);
    push_board(&mut out, "BISHOP_RELEVANT_MASK", tables.bishop.relevant_masks());
    push_board(&mut out, "ROOK_RELEVANT_MASK", tables.rook.relevant_masks());
    push_sliding(&mut out, "BISHOP_ATTACK_MAP", &tables.bishop);
    push_sliding(&mut out, "ROOK_ATTACK_MAP", &tables.rook);
    out
}

fn hex_words(words: &[u64]) -> String {
    words.iter().map(|w| format!("0x{w:016x}")).join(", ")
}

fn push_board(out: &mut String, name: &str, words: &[u64; BOARD_AREA]) {
    out.push_str(&format!(
        "pub static {name}: [u64; {BOARD_AREA}] = [{}];\n",
        hex_words(words)
    ));
}

fn push_sliding(out: &mut String, name: &str, table: &SlidingTable) {
    let rows = (0..BOARD_AREA as u8)
        .map(|sq| format!("[{}]", hex_words(table.row(sq))))
        .join(",\n    ");
    out.push_str(&format!(
        "pub static {name}: [[u64; {}]; {BOARD_AREA}] = [\n    {rows}\n];\n",
        table.width()
    ));
}
