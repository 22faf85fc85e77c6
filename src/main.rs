//! Print the pseudo-legal moves of a single piece.
//!
//! Usage: cargo run --release --bin movegen -- \
//!          --piece q --square d4 --friendly d2,e3 --enemy 0x0008000000000000
//!
//! Occupancies are either hex bitboards (`0x...`) or comma separated squares.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, Result, WrapErr};
use log::info;
use rand::prelude::*;

use rust_movegen::bake::read_binary;
use rust_movegen::bitboard::{render, sq_to_bb};
use rust_movegen::compress::Compression;
use rust_movegen::movegen::MoveGenerator;
use rust_movegen::tables::{attack_tables, install_attack_tables};
use rust_movegen::types::{Color, Coordinate, PieceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CompressionArg {
    Auto,
    Pext,
    Portable,
}

#[derive(Parser, Debug)]
#[command(name = "movegen")]
#[command(about = "Show the pseudo-legal moves of one piece on a bitboard")]
struct Args {
    /// Piece letter: p, n, b, r, q or k
    #[arg(short, long)]
    piece: char,

    /// Square the piece stands on, e.g. e4
    #[arg(short, long)]
    square: String,

    /// Side the piece belongs to
    #[arg(short, long, value_enum, default_value_t = Side::White)]
    color: Side,

    /// Squares holding friendly pieces
    #[arg(long, value_parser = parse_bitboard, default_value = "0x0")]
    friendly: u64,

    /// Squares holding enemy pieces
    #[arg(long, value_parser = parse_bitboard, default_value = "0x0")]
    enemy: u64,

    /// Scatter random friendly and enemy pieces using this seed
    #[arg(long, conflicts_with_all = ["friendly", "enemy"])]
    random_occupancy: Option<u64>,

    /// Compression strategy for bishop, rook and queen lookups
    #[arg(long, value_enum, default_value_t = CompressionArg::Auto)]
    compression: CompressionArg,

    /// Load tables written by `bake` instead of building them
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn parse_bitboard(s: &str) -> Result<u64, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(&hex.replace('_', ""), 16).map_err(|e| e.to_string());
    }
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .try_fold(0u64, |bb, part| {
            let coord = Coordinate::from_algebraic(part).map_err(|e| e.to_string())?;
            let sq = coord.square().ok_or_else(|| format!("`{part}` is off the board"))?;
            Ok(bb | sq_to_bb(sq))
        })
}

/// Roughly one square in sixteen per side, never the piece's own square
fn random_occupancy(seed: u64, own: u64) -> (u64, u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut friendly = 0u64;
    let mut enemy = 0u64;
    for sq in 0..64u8 {
        let bit = sq_to_bb(sq);
        if bit & own != 0 {
            continue;
        }
        match rng.gen_range(0..16) {
            0 => friendly |= bit,
            1 => enemy |= bit,
            _ => {}
        }
    }
    (friendly, enemy)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.verbose);

    let piece = PieceType::from_char(args.piece)?;
    let coord = Coordinate::from_algebraic(&args.square)?;
    let sq = coord
        .square()
        .ok_or_else(|| eyre!("square {} is off the board", args.square))?;
    let color = match args.color {
        Side::White => Color::White,
        Side::Black => Color::Black,
    };

    let (friendly, enemy) = match args.random_occupancy {
        Some(seed) => random_occupancy(seed, sq_to_bb(sq)),
        None => (args.friendly, args.enemy),
    };

    if let Some(path) = &args.tables {
        let file = File::open(path).wrap_err_with(|| format!("opening {}", path.display()))?;
        let tables = read_binary(BufReader::new(file))
            .wrap_err_with(|| format!("loading attack tables from {}", path.display()))?;
        install_attack_tables(tables)?;
    }

    let compression = match args.compression {
        CompressionArg::Auto => Compression::current(),
        CompressionArg::Pext => Compression::Pext.resolve(),
        CompressionArg::Portable => Compression::Portable,
    };
    info!("Using {compression} compression");

    let generator = MoveGenerator::new(attack_tables()).with_compression(compression);
    let moves = generator.pseudo_legal(Some(piece), coord, friendly, enemy, color);

    println!("{} {} on {}", color.to_human(), piece.to_human(), coord);
    println!("Friendly:\n{}", render(friendly));
    println!("Enemy:\n{}", render(enemy));
    println!("Quiet ({}):\n{}", moves.quiet.count_ones(), render(moves.quiet));
    println!("Kills ({}):\n{}", moves.kills.count_ones(), render(moves.kills));
    Ok(())
}
