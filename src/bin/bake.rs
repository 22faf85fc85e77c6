//! Write the attack tables to disk, or check a file written earlier.
//!
//! Usage: cargo run --release --bin bake -- --output tables.bin
//!        cargo run --release --bin bake -- --format rust --output luts.rs
//!        cargo run --release --bin bake -- --verify tables.bin

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{bail, Result, WrapErr};
use log::info;

use rust_movegen::bake::{read_binary, render_rust_source, write_binary};
use rust_movegen::tables::AttackTables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Little-endian table file, loadable at startup
    Binary,
    /// Rust source with the tables as statics
    Rust,
}

#[derive(Parser, Debug)]
#[command(name = "bake")]
#[command(about = "Precompute knight, king, bishop and rook attack tables")]
struct Args {
    /// Where to write the tables
    #[arg(short, long, required_unless_present = "verify")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Binary)]
    format: Format,

    /// Load a binary table file and compare it against freshly built tables
    #[arg(long)]
    verify: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn write_tables(tables: &AttackTables, path: &Path, format: Format) -> Result<()> {
    let file = File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    match format {
        Format::Binary => write_binary(tables, &mut out)?,
        Format::Rust => out.write_all(render_rust_source(tables).as_bytes())?,
    }
    out.flush()?;
    Ok(())
}

fn verify_tables(tables: &AttackTables, path: &Path) -> Result<()> {
    let file = File::open(path).wrap_err_with(|| format!("opening {}", path.display()))?;
    let loaded = read_binary(BufReader::new(file))
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    if loaded != *tables {
        bail!("{} does not match the generated tables", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.verbose);

    let start = Instant::now();
    let tables = AttackTables::new();
    info!("Generated attack tables in {:?}", start.elapsed());

    if let Some(path) = &args.output {
        write_tables(&tables, path, args.format)?;
        info!("Wrote {:?} tables to {}", args.format, path.display());
    }

    if let Some(path) = &args.verify {
        verify_tables(&tables, path)?;
        info!("{} matches the generated tables", path.display());
    }

    Ok(())
}
