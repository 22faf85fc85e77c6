//! Errors raised by the fallible edges of the crate: parsing user input,
//! installing tables and reading persisted tables.
//!
//! The move query path never fails; it answers with empty bitboards instead.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum MovegenError {
    #[error("Algebraic notation must be a file a-h followed by a rank 1-8, got `{0}`")]
    InvalidAlgebraic(String),

    #[error("Unrecognized piece type `{0}`")]
    UnknownPiece(char),

    #[error("Attack tables were already initialized for this process")]
    TablesAlreadyInitialized,

    #[error("Not a persisted attack table file (bad magic)")]
    BadMagic,

    #[error("Unsupported attack table format version {0}")]
    UnsupportedVersion(u16),

    #[error("Attack table file ended early")]
    Truncated,

    #[error("Attack table file has unexpected bytes after the last table")]
    TrailingBytes,

    /// A sliding table is too narrow for the relevant mask of some square,
    /// or its width is not a power of two within bounds.
    #[error("Invalid {piece} table width {width} (square {square} needs {needed})")]
    InvalidWidth {
        piece: &'static str,
        width: usize,
        square: u8,
        needed: usize,
    },

    /// A stored relevant mask or jumping map differs from the one derived
    /// from the piece's movement.
    #[error("Stored {piece} table for square {square} does not match its movement pattern")]
    MaskMismatch { piece: &'static str, square: u8 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, MovegenError>;
