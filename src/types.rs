use crate::error::MovegenError;
use std::fmt;

pub const BOARD_LENGTH: i8 = 8;
pub const BOARD_AREA: usize = 64;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn is_white(&self) -> bool {
        *self == Color::White
    }

    /// Rank delta a pawn of this color moves by
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Rank (0-indexed) pawns of this color start on and may double push from
    pub fn pawn_start_rank(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => 6,
        }
    }

    /// Rank a pawn of this color can never stand on without having promoted
    pub fn pawn_back_rank(&self) -> i8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl From<bool> for Color {
    /// `true` is white, matching the `is_white` flag used by board collaborators.
    fn from(is_white: bool) -> Self {
        if is_white {
            Color::White
        } else {
            Color::Black
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn from_char(c: char) -> Result<PieceType, MovegenError> {
        match c.to_ascii_lowercase() {
            'p' => Ok(PieceType::Pawn),
            'n' => Ok(PieceType::Knight),
            'b' => Ok(PieceType::Bishop),
            'r' => Ok(PieceType::Rook),
            'q' => Ok(PieceType::Queen),
            'k' => Ok(PieceType::King),
            other => Err(MovegenError::UnknownPiece(other)),
        }
    }

    /// Is the piece a sliding piece (one which can move multiple square in a given direction)
    pub fn is_sliding(&self) -> bool {
        matches!(*self, PieceType::Rook | PieceType::Bishop | PieceType::Queen)
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

pub const ALL_PIECE_TYPES: [PieceType; 6] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
    PieceType::King,
];

/// A (rank, file) pair, both 0-indexed. Also used for offsets and directions,
/// where the components are deltas and may be negative.
///
/// A coordinate only turns into a square index through [`Coordinate::square`],
/// which refuses anything off the board.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coordinate {
    pub rank: i8,
    pub file: i8,
}

impl Coordinate {
    pub const fn new(rank: i8, file: i8) -> Self {
        Coordinate { rank, file }
    }

    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        self.rank >= 0 && self.file >= 0 && self.rank < BOARD_LENGTH && self.file < BOARD_LENGTH
    }

    /// Square index `rank * 8 + file`, or `None` off the board
    #[inline(always)]
    pub const fn square(&self) -> Option<u8> {
        if self.is_valid() {
            Some((self.rank * BOARD_LENGTH + self.file) as u8)
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn from_square(sq: u8) -> Option<Coordinate> {
        if (sq as usize) < BOARD_AREA {
            Some(Coordinate {
                rank: (sq as i8) / BOARD_LENGTH,
                file: (sq as i8) % BOARD_LENGTH,
            })
        } else {
            None
        }
    }

    /// Step by a (rank, file) delta. The result may be off the board.
    #[inline(always)]
    pub const fn offset(&self, delta: Coordinate) -> Coordinate {
        Coordinate {
            rank: self.rank + delta.rank,
            file: self.file + delta.file,
        }
    }

    /// Whether this square is set in `bitboard`. Off-board coordinates never are.
    #[inline(always)]
    pub const fn is_set(&self, bitboard: u64) -> bool {
        match self.square() {
            Some(sq) => bitboard & (1u64 << sq) != 0,
            None => false,
        }
    }

    pub fn from_algebraic(s: &str) -> Result<Coordinate, MovegenError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(MovegenError::InvalidAlgebraic(s.to_owned()));
        }
        let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file >= 8 || rank >= 8 {
            return Err(MovegenError::InvalidAlgebraic(s.to_owned()));
        }
        Ok(Coordinate::new(rank as i8, file as i8))
    }

    pub fn to_algebraic(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        Some(format!(
            "{}{}",
            (b'a' + self.file as u8) as char,
            (b'1' + self.rank as u8) as char
        ))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(s) => write!(f, "{s}"),
            None => write!(f, "({}, {})", self.rank, self.file),
        }
    }
}

/// Pseudo-legal destinations of one piece.
///
/// `quiet` and `kills` are disjoint and never contain a friendly square.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Move {
    /// Non-capturing destinations
    pub quiet: u64,
    /// Capturing destinations
    pub kills: u64,
}

impl Move {
    pub const EMPTY: Move = Move { quiet: 0, kills: 0 };

    /// Every destination, capture or not
    pub fn destinations(&self) -> u64 {
        self.quiet | self.kills
    }

    pub fn is_empty(&self) -> bool {
        self.destinations() == 0
    }
}

impl std::ops::BitOr for Move {
    type Output = Move;

    fn bitor(self, rhs: Move) -> Move {
        Move {
            quiet: self.quiet | rhs.quiet,
            kills: self.kills | rhs.kills,
        }
    }
}
