//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable from the
//! grid container, the match engine, and any presentation layer on top.
//!
//! # Coordinates
//!
//! Cells are addressed as `(col, row)`:
//!
//! - **col**: 0 is the leftmost column
//! - **row**: 0 is the bottom row; gravity pulls tiles toward row 0
//!
//! Coordinates are signed so that out-of-range requests (including negative
//! ones) are representable and can be rejected with [`GridError::OutOfBounds`].
//!
//! # Default Rules
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 8 | Columns on a fresh board |
//! | `DEFAULT_HEIGHT` | 8 | Rows on a fresh board |
//! | `DEFAULT_PALETTE_SIZE` | 5 | Number of distinct tile types |
//! | `DEFAULT_MIN_RUN` | 3 | Shortest run that counts as a match |
//! | `MATCH_POINTS` | 10 | Points awarded per removed tile |
//! | `DEFAULT_MAX_CASCADES` | 10000 | Cascade steps before giving up |
//!
//! # Examples
//!
//! ```
//! use gem_cascade_types::{Coord, Direction, TileType};
//!
//! let tile = TileType::from_char('c').unwrap();
//! assert_eq!(tile, TileType(2));
//! assert_eq!(tile.to_char(), 'C');
//!
//! let a = Coord::new(2, 0);
//! let b = a.step(Direction::Up);
//! assert_eq!(b, Coord::new(2, 1));
//! assert!(a.is_adjacent(b));
//! assert!(!a.is_adjacent(Coord::new(3, 1)));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board width in columns
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height in rows
pub const DEFAULT_HEIGHT: usize = 8;

/// Default number of tile types in the palette
pub const DEFAULT_PALETTE_SIZE: u8 = 5;

/// Largest palette that still renders as a single letter per tile
pub const MAX_PALETTE_SIZE: u8 = 26;

/// Minimum run length that counts as a match
pub const DEFAULT_MIN_RUN: usize = 3;

/// Points per removed tile
pub const MATCH_POINTS: u32 = 10;

/// Upper bound on cascade iterations for a single resolution call
pub const DEFAULT_MAX_CASCADES: usize = 10_000;

/// A tile type: an index into the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileType(pub u8);

impl TileType {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Letter used in text boards (`A` for type 0).
    ///
    /// Types beyond `Z` render as `?`.
    pub fn to_char(self) -> char {
        if self.0 < MAX_PALETTE_SIZE {
            (b'A' + self.0) as char
        } else {
            '?'
        }
    }

    /// Parse a tile letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use gem_cascade_types::TileType;
    ///
    /// assert_eq!(TileType::from_char('A'), Some(TileType(0)));
    /// assert_eq!(TileType::from_char('b'), Some(TileType(1)));
    /// assert_eq!(TileType::from_char('.'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(TileType(upper as u8 - b'A'))
        } else {
            None
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Contents of a single grid cell (`None` = empty)
pub type Cell = Option<TileType>;

/// Axis of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Unit direction pointing along the axis (toward larger indices)
    pub fn forward(self) -> Direction {
        match self {
            Axis::Horizontal => Direction::Right,
            Axis::Vertical => Direction::Up,
        }
    }

    /// Unit direction pointing along the axis (toward smaller indices)
    pub fn backward(self) -> Direction {
        self.forward().opposite()
    }
}

/// One of the four axis-aligned unit directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// `(dcol, drow)` for one step in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// Parse a direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Logical cell coordinate `(col, row)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub col: i32,
    pub row: i32,
}

impl Coord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Neighbor one step away in `dir` (may fall outside the grid)
    pub fn step(self, dir: Direction) -> Self {
        let (dc, dr) = dir.delta();
        Self::new(self.col + dc, self.row + dr)
    }

    /// Taxicab distance, summed in `u64` (cannot overflow)
    pub fn manhattan(self, other: Coord) -> u64 {
        u64::from(self.col.abs_diff(other.col)) + u64::from(self.row.abs_diff(other.row))
    }

    /// Orthogonal neighbors only; diagonals and the cell itself are not adjacent.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Errors raised by grid access
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell ({col}, {row}) is outside the {width}x{height} grid")]
    OutOfBounds {
        col: i32,
        row: i32,
        width: usize,
        height: usize,
    },

    #[error("grid dimensions must be positive (got {width}x{height})")]
    EmptyDimensions { width: usize, height: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: i32,
        expected: usize,
        found: usize,
    },
}
