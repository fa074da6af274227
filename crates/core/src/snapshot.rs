use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// Flat, serializable copy of a grid.
///
/// Cells are encoded row-major, bottom row first: `0` for empty, `type + 1`
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<u8>,
    /// FNV-1a 64-bit hash over `cells`
    pub board_hash: u64,
}

impl GridSnapshot {
    pub fn capture(grid: &Grid) -> Self {
        let mut snap = Self {
            width: grid.width(),
            height: grid.height(),
            cells: Vec::with_capacity(grid.cells().len()),
            board_hash: 0,
        };
        snap.capture_into(grid);
        snap
    }

    /// Refresh this snapshot in place, reusing the cell buffer.
    pub fn capture_into(&mut self, grid: &Grid) {
        self.width = grid.width();
        self.height = grid.height();
        self.cells.clear();
        self.cells
            .extend(grid.cells().iter().map(|cell| cell.map_or(0, |t| t.0 + 1)));
        self.board_hash = fnv1a64(self.cells.iter().copied());
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&Grid> for GridSnapshot {
    fn from(grid: &Grid) -> Self {
        Self::capture(grid)
    }
}

pub fn fnv1a64(bytes: impl Iterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
