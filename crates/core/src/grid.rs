//! Grid module - the tile container
//!
//! The grid is a `width x height` array where each cell is empty or holds a tile type.
//! Uses a flat vector in row-major order (`row * width + col`) for cache locality.
//! Row 0 is the bottom row; columns run left to right.
//!
//! The grid knows nothing about matches or gravity: it only stores cells and
//! rejects coordinates outside its bounds.

use std::fmt;

use crate::types::{Cell, Coord, GridError, TileType};

/// Fixed-size grid of optional tiles
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    /// Build a grid from text rows, top row first.
    ///
    /// `.` marks an empty cell and letters mark tile types (`A` = type 0).
    /// Whitespace inside a row is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use gem_cascade_core::Grid;
    /// use gem_cascade_core::types::TileType;
    ///
    /// let grid = Grid::from_rows(&["AB.", "CAB"]).unwrap();
    /// assert_eq!(grid.width(), 3);
    /// assert_eq!(grid.get(0, 0), Ok(Some(TileType(2))));
    /// assert_eq!(grid.get(2, 1), Ok(None));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let parsed: Vec<Vec<Cell>> = rows
            .iter()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(TileType::from_char)
                    .collect()
            })
            .collect();

        let height = parsed.len();
        let width = parsed.first().map_or(0, Vec::len);
        let mut grid = Self::new(width, height)?;

        for (i, line) in parsed.iter().enumerate() {
            let row = (height - 1 - i) as i32;
            if line.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            for (col, cell) in line.iter().enumerate() {
                grid.set(col as i32, row, *cell)?;
            }
        }
        Ok(grid)
    }

    /// Text rows, top row first (inverse of [`Grid::from_rows`])
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|row| {
                self.row_cells(row)
                    .iter()
                    .map(|cell| cell.map_or('.', TileType::to_char))
                    .collect()
            })
            .collect()
    }

    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    fn checked_index(&self, col: i32, row: i32) -> Result<usize, GridError> {
        self.index(col, row).ok_or(GridError::OutOfBounds {
            col,
            row,
            width: self.width,
            height: self.height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord.col, coord.row).is_some()
    }

    /// Get cell at `(col, row)`
    pub fn get(&self, col: i32, row: i32) -> Result<Cell, GridError> {
        self.checked_index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at `(col, row)`, overwriting whatever was there
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> Result<(), GridError> {
        let idx = self.checked_index(col, row)?;
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn get_at(&self, coord: Coord) -> Result<Cell, GridError> {
        self.get(coord.col, coord.row)
    }

    pub fn set_at(&mut self, coord: Coord, cell: Cell) -> Result<(), GridError> {
        self.set(coord.col, coord.row, cell)
    }

    /// Exchange the contents of two cells. Both must be in bounds; nothing
    /// is changed otherwise.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<(), GridError> {
        let ia = self.checked_index(a.col, a.row)?;
        let ib = self.checked_index(b.col, b.row)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Unchecked-style lookup for scanners: out-of-range coordinates read as empty.
    #[inline]
    pub fn peek(&self, col: i32, row: i32) -> Cell {
        self.index(col, row).and_then(|idx| self.cells[idx])
    }

    /// All cells in row-major order, bottom row first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of one row, left to right
    pub fn row_cells(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Cells of one column, bottom to top
    pub fn column_cells(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().skip(col).step_by(self.width).copied()
    }

    /// Iterate `(coord, cell)` in row-major order, bottom row first
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            (
                Coord::new((idx % width) as i32, (idx / width) as i32),
                *cell,
            )
        })
    }

    /// Every coordinate of the grid in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |row| (0..width).map(move |col| Coord::new(col, row)))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_rows() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
