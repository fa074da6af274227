//! Match detection - read-only scans over a grid
//!
//! A run is a maximal straight line of same-typed tiles. Horizontal and
//! vertical runs are found independently, so a tile at the corner of an L or
//! the crossing of a T belongs to two runs at once; [`MatchEngine::collect_match_set`]
//! folds them into a set so the tile is removed (and scored) once.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::core::Grid;
use crate::types::{Axis, Coord, Direction, GridError, TileType};
use crate::MatchEngine;

/// A maximal same-type line of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    /// Lowest cell of the run (leftmost for horizontal, bottom for vertical)
    pub start: Coord,
    pub axis: Axis,
    pub len: usize,
    pub tile: TileType,
}

impl Run {
    /// Cells of the run, starting at `start`
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let dir = self.axis.forward();
        let start = self.start;
        (0..self.len).scan(start, move |at, _| {
            let here = *at;
            *at = at.step(dir);
            Some(here)
        })
    }

    pub fn contains(&self, coord: Coord) -> bool {
        match self.axis {
            Axis::Horizontal => {
                coord.row == self.start.row
                    && coord.col >= self.start.col
                    && coord.col < self.start.col + self.len as i32
            }
            Axis::Vertical => {
                coord.col == self.start.col
                    && coord.row >= self.start.row
                    && coord.row < self.start.row + self.len as i32
            }
        }
    }
}

/// Count consecutive cells from `origin` in `direction` holding the same tile
/// as `origin`, including `origin` itself. An empty origin counts 0.
pub fn run_length(grid: &Grid, origin: Coord, direction: Direction) -> Result<usize, GridError> {
    let Some(tile) = grid.get_at(origin)? else {
        return Ok(0);
    };

    let mut len = 1;
    let mut at = origin.step(direction);
    while grid.peek(at.col, at.row) == Some(tile) {
        len += 1;
        at = at.step(direction);
    }
    Ok(len)
}

/// Length of the full line through `origin` along `axis`, scanning both ways
pub fn span_length(grid: &Grid, origin: Coord, axis: Axis) -> Result<usize, GridError> {
    let forward = run_length(grid, origin, axis.forward())?;
    if forward == 0 {
        return Ok(0);
    }
    Ok(forward + run_length(grid, origin, axis.backward())? - 1)
}

impl MatchEngine {
    /// Walk every row, then every column, handing each qualifying run to `f`.
    /// Stops early when `f` returns `false`.
    fn for_each_run(&self, grid: &Grid, mut f: impl FnMut(Run) -> bool) {
        let (width, height) = (grid.width() as i32, grid.height() as i32);

        for row in 0..height {
            if !self.scan_line(grid, Coord::new(0, row), Axis::Horizontal, width, &mut f) {
                return;
            }
        }
        for col in 0..width {
            if !self.scan_line(grid, Coord::new(col, 0), Axis::Vertical, height, &mut f) {
                return;
            }
        }
    }

    fn scan_line(
        &self,
        grid: &Grid,
        origin: Coord,
        axis: Axis,
        len: i32,
        f: &mut impl FnMut(Run) -> bool,
    ) -> bool {
        let dir = axis.forward();
        let mut streak_start = origin;
        let mut streak_tile = grid.peek(origin.col, origin.row);
        let mut streak_len = 1usize;
        let mut at = origin;

        // One step past the end so the final streak is flushed.
        for _ in 1..=len {
            at = at.step(dir);
            let cell = grid.peek(at.col, at.row);
            if cell.is_some() && cell == streak_tile {
                streak_len += 1;
                continue;
            }

            if let Some(tile) = streak_tile {
                if streak_len >= self.min_run() {
                    let run = Run {
                        start: streak_start,
                        axis,
                        len: streak_len,
                        tile,
                    };
                    if !f(run) {
                        return false;
                    }
                }
            }
            streak_start = at;
            streak_tile = cell;
            streak_len = 1;
        }
        true
    }

    /// True iff any run of at least `min_run` exists anywhere on the grid
    pub fn has_any_match(&self, grid: &Grid) -> bool {
        let mut found = false;
        self.for_each_run(grid, |_| {
            found = true;
            false
        });
        found
    }

    /// Every qualifying run: horizontal runs bottom row first, then vertical
    /// runs leftmost column first
    pub fn find_runs(&self, grid: &Grid) -> Vec<Run> {
        let mut runs = Vec::new();
        self.for_each_run(grid, |run| {
            runs.push(run);
            true
        });
        runs
    }

    /// The qualifying runs passing through `coord` (at most one per axis)
    pub fn runs_through(&self, grid: &Grid, coord: Coord) -> Result<ArrayVec<Run, 2>, GridError> {
        let mut runs = ArrayVec::new();
        let Some(tile) = grid.get_at(coord)? else {
            return Ok(runs);
        };

        for axis in [Axis::Horizontal, Axis::Vertical] {
            let back = run_length(grid, coord, axis.backward())?;
            let start = match axis {
                Axis::Horizontal => Coord::new(coord.col - (back as i32 - 1), coord.row),
                Axis::Vertical => Coord::new(coord.col, coord.row - (back as i32 - 1)),
            };
            let len = run_length(grid, start, axis.forward())?;
            if len >= self.min_run() {
                runs.push(Run {
                    start,
                    axis,
                    len,
                    tile,
                });
            }
        }
        Ok(runs)
    }

    /// Union of the cells of every qualifying run
    pub fn collect_match_set(&self, grid: &Grid) -> BTreeSet<Coord> {
        let mut set = BTreeSet::new();
        self.for_each_run(grid, |run| {
            set.extend(run.cells());
            true
        });
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn run_length_counts_origin() {
        let g = grid(&["AAAB"]);
        assert_eq!(run_length(&g, Coord::new(0, 0), Direction::Right), Ok(3));
        assert_eq!(run_length(&g, Coord::new(1, 0), Direction::Right), Ok(2));
        assert_eq!(run_length(&g, Coord::new(2, 0), Direction::Left), Ok(3));
        assert_eq!(run_length(&g, Coord::new(3, 0), Direction::Right), Ok(1));
    }

    #[test]
    fn run_length_empty_origin_is_zero() {
        let g = grid(&[".AA"]);
        assert_eq!(run_length(&g, Coord::new(0, 0), Direction::Right), Ok(0));
        assert_eq!(span_length(&g, Coord::new(0, 0), Axis::Horizontal), Ok(0));
    }

    #[test]
    fn run_length_out_of_bounds() {
        let g = grid(&["AAA"]);
        assert!(matches!(
            run_length(&g, Coord::new(3, 0), Direction::Left),
            Err(GridError::OutOfBounds { col: 3, row: 0, .. })
        ));
    }

    #[test]
    fn span_scans_both_ways() {
        let g = grid(&["A", "A", "A", "B"]);
        assert_eq!(span_length(&g, Coord::new(0, 2), Axis::Vertical), Ok(3));
        assert_eq!(span_length(&g, Coord::new(0, 0), Axis::Vertical), Ok(1));
    }

    #[test]
    fn empty_cells_never_match() {
        let engine = MatchEngine::default();
        let g = grid(&["....", "...."]);
        assert!(!engine.has_any_match(&g));
        assert!(engine.collect_match_set(&g).is_empty());
    }

    #[test]
    fn finds_horizontal_and_vertical_runs() {
        let engine = MatchEngine::default();
        let g = grid(&["BCAD", "BDAC", "BCAD"]);
        let runs = engine.find_runs(&g);
        assert_eq!(
            runs,
            vec![
                Run {
                    start: Coord::new(0, 0),
                    axis: Axis::Vertical,
                    len: 3,
                    tile: TileType(1),
                },
                Run {
                    start: Coord::new(2, 0),
                    axis: Axis::Vertical,
                    len: 3,
                    tile: TileType(0),
                },
            ]
        );
    }

    #[test]
    fn run_at_line_end_is_flushed() {
        let engine = MatchEngine::default();
        let g = grid(&["BCAAA"]);
        let runs = engine.find_runs(&g);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].start, Coord::new(2, 0));
        assert_eq!(runs[0].len, 3);
    }

    #[test]
    fn min_run_is_respected() {
        let g = grid(&["AABB"]);
        assert!(!MatchEngine::default().has_any_match(&g));
        assert!(MatchEngine::new(2).has_any_match(&g));
        assert_eq!(MatchEngine::new(2).collect_match_set(&g).len(), 4);
    }

    #[test]
    fn l_shape_corner_counted_once() {
        let engine = MatchEngine::default();
        // Corner at (0, 0): three across, three up.
        let g = grid(&["ABC", "ACB", "AAA"]);
        let set = engine.collect_match_set(&g);
        assert_eq!(set.len(), 5);
        assert!(set.contains(&Coord::new(0, 0)));

        let through = engine.runs_through(&g, Coord::new(0, 0)).unwrap();
        assert_eq!(through.len(), 2);
    }

    #[test]
    fn runs_through_middle_of_run() {
        let engine = MatchEngine::default();
        let g = grid(&["BAAAAC"]);
        let through = engine.runs_through(&g, Coord::new(3, 0)).unwrap();
        assert_eq!(through.len(), 1);
        assert_eq!(through[0].start, Coord::new(1, 0));
        assert_eq!(through[0].len, 4);
        assert!(through[0].contains(Coord::new(4, 0)));
        assert!(!through[0].contains(Coord::new(5, 0)));

        assert!(engine.runs_through(&g, Coord::new(0, 0)).unwrap().is_empty());
    }

    #[test]
    fn run_cells_walk_forward() {
        let run = Run {
            start: Coord::new(1, 2),
            axis: Axis::Vertical,
            len: 3,
            tile: TileType(0),
        };
        assert_eq!(
            run.cells().collect::<Vec<_>>(),
            vec![Coord::new(1, 2), Coord::new(1, 3), Coord::new(1, 4)]
        );
    }
}
