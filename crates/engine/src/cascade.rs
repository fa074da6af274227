//! Cascade resolution - remove, collapse, refill, repeat
//!
//! Each step works on a snapshot of the previous phase: the match set is
//! computed read-only, then applied, then gravity runs, then empties are
//! refilled. No phase reads cells another phase is still writing.

use crate::core::{Grid, ScoreSink, TileGenerator};
use crate::types::Coord;
use crate::{EngineError, MatchEngine};

/// Result of a single cascade step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// This many distinct cells were removed, then the grid was collapsed and refilled
    Cleared(usize),
    /// No run qualified; the grid was not touched
    Stable,
}

/// Summary of a full resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Number of steps that removed something
    pub cascades: usize,
    /// Sum of the counts reported to the sink
    pub total_removed: usize,
}

/// Slide every tile down its column, keeping the column's order.
///
/// Afterwards each column reads `[tiles bottom-to-top][empties]`.
/// Returns the number of tiles that moved.
pub fn collapse(grid: &mut Grid) -> Result<usize, EngineError> {
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    let mut moved = 0;

    for col in 0..width {
        let mut write = 0;
        for row in 0..height {
            if grid.peek(col, row).is_none() {
                continue;
            }
            if row != write {
                // The write cell is empty, so a swap moves the tile down.
                grid.swap(Coord::new(col, write), Coord::new(col, row))?;
                moved += 1;
            }
            write += 1;
        }
    }
    Ok(moved)
}

/// Fill every empty cell from `generator`, bottom row first.
/// Returns the number of cells filled.
pub fn refill<G>(grid: &mut Grid, generator: &mut G) -> Result<usize, EngineError>
where
    G: TileGenerator + ?Sized,
{
    let empties: Vec<Coord> = grid
        .iter()
        .filter(|(_, cell)| cell.is_none())
        .map(|(coord, _)| coord)
        .collect();

    for coord in &empties {
        grid.set_at(*coord, Some(generator.next_tile()))?;
    }
    Ok(empties.len())
}

impl MatchEngine {
    /// Empty every cell belonging to a qualifying run.
    /// Returns the number of distinct cells cleared.
    pub fn clear_matches(&self, grid: &mut Grid) -> Result<usize, EngineError> {
        let removed = self.collect_match_set(grid);
        for coord in &removed {
            grid.set_at(*coord, None)?;
        }
        Ok(removed.len())
    }

    /// Run one cascade iteration: remove, report, collapse, refill.
    ///
    /// A presentation layer can call this repeatedly with its own pacing until
    /// it returns [`StepOutcome::Stable`].
    pub fn resolve_step<G, S>(
        &self,
        grid: &mut Grid,
        generator: &mut G,
        sink: &mut S,
    ) -> Result<StepOutcome, EngineError>
    where
        G: TileGenerator + ?Sized,
        S: ScoreSink + ?Sized,
    {
        let removed = self.clear_matches(grid)?;
        if removed == 0 {
            return Ok(StepOutcome::Stable);
        }

        sink.record_removed(removed);
        let moved = collapse(grid)?;
        let filled = refill(grid, generator)?;
        log::debug!(
            "cascade step: removed={} moved={} filled={}",
            removed,
            moved,
            filled
        );
        Ok(StepOutcome::Cleared(removed))
    }

    /// Run cascade steps until the grid is stable.
    ///
    /// Fails with [`EngineError::Unsettled`] if the grid still has a match
    /// after `max_cascades` steps.
    pub fn resolve_all<G, S>(
        &self,
        grid: &mut Grid,
        generator: &mut G,
        sink: &mut S,
    ) -> Result<CascadeReport, EngineError>
    where
        G: TileGenerator + ?Sized,
        S: ScoreSink + ?Sized,
    {
        let mut report = CascadeReport::default();

        for _ in 0..self.max_cascades() {
            match self.resolve_step(grid, generator, sink)? {
                StepOutcome::Stable => return Ok(report),
                StepOutcome::Cleared(count) => {
                    report.cascades += 1;
                    report.total_removed += count;
                }
            }
        }

        if self.has_any_match(grid) {
            log::warn!(
                "cascade did not settle after {} steps ({} tiles removed)",
                report.cascades,
                report.total_removed
            );
            return Err(EngineError::Unsettled {
                cascades: report.cascades,
            });
        }
        Ok(report)
    }
}
