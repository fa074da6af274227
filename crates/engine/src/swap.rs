//! Swap protocol - apply, validate, then commit or revert
//!
//! ```text
//! Idle -> SwapApplied -> Committed -> (cascade) -> Idle
//!                     -> Reverted  -> (swap back) -> Idle
//! ```
//!
//! The whole transition happens inside one call; callers never observe
//! `SwapApplied`.

use crate::core::{Grid, ScoreSink, TileGenerator};
use crate::types::Coord;
use crate::{EngineError, MatchEngine};

/// Why a swap request was refused without touching the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The two cells are not orthogonal neighbours
    NotAdjacent,
    /// A staged cascade is still being resolved
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap made a match; the cascade ran to a stable grid
    Committed { total_removed: usize, cascades: usize },
    /// No match; the grid is back to its pre-swap contents
    Reverted,
    Rejected(RejectReason),
}

impl SwapOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, SwapOutcome::Committed { .. })
    }
}

/// Outcome of the validate half of a swap, before any cascade runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapCheck {
    /// The swap stays applied and the grid has at least one match to resolve
    Matched,
    Reverted,
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapPhase {
    Idle,
    SwapApplied,
    Committed,
    Reverted,
}

fn enter(phase: SwapPhase, a: Coord, b: Coord) {
    log::trace!("swap {} <-> {}: {:?}", a, b, phase);
}

impl MatchEngine {
    /// Apply a swap and keep it only if it creates a match.
    ///
    /// Cascade resolution is left to the caller (see [`MatchEngine::resolve_step`]),
    /// which makes this the entry point for staged presentation.
    pub fn try_swap(&self, grid: &mut Grid, a: Coord, b: Coord) -> Result<SwapCheck, EngineError> {
        // Bounds first: an out-of-range coordinate is a caller bug, not a rejected move.
        grid.get_at(a)?;
        grid.get_at(b)?;

        if !a.is_adjacent(b) {
            log::debug!("swap {} <-> {} rejected: not adjacent", a, b);
            return Ok(SwapCheck::Rejected(RejectReason::NotAdjacent));
        }

        enter(SwapPhase::Idle, a, b);
        grid.swap(a, b)?;
        enter(SwapPhase::SwapApplied, a, b);

        let check = if self.has_any_match(grid) {
            enter(SwapPhase::Committed, a, b);
            SwapCheck::Matched
        } else {
            grid.swap(a, b)?;
            enter(SwapPhase::Reverted, a, b);
            SwapCheck::Reverted
        };
        Ok(check)
    }

    /// Swap two adjacent cells and, if that creates a match, resolve the
    /// resulting cascade to a stable grid.
    pub fn request_swap<G, S>(
        &self,
        grid: &mut Grid,
        a: Coord,
        b: Coord,
        generator: &mut G,
        sink: &mut S,
    ) -> Result<SwapOutcome, EngineError>
    where
        G: TileGenerator + ?Sized,
        S: ScoreSink + ?Sized,
    {
        let outcome = match self.try_swap(grid, a, b)? {
            SwapCheck::Rejected(reason) => SwapOutcome::Rejected(reason),
            SwapCheck::Reverted => SwapOutcome::Reverted,
            SwapCheck::Matched => {
                let report = self.resolve_all(grid, generator, sink)?;
                SwapOutcome::Committed {
                    total_removed: report.total_removed,
                    cascades: report.cascades,
                }
            }
        };

        log::debug!("swap {} <-> {}: {:?}", a, b, outcome);
        enter(SwapPhase::Idle, a, b);
        Ok(outcome)
    }
}
