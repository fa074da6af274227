//! Scoring module - receives removal counts from the cascade loop
//!
//! The engine reports one count per cascade step: the number of distinct cells
//! cleared in that step. What a count is worth is up to the sink. [`ScoreTally`]
//! applies the classic flat rule of `match_points` per cleared tile.

use crate::types::MATCH_POINTS;

/// Receiver of per-step removal counts.
///
/// Called exactly once per cascade step with a count of at least 1.
pub trait ScoreSink {
    fn record_removed(&mut self, count: usize);
}

impl<F> ScoreSink for F
where
    F: FnMut(usize),
{
    fn record_removed(&mut self, count: usize) {
        self(count)
    }
}

/// Collects the raw per-step counts
impl ScoreSink for Vec<usize> {
    fn record_removed(&mut self, count: usize) {
        self.push(count);
    }
}

/// Sink that drops every report (used for initial board settling)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScore;

impl ScoreSink for NoScore {
    fn record_removed(&mut self, _count: usize) {}
}

fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Points for clearing `count` tiles
pub fn calculate_points(count: usize, match_points: u32) -> u32 {
    saturating_u32(count).saturating_mul(match_points)
}

/// Running score for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTally {
    match_points: u32,
    score: u32,
    tiles_cleared: u32,
    cascades: u32,
    /// Count reported by the most recent cascade step
    last_removed: usize,
}

impl ScoreTally {
    pub fn new(match_points: u32) -> Self {
        Self {
            match_points,
            score: 0,
            tiles_cleared: 0,
            cascades: 0,
            last_removed: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tiles_cleared(&self) -> u32 {
        self.tiles_cleared
    }

    /// Number of cascade steps recorded
    pub fn cascades(&self) -> u32 {
        self.cascades
    }

    pub fn last_removed(&self) -> usize {
        self.last_removed
    }

    pub fn match_points(&self) -> u32 {
        self.match_points
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.match_points);
    }
}

impl Default for ScoreTally {
    fn default() -> Self {
        Self::new(MATCH_POINTS)
    }
}

impl ScoreSink for ScoreTally {
    fn record_removed(&mut self, count: usize) {
        self.score = self
            .score
            .saturating_add(calculate_points(count, self.match_points));
        self.tiles_cleared = self.tiles_cleared.saturating_add(saturating_u32(count));
        self.cascades += 1;
        self.last_removed = count;
    }
}
