//! Match engine - stateless algorithms over a caller-owned grid
//!
//! [`MatchEngine`] is a small `Copy` value holding only rule parameters
//! (minimum run length, cascade budget). Every operation takes the grid by
//! reference and runs to completion before returning: there is no timing,
//! no background work and no hidden state between calls.
//!
//! # Module Structure
//!
//! - [`matching`]: run detection and the removal set
//! - [`cascade`]: remove, collapse, refill; single-step and full resolution
//! - [`swap`]: the apply/validate/commit-or-revert protocol
//! - [`session`]: a game session wiring grid, engine, generator and score
//!
//! # Example
//!
//! ```
//! use gem_cascade_engine::{MatchEngine, SwapOutcome};
//! use gem_cascade_engine::core::{PaletteRng, ScoreTally};
//! use gem_cascade_engine::types::Coord;
//!
//! let engine = MatchEngine::default();
//! let mut rng = PaletteRng::new(5, 12345);
//! let mut grid = engine.new_grid(8, 8, &mut rng).unwrap();
//! assert!(!engine.has_any_match(&grid));
//!
//! let mut tally = ScoreTally::default();
//! let outcome = engine
//!     .request_swap(&mut grid, Coord::new(0, 0), Coord::new(2, 2), &mut rng, &mut tally)
//!     .unwrap();
//! assert!(matches!(outcome, SwapOutcome::Rejected(_)));
//! ```

pub mod cascade;
pub mod matching;
pub mod session;
pub mod swap;

pub use gem_cascade_core as core;
pub use gem_cascade_types as types;

pub use cascade::{collapse, refill, CascadeReport, StepOutcome};
pub use matching::{run_length, span_length, Run};
pub use session::{GameSession, SelectOutcome};
pub use swap::{RejectReason, SwapCheck, SwapOutcome};

use crate::core::{ConfigError, EngineConfig, Grid, NoScore, TileGenerator};
use crate::types::{GridError, DEFAULT_MAX_CASCADES, DEFAULT_MIN_RUN};

/// Errors that can occur while running the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("cascade did not settle after {cascades} steps")]
    Unsettled { cascades: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Rule parameters for match detection and cascade resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEngine {
    min_run: usize,
    max_cascades: usize,
}

impl MatchEngine {
    /// Create an engine with the given minimum run length.
    ///
    /// Values below 2 are raised to 2. [`MatchEngine::try_new`] and
    /// [`EngineConfig::validate`] reject them instead.
    pub fn new(min_run: usize) -> Self {
        Self {
            min_run: min_run.max(2),
            max_cascades: DEFAULT_MAX_CASCADES,
        }
    }

    /// Like [`MatchEngine::new`], but fails on `min_run < 2`
    pub fn try_new(min_run: usize) -> Result<Self, EngineError> {
        if min_run < 2 {
            return Err(ConfigError::MinRunTooSmall(min_run).into());
        }
        Ok(Self::new(min_run))
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.min_run).with_max_cascades(config.max_cascades)
    }

    pub fn with_max_cascades(mut self, max_cascades: usize) -> Self {
        self.max_cascades = max_cascades.max(1);
        self
    }

    pub fn min_run(&self) -> usize {
        self.min_run
    }

    pub fn max_cascades(&self) -> usize {
        self.max_cascades
    }

    /// Create a full grid and settle it so play never starts mid-match.
    ///
    /// Matches removed while settling are not scored.
    pub fn new_grid<G>(
        &self,
        width: usize,
        height: usize,
        generator: &mut G,
    ) -> Result<Grid, EngineError>
    where
        G: TileGenerator + ?Sized,
    {
        let mut grid = Grid::new(width, height)?;
        refill(&mut grid, generator)?;
        let report = self.resolve_all(&mut grid, generator, &mut NoScore)?;
        log::debug!(
            "new {}x{} grid settled after {} cascades ({} tiles replaced)",
            width,
            height,
            report.cascades,
            report.total_removed
        );
        Ok(grid)
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RUN)
    }
}

/// Validate `config` and build a settled grid with its dimensions and rules
pub fn new_grid<G>(config: &EngineConfig, generator: &mut G) -> Result<Grid, EngineError>
where
    G: TileGenerator + ?Sized,
{
    config.validate()?;
    MatchEngine::from_config(config).new_grid(config.width, config.height, generator)
}
