//! Game session - one game's grid, rules, generator and score
//!
//! The session is the thin layer an input handler talks to. It keeps the
//! two-step selection flow (pick a tile, then pick a neighbour to swap with)
//! and serializes staged cascades: while a cascade started by
//! [`GameSession::begin_swap`] is still being stepped, new swaps are refused
//! with [`RejectReason::Busy`].

use crate::core::{EngineConfig, Grid, GridSnapshot, PaletteRng, ScoreTally};
use crate::types::Coord;
use crate::{EngineError, MatchEngine, RejectReason, StepOutcome, SwapCheck, SwapOutcome};

/// Result of selecting a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The tile is now the pending selection
    Selected(Coord),
    /// The tile was adjacent to the pending selection; a swap was requested
    Swapped(SwapOutcome),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    engine: MatchEngine,
    grid: Grid,
    rng: PaletteRng,
    tally: ScoreTally,
    selected: Option<Coord>,
    /// A staged cascade is in progress
    busy: bool,
    /// Committed swaps this game
    moves: u32,
}

impl GameSession {
    /// Start a game with a settled grid
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        let engine = MatchEngine::from_config(&config);
        let mut rng = PaletteRng::new(config.palette_size, seed);
        let grid = engine.new_grid(config.width, config.height, &mut rng)?;
        log::info!(
            "new game: {}x{} palette={} seed={}",
            config.width,
            config.height,
            config.palette_size,
            seed
        );

        Ok(Self {
            config,
            engine,
            grid,
            rng,
            tally: ScoreTally::new(config.match_points),
            selected: None,
            busy: false,
            moves: 0,
        })
    }

    /// Throw the grid away and start over with a new seed
    pub fn restart(&mut self, seed: u64) -> Result<(), EngineError> {
        *self = Self::new(self.config, seed)?;
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn engine(&self) -> MatchEngine {
        self.engine
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn score(&self) -> u32 {
        self.tally.score()
    }

    pub fn tally(&self) -> &ScoreTally {
        &self.tally
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Select a tile.
    ///
    /// With nothing selected, the tile becomes the selection. With an adjacent
    /// tile already selected, the two are swapped and the selection clears.
    /// Otherwise the selection moves to the new tile.
    pub fn select(&mut self, coord: Coord) -> Result<SelectOutcome, EngineError> {
        self.grid.get_at(coord)?;

        match self.selected {
            Some(prev) if prev.is_adjacent(coord) => {
                self.selected = None;
                let outcome = self.swap(prev, coord)?;
                Ok(SelectOutcome::Swapped(outcome))
            }
            _ => {
                self.selected = Some(coord);
                Ok(SelectOutcome::Selected(coord))
            }
        }
    }

    /// Swap two tiles and resolve the whole cascade
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<SwapOutcome, EngineError> {
        if self.busy {
            return Ok(SwapOutcome::Rejected(RejectReason::Busy));
        }

        let outcome =
            self.engine
                .request_swap(&mut self.grid, a, b, &mut self.rng, &mut self.tally)?;
        if outcome.is_committed() {
            self.moves += 1;
        }
        Ok(outcome)
    }

    /// Swap two tiles but leave the cascade for [`GameSession::step`]
    pub fn begin_swap(&mut self, a: Coord, b: Coord) -> Result<SwapCheck, EngineError> {
        if self.busy {
            return Ok(SwapCheck::Rejected(RejectReason::Busy));
        }

        let check = self.engine.try_swap(&mut self.grid, a, b)?;
        if check == SwapCheck::Matched {
            self.busy = true;
            self.moves += 1;
        }
        Ok(check)
    }

    /// Resolve one cascade step of a staged swap.
    ///
    /// Returns [`StepOutcome::Stable`] once the grid has settled, at which
    /// point new swaps are accepted again.
    pub fn step(&mut self) -> Result<StepOutcome, EngineError> {
        let outcome = self
            .engine
            .resolve_step(&mut self.grid, &mut self.rng, &mut self.tally)?;
        if outcome == StepOutcome::Stable {
            self.busy = false;
        }
        Ok(outcome)
    }
}
