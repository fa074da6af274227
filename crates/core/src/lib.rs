//! Core module - the grid and its collaborators, pure and deterministic
//!
//! This crate holds the data side of the game: the tile grid, the generators
//! that produce new tiles, the sinks that consume removal counts, and the rule
//! configuration. It has **no** matching logic; that lives in the engine crate,
//! which operates on a [`Grid`] passed in by the caller.
//!
//! - **Deterministic**: a seeded [`PaletteRng`] reproduces a whole game
//! - **Testable**: [`SequenceGenerator`] and `Vec<usize>` sinks make every
//!   cascade scriptable
//! - **Portable**: no I/O beyond optional config loading
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size grid of optional tiles with bounds-checked access
//! - [`rng`]: the [`TileGenerator`] seam plus seeded and scripted generators
//! - [`scoring`]: the [`ScoreSink`] seam plus a flat per-tile [`ScoreTally`]
//! - [`snapshot`]: serializable flat copy of a grid with a board hash
//! - [`config`]: rule parameters with JSON loading and validation
//!
//! # Example
//!
//! ```
//! use gem_cascade_core::{Grid, PaletteRng, TileGenerator};
//! use gem_cascade_core::types::Coord;
//!
//! let mut grid = Grid::new(4, 4).unwrap();
//! let mut rng = PaletteRng::new(3, 42);
//!
//! for coord in grid.coords().collect::<Vec<_>>() {
//!     grid.set_at(coord, Some(rng.next_tile())).unwrap();
//! }
//! assert!(grid.is_full());
//! assert!(grid.get_at(Coord::new(4, 0)).is_err());
//! ```

pub mod config;
pub mod grid;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use gem_cascade_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use grid::Grid;
pub use rng::{PaletteRng, SequenceGenerator, TileGenerator};
pub use scoring::{calculate_points, NoScore, ScoreSink, ScoreTally};
pub use snapshot::GridSnapshot;
