//! RNG module - tile generation for filling and refilling the grid
//!
//! The engine never picks tile types itself; it asks a [`TileGenerator`].
//! Two implementations ship here:
//!
//! - [`PaletteRng`]: uniform over the palette, backed by a seeded PCG32 so a
//!   seed reproduces a whole game
//! - [`SequenceGenerator`]: cycles through a fixed list, for deterministic tests
//!
//! Any `FnMut() -> TileType` closure is also a generator.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::types::TileType;

/// Source of fresh tiles.
///
/// Implementations must be total: every call returns a tile from the palette.
pub trait TileGenerator {
    fn next_tile(&mut self) -> TileType;
}

impl<F> TileGenerator for F
where
    F: FnMut() -> TileType,
{
    fn next_tile(&mut self) -> TileType {
        self()
    }
}

/// Seeded uniform generator over `[0, palette_size)`
#[derive(Debug, Clone)]
pub struct PaletteRng {
    palette_size: u8,
    seed: u64,
    rng: Pcg32,
}

impl PaletteRng {
    /// Create a generator with the given palette size and seed.
    ///
    /// A palette size of 0 is treated as 1.
    pub fn new(palette_size: u8, seed: u64) -> Self {
        Self {
            palette_size: palette_size.max(1),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn palette_size(&self) -> u8 {
        self.palette_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl TileGenerator for PaletteRng {
    fn next_tile(&mut self) -> TileType {
        TileType(self.rng.random_range(0..self.palette_size))
    }
}

/// Replays a fixed list of tiles, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    tiles: Vec<TileType>,
    next: usize,
}

impl SequenceGenerator {
    /// Create a generator from a non-empty list of tiles.
    ///
    /// An empty list yields `TileType(0)` forever.
    pub fn new(tiles: Vec<TileType>) -> Self {
        Self { tiles, next: 0 }
    }

    /// Parse tile letters, skipping anything that is not a letter
    ///
    /// # Examples
    ///
    /// ```
    /// use gem_cascade_core::rng::{SequenceGenerator, TileGenerator};
    /// use gem_cascade_core::types::TileType;
    ///
    /// let mut gen = SequenceGenerator::from_letters("AB C");
    /// assert_eq!(gen.next_tile(), TileType(0));
    /// assert_eq!(gen.next_tile(), TileType(1));
    /// assert_eq!(gen.next_tile(), TileType(2));
    /// assert_eq!(gen.next_tile(), TileType(0));
    /// ```
    pub fn from_letters(letters: &str) -> Self {
        Self::new(letters.chars().filter_map(TileType::from_char).collect())
    }

    /// Number of tiles handed out so far
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl TileGenerator for SequenceGenerator {
    fn next_tile(&mut self) -> TileType {
        if self.tiles.is_empty() {
            return TileType(0);
        }
        let tile = self.tiles[self.next % self.tiles.len()];
        self.next += 1;
        tile
    }
}
