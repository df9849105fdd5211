//! Tile factory module - produces fresh tiles
//!
//! Every tile carries a unique identity used only as a rendering key. The
//! identity counter lives inside the [`TileSource`] that hands out tiles, so
//! two sessions never share hidden state and tests can inject their own
//! factory through the [`TileFactory`] trait.

use crate::rng::SimpleRng;
use crate::types::{Category, Tile, CATEGORY_COUNT};

/// Anything that can produce a new tile on demand.
///
/// Implemented by [`TileSource`] for gameplay, by [`SequenceFactory`] for
/// deterministic setups, and by any `FnMut() -> Tile` closure.
pub trait TileFactory {
    fn create_tile(&mut self) -> Tile;
}

impl<F> TileFactory for F
where
    F: FnMut() -> Tile,
{
    fn create_tile(&mut self) -> Tile {
        self()
    }
}

/// Seeded tile generator with an owned identity counter
#[derive(Debug, Clone)]
pub struct TileSource {
    rng: SimpleRng,
    next_id: u64,
}

impl TileSource {
    /// Create a new source; ids start at 0
    pub fn new(seed: u32) -> Self {
        Self::with_first_id(seed, 0)
    }

    pub fn with_first_id(seed: u32, first_id: u64) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            next_id: first_id,
        }
    }

    /// The identity the next tile will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }
}

impl TileFactory for TileSource {
    fn create_tile(&mut self) -> Tile {
        let category = Category::from_index(self.rng.next_range(CATEGORY_COUNT as u32) as usize);
        let id = self.next_id;
        self.next_id += 1;
        Tile::new(category, id)
    }
}

/// Create a single tile from a source
pub fn create_tile(source: &mut TileSource) -> Tile {
    source.create_tile()
}

/// Deterministic factory that replays a fixed list of categories
///
/// Categories repeat once the list is exhausted. Ids increase from `first_id`.
#[derive(Debug, Clone)]
pub struct SequenceFactory {
    categories: Vec<Category>,
    cursor: usize,
    next_id: u64,
}

impl SequenceFactory {
    /// # Panics
    ///
    /// Panics if `categories` is empty.
    pub fn new(categories: &[Category], first_id: u64) -> Self {
        assert!(
            !categories.is_empty(),
            "SequenceFactory needs at least one category"
        );
        Self {
            categories: categories.to_vec(),
            cursor: 0,
            next_id: first_id,
        }
    }

    /// Number of tiles produced so far
    pub fn produced(&self) -> usize {
        self.cursor
    }
}

impl TileFactory for SequenceFactory {
    fn create_tile(&mut self) -> Tile {
        let category = self.categories[self.cursor % self.categories.len()];
        self.cursor += 1;
        let id = self.next_id;
        self.next_id += 1;
        Tile::new(category, id)
    }
}
