//! Grid module - the 6x6 tile grid
//!
//! The grid is a flat array of 36 tiles in row-major order (`row * 6 + col`).
//! Row 0 is the top of the grid and row 5 the bottom; gravity pulls tiles
//! toward row 5. Every slot always holds a tile: the transient "empty" state
//! only exists inside [`crate::resolve`].

use std::fmt;

use crate::tile::TileFactory;
use crate::types::{slot_index, Category, Tile, GRID_CELLS, GRID_SIZE};

/// The game grid - 6 columns x 6 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of tiles, row-major order (row * GRID_SIZE + col)
    tiles: [Tile; GRID_CELLS],
}

impl Grid {
    /// Build a full grid, calling the factory once per slot in row-major order
    pub fn new(factory: &mut impl TileFactory) -> Self {
        let mut tiles = [Tile::new(Category::Friendly, 0); GRID_CELLS];
        for slot in tiles.iter_mut() {
            *slot = factory.create_tile();
        }
        Self { tiles }
    }

    /// Build a grid from categories, assigning ids `0..36` in slot order
    pub fn from_categories(categories: &[Category; GRID_CELLS]) -> Self {
        let mut tiles = [Tile::new(Category::Friendly, 0); GRID_CELLS];
        for (i, (slot, category)) in tiles.iter_mut().zip(categories.iter()).enumerate() {
            *slot = Tile::new(*category, i as u64);
        }
        Self { tiles }
    }

    /// Get width of the grid
    pub fn width(&self) -> usize {
        GRID_SIZE
    }

    /// Get height of the grid
    pub fn height(&self) -> usize {
        GRID_SIZE
    }

    /// Tile at (row, col), or None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&Tile> {
        slot_index(row, col).map(|idx| &self.tiles[idx])
    }

    /// Tile at a flat slot index, or None if out of bounds
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Category at a flat slot index
    pub fn category(&self, index: usize) -> Option<Category> {
        self.tile(index).map(|t| t.category)
    }

    /// Replace the tile at a slot. Returns false if out of bounds.
    pub fn set(&mut self, index: usize, tile: Tile) -> bool {
        match self.tiles.get_mut(index) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    /// Exchange two slots. Returns false if either index is out of bounds.
    ///
    /// Adjacency is not checked here; see `GameState::try_swap`.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= GRID_CELLS || b >= GRID_CELLS {
            return false;
        }
        self.tiles.swap(a, b);
        true
    }

    /// Get a reference to the internal tiles array
    pub fn tiles(&self) -> &[Tile; GRID_CELLS] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile; GRID_CELLS] {
        &mut self.tiles
    }

    /// Categories of all slots, row-major
    pub fn categories(&self) -> [Category; GRID_CELLS] {
        let mut out = [Category::Friendly; GRID_CELLS];
        for (dst, tile) in out.iter_mut().zip(self.tiles.iter()) {
            *dst = tile.category;
        }
        out
    }
}

/// Create a grid of 36 fresh tiles
pub fn create_grid(factory: &mut impl TileFactory) -> Grid {
    Grid::new(factory)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.tiles[row * GRID_SIZE + col].category.glyph())?;
            }
            if row + 1 < GRID_SIZE {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
