//! Resolution engine - clear, compact, refill
//!
//! Matched slots are treated as empty, each column is compacted toward the
//! bottom (row 5) keeping the surviving tiles in order, and the vacated slots
//! at the top of every column are refilled from the tile factory. Refilled
//! tiles are not scanned again: one call is exactly one pass.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::matcher::{detect_matches, MatchSet};
use crate::scoring::calculate_match_score;
use crate::tile::TileFactory;
use crate::types::{Category, GRID_CELLS, GRID_SIZE};

/// Result of a single resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Points earned by this pass
    pub gained: u32,
    /// Slots that received a freshly created tile, in creation order
    pub spawned: ArrayVec<usize, GRID_CELLS>,
}

/// Result of [`check_matches`]: detection followed by one resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchOutcome {
    pub gained: u32,
    /// Slots that were matched and cleared
    pub cleared: MatchSet,
    pub spawned: ArrayVec<usize, GRID_CELLS>,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        !self.cleared.is_empty()
    }

    pub fn matched_categories(&self) -> &[Category] {
        self.cleared.categories()
    }
}

/// Clear `matches`, apply gravity and refill in place
///
/// With an empty set the grid is left untouched, the factory is never called
/// and zero points are returned. Refill order is column by column from the
/// left, top to bottom within a column.
pub fn resolve(grid: &mut Grid, matches: &MatchSet, factory: &mut impl TileFactory) -> Resolution {
    let mut resolution = Resolution::default();
    if matches.is_empty() {
        return resolution;
    }

    let tiles = grid.tiles_mut();

    for col in 0..GRID_SIZE {
        // Two-pointer compaction, bottom to top. Reading upward while writing at
        // or below the read row never overwrites an unread tile.
        let mut write_row = GRID_SIZE;
        for read_row in (0..GRID_SIZE).rev() {
            let read = read_row * GRID_SIZE + col;
            if matches.contains(read) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                tiles[write_row * GRID_SIZE + col] = tiles[read];
            }
        }

        for row in 0..write_row {
            let idx = row * GRID_SIZE + col;
            tiles[idx] = factory.create_tile();
            resolution.spawned.push(idx);
        }
    }

    resolution.gained = calculate_match_score(matches.len());
    resolution
}

/// Detect matches and resolve them once
pub fn check_matches(grid: &mut Grid, factory: &mut impl TileFactory) -> MatchOutcome {
    let cleared = detect_matches(grid);
    let Resolution { gained, spawned } = resolve(grid, &cleared, factory);
    MatchOutcome {
        gained,
        cleared,
        spawned,
    }
}
