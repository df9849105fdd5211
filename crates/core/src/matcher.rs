//! Match detection - finds runs of three or more equal categories
//!
//! Every row is scanned with a 3-wide window at columns 0..=3 and every column
//! with a 3-tall window at rows 0..=3. Longer runs are covered by overlapping
//! windows, and crossing runs share slots; both collapse into one set of
//! matched indices, so a slot is never counted twice.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Category, CATEGORY_COUNT, GRID_CELLS, GRID_SIZE, MIN_MATCH_LEN};

/// Set of matched slots plus the categories that formed them
///
/// Slots are stored as a 36-bit mask. Categories are kept unique in the order
/// they were first found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSet {
    mask: u64,
    categories: ArrayVec<Category, CATEGORY_COUNT>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit indices (out-of-range indices are ignored)
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new();
        for idx in indices {
            set.insert(idx);
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Number of distinct matched slots
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn contains(&self, index: usize) -> bool {
        index < GRID_CELLS && self.mask & (1u64 << index) != 0
    }

    pub fn insert(&mut self, index: usize) {
        if index < GRID_CELLS {
            self.mask |= 1u64 << index;
        }
    }

    fn record_category(&mut self, category: Category) {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
    }

    /// Matched slot indices in ascending order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..GRID_CELLS).filter(move |&i| self.contains(i))
    }

    /// Categories that produced at least one run
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

/// Scan the grid for horizontal and vertical runs of 3+
///
/// Returns an empty set when no run exists; that is the common case, not an error.
pub fn detect_matches(grid: &Grid) -> MatchSet {
    let tiles = grid.tiles();
    let mut found = MatchSet::new();

    let mut scan = |start: usize, stride: usize| {
        let first = &tiles[start];
        let run = (1..MIN_MATCH_LEN).all(|k| tiles[start + k * stride].same_category(first));
        if run {
            for k in 0..MIN_MATCH_LEN {
                found.insert(start + k * stride);
            }
            found.record_category(first.category);
        }
    };

    // Horizontal windows
    for row in 0..GRID_SIZE {
        for col in 0..=GRID_SIZE - MIN_MATCH_LEN {
            scan(row * GRID_SIZE + col, 1);
        }
    }

    // Vertical windows
    for col in 0..GRID_SIZE {
        for row in 0..=GRID_SIZE - MIN_MATCH_LEN {
            scan(row * GRID_SIZE + col, GRID_SIZE);
        }
    }

    found
}

/// Whether any run of 3+ exists
pub fn has_match(grid: &Grid) -> bool {
    !detect_matches(grid).is_empty()
}
