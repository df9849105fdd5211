use crate::types::{Category, GRID_SIZE};

/// Plain-data copy of a game session for renderers.
///
/// Cells hold category codes (`Category::code`, 1..=4); 0 never appears in a
/// snapshot taken from a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: [[u8; GRID_SIZE]; GRID_SIZE],
    pub tile_ids: [[u64; GRID_SIZE]; GRID_SIZE],
    /// Cursor as (row, col)
    pub cursor: (u8, u8),
    pub selected: Option<(u8, u8)>,
    /// Bit `i` set when slot `i` was refilled by the last swap
    pub fresh_mask: u64,
    pub episode_id: u32,
    pub seed: u32,
    pub score: u32,
    pub moves: u32,
    pub last_gained: u32,
}

impl GameSnapshot {
    /// Category at (row, col), if the cell holds one
    pub fn category_at(&self, row: usize, col: usize) -> Option<Category> {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|code| Category::from_code(*code))
    }

    pub fn is_fresh(&self, row: usize, col: usize) -> bool {
        row < GRID_SIZE && col < GRID_SIZE && self.fresh_mask & (1u64 << (row * GRID_SIZE + col)) != 0
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; GRID_SIZE]; GRID_SIZE],
            tile_ids: [[0u64; GRID_SIZE]; GRID_SIZE],
            cursor: (0, 0),
            selected: None,
            fresh_mask: 0,
            episode_id: 0,
            seed: 0,
            score: 0,
            moves: 0,
            last_gained: 0,
        }
    }
}
