//! Game state module - one Tone Puzzle session
//!
//! Ties together the grid, the tile source and the scoring. It owns the
//! cursor/selection model used by front-ends, validates swaps, and runs a
//! single detect + resolve pass per accepted swap.

use thiserror::Error;
use tracing::{debug, info};

use crate::grid::Grid;
use crate::resolve::{check_matches, MatchOutcome};
use crate::snapshot::GameSnapshot;
use crate::tile::TileSource;
use crate::types::{is_adjacent, slot_position, GameAction, GRID_CELLS, GRID_SIZE};

/// Why a swap was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("slot {0} is outside the grid")]
    OutOfBounds(usize),
    #[error("cannot swap slot {0} with itself")]
    SameSlot(usize),
    #[error("slots {0} and {1} are not adjacent")]
    NotAdjacent(usize, usize),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    source: TileSource,
    seed: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Cursor slot index.
    cursor: usize,
    selected: Option<usize>,
    score: u32,
    /// Accepted swaps this episode.
    moves: u32,
    last_outcome: Option<MatchOutcome>,
}

impl GameState {
    /// Create a new session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut source = TileSource::new(seed);
        let grid = Grid::new(&mut source);
        Self::from_parts(seed, grid, source)
    }

    /// Create a session around an existing grid
    ///
    /// Tiles created later (refills, restarts) come from a source seeded with
    /// `seed`, with ids continuing after the largest id on the grid.
    pub fn with_grid(seed: u32, grid: Grid) -> Self {
        let first_id = grid.tiles().iter().map(|t| t.id).max().map_or(0, |id| id + 1);
        let source = TileSource::with_first_id(seed, first_id);
        Self::from_parts(seed, grid, source)
    }

    fn from_parts(seed: u32, grid: Grid, source: TileSource) -> Self {
        Self {
            grid,
            source,
            seed,
            episode_id: 0,
            cursor: 0,
            selected: None,
            score: 0,
            moves: 0,
            last_outcome: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Cursor slot index
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn last_outcome(&self) -> Option<&MatchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Place the cursor on a slot. Returns false if out of bounds.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index >= GRID_CELLS {
            return false;
        }
        self.cursor = index;
        true
    }

    /// Swap two adjacent slots and resolve matches once
    ///
    /// A valid swap is kept even when it forms no match. Rejected swaps leave
    /// the session untouched.
    pub fn try_swap(&mut self, a: usize, b: usize) -> Result<MatchOutcome, SwapError> {
        if a >= GRID_CELLS {
            return Err(SwapError::OutOfBounds(a));
        }
        if b >= GRID_CELLS {
            return Err(SwapError::OutOfBounds(b));
        }
        if a == b {
            return Err(SwapError::SameSlot(a));
        }
        if !is_adjacent(a, b) {
            return Err(SwapError::NotAdjacent(a, b));
        }

        self.grid.swap(a, b);
        let outcome = check_matches(&mut self.grid, &mut self.source);
        self.score = self.score.saturating_add(outcome.gained);
        self.moves += 1;

        debug!(
            a,
            b,
            gained = outcome.gained,
            cleared = outcome.cleared.len(),
            score = self.score,
            "swap resolved"
        );

        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Handle a press of the select key at the cursor
    fn select_at_cursor(&mut self) -> bool {
        match self.selected {
            None => {
                self.selected = Some(self.cursor);
                true
            }
            Some(sel) if sel == self.cursor => {
                self.selected = None;
                true
            }
            Some(sel) if is_adjacent(sel, self.cursor) => {
                self.selected = None;
                self.try_swap(sel, self.cursor).is_ok()
            }
            Some(_) => {
                self.selected = Some(self.cursor);
                true
            }
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) -> bool {
        let (row, col) = slot_position(self.cursor);
        let new_row = row as isize + d_row;
        let new_col = col as isize + d_col;
        if new_row < 0 || new_col < 0 || new_row >= GRID_SIZE as isize || new_col >= GRID_SIZE as isize {
            return false;
        }
        self.cursor = new_row as usize * GRID_SIZE + new_col as usize;
        true
    }

    /// Start a new episode: fresh grid from the same source, score reset
    pub fn restart(&mut self) {
        self.grid = Grid::new(&mut self.source);
        self.episode_id += 1;
        self.cursor = 0;
        self.selected = None;
        self.score = 0;
        self.moves = 0;
        self.last_outcome = None;
        info!(episode = self.episode_id, "episode restarted");
    }

    /// Apply a game action. Returns true if the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::CursorUp => self.move_cursor(-1, 0),
            GameAction::CursorDown => self.move_cursor(1, 0),
            GameAction::CursorLeft => self.move_cursor(0, -1),
            GameAction::CursorRight => self.move_cursor(0, 1),
            GameAction::Select => self.select_at_cursor(),
            GameAction::Cancel => self.selected.take().is_some(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (i, tile) in self.grid.tiles().iter().enumerate() {
            let (row, col) = slot_position(i);
            out.grid[row][col] = tile.category.code();
            out.tile_ids[row][col] = tile.id;
        }

        let (row, col) = slot_position(self.cursor);
        out.cursor = (row as u8, col as u8);
        out.selected = self.selected.map(|s| {
            let (r, c) = slot_position(s);
            (r as u8, c as u8)
        });

        out.fresh_mask = self
            .last_outcome
            .as_ref()
            .map_or(0, |o| o.spawned.iter().fold(0u64, |m, &i| m | (1u64 << i)));
        out.last_gained = self.last_outcome.as_ref().map_or(0, |o| o.gained);

        out.episode_id = self.episode_id;
        out.seed = self.seed;
        out.score = self.score;
        out.moves = self.moves;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
