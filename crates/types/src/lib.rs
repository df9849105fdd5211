//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, score persistence).
//!
//! # Grid Dimensions
//!
//! The Tone Puzzle grid is a fixed 6x6 square stored as a flat, row-major array:
//!
//! - **Size**: 6 rows by 6 columns (`GRID_SIZE`)
//! - **Cells**: 36 slots (`GRID_CELLS`), slot `i` is row `i / 6`, column `i % 6`
//! - **Match length**: 3 or more equal categories in a row or a column
//!
//! # Scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_TILE` | 10 | Points per cleared cell |
//! | `MIN_MATCH_LEN` | 3 | Shortest run that counts as a match |
//!
//! # Examples
//!
//! ```
//! use tone_puzzle_types::{Category, GameAction, GRID_CELLS, GRID_SIZE};
//!
//! let category = Category::from_str("Friendly").unwrap();
//! assert_eq!(category, Category::Friendly);
//! assert_eq!(category.as_str(), "friendly");
//!
//! let action = GameAction::from_str("select").unwrap();
//! assert_eq!(action, GameAction::Select);
//!
//! assert_eq!(GRID_SIZE, 6);
//! assert_eq!(GRID_CELLS, 36);
//! ```

/// Grid side length (6 rows, 6 columns)
pub const GRID_SIZE: usize = 6;

/// Total number of slots on the grid
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Shortest run of equal categories that counts as a match
pub const MIN_MATCH_LEN: usize = 3;

/// Points awarded per cleared cell
pub const POINTS_PER_TILE: u32 = 10;

/// Number of tone categories in the palette
pub const CATEGORY_COUNT: usize = 4;

/// Key under which Tone Puzzle scores are stored in the score file
pub const GAME_KEY: &str = "tone_puzzle";


/// The four tone categories a tile can carry
///
/// Each category has a fixed emoji and display color used by front-ends:
/// - **Friendly**: 😊, warm yellow
/// - **Professional**: 💼, blue
/// - **Casual**: 😎, green
/// - **Emotional**: 💖, pink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Friendly,
    Professional,
    Casual,
    Emotional,
}

impl Category {
    /// Every category, in palette order
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Friendly,
        Category::Professional,
        Category::Casual,
        Category::Emotional,
    ];

    /// Parse category from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tone_puzzle_types::Category;
    ///
    /// assert_eq!(Category::from_str("casual"), Some(Category::Casual));
    /// assert_eq!(Category::from_str("EMOTIONAL"), Some(Category::Emotional));
    /// assert_eq!(Category::from_str("sarcastic"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "friendly" => Some(Category::Friendly),
            "professional" => Some(Category::Professional),
            "casual" => Some(Category::Casual),
            "emotional" => Some(Category::Emotional),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Friendly => "friendly",
            Category::Professional => "professional",
            Category::Casual => "casual",
            Category::Emotional => "emotional",
        }
    }

    /// Palette index (0-based)
    pub fn index(&self) -> usize {
        match self {
            Category::Friendly => 0,
            Category::Professional => 1,
            Category::Casual => 2,
            Category::Emotional => 3,
        }
    }

    /// Category at a palette index, wrapping around the palette
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % CATEGORY_COUNT]
    }

    /// Non-zero code used in snapshots (0 is reserved for "no tile")
    pub fn code(&self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=4 => Some(Self::from_index(code as usize - 1)),
            _ => None,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Friendly => "😊",
            Category::Professional => "💼",
            Category::Casual => "😎",
            Category::Emotional => "💖",
        }
    }

    /// Single-letter glyph for terminals without emoji support
    pub fn glyph(&self) -> char {
        match self {
            Category::Friendly => 'F',
            Category::Professional => 'P',
            Category::Casual => 'C',
            Category::Emotional => 'E',
        }
    }

    /// Display color as (r, g, b)
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Category::Friendly => (250, 204, 21),
            Category::Professional => (59, 130, 246),
            Category::Casual => (34, 197, 94),
            Category::Emotional => (236, 72, 153),
        }
    }
}

/// A single grid cell's content
///
/// `id` is only a rendering key. Gameplay compares `category` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub category: Category,
    pub id: u64,
}

impl Tile {
    pub fn new(category: Category, id: u64) -> Self {
        Self { category, id }
    }

    /// Whether two tiles match for gameplay purposes
    #[inline]
    pub fn same_category(&self, other: &Tile) -> bool {
        self.category == other.category
    }
}

/// Row-major slot index for (row, col)
///
/// Returns `None` when either coordinate is off the grid.
#[inline]
pub fn slot_index(row: usize, col: usize) -> Option<usize> {
    if row >= GRID_SIZE || col >= GRID_SIZE {
        return None;
    }
    Some(row * GRID_SIZE + col)
}

/// (row, col) for a slot index
#[inline]
pub fn slot_position(index: usize) -> (usize, usize) {
    (index / GRID_SIZE, index % GRID_SIZE)
}

/// Check whether two slots can be swapped
///
/// Slots are adjacent when they are horizontal neighbours in the same row
/// (±1 without crossing a row boundary) or vertical neighbours (±6).
pub fn is_adjacent(a: usize, b: usize) -> bool {
    if a >= GRID_CELLS || b >= GRID_CELLS || a == b {
        return false;
    }
    let (ra, ca) = slot_position(a);
    let (rb, cb) = slot_position(b);
    (ra == rb && ca.abs_diff(cb) == 1) || (ca == cb && ra.abs_diff(rb) == 1)
}

/// Game actions that can be applied to a session
///
/// These are produced by the terminal key map and consumed by the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor one row up
    CursorUp,
    /// Move the cursor one row down
    CursorDown,
    /// Move the cursor one column left
    CursorLeft,
    /// Move the cursor one column right
    CursorRight,
    /// Select the tile under the cursor, or swap it with the selected tile
    Select,
    /// Drop the current selection
    Cancel,
    /// Start a new grid and reset the score
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tone_puzzle_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::CursorLeft));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("shuffle"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "select" => Some(GameAction::Select),
            "cancel" => Some(GameAction::Cancel),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Select => "select",
            GameAction::Cancel => "cancel",
            GameAction::Restart => "restart",
        }
    }
}
