//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the Tone Puzzle grid match engine and the session state
//! built on top of it. It has **no dependencies** on terminals, files or
//! networking, making it:
//!
//! - **Deterministic**: Same seed produces identical grids and refills
//! - **Testable**: Any [`TileFactory`] can be injected for exact assertions
//! - **Portable**: Runs headless, in a terminal, or behind any other front-end
//! - **Allocation-free**: Detection and resolution use fixed-size storage
//!
//! # Module Structure
//!
//! - [`tile`]: tile factory trait, seeded [`TileSource`], deterministic [`SequenceFactory`]
//! - [`grid`]: the 6x6 row-major grid and [`create_grid`]
//! - [`matcher`]: horizontal/vertical run detection into a [`MatchSet`]
//! - [`resolve`]: clear, gravity, refill and [`check_matches`]
//! - [`scoring`]: points per cleared tile
//! - [`game_state`]: cursor, selection, swap validation and the running score
//! - [`snapshot`]: plain-data copy of a session for renderers
//! - [`rng`]: small seeded LCG
//!
//! # Game Rules
//!
//! - **Swaps**: two horizontally or vertically adjacent slots
//! - **Matches**: 3+ equal categories in a row or a column
//! - **Scoring**: 10 points per distinct cleared slot, no multipliers
//! - **Single pass**: refilled tiles are not re-checked until the next swap
//!
//! # Example
//!
//! ```
//! use tone_puzzle_core::{check_matches, create_grid, SequenceFactory, TileSource};
//! use tone_puzzle_core::types::Category;
//!
//! // A striped grid never contains three in a row.
//! let mut stripes = SequenceFactory::new(&Category::ALL, 0);
//! let mut grid = create_grid(&mut stripes);
//!
//! let mut source = TileSource::new(12345);
//! let outcome = check_matches(&mut grid, &mut source);
//! assert_eq!(outcome.gained, 0);
//! assert!(outcome.matched_categories().is_empty());
//! ```

pub mod game_state;
pub mod grid;
pub mod matcher;
pub mod resolve;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tile;

pub use tone_puzzle_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, SwapError};
pub use grid::{create_grid, Grid};
pub use matcher::{detect_matches, has_match, MatchSet};
pub use resolve::{check_matches, resolve, MatchOutcome, Resolution};
pub use rng::SimpleRng;
pub use scoring::calculate_match_score;
pub use snapshot::GameSnapshot;
pub use tile::{create_tile, SequenceFactory, TileFactory, TileSource};
