//! Tone Puzzle (workspace facade crate).
//!
//! Re-exports the member crates under `tone_puzzle::{core,input,store,term,types}`
//! and holds the binary's runtime [`config`] and episode [`scores`] banking.

pub mod config;
pub mod scores;

pub use tone_puzzle_core as core;
pub use tone_puzzle_input as input;
pub use tone_puzzle_store as store;
pub use tone_puzzle_term as term;
pub use tone_puzzle_types as types;
