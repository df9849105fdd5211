//! Terminal rendering for Tone Puzzle.
//!
//! Renders into a simple framebuffer that is flushed to the terminal with
//! crossterm. No widget toolkit is involved.
//!
//! - [`game_view`] turns a [`core::GameSnapshot`] into a [`FrameBuffer`] (pure)
//! - [`renderer`] writes framebuffers to stdout, diffing against the last frame

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tone_puzzle_core as core;
pub use tone_puzzle_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
