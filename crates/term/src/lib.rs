//! Terminal rendering for the board.
//!
//! Renders a [`core::GameSnapshot`] into a simple framebuffer that is then
//! flushed to the terminal with crossterm. Slide animations are produced by
//! rendering the same snapshot at increasing progress values.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
