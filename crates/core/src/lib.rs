//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the tilt/merge engine of a sliding-tile merge puzzle
//! on an N×N grid. It has **no dependencies** on UI or terminal I/O, making it:
//!
//! - **Deterministic**: The same board and direction always produce the same result
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`tile`]: Immutable tiles and the generational arena that owns them
//! - [`board`]: The grid, perspective-relative access and the move/merge contract
//! - [`game_state`]: Score, the tilt algorithm and end-of-game queries
//! - [`snapshot`]: Read model for renderers, including slide animation data
//! - [`rng`]: Seeded random tile spawning
//! - [`config`]: Game settings from the environment
//!
//! # Game Rules
//!
//! - **Tilt**: All tiles slide toward one edge as far as they can
//! - **Merge**: Two equal tiles that meet become one tile of double the value,
//!   and the new value is added to the score
//! - **Merge once**: A tile produced by a merge does not merge again in the same tilt
//! - **Three in a line**: Only the two tiles nearest the edge merge
//! - **Game over**: A 2048 tile exists, or the board is full with no equal neighbours
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GameState;
//! use tui_2048_types::Direction;
//!
//! // Bottom row 2 2 4 _, everything else empty.
//! let mut game = GameState::from_values(
//!     &[vec![2, 2, 4, 0], vec![0; 4], vec![0; 4], vec![0; 4]],
//!     0,
//! )
//! .unwrap();
//!
//! let outcome = game.tilt(Direction::Left).unwrap();
//! assert_eq!(outcome.score_delta, 4);
//! assert_eq!(game.board().values()[0], vec![4, 4, 0, 0]);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Placement, Transition};
pub use config::GameConfig;
pub use error::GridError;
pub use game_state::{GameState, TiltOutcome};
pub use rng::{SimpleRng, TileSpawner};
pub use snapshot::{GameSnapshot, SlideSnapshot, TileSnapshot};
pub use tile::{Tile, TileId};
