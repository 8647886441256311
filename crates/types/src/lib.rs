//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Default size**: 4x4
//! - **Supported sizes**: 2..=16 (fixed for the lifetime of a game)
//! - **Origin**: (0, 0) is the bottom-left cell; x grows to the right, y grows upward
//!
//! # Perspective Transform
//!
//! The tilt engine only ever compresses tiles "up" in a logical frame. Each
//! [`Direction`] maps logical coordinates to physical ones so that moving up in
//! the logical frame equals moving toward that edge on the real board:
//!
//! | Direction | physical x | physical y |
//! |-----------|------------|------------|
//! | `Up` | `lx` | `ly` |
//! | `Right` | `ly` | `size-1-lx` |
//! | `Down` | `size-1-lx` | `size-1-ly` |
//! | `Left` | `size-1-ly` | `lx` |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, DEFAULT_BOARD_SIZE, MAX_PIECE};
//!
//! // Parse from string (case-insensitive)
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir, Direction::Left);
//!
//! // Logical top of column 0 is the physical left edge of row 0
//! assert_eq!(dir.physical(0, 3, 4), (0, 0));
//!
//! // Parse game action
//! let action = GameAction::from_str("tiltUp").unwrap();
//! assert_eq!(action, GameAction::Tilt(Direction::Up));
//!
//! assert_eq!(DEFAULT_BOARD_SIZE, 4);
//! assert_eq!(MAX_PIECE, 2048);
//! ```

/// Default board edge length (4x4)
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// Smallest supported board edge length
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board edge length
pub const MAX_BOARD_SIZE: usize = 16;

/// Tile value that ends the game as a win (2048)
pub const MAX_PIECE: u32 = 2048;

/// Value of a freshly spawned common tile
pub const SPAWN_VALUE: u32 = 2;

/// Value of a freshly spawned rare tile
pub const SPAWN_RARE_VALUE: u32 = 4;

/// Percent chance that a spawned tile is [`SPAWN_RARE_VALUE`]
pub const DEFAULT_FOUR_PERCENT: u32 = 10;

/// Number of tiles placed on an empty board when a game starts
pub const START_TILES: usize = 2;

/// Frames used to animate a slide from a tile to its successor
pub const SLIDE_FRAMES: u32 = 6;

/// Milliseconds per slide animation frame
pub const SLIDE_FRAME_MS: u32 = 16;

/// Largest tile value. Two tiles of this value never merge, since their
/// sum does not fit in a `u32`.
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// Returns true if `value` is a legal tile value (a power of two, at least 2).
///
/// ```
/// use tui_2048_types::is_tile_value;
///
/// assert!(is_tile_value(2));
/// assert!(is_tile_value(2048));
/// assert!(!is_tile_value(0));
/// assert!(!is_tile_value(1));
/// assert!(!is_tile_value(6));
/// ```
pub fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// Returns true if two tiles of `value` may merge into one.
///
/// ```
/// use tui_2048_types::{can_merge, MAX_TILE_VALUE};
///
/// assert!(can_merge(1024));
/// assert!(can_merge(MAX_TILE_VALUE / 2));
/// assert!(!can_merge(MAX_TILE_VALUE));
/// ```
pub fn can_merge(value: u32) -> bool {
    is_tile_value(value) && value < MAX_TILE_VALUE
}

/// The four tilt directions.
///
/// A direction names the edge tiles are pushed toward. In the direction's
/// own logical frame that edge is always "up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Physical x for logical `(lx, ly)` on a `size` x `size` board.
    ///
    /// Inputs must be in `0..size`; callers guarantee this.
    #[inline]
    pub fn physical_x(self, lx: usize, ly: usize, size: usize) -> usize {
        match self {
            Direction::Up => lx,
            Direction::Right => ly,
            Direction::Down => size - 1 - lx,
            Direction::Left => size - 1 - ly,
        }
    }

    /// Physical y for logical `(lx, ly)` on a `size` x `size` board.
    #[inline]
    pub fn physical_y(self, lx: usize, ly: usize, size: usize) -> usize {
        match self {
            Direction::Up => ly,
            Direction::Right => size - 1 - lx,
            Direction::Down => size - 1 - ly,
            Direction::Left => lx,
        }
    }

    /// Physical `(x, y)` for logical `(lx, ly)`.
    #[inline]
    pub fn physical(self, lx: usize, ly: usize, size: usize) -> (usize, usize) {
        (
            self.physical_x(lx, ly, size),
            self.physical_y(lx, ly, size),
        )
    }

    /// Inverse of [`Direction::physical`]: logical `(lx, ly)` for physical `(px, py)`.
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// for dir in Direction::ALL {
    ///     let (px, py) = dir.physical(1, 2, 4);
    ///     assert_eq!(dir.logical(px, py, 4), (1, 2));
    /// }
    /// ```
    pub fn logical(self, px: usize, py: usize, size: usize) -> (usize, usize) {
        match self {
            Direction::Up => (px, py),
            Direction::Right => (size - 1 - py, px),
            Direction::Down => (size - 1 - px, size - 1 - py),
            Direction::Left => (py, size - 1 - px),
        }
    }

    /// Unit step `(dx, dy)` in physical space that "up" maps to.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse direction from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "up" | "u", "down" | "d", "left" | "l", "right" | "r"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Terminal input and scripted hosts both speak in these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Compress every tile toward an edge
    Tilt(Direction),
    /// Start a fresh game on a board of the same size
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("tiltLeft"), Some(GameAction::Tilt(Direction::Left)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tiltup" => Some(GameAction::Tilt(Direction::Up)),
            "tiltdown" => Some(GameAction::Tilt(Direction::Down)),
            "tiltleft" => Some(GameAction::Tilt(Direction::Left)),
            "tiltright" => Some(GameAction::Tilt(Direction::Right)),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Tilt(Direction::Up) => "tiltUp",
            GameAction::Tilt(Direction::Down) => "tiltDown",
            GameAction::Tilt(Direction::Left) => "tiltLeft",
            GameAction::Tilt(Direction::Right) => "tiltRight",
            GameAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_is_bijection_for_every_direction() {
        for size in MIN_BOARD_SIZE..=6 {
            for dir in Direction::ALL {
                let mut seen = vec![false; size * size];
                for ly in 0..size {
                    for lx in 0..size {
                        let (px, py) = dir.physical(lx, ly, size);
                        assert!(px < size && py < size, "{:?} out of range", dir);
                        let idx = py * size + px;
                        assert!(!seen[idx], "{:?} maps two cells to ({}, {})", dir, px, py);
                        seen[idx] = true;
                        assert_eq!(dir.logical(px, py, size), (lx, ly));
                    }
                }
            }
        }
    }

    #[test]
    fn logical_up_moves_toward_the_named_edge() {
        let size = 4;
        for dir in Direction::ALL {
            let (x0, y0) = dir.physical(1, 1, size);
            let (x1, y1) = dir.physical(1, 2, size);
            let (dx, dy) = dir.delta();
            assert_eq!(x1 as i8 - x0 as i8, dx, "{:?}", dir);
            assert_eq!(y1 as i8 - y0 as i8, dy, "{:?}", dir);
        }
    }

    #[test]
    fn up_is_identity() {
        for ly in 0..4 {
            for lx in 0..4 {
                assert_eq!(Direction::Up.physical(lx, ly, 4), (lx, ly));
            }
        }
    }

    #[test]
    fn direction_string_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
        }
        assert_eq!(Direction::from_str("R"), Some(Direction::Right));
        assert_eq!(Direction::from_str("north"), None);
    }

    #[test]
    fn game_action_string_roundtrip() {
        for dir in Direction::ALL {
            let action = GameAction::Tilt(dir);
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(GameAction::from_str("RESTART"), Some(GameAction::Restart));
    }
}
