//! RNG module - random tile spawning
//!
//! After every move that changes the board, a new tile appears in a uniformly
//! chosen empty cell: a 2 most of the time, occasionally a 4.
//!
//! Also provides a simple LCG so that a seed reproduces a whole game.

use tracing::trace;

use crate::board::Board;
use crate::error::GridError;
use crate::tile::TileId;
use crate::types::{DEFAULT_FOUR_PERCENT, SPAWN_RARE_VALUE, SPAWN_VALUE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Places new tiles on random empty cells.
#[derive(Debug, Clone)]
pub struct TileSpawner {
    rng: SimpleRng,
    four_percent: u32,
}

impl TileSpawner {
    pub fn new(seed: u32) -> Self {
        Self::with_four_percent(seed, DEFAULT_FOUR_PERCENT)
    }

    pub fn with_four_percent(seed: u32, four_percent: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            four_percent: four_percent.min(100),
        }
    }

    /// Spawn one tile. Returns `None` when the board is full.
    pub fn spawn(&mut self, board: &mut Board) -> Result<Option<TileId>, GridError> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return Ok(None);
        }

        let (x, y) = empty[self.rng.next_range(empty.len() as u32) as usize];
        let value = if self.rng.next_range(100) < self.four_percent {
            SPAWN_RARE_VALUE
        } else {
            SPAWN_VALUE
        };
        trace!(x, y, value, "spawn tile");
        board.add_tile(value, x, y).map(Some)
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(5) < 5);
        }
    }

    #[test]
    fn test_spawn_fills_board_then_stops() {
        let mut board = Board::new(2);
        let mut spawner = TileSpawner::new(42);

        for _ in 0..4 {
            assert!(spawner.spawn(&mut board).unwrap().is_some());
        }
        assert_eq!(board.tile_count(), 4);
        assert!(spawner.spawn(&mut board).unwrap().is_none());
        assert!(board
            .tiles()
            .all(|(_, t)| t.value() == SPAWN_VALUE || t.value() == SPAWN_RARE_VALUE));
    }

    #[test]
    fn test_spawn_respects_four_percent() {
        let mut board = Board::new(4);
        let mut always_four = TileSpawner::with_four_percent(3, 100);
        always_four.spawn(&mut board).unwrap();
        assert!(board.tiles().all(|(_, t)| t.value() == SPAWN_RARE_VALUE));

        board.clear();
        let mut never_four = TileSpawner::with_four_percent(3, 0);
        for _ in 0..16 {
            never_four.spawn(&mut board).unwrap();
        }
        assert!(board.tiles().all(|(_, t)| t.value() == SPAWN_VALUE));
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = Board::new(4);
        let mut b = Board::new(4);
        let mut sa = TileSpawner::new(9);
        let mut sb = TileSpawner::new(9);
        for _ in 0..6 {
            sa.spawn(&mut a).unwrap();
            sb.spawn(&mut b).unwrap();
        }
        assert_eq!(a.values(), b.values());
        assert_eq!(sa.seed(), sb.seed());
    }
}
