//! Game configuration, read from the environment by hosts.

use crate::types::{
    DEFAULT_BOARD_SIZE, DEFAULT_FOUR_PERCENT, MAX_BOARD_SIZE, MAX_PIECE, MIN_BOARD_SIZE,
};

/// Settings for a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Board edge length
    pub size: usize,
    /// Tile value that ends the game
    pub win_value: u32,
    /// Percent chance a spawned tile is a 4
    pub four_percent: u32,
    /// Spawn RNG seed
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            win_value: MAX_PIECE,
            four_percent: DEFAULT_FOUR_PERCENT,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    ///
    /// `TUI2048_SIZE`, `TUI2048_WIN`, `TUI2048_FOUR_PERCENT`, `TUI2048_SEED`.
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env` and tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let size = parse("TUI2048_SIZE")
            .map(|n| n.clamp(MIN_BOARD_SIZE as u64, MAX_BOARD_SIZE as u64) as usize)
            .unwrap_or(defaults.size);
        let win_value = parse("TUI2048_WIN")
            .and_then(|n| u32::try_from(n).ok())
            .filter(|&n| crate::types::is_tile_value(n))
            .unwrap_or(defaults.win_value);
        let four_percent = parse("TUI2048_FOUR_PERCENT")
            .map(|n| n.min(100) as u32)
            .unwrap_or(defaults.four_percent);
        let seed = parse("TUI2048_SEED")
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(defaults.seed);

        Self {
            size,
            win_value,
            four_percent,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(GameConfig::from_lookup(|_| None), GameConfig::default());
    }

    #[test]
    fn test_values_are_parsed_and_clamped() {
        let config = GameConfig::from_lookup(lookup(&[
            ("TUI2048_SIZE", "40"),
            ("TUI2048_WIN", "512"),
            ("TUI2048_FOUR_PERCENT", "250"),
            ("TUI2048_SEED", " 99 "),
        ]));
        assert_eq!(config.size, MAX_BOARD_SIZE);
        assert_eq!(config.win_value, 512);
        assert_eq!(config.four_percent, 100);
        assert_eq!(config.seed, 99);

        let config = GameConfig::from_lookup(lookup(&[("TUI2048_SIZE", "1")]));
        assert_eq!(config.size, MIN_BOARD_SIZE);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = GameConfig::from_lookup(lookup(&[
            ("TUI2048_SIZE", "big"),
            ("TUI2048_WIN", "1000"),
        ]));
        assert_eq!(config.size, DEFAULT_BOARD_SIZE);
        assert_eq!(config.win_value, MAX_PIECE);
    }

    #[test]
    fn test_out_of_range_seed_falls_back() {
        let too_big = (u64::from(u32::MAX) + 5).to_string();
        let config = GameConfig::from_lookup(lookup(&[("TUI2048_SEED", too_big.as_str())]));
        assert_eq!(config.seed, GameConfig::default().seed);

        let max = u32::MAX.to_string();
        let config = GameConfig::from_lookup(lookup(&[("TUI2048_SEED", max.as_str())]));
        assert_eq!(config.seed, u32::MAX);
    }
}
