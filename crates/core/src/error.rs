//! Errors raised by board and game-state operations.

use thiserror::Error;

/// Failure of a grid operation.
///
/// `MergeMismatch` and `StaleTile` can only come from a broken tilt
/// algorithm; the remaining variants reject bad caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinate ({x}, {y}) is outside a {size}x{size} board")]
    OutOfRange { x: usize, y: usize, size: usize },

    #[error("cannot merge a {moving} tile into a {resident} tile")]
    MergeMismatch { moving: u32, resident: u32 },

    #[error("cell ({x}, {y}) is already occupied")]
    Occupied { x: usize, y: usize },

    #[error("{0} is not a valid tile value")]
    InvalidValue(u32),

    #[error("tile handle no longer refers to a live tile")]
    StaleTile,

    #[error("board values must form a non-empty square grid")]
    InvalidShape,

    #[error("score would exceed {max}", max = u32::MAX)]
    ScoreOverflow,
}

impl GridError {
    pub fn code(self) -> &'static str {
        match self {
            GridError::OutOfRange { .. } => "out_of_range",
            GridError::MergeMismatch { .. } => "merge_mismatch",
            GridError::Occupied { .. } => "occupied",
            GridError::InvalidValue(_) => "invalid_value",
            GridError::StaleTile => "stale_tile",
            GridError::InvalidShape => "invalid_shape",
            GridError::ScoreOverflow => "score_overflow",
        }
    }

    /// True for errors that indicate a bug in the engine rather than bad input.
    pub fn is_invariant_violation(self) -> bool {
        matches!(self, GridError::MergeMismatch { .. } | GridError::StaleTile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = GridError::MergeMismatch {
            moving: 2,
            resident: 4,
        };
        assert_eq!(err.to_string(), "cannot merge a 2 tile into a 4 tile");
        assert!(err.is_invariant_violation());

        let err = GridError::OutOfRange { x: 4, y: 0, size: 4 };
        assert_eq!(err.code(), "out_of_range");
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn score_overflow_is_caller_input() {
        let err = GridError::ScoreOverflow;
        assert_eq!(err.code(), "score_overflow");
        assert_eq!(err.to_string(), "score would exceed 4294967295");
        assert!(!err.is_invariant_violation());
    }
}
