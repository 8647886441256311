use serde::{Deserialize, Serialize};

/// One occupied cell after the latest move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub value: u32,
    pub x: usize,
    pub y: usize,
    pub merged: bool,
    /// Where this tile goes next; its own cell until it is replaced.
    pub successor_x: usize,
    pub successor_y: usize,
    pub distance: usize,
}

/// A tile replaced by the latest tilt and the cell its successor occupies.
///
/// Renderers slide `value` from `(from_x, from_y)` toward `(to_x, to_y)` over
/// `distance` cells, then show the successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideSnapshot {
    pub value: u32,
    pub from_x: usize,
    pub from_y: usize,
    pub to_x: usize,
    pub to_y: usize,
    pub distance: usize,
    /// True when the successor is a merged tile.
    pub merged: bool,
}

impl SlideSnapshot {
    /// Interpolated position at `progress` in `[0, 1]`.
    pub fn position_at(&self, progress: f32) -> (f32, f32) {
        let p = progress.clamp(0.0, 1.0);
        let lerp = |a: usize, b: usize| a as f32 + (b as f32 - a as f32) * p;
        (lerp(self.from_x, self.to_x), lerp(self.from_y, self.to_y))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub size: usize,
    pub score: u32,
    pub game_over: bool,
    pub won: bool,
    /// Row-major cells (`y * size + x`), row 0 at the bottom.
    pub cells: Vec<Option<TileSnapshot>>,
    pub slides: Vec<SlideSnapshot>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.size = 0;
        self.score = 0;
        self.game_over = false;
        self.won = false;
        self.cells.clear();
        self.slides.clear();
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&TileSnapshot> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells.get(y * self.size + x)?.as_ref()
    }

    pub fn max_value(&self) -> u32 {
        self.cells.iter().flatten().map(|t| t.value).max().unwrap_or(0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            size: 0,
            score: 0,
            game_over: false,
            won: false,
            cells: Vec::new(),
            slides: Vec::new(),
        }
    }
}
