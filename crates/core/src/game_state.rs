//! Game state module - the tilt/merge engine
//!
//! Owns the board and the score. A tilt compresses every tile toward one
//! edge; the work is always phrased as "move up" in the logical frame of the
//! tilt [`Direction`], one logical column at a time.

use std::fmt;

use tracing::{debug, trace};

use crate::board::{Board, Placement};
use crate::config::GameConfig;
use crate::error::GridError;
use crate::snapshot::{GameSnapshot, SlideSnapshot, TileSnapshot};
use crate::tile::Tile;
use crate::types::{can_merge, Direction, GameAction, MAX_PIECE};

/// What a tilt (or a single column of it) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TiltOutcome {
    /// Sum of the values of all tiles created by merges.
    pub score_delta: u32,
    pub merges: u32,
    /// True if any tile changed cells.
    pub moved: bool,
}

impl TiltOutcome {
    fn absorb(&mut self, other: TiltOutcome) -> Result<(), GridError> {
        self.score_delta = self
            .score_delta
            .checked_add(other.score_delta)
            .ok_or(GridError::ScoreOverflow)?;
        self.merges += other.merges;
        self.moved |= other.moved;
        Ok(())
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    score: u32,
    /// Any tile at least this large ends the game.
    win_value: u32,
}

impl GameState {
    /// Create a new game on an empty `size` x `size` board
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            score: 0,
            win_value: MAX_PIECE,
        }
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            win_value: config.win_value,
            ..Self::new(config.size)
        }
    }

    /// Create a game from raw values (`values[y][x]`, row 0 at the bottom,
    /// 0 for empty) and a starting score. Used for deterministic setups.
    pub fn from_values(values: &[Vec<u32>], score: u32) -> Result<Self, GridError> {
        Ok(Self {
            board: Board::from_values(values)?,
            score,
            win_value: MAX_PIECE,
        })
    }

    /// Discard the current game and start an empty one of `size`.
    pub fn new_game(&mut self, size: usize) {
        self.board = Board::new(size);
        self.score = 0;
    }

    /// Clear the board and reset the score
    pub fn clear(&mut self) {
        self.score = 0;
        self.board.clear();
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn win_value(&self) -> u32 {
        self.win_value
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Tile at physical (x, y), or `None` if the cell is empty.
    pub fn tile(&self, x: usize, y: usize) -> Result<Option<&Tile>, GridError> {
        self.board.get(x, y)
    }

    /// Add a tile at physical (x, y). The cell must be empty.
    pub fn add_tile(&mut self, value: u32, x: usize, y: usize) -> Result<(), GridError> {
        self.board.add_tile(value, x, y).map(|_| ())
    }

    /// True if the game is over: a winning tile exists or no move is left.
    pub fn game_over(&self) -> bool {
        self.max_tile_exists() || !self.move_available()
    }

    /// True if at least one cell is empty.
    pub fn empty_space_exists(&self) -> bool {
        self.board.tile_count() < self.size() * self.size()
    }

    /// True if any tile's value is at least `threshold`.
    pub fn max_tile_reached(&self, threshold: u32) -> bool {
        self.board.tiles().any(|(_, tile)| tile.value() >= threshold)
    }

    /// True if any tile has reached the configured win value.
    pub fn max_tile_exists(&self) -> bool {
        self.max_tile_reached(self.win_value)
    }

    /// True if some tilt would change the board: a cell is empty, or two
    /// orthogonally adjacent cells hold equal values that can still merge.
    pub fn move_available(&self) -> bool {
        if self.empty_space_exists() {
            return true;
        }

        let values = self.board.values();
        let size = self.size();
        for y in 0..size {
            for x in 0..size {
                let value = values[y][x];
                if !can_merge(value) {
                    continue;
                }
                if x + 1 < size && values[y][x + 1] == value {
                    return true;
                }
                if y + 1 < size && values[y + 1][x] == value {
                    return true;
                }
            }
        }
        false
    }

    /// Move the tile at logical (x, y) as far up as it can go in the frame of
    /// `direction`, merging with the first tile it meets if that tile has the
    /// same value and is not itself the product of a merge this tilt.
    ///
    /// Returns the placement, or `None` if the cell is empty or the tile stays.
    pub fn move_tile_up_as_far_as_possible(
        &mut self,
        x: usize,
        y: usize,
        direction: Direction,
    ) -> Result<Option<Placement>, GridError> {
        let Some(id) = self.board.tile_at(x, y, direction)? else {
            return Ok(None);
        };
        let value = self.board.tile(id).ok_or(GridError::StaleTile)?.value();

        let mut target_y = y;
        for above in y + 1..self.size() {
            match self.board.tile_at(x, above, direction)? {
                None => target_y = above,
                Some(other) => {
                    let other = self.board.tile(other).ok_or(GridError::StaleTile)?;
                    if other.value() == value && !other.was_merged() && can_merge(value) {
                        target_y = above;
                    }
                    break;
                }
            }
        }

        if target_y == y {
            return Ok(None);
        }

        // Checked before the board changes so a failed merge leaves no trace.
        let merging = self.board.tile_at(x, target_y, direction)?.is_some();
        let score = if merging {
            self.score
                .checked_add(value * 2)
                .ok_or(GridError::ScoreOverflow)?
        } else {
            self.score
        };

        let placement = self.board.place(x, target_y, id, direction)?;
        if let Some(merged) = placement.merged_value() {
            trace!(x, y, target_y, merged, "merge");
        }
        self.score = score;
        Ok(Some(placement))
    }

    /// Compress logical column `x` upward in the frame of `direction`.
    ///
    /// Tiles are processed from the top down so that every tile sees the final
    /// resting place of the tiles above it.
    pub fn tilt_column(
        &mut self,
        x: usize,
        direction: Direction,
    ) -> Result<TiltOutcome, GridError> {
        let mut outcome = TiltOutcome::default();
        for y in (0..self.size().saturating_sub(1)).rev() {
            if let Some(placement) = self.move_tile_up_as_far_as_possible(x, y, direction)? {
                outcome.absorb(TiltOutcome {
                    score_delta: placement.merged_value().unwrap_or(0),
                    merges: u32::from(placement.merged_value().is_some()),
                    moved: true,
                })?;
            }
        }
        Ok(outcome)
    }

    /// Tilt the whole board toward `direction`.
    ///
    /// The tilt is all-or-nothing: on any error (a score overflow or an
    /// invariant violation) the board and score are restored to their state
    /// before the call.
    pub fn tilt(&mut self, direction: Direction) -> Result<TiltOutcome, GridError> {
        let saved = (self.board.clone(), self.score);
        match self.tilt_in_place(direction) {
            Ok(outcome) => {
                debug!(
                    direction = direction.as_str(),
                    score_delta = outcome.score_delta,
                    merges = outcome.merges,
                    moved = outcome.moved,
                    score = self.score,
                    "tilt"
                );
                Ok(outcome)
            }
            Err(err) => {
                (self.board, self.score) = saved;
                Err(err)
            }
        }
    }

    fn tilt_in_place(&mut self, direction: Direction) -> Result<TiltOutcome, GridError> {
        self.board.reset_merge_flags();
        let mut outcome = TiltOutcome::default();
        for x in 0..self.size() {
            outcome.absorb(self.tilt_column(x, direction)?)?;
        }
        Ok(outcome)
    }

    /// Apply a game action. Returns the tilt outcome for tilts.
    pub fn apply_action(&mut self, action: GameAction) -> Result<Option<TiltOutcome>, GridError> {
        match action {
            GameAction::Tilt(direction) => self.tilt(direction).map(Some),
            GameAction::Restart => {
                self.new_game(self.size());
                Ok(None)
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let size = self.size();
        out.size = size;
        out.score = self.score;
        out.game_over = self.game_over();
        out.won = self.max_tile_exists();

        out.cells.clear();
        out.cells.resize(size * size, None);
        for (id, tile) in self.board.tiles() {
            let successor = self.board.tile(self.board.successor(id)).unwrap_or(tile);
            out.cells[tile.y() * size + tile.x()] = Some(TileSnapshot {
                value: tile.value(),
                x: tile.x(),
                y: tile.y(),
                merged: tile.was_merged(),
                successor_x: successor.x(),
                successor_y: successor.y(),
                distance: self.board.distance_to_successor(id),
            });
        }

        out.slides.clear();
        out.slides.extend(self.board.transitions().map(|t| SlideSnapshot {
            value: t.from.value(),
            from_x: t.from.x(),
            from_y: t.from.y(),
            to_x: t.to.x(),
            to_y: t.to.y(),
            distance: t.distance(),
            merged: t.merged(),
        }));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_config(&GameConfig::default())
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.board == other.board
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        let over = if self.game_over() { "over" } else { "not over" };
        writeln!(f, "] {} (game is {}) ", self.score, over)
    }
}
