//! Board module - manages the tile grid
//!
//! The board is a `size` x `size` grid where each cell is empty or holds a
//! handle to a [`Tile`]. Uses a flat vector in row-major order (`y * size + x`).
//! Coordinates: (x, y) where (0, 0) is the bottom-left cell.
//!
//! Every perspective-relative operation takes the [`Direction`] it is
//! interpreted in. Logical coordinates are mapped to physical ones with
//! [`Direction::physical`], so one compression routine serves all four edges.
//!
//! Tiles replaced during a tilt are retired rather than dropped: they stay
//! readable through their [`TileId`] together with the successor they became,
//! until [`Board::reset_merge_flags`] starts the next tilt.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::GridError;
use crate::tile::{Tile, TileArena, TileId};
use crate::types::{is_tile_value, Direction};

/// Result of a successful [`Board::place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The tile slid into an empty cell.
    Moved { tile: TileId },
    /// The tile merged with an equal resident tile into a tile of `value`.
    Merged { tile: TileId, value: u32 },
}

impl Placement {
    /// Handle of the tile now occupying the destination.
    pub fn tile(&self) -> TileId {
        match *self {
            Placement::Moved { tile } | Placement::Merged { tile, .. } => tile,
        }
    }

    pub fn merged_value(&self) -> Option<u32> {
        match *self {
            Placement::Moved { .. } => None,
            Placement::Merged { value, .. } => Some(value),
        }
    }
}

/// One entry of the per-tilt successor table, resolved to tile copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Tile,
    pub to: Tile,
}

impl Transition {
    pub fn distance(&self) -> usize {
        self.from.distance_to(&self.to)
    }

    /// True when the successor is the product of a merge.
    pub fn merged(&self) -> bool {
        self.to.value() != self.from.value()
    }
}

/// The game grid
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    /// Flat array of cells, row-major order (y * size + x)
    cells: Vec<Option<TileId>>,
    tiles: TileArena,
    /// Successor of every tile replaced since the last reset.
    successors: BTreeMap<TileId, TileId>,
    /// Tiles no longer on the grid, kept readable for the current tilt.
    retired: Vec<TileId>,
}

impl Board {
    /// Create a new empty board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            tiles: TileArena::default(),
            successors: BTreeMap::new(),
            retired: Vec::new(),
        }
    }

    /// Create a board from raw values, where `values[y][x]` is the tile at
    /// (x, y), row 0 is the bottom row and 0 marks an empty cell.
    pub fn from_values(values: &[Vec<u32>]) -> Result<Self, GridError> {
        let size = values.len();
        if size == 0 || values.iter().any(|row| row.len() != size) {
            return Err(GridError::InvalidShape);
        }

        let mut board = Self::new(size);
        for (y, row) in values.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value != 0 {
                    board.add_tile(value, x, y)?;
                }
            }
        }
        Ok(board)
    }

    /// Get edge length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Calculate flat index from physical (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(y * self.size + x)
    }

    fn check(&self, x: usize, y: usize) -> Result<(), GridError> {
        if x >= self.size || y >= self.size {
            return Err(GridError::OutOfRange {
                x,
                y,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Handle of the tile at logical (x, y) as seen from `direction`.
    pub fn tile_at(
        &self,
        x: usize,
        y: usize,
        direction: Direction,
    ) -> Result<Option<TileId>, GridError> {
        self.check(x, y)?;
        let (px, py) = direction.physical(x, y, self.size);
        Ok(self.cells[py * self.size + px])
    }

    /// Tile at physical (x, y).
    pub fn get(&self, x: usize, y: usize) -> Result<Option<&Tile>, GridError> {
        let id = self.tile_at(x, y, Direction::Up)?;
        Ok(id.and_then(|id| self.tiles.get(id)))
    }

    /// Resolve a handle. Returns `None` once the tile has been released.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Put a new tile of `value` at physical (x, y).
    pub fn add_tile(&mut self, value: u32, x: usize, y: usize) -> Result<TileId, GridError> {
        if !is_tile_value(value) {
            return Err(GridError::InvalidValue(value));
        }
        self.check(x, y)?;
        let idx = y * self.size + x;
        if self.cells[idx].is_some() {
            return Err(GridError::Occupied { x, y });
        }
        let id = self.tiles.insert(Tile::create(value, x, y));
        self.cells[idx] = Some(id);
        Ok(id)
    }

    /// Move `tile` to logical (x, y) as seen from `direction`, merging with an
    /// equal-valued resident if there is one.
    ///
    /// The moving tile (and a merged resident) is replaced by a new tile at the
    /// destination and recorded as that tile's predecessor. Merging into a tile
    /// of a different value is an invariant violation and leaves the board
    /// untouched.
    pub fn place(
        &mut self,
        x: usize,
        y: usize,
        tile: TileId,
        direction: Direction,
    ) -> Result<Placement, GridError> {
        self.check(x, y)?;
        let (px, py) = direction.physical(x, y, self.size);
        let dst = py * self.size + px;

        let moving = *self.tiles.get(tile).ok_or(GridError::StaleTile)?;
        let src = self
            .index(moving.x(), moving.y())
            .filter(|&src| self.cells[src] == Some(tile))
            .ok_or(GridError::StaleTile)?;

        let resident = match self.cells[dst] {
            Some(id) if id != tile => Some((id, *self.tiles.get(id).ok_or(GridError::StaleTile)?)),
            _ => None,
        };

        let (next, placement) = match resident {
            None => {
                self.cells[src] = None;
                let next = self.tiles.insert(Tile::create(moving.value(), px, py));
                self.set_merged(tile, false);
                (next, Placement::Moved { tile: next })
            }
            Some((resident_id, resident)) => {
                if resident.value() != moving.value() {
                    return Err(GridError::MergeMismatch {
                        moving: moving.value(),
                        resident: resident.value(),
                    });
                }
                let value = moving
                    .value()
                    .checked_mul(2)
                    .ok_or(GridError::InvalidValue(moving.value()))?;

                self.cells[src] = None;
                // The product of a merge never accepts a second merge this tilt.
                let mut merged_tile = Tile::create(value, px, py);
                merged_tile.set_merged(true);
                let next = self.tiles.insert(merged_tile);

                self.set_merged(tile, !resident.was_merged());
                self.successors.insert(resident_id, next);
                self.retired.push(resident_id);
                (next, Placement::Merged { tile: next, value })
            }
        };

        self.successors.insert(tile, next);
        self.retired.push(tile);
        self.cells[dst] = Some(next);
        Ok(placement)
    }

    fn set_merged(&mut self, id: TileId, merged: bool) {
        if let Some(tile) = self.tiles.get_mut(id) {
            tile.set_merged(merged);
        }
    }

    /// Start a new tilt: clear every merge flag, release tiles replaced by the
    /// previous tilt and forget their successors.
    pub fn reset_merge_flags(&mut self) {
        for id in self.cells.iter().flatten() {
            if let Some(tile) = self.tiles.get_mut(*id) {
                tile.set_merged(false);
            }
        }
        for id in self.retired.drain(..) {
            self.tiles.remove(id);
        }
        self.successors.clear();
    }

    /// Record that `tile` becomes `successor` after the current move.
    pub fn set_successor(&mut self, tile: TileId, successor: TileId) -> Result<(), GridError> {
        if self.tiles.get(tile).is_none() || self.tiles.get(successor).is_none() {
            return Err(GridError::StaleTile);
        }
        self.successors.insert(tile, successor);
        Ok(())
    }

    /// The tile `tile` became during the current move, or `tile` itself.
    pub fn successor(&self, tile: TileId) -> TileId {
        self.successors.get(&tile).copied().unwrap_or(tile)
    }

    /// Cells between `tile` and its successor; 0 if it has none.
    pub fn distance_to_successor(&self, tile: TileId) -> usize {
        let Some(next) = self.successors.get(&tile) else {
            return 0;
        };
        match (self.tiles.get(tile), self.tiles.get(*next)) {
            (Some(from), Some(to)) => from.distance_to(to),
            _ => 0,
        }
    }

    /// Every (replaced tile, successor) pair of the current move.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.successors.iter().filter_map(|(&from, &to)| {
            Some(Transition {
                from: *self.tiles.get(from)?,
                to: *self.tiles.get(to)?,
            })
        })
    }

    /// Live tiles on the grid, bottom row first.
    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> + '_ {
        self.cells
            .iter()
            .flatten()
            .filter_map(|&id| self.tiles.get(id).map(|tile| (id, tile)))
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Physical coordinates of every empty cell, bottom row first.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| (idx % self.size, idx / self.size))
            .collect()
    }

    /// Tile values as `values[y][x]`, row 0 at the bottom, 0 for empty cells.
    pub fn values(&self) -> Vec<Vec<u32>> {
        (0..self.size)
            .map(|y| {
                (0..self.size)
                    .map(|x| {
                        self.cells[y * self.size + x]
                            .and_then(|id| self.tiles.get(id))
                            .map_or(0, Tile::value)
                    })
                    .collect()
            })
            .collect()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.tiles.clear();
        self.successors.clear();
        self.retired.clear();
    }

    /// Tiles held by the arena, including retired ones (for testing)
    #[cfg(test)]
    pub(crate) fn arena_len(&self) -> usize {
        self.tiles.len()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.values() == other.values()
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "[")?;
        for row in self.values().iter().rev() {
            for &value in row {
                if value == 0 {
                    write!(f, "|    ")?;
                } else {
                    write!(f, "|{:4}", value)?;
                }
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
