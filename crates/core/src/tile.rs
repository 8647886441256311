//! Tile module - numbered tiles and the arena that owns them
//!
//! A [`Tile`] never changes value or position once created: sliding or merging
//! always produces a new tile at the destination. Tiles are addressed through
//! generation-tagged [`TileId`] handles so that a handle to a tile consumed by
//! an earlier tilt resolves to nothing instead of aliasing a newer tile that
//! reused its slot.

use serde::{Deserialize, Serialize};

/// Generation-tagged handle to a tile stored in a [`TileArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId {
    index: u32,
    generation: u32,
}

impl TileId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A numbered tile at a fixed physical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    value: u32,
    x: usize,
    y: usize,
    /// True if this tile was produced by a merge during the current tilt.
    merged: bool,
}

impl Tile {
    /// Create a tile of `value` at physical `(x, y)`.
    pub fn create(value: u32, x: usize, y: usize) -> Self {
        Self {
            value,
            x,
            y,
            merged: false,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn was_merged(&self) -> bool {
        self.merged
    }

    pub(crate) fn set_merged(&mut self, merged: bool) {
        self.merged = merged;
    }

    /// Chebyshev distance between two tile positions.
    ///
    /// Tiles only ever slide along one axis, so this is the number of cells
    /// an animation has to cover.
    pub fn distance_to(&self, other: &Tile) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    tile: Option<Tile>,
}

/// Slot storage for tiles, reusing freed slots with a bumped generation.
#[derive(Debug, Clone, Default)]
pub(crate) struct TileArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl TileArena {
    pub(crate) fn insert(&mut self, tile: Tile) -> TileId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.tile = Some(tile);
            return TileId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            tile: Some(tile),
        });
        TileId {
            index,
            generation: 0,
        }
    }

    pub(crate) fn get(&self, id: TileId) -> Option<&Tile> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.tile.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.tile.as_mut())
    }

    /// Free the slot behind `id`; every outstanding copy of `id` goes stale.
    pub(crate) fn remove(&mut self, id: TileId) -> Option<Tile> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let tile = slot.tile.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(tile)
    }

    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.tile = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index as u32);
        }
        self.live = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.live
    }
}
