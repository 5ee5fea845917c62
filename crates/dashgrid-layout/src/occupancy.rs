#![forbid(unsafe_code)]

//! Per-call occupancy index.
//!
//! [`OccupancyIndex`] is a set of taken `(x, y)` cells rebuilt from the
//! caller's block list at the start of every engine call and dropped at the
//! end. It never outlives the call that built it.
//!
//! # Invariants
//!
//! 1. `bottom()` is the exclusive bottom edge of everything registered, so
//!    any in-bounds rectangle starting at or below it is free.
//! 2. `push_down` and `rise` only return positions for which
//!    `can_place_at` holds (given an in-bounds starting column).
//! 3. `rise` never passes through a taken cell: it stops at the first
//!    obstacle above, even if there is free space beyond it.

use dashgrid_core::{Block, Position};
use rustc_hash::FxHashSet;

/// Set of occupied cells for one grid of `columns` columns.
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    cells: FxHashSet<(u32, u32)>,
    columns: u32,
    bottom: u32,
}

impl OccupancyIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new(columns: u32) -> Self {
        Self {
            cells: FxHashSet::default(),
            columns,
            bottom: 0,
        }
    }

    /// Build an index with every block registered.
    #[must_use]
    pub fn from_blocks<'a>(columns: u32, blocks: impl IntoIterator<Item = &'a Block>) -> Self {
        let mut index = Self::new(columns);
        for block in blocks {
            index.register(&block.position);
        }
        index
    }

    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Exclusive bottom edge of all registered rectangles (0 when empty).
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.bottom
    }

    /// Number of taken cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.cells.contains(&(x, y))
    }

    /// Mark every cell of `pos` as taken.
    pub fn register(&mut self, pos: &Position) {
        self.cells.extend(pos.cells());
        self.bottom = self.bottom.max(pos.bottom());
    }

    /// Whether `pos` is inside the grid and touches no taken cell.
    #[must_use]
    pub fn can_place_at(&self, pos: &Position) -> bool {
        if pos.w == 0 || pos.h == 0 || pos.right() > self.columns {
            return false;
        }
        // Nothing is registered at or below `bottom`.
        if pos.y >= self.bottom {
            return true;
        }
        !pos.cells().any(|cell| self.cells.contains(&cell))
    }

    /// First free row at or below `pos.y`, keeping the column.
    ///
    /// Terminates by invariant 1: the row at `bottom()` is always free.
    #[must_use]
    pub fn push_down(&self, pos: Position) -> Position {
        let floor = pos.y.max(self.bottom);
        (pos.y..floor)
            .map(|y| pos.at(pos.x, y))
            .find(|candidate| self.can_place_at(candidate))
            .unwrap_or_else(|| pos.at(pos.x, floor))
    }

    /// Move `pos` up one row at a time while the row above is free.
    ///
    /// Rows at or below `bottom()` are free, so a position starting below it
    /// jumps straight there first.
    #[must_use]
    pub fn rise(&self, mut pos: Position) -> Position {
        if pos.y > self.bottom && self.can_place_at(&pos) {
            pos = pos.at(pos.x, self.bottom);
        }
        while pos.y > 0 {
            let above = pos.at(pos.x, pos.y - 1);
            if !self.can_place_at(&above) {
                break;
            }
            pos = above;
        }
        pos
    }
}
