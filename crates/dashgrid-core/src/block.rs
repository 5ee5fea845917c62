//! Caller-owned layout blocks and boundary validation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GridError, Result};
use crate::geometry::{Position, Size};

/// A widget rectangle placed on the grid.
///
/// The engine treats blocks as read-only input and returns updated copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// Caller-assigned id, unique within one grid.
    pub id: String,
    pub position: Position,
    /// Locked blocks are never moved by the engine and act as obstacles.
    #[serde(default)]
    pub locked: bool,
}

impl Block {
    /// Build an unlocked block.
    #[must_use]
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            locked: false,
        }
    }

    /// Mark the block as locked (builder pattern).
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Copy of this block at a different position.
    #[must_use]
    pub fn with_position(&self, position: Position) -> Self {
        Self {
            id: self.id.clone(),
            position,
            locked: self.locked,
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.position.size()
    }
}

/// Validate a caller-supplied block set before it reaches the engine.
///
/// Ids must be non-empty and unique, extents at least one cell, and no block
/// may be wider than the grid. Unlocked blocks may start out of bounds; the
/// engine clamps them. Locked blocks never move, so they must already fit.
pub fn validate_blocks(blocks: &[Block], columns: u32) -> Result<()> {
    let mut seen = BTreeSet::new();
    for (index, block) in blocks.iter().enumerate() {
        if block.id.is_empty() {
            return Err(GridError::EmptyBlockId { index });
        }
        if !seen.insert(block.id.as_str()) {
            return Err(GridError::DuplicateBlockId {
                id: block.id.clone(),
            });
        }
        block.size().validate(columns)?;
        if block.locked && !block.position.fits_columns(columns) {
            return Err(GeometryError::LockedOutsideGrid {
                id: block.id.clone(),
                right: block.position.right(),
                columns,
            }
            .into());
        }
    }
    Ok(())
}

/// Find a block by id.
pub fn find_block<'a>(blocks: &'a [Block], id: &str) -> Option<(usize, &'a Block)> {
    blocks.iter().enumerate().find(|(_, block)| block.id == id)
}
