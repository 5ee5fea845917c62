#![forbid(unsafe_code)]

//! Settling passes shared by compaction, conflict resolution, and rescale.
//!
//! A pass walks movable blocks in priority order and gives each one its
//! final position before the next is considered:
//!
//! 1. The origin is clamped into the grid (`x <= columns - w`).
//! 2. If the cells are already taken, the block is pushed down in its own
//!    column to the first free row.
//! 3. Under [`Gravity::Rise`] the block then floats up while the row above
//!    is free.
//! 4. Its cells are registered as taken.
//!
//! Because a block only ever stops under an obstacle that sorts before it,
//! running a rise pass over its own output changes nothing.

use dashgrid_core::{Block, Position};
use tracing::trace;

use crate::occupancy::OccupancyIndex;

/// Whether settled blocks float up to close vertical gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gravity {
    /// Close gaps (compact mode).
    Rise,
    /// Only resolve overlaps by pushing down (float mode).
    Hold,
}

/// Clamp `pos` horizontally into a grid of `columns` columns.
///
/// Assumes `pos.w <= columns`.
#[inline]
pub(crate) fn clamp_into(pos: Position, columns: u32) -> Position {
    pos.at(pos.x.min(columns.saturating_sub(pos.w)), pos.y)
}

/// Indices of `blocks` ordered by `(y, x)`, ties kept in input order.
pub(crate) fn priority_order(blocks: &[Block]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by_key(|&i| (blocks[i].position.y, blocks[i].position.x));
    order
}

/// Settle `blocks[i]` for every `i` in `order`, around what `occupied`
/// already holds.
pub(crate) fn settle(
    blocks: &mut [Block],
    order: &[usize],
    occupied: &mut OccupancyIndex,
    gravity: Gravity,
) {
    for &i in order {
        let start = clamp_into(blocks[i].position, occupied.columns());
        let pushed = occupied.push_down(start);
        let placed = match gravity {
            Gravity::Rise => occupied.rise(pushed),
            Gravity::Hold => pushed,
        };
        trace!(
            id = %blocks[i].id,
            from_x = blocks[i].position.x,
            from_y = blocks[i].position.y,
            x = placed.x,
            y = placed.y,
            "settled block"
        );
        occupied.register(&placed);
        blocks[i].position = placed;
    }
}

/// Settle every unlocked block with `gravity` in `(y, x)` order around
/// `occupied`, which must already hold the locked blocks.
pub(crate) fn settle_unlocked(
    mut blocks: Vec<Block>,
    mut occupied: OccupancyIndex,
    gravity: Gravity,
) -> Vec<Block> {
    let movable: Vec<usize> = priority_order(&blocks)
        .into_iter()
        .filter(|&i| !blocks[i].locked)
        .collect();
    settle(&mut blocks, &movable, &mut occupied, gravity);
    blocks
}

/// Compact `blocks` on a grid of `columns` columns.
///
/// Locked blocks are registered first and never move; every unlocked block
/// is settled with [`Gravity::Rise`] in `(y, x)` order. The result keeps the
/// input order.
pub(crate) fn compact(blocks: Vec<Block>, columns: u32) -> Vec<Block> {
    let occupied = OccupancyIndex::from_blocks(columns, blocks.iter().filter(|b| b.locked));
    settle_unlocked(blocks, occupied, Gravity::Rise)
}

/// Compact a freshly rescaled layout.
///
/// Rounding can make two locked blocks collide, so locked blocks are seated
/// first: in `(y, x)` order each keeps its column and is pushed below the
/// locked blocks seated before it, without rising. Unlocked blocks are then
/// compacted around them.
pub(crate) fn compact_rescaled(mut blocks: Vec<Block>, columns: u32) -> Vec<Block> {
    let locked: Vec<usize> = priority_order(&blocks)
        .into_iter()
        .filter(|&i| blocks[i].locked)
        .collect();
    let mut occupied = OccupancyIndex::new(columns);
    settle(&mut blocks, &locked, &mut occupied, Gravity::Hold);
    settle_unlocked(blocks, occupied, Gravity::Rise)
}

/// Clamp unlocked blocks into bounds without moving anything else.
pub(crate) fn clamp_all(mut blocks: Vec<Block>, columns: u32) -> Vec<Block> {
    for block in blocks.iter_mut().filter(|b| !b.locked) {
        block.position = clamp_into(block.position, columns);
    }
    blocks
}
