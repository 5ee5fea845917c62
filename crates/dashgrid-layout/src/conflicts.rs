//! Conflict resolution while a block is dragged or resized.
//!
//! The dragged block wins its requested cells. Everything else that is not
//! locked is re-settled around it in `(y, x)` order: blocks it lands on are
//! pushed below it, and in compact mode the rest of the layout then floats
//! up to close the gaps left behind.

use dashgrid_core::{Block, Result, find_block, validate_blocks};
use tracing::{debug, debug_span};

use crate::compact::{Gravity, clamp_into, priority_order, settle};
use crate::engine::GridPlacementEngine;
use crate::occupancy::OccupancyIndex;

impl GridPlacementEngine {
    /// Re-settle `blocks` around the block `dragged_id` at its current
    /// (requested) position.
    ///
    /// The dragged block is clamped into bounds and only moves if it landed
    /// on a locked block, in which case it is pushed below it. Locked blocks
    /// never move. An unknown or locked `dragged_id` degrades to
    /// [`optimize_layout`](Self::optimize_layout).
    pub fn resolve_conflicts(&self, blocks: &[Block], dragged_id: &str) -> Result<Vec<Block>> {
        let columns = self.columns();
        let float = self.parameters().float();
        let _span = debug_span!(
            "dashgrid.resolve_conflicts",
            columns,
            blocks = blocks.len(),
            dragged = dragged_id,
            float
        )
        .entered();

        validate_blocks(blocks, columns)?;
        let dragged = match find_block(blocks, dragged_id) {
            Some((index, block)) if !block.locked => index,
            Some(_) => {
                debug!("dragged block is locked; optimizing instead");
                return self.optimize_layout(blocks);
            }
            None => {
                debug!("dragged block not found; optimizing instead");
                return self.optimize_layout(blocks);
            }
        };

        let mut out = blocks.to_vec();
        let mut occupied = OccupancyIndex::from_blocks(columns, out.iter().filter(|b| b.locked));

        let requested = clamp_into(out[dragged].position, columns);
        out[dragged].position = occupied.push_down(requested);
        occupied.register(&out[dragged].position);

        let rest: Vec<usize> = priority_order(&out)
            .into_iter()
            .filter(|&i| i != dragged && !out[i].locked)
            .collect();
        let gravity = if float { Gravity::Hold } else { Gravity::Rise };
        settle(&mut out, &rest, &mut occupied, gravity);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use dashgrid_core::{GridParameters, Position};

    use super::*;

    fn engine(columns: u32, float: bool) -> GridPlacementEngine {
        let params = GridParameters::new(columns).unwrap().with_float(float);
        GridPlacementEngine::new(params).unwrap()
    }

    fn block(id: &str, x: u32, y: u32, w: u32, h: u32) -> Block {
        Block::new(id, Position::new(x, y, w, h))
    }

    fn position_of<'a>(blocks: &'a [Block], id: &str) -> &'a Position {
        &find_block(blocks, id).unwrap().1.position
    }

    #[test]
    fn dragged_block_pushes_covered_block_down() {
        // "drag" was moved onto "b".
        let blocks = vec![block("b", 0, 0, 4, 2), block("drag", 0, 1, 4, 2)];
        let out = engine(12, false).resolve_conflicts(&blocks, "drag").unwrap();
        assert_eq!(*position_of(&out, "drag"), Position::new(0, 1, 4, 2));
        assert_eq!(*position_of(&out, "b"), Position::new(0, 3, 4, 2));
    }

    #[test]
    fn compact_mode_closes_gap_above_dragged_block() {
        let blocks = vec![block("drag", 0, 4, 2, 1), block("c", 6, 7, 2, 1)];
        let out = engine(12, false).resolve_conflicts(&blocks, "drag").unwrap();
        // The dragged block keeps its requested row; others float up.
        assert_eq!(*position_of(&out, "drag"), Position::new(0, 4, 2, 1));
        assert_eq!(*position_of(&out, "c"), Position::new(6, 0, 2, 1));
    }

    #[test]
    fn float_mode_only_pushes_down() {
        let blocks = vec![
            block("b", 0, 0, 4, 2),
            block("c", 6, 7, 2, 1),
            block("drag", 0, 1, 4, 2),
        ];
        let out = engine(12, true).resolve_conflicts(&blocks, "drag").unwrap();
        assert_eq!(*position_of(&out, "b"), Position::new(0, 3, 4, 2));
        assert_eq!(*position_of(&out, "c"), Position::new(6, 7, 2, 1));
    }

    #[test]
    fn dragged_onto_locked_block_goes_below_it() {
        let blocks = vec![
            block("pin", 0, 0, 6, 2).locked(),
            block("drag", 2, 1, 2, 1),
        ];
        let out = engine(12, false).resolve_conflicts(&blocks, "drag").unwrap();
        assert_eq!(*position_of(&out, "pin"), Position::new(0, 0, 6, 2));
        assert_eq!(*position_of(&out, "drag"), Position::new(2, 2, 2, 1));
    }

    #[test]
    fn dragged_past_right_edge_is_clamped() {
        let blocks = vec![block("drag", 11, 0, 3, 1)];
        let out = engine(12, false).resolve_conflicts(&blocks, "drag").unwrap();
        assert_eq!(out[0].position, Position::new(9, 0, 3, 1));
    }

    #[test]
    fn unknown_dragged_id_optimizes() {
        let blocks = vec![block("a", 0, 3, 2, 1)];
        let out = engine(12, false).resolve_conflicts(&blocks, "ghost").unwrap();
        assert_eq!(out[0].position, Position::new(0, 0, 2, 1));
    }

    #[test]
    fn cascade_keeps_layout_overlap_free() {
        let blocks = vec![
            block("a", 0, 0, 6, 2),
            block("b", 0, 2, 6, 2),
            block("c", 6, 0, 6, 3),
            block("drag", 3, 1, 6, 2),
        ];
        let out = engine(12, false).resolve_conflicts(&blocks, "drag").unwrap();
        assert!(crate::audit::check_layout(&out, 12).is_clean());
        assert_eq!(*position_of(&out, "drag"), Position::new(3, 1, 6, 2));
    }
}
