//! Layout diagnostics.

use dashgrid_core::Block;
use serde::Serialize;

/// Aggregate figures for one layout snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutStats {
    pub total_blocks: usize,
    /// Sum of `w * h` over all blocks.
    pub occupied_cells: u64,
    /// Last occupied row (`max(y + h - 1)`), 0 for an empty layout.
    pub max_y: u32,
    /// `columns * (max_y + 1)`.
    pub total_cells: u64,
    /// `occupied_cells / total_cells`, 0 when there are no cells.
    pub utilization: f64,
    /// Mean block area, 0 for an empty layout.
    pub average_block_size: f64,
}

impl LayoutStats {
    /// Compute stats for `blocks` on a grid of `columns` columns.
    #[must_use]
    pub fn compute(blocks: &[Block], columns: u32) -> Self {
        let total_blocks = blocks.len();
        let occupied_cells: u64 = blocks.iter().map(|b| b.position.area()).sum();
        let max_y = blocks
            .iter()
            .map(|b| b.position.bottom().saturating_sub(1))
            .max()
            .unwrap_or(0);
        let total_cells = u64::from(columns) * (u64::from(max_y) + 1);
        let utilization = if total_cells == 0 {
            0.0
        } else {
            occupied_cells as f64 / total_cells as f64
        };
        let average_block_size = if total_blocks == 0 {
            0.0
        } else {
            occupied_cells as f64 / total_blocks as f64
        };
        Self {
            total_blocks,
            occupied_cells,
            max_y,
            total_cells,
            utilization,
            average_block_size,
        }
    }
}
