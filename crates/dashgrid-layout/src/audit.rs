//! Invariant audit for a layout snapshot.
//!
//! Used by hosts to sanity-check persisted or externally edited layouts
//! before handing them to the engine, and by the test suites to assert the
//! no-overlap and bounds invariants on engine output.

use dashgrid_core::Block;
use serde::Serialize;

/// Pair of block ids whose rectangles share a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlap {
    pub first: String,
    pub second: String,
}

/// Result of [`check_layout`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    /// Blocks whose right edge passes the last column.
    pub out_of_bounds: Vec<String>,
    pub overlaps: Vec<Overlap>,
}

impl LayoutReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.out_of_bounds.is_empty() && self.overlaps.is_empty()
    }
}

/// Report bounds violations and overlapping pairs, in input order.
#[must_use]
pub fn check_layout(blocks: &[Block], columns: u32) -> LayoutReport {
    let mut report = LayoutReport::default();
    for (i, block) in blocks.iter().enumerate() {
        if !block.position.fits_columns(columns) {
            report.out_of_bounds.push(block.id.clone());
        }
        for other in &blocks[i + 1..] {
            if block.position.collides(&other.position) {
                report.overlaps.push(Overlap {
                    first: block.id.clone(),
                    second: other.id.clone(),
                });
            }
        }
    }
    report
}
