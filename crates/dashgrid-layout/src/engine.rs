#![forbid(unsafe_code)]

//! The grid placement engine.
//!
//! [`GridPlacementEngine`] owns a validated [`GridParameters`] value and
//! exposes pure placement operations. Every call receives the authoritative
//! block list from the caller, rebuilds an [`OccupancyIndex`] from it, and
//! returns new position data. Nothing is cached between calls.
//!
//! # Invariants
//!
//! 1. Every position the engine returns satisfies `x + w <= columns`.
//! 2. Compaction never moves locked blocks and never changes `w`/`h`. A
//!    rescale may push a locked block down, and only when rounding made it
//!    collide with another locked block.
//! 3. Compaction output contains no overlapping pair except pairs of locked
//!    blocks the caller supplied overlapping.
//! 4. Compaction is a fixed point: compacting its own output is a no-op.
//! 5. Results are deterministic for identical inputs.
//!
//! # Failure Modes
//!
//! - Malformed blocks (empty/duplicate ids, zero extents, wider than the
//!   grid, locked past the right edge) are rejected with [`GridError`]
//!   before any placement runs.
//! - No free slot within `max_scan_rows` rows is not an error: placement
//!   falls back to the first row below all existing blocks.

use dashgrid_core::{Block, GridError, GridParameters, Position, Result, Size, validate_blocks};
use tracing::{debug, debug_span, trace, warn};

use crate::audit::{LayoutReport, check_layout};
use crate::compact::{clamp_all, compact, compact_rescaled};
use crate::occupancy::OccupancyIndex;
use crate::rescale::scale_position;
use crate::responsive::{Breakpoint, Breakpoints, Responsive};
use crate::stats::LayoutStats;

/// Outcome of [`GridPlacementEngine::reflow_to_width`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflow {
    pub breakpoint: Breakpoint,
    pub previous_columns: u32,
    pub columns: u32,
    pub blocks: Vec<Block>,
}

impl Reflow {
    /// Whether the column count changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous_columns != self.columns
    }
}

/// Pure placement engine for one grid instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPlacementEngine {
    params: GridParameters,
    breakpoints: Breakpoints,
    columns_by_tier: Responsive<u32>,
}

// ---------------------------------------------------------------------------
// Construction and configuration
// ---------------------------------------------------------------------------

impl GridPlacementEngine {
    /// Build an engine from validated parameters.
    ///
    /// The responsive column table starts with `params.columns()` at every
    /// tier.
    pub fn new(params: GridParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            breakpoints: Breakpoints::DEFAULT,
            columns_by_tier: Responsive::new(params.columns()),
        })
    }

    /// Override the breakpoint thresholds (builder pattern).
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Set the per-tier column counts (builder pattern).
    pub fn with_responsive_columns(mut self, columns: Responsive<u32>) -> Result<Self> {
        columns.validate_columns()?;
        self.columns_by_tier = columns;
        Ok(self)
    }

    #[must_use]
    pub const fn parameters(&self) -> &GridParameters {
        &self.params
    }

    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.params.columns()
    }

    #[must_use]
    pub const fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    #[must_use]
    pub const fn responsive_columns(&self) -> &Responsive<u32> {
        &self.columns_by_tier
    }

    /// Replace the parameters wholesale, returning the previous value.
    ///
    /// The block layout is not touched; callers that change the column count
    /// should reflow with [`adapt_layout_for_columns`](Self::adapt_layout_for_columns).
    pub fn replace_parameters(&mut self, params: GridParameters) -> Result<GridParameters> {
        params.validate()?;
        debug!(
            old_columns = self.params.columns(),
            new_columns = params.columns(),
            "grid parameters replaced"
        );
        Ok(std::mem::replace(&mut self.params, params))
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

impl GridPlacementEngine {
    /// First free slot for a block of `size`, scanning rows top-down and
    /// columns left to right.
    ///
    /// Returns the lexicographically smallest `(y, x)` free placement within
    /// the first `max_scan_rows` rows. If none exists the block goes to
    /// `x = 0` on the first row below every existing block.
    ///
    /// A `size` wider than the grid is rejected, never clamped.
    pub fn find_best_position(&self, size: Size, existing: &[Block]) -> Result<Position> {
        let columns = self.columns();
        let _span = debug_span!(
            "dashgrid.find_best_position",
            columns,
            w = size.w,
            h = size.h,
            existing = existing.len()
        )
        .entered();

        size.validate(columns)?;
        validate_blocks(existing, columns)?;

        let occupied = OccupancyIndex::from_blocks(columns, existing);
        let position = first_fit(&occupied, size, self.params.max_scan_rows()).unwrap_or_else(|| {
            let fallback = Position::from_size(0, occupied.bottom(), size);
            warn!(
                max_scan_rows = self.params.max_scan_rows(),
                y = fallback.y,
                "no slot within scan depth; appending below existing blocks"
            );
            fallback
        });
        trace!(x = position.x, y = position.y, "placed");
        Ok(position)
    }

    /// Whether `candidate` is inside the grid and overlaps no block in
    /// `existing`.
    #[must_use]
    pub fn is_position_available(&self, candidate: &Position, existing: &[Block]) -> bool {
        candidate.fits_columns(self.columns())
            && existing
                .iter()
                .all(|block| !candidate.collides(&block.position))
    }

    /// Like [`is_position_available`](Self::is_position_available), ignoring
    /// the block with id `ignore` (the block being moved).
    #[must_use]
    pub fn is_position_available_excluding(
        &self,
        candidate: &Position,
        existing: &[Block],
        ignore: &str,
    ) -> bool {
        candidate.fits_columns(self.columns())
            && existing
                .iter()
                .filter(|block| block.id != ignore)
                .all(|block| !candidate.collides(&block.position))
    }
}

/// Row-major first-fit scan over rows `0..max_rows`.
fn first_fit(occupied: &OccupancyIndex, size: Size, max_rows: u32) -> Option<Position> {
    let last_x = occupied.columns().checked_sub(size.w)?;
    (0..max_rows)
        .flat_map(|y| (0..=last_x).map(move |x| Position::from_size(x, y, size)))
        .find(|candidate| occupied.can_place_at(candidate))
}

// ---------------------------------------------------------------------------
// Layout passes
// ---------------------------------------------------------------------------

impl GridPlacementEngine {
    /// Compact (or, in float mode, clamp) a full layout.
    ///
    /// Float mode clamps unlocked blocks into bounds and moves nothing else.
    /// Compact mode processes blocks by `(y, x)`: locked blocks stay put as
    /// obstacles, and each unlocked block keeps its column and floats up
    /// until the row above is taken, after being pushed below anything it
    /// overlaps. The output keeps the input order.
    pub fn optimize_layout(&self, blocks: &[Block]) -> Result<Vec<Block>> {
        let columns = self.columns();
        let float = self.params.float();
        let _span = debug_span!(
            "dashgrid.optimize_layout",
            columns,
            blocks = blocks.len(),
            float
        )
        .entered();

        validate_blocks(blocks, columns)?;
        if float {
            return Ok(clamp_all(blocks.to_vec(), columns));
        }
        Ok(compact(blocks.to_vec(), columns))
    }

    /// Rescale a layout from `old_columns` to `new_columns`.
    ///
    /// Every block's `x` and `w` are scaled proportionally (see
    /// [`scale_position`]), then the result is compacted on the new grid to
    /// resolve overlaps introduced by rounding. Compaction runs regardless of
    /// float mode.
    ///
    /// Locked blocks keep their rows unless rounding makes them collide: in
    /// `(y, x)` order each one is pushed below the locked blocks before it.
    pub fn adapt_layout_for_columns(
        &self,
        blocks: &[Block],
        old_columns: u32,
        new_columns: u32,
    ) -> Result<Vec<Block>> {
        let _span = debug_span!(
            "dashgrid.adapt_layout_for_columns",
            old_columns,
            new_columns,
            blocks = blocks.len()
        )
        .entered();

        if old_columns < 1 || new_columns < 1 {
            return Err(GridError::invalid_parameters(format!(
                "column counts must be at least 1 (got {old_columns} -> {new_columns})"
            )));
        }
        // Widths are clamped by the rescale, so only reject zero extents here.
        for block in blocks {
            block.size().validate(u32::MAX)?;
        }

        let scaled: Vec<Block> = blocks
            .iter()
            .map(|block| {
                block.with_position(scale_position(block.position, old_columns, new_columns))
            })
            .collect();
        // Scaled widths never exceed `new_columns`, so this only checks ids.
        validate_blocks(&scaled, new_columns)?;
        Ok(compact_rescaled(scaled, new_columns))
    }

    /// Aggregate diagnostics for a layout.
    #[must_use]
    pub fn layout_stats(&self, blocks: &[Block]) -> LayoutStats {
        LayoutStats::compute(blocks, self.columns())
    }

    /// Report bounds violations and overlapping pairs.
    #[must_use]
    pub fn check_layout(&self, blocks: &[Block]) -> LayoutReport {
        check_layout(blocks, self.columns())
    }
}

// ---------------------------------------------------------------------------
// Responsive
// ---------------------------------------------------------------------------

impl GridPlacementEngine {
    /// Column count for a container `width` in pixels.
    ///
    /// Without the `responsive` flag this is always the configured column
    /// count.
    #[must_use]
    pub fn columns_for_width(&self, width: u32) -> u32 {
        if !self.params.responsive() {
            return self.columns();
        }
        *self.columns_by_tier.resolve(self.breakpoints.classify(width))
    }

    /// React to a container width change.
    ///
    /// When the width maps to a different column count, the layout is
    /// adapted and the engine's parameters are replaced with the new column
    /// count. Otherwise the blocks come back unchanged.
    pub fn reflow_to_width(&mut self, blocks: &[Block], width: u32) -> Result<Reflow> {
        let breakpoint = self.breakpoints.classify(width);
        let previous_columns = self.columns();
        let columns = self.columns_for_width(width);
        if columns == previous_columns {
            return Ok(Reflow {
                breakpoint,
                previous_columns,
                columns,
                blocks: blocks.to_vec(),
            });
        }

        let adapted = self.adapt_layout_for_columns(blocks, previous_columns, columns)?;
        self.replace_parameters(self.params.with_columns(columns))?;
        debug!(%breakpoint, previous_columns, columns, "reflowed for width {width}");
        Ok(Reflow {
            breakpoint,
            previous_columns,
            columns,
            blocks: adapted,
        })
    }
}
