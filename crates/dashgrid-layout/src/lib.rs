#![forbid(unsafe_code)]

//! Placement engine for column-based dashboard grids.
//!
//! [`GridPlacementEngine`] answers three questions about a layout of
//! rectangular [`Block`]s on a fixed number of columns:
//!
//! - where a new block of a given size should go
//!   ([`find_best_position`](GridPlacementEngine::find_best_position)),
//! - how to remove vertical gaps and overlaps
//!   ([`optimize_layout`](GridPlacementEngine::optimize_layout)),
//! - how to carry a layout across a column-count change
//!   ([`adapt_layout_for_columns`](GridPlacementEngine::adapt_layout_for_columns)).
//!
//! On top of those it resolves drag conflicts, applies [`LayoutUpdate`]
//! edits, reports [`LayoutStats`], audits layouts, and maps viewport widths
//! to column counts through [`Breakpoints`].
//!
//! # Invariants
//!
//! 1. Every layout the engine returns is overlap-free and inside
//!    `[0, columns)` horizontally.
//! 2. Locked blocks are never moved.
//! 3. Operations are pure: input slices are never modified and output order
//!    matches input order.
//!
//! # Failure Modes
//!
//! Malformed input (empty or duplicate ids, zero extents, blocks wider than
//! the grid) is rejected with a [`GridError`] before any placement work.
//! When no free slot exists within the scan window, placement falls back to
//! the first row below all existing blocks.

pub mod audit;
mod compact;
pub mod conflicts;
pub mod edit;
pub mod engine;
pub mod occupancy;
pub mod rescale;
pub mod responsive;
pub mod stats;

pub use dashgrid_core::{
    Block, GeometryError, GridError, GridParameters, Position, Result, Size, find_block,
    validate_blocks,
};

pub use audit::{LayoutReport, Overlap, check_layout};
pub use edit::{LayoutUpdate, Origin};
pub use engine::{GridPlacementEngine, Reflow};
pub use occupancy::OccupancyIndex;
pub use rescale::scale_position;
pub use responsive::{Breakpoint, Breakpoints, Responsive};
pub use stats::LayoutStats;
