#![forbid(unsafe_code)]

//! Core: geometry, blocks, and grid parameters for dashgrid.
//!
//! # Role in dashgrid
//! `dashgrid-core` holds the plain values that every caller exchanges with
//! the placement engine: [`Position`], [`Size`], [`Block`], and
//! [`GridParameters`], plus the error taxonomy and the validation boundary.
//!
//! # How it fits in the system
//! `dashgrid-layout` builds the placement engine on these types. Rendering
//! and persistence layers only ever see these values, so the serde field
//! names here (`x`, `y`, `w`, `h`, `id`, `locked`) are the canonical record
//! shape.

pub mod block;
pub mod error;
pub mod geometry;
pub mod params;

pub use block::{Block, find_block, validate_blocks};
pub use error::{GeometryError, GridError, Result};
pub use geometry::{Position, Size};
pub use params::{DEFAULT_COLUMNS, DEFAULT_MAX_SCAN_ROWS, GridParameters};
