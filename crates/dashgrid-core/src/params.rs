#![forbid(unsafe_code)]

//! Grid configuration.
//!
//! [`GridParameters`] is a plain value: it is built once, validated, handed to
//! the engine, and replaced wholesale when the configuration changes (for
//! example on a responsive breakpoint change). Nothing mutates it in place
//! behind the engine's back.
//!
//! Missing fields fall back to their defaults on deserialization, so a
//! persisted `{"columns": 24}` is a complete configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Column count used when none is configured.
pub const DEFAULT_COLUMNS: u32 = 12;

/// Rows scanned by first-fit placement before falling back to "append below".
pub const DEFAULT_MAX_SCAN_ROWS: u32 = 1000;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParameters {
    columns: u32,
    /// Presentational spacing; never used in collision math.
    gap: u32,
    responsive: bool,
    float: bool,
    static_grid: bool,
    max_scan_rows: u32,
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            gap: 0,
            responsive: false,
            float: false,
            static_grid: false,
            max_scan_rows: DEFAULT_MAX_SCAN_ROWS,
        }
    }
}

impl GridParameters {
    /// Default parameters with the given column count.
    pub fn new(columns: u32) -> Result<Self> {
        let params = Self::default().with_columns(columns);
        params.validate()?;
        Ok(params)
    }

    /// Set the column count.
    #[must_use]
    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = columns;
        self
    }

    /// Set the presentational gap.
    #[must_use]
    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Enable column lookup by container width.
    #[must_use]
    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Disable compaction (freeform boards).
    #[must_use]
    pub fn with_float(mut self, float: bool) -> Self {
        self.float = float;
        self
    }

    /// Reject move and resize edits.
    #[must_use]
    pub fn with_static_grid(mut self, static_grid: bool) -> Self {
        self.static_grid = static_grid;
        self
    }

    /// Set the vertical scan depth of first-fit placement.
    #[must_use]
    pub fn with_max_scan_rows(mut self, rows: u32) -> Self {
        self.max_scan_rows = rows;
        self
    }

    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    #[must_use]
    pub const fn gap(&self) -> u32 {
        self.gap
    }

    #[must_use]
    pub const fn responsive(&self) -> bool {
        self.responsive
    }

    #[must_use]
    pub const fn float(&self) -> bool {
        self.float
    }

    #[must_use]
    pub const fn static_grid(&self) -> bool {
        self.static_grid
    }

    #[must_use]
    pub const fn max_scan_rows(&self) -> u32 {
        self.max_scan_rows
    }

    /// Reject configurations that would corrupt every placement.
    pub fn validate(&self) -> Result<()> {
        if self.columns < 1 {
            return Err(GridError::invalid_parameters("columns must be at least 1"));
        }
        if self.max_scan_rows < 1 {
            return Err(GridError::invalid_parameters(
                "max_scan_rows must be at least 1",
            ));
        }
        Ok(())
    }
}
