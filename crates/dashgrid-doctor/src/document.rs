//! JSON layout documents: grid parameters, optional responsive tables, and
//! the block list.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Read};
use std::path::Path;

use dashgrid_core::{Block, GridParameters};
use dashgrid_layout::{Breakpoint, Breakpoints, GridPlacementEngine, Responsive};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DoctorError, Result};

/// A persisted dashboard layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutDocument {
    #[serde(default)]
    pub grid: GridParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Breakpoints>,
    /// Column count per tier; tiers left out inherit from the next smaller
    /// one, and `xs` defaults to `grid.columns`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub columns_by_breakpoint: BTreeMap<Breakpoint, u32>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl LayoutDocument {
    /// Parse a document from a file path, or stdin when `path` is `-`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(|err| match err.kind() {
                ErrorKind::NotFound => DoctorError::MissingPath {
                    path: path.to_path_buf(),
                },
                _ => DoctorError::Io(err),
            })?
        };
        let document = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            columns = document.grid.columns(),
            blocks = document.blocks.len(),
            "layout document loaded"
        );
        Ok(document)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the engine this document describes.
    pub fn engine(&self) -> Result<GridPlacementEngine> {
        let columns = Responsive::columns(
            self.grid.columns(),
            self.columns_by_breakpoint.iter().map(|(&bp, &c)| (bp, c)),
        )?;
        let engine = GridPlacementEngine::new(self.grid)?
            .with_breakpoints(self.breakpoints.unwrap_or_default())
            .with_responsive_columns(columns)?;
        Ok(engine)
    }
}
