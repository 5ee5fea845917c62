use thiserror::Error;

pub type Result<T> = std::result::Result<T, GridError>;

/// Malformed block geometry, caught at the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("{field} must be non-negative (got {value})")]
    Negative { field: &'static str, value: i64 },

    #[error("{field} must be at least 1 (got {value})")]
    ZeroExtent { field: &'static str, value: i64 },

    #[error("{field} does not fit in a 32-bit cell coordinate (got {value})")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("block width {w} exceeds the grid's {columns} columns")]
    WiderThanGrid { w: u32, columns: u32 },

    #[error("locked block {id} ends at column {right}, past the grid's {columns} columns")]
    LockedOutsideGrid { id: String, right: u32, columns: u32 },
}

/// Errors returned by grid operations on malformed input.
///
/// Collisions and "no fit" are not errors: the engine resolves those
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    #[error("invalid grid parameters: {message}")]
    InvalidParameters { message: String },

    #[error("block at index {index} has an empty id")]
    EmptyBlockId { index: usize },

    #[error("duplicate block id: {id}")]
    DuplicateBlockId { id: String },

    #[error("unknown block id: {id}")]
    UnknownBlock { id: String },

    #[error("block {id} is locked")]
    LockedBlock { id: String },

    #[error("grid is static; block {id} cannot be moved or resized")]
    StaticGrid { id: String },
}

impl GridError {
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GeometryError, GridError};

    #[test]
    fn geometry_error_converts_into_grid_error() {
        let error: GridError = GeometryError::WiderThanGrid { w: 13, columns: 12 }.into();
        assert!(matches!(error, GridError::InvalidGeometry(_)));
        assert_eq!(
            error.to_string(),
            "invalid geometry: block width 13 exceeds the grid's 12 columns"
        );
    }

    #[test]
    fn locked_outside_grid_names_the_block() {
        let error: GridError = GeometryError::LockedOutsideGrid {
            id: "pin".into(),
            right: 14,
            columns: 12,
        }
        .into();
        assert_eq!(
            error.to_string(),
            "invalid geometry: locked block pin ends at column 14, past the grid's 12 columns"
        );
    }

    #[test]
    fn invalid_parameters_constructor_keeps_message() {
        let error = GridError::invalid_parameters("columns must be at least 1");
        assert_eq!(
            error.to_string(),
            "invalid grid parameters: columns must be at least 1"
        );
    }
}
