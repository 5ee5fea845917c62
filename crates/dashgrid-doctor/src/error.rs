use std::path::PathBuf;

use dashgrid_core::GridError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DoctorError>;

#[derive(Debug, Error)]
pub enum DoctorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("input file does not exist: {path}")]
    MissingPath { path: PathBuf },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("layout check failed: {violations} violation(s)")]
    CheckFailed { violations: usize },
}

impl DoctorError {
    /// Process exit code: 2 for rejected input, 3 for a failed layout check,
    /// 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Grid(_) | Self::Json(_) | Self::InvalidArgument { .. } => 2,
            Self::CheckFailed { .. } => 3,
            Self::Io(_) | Self::MissingPath { .. } => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DoctorError;
    use dashgrid_core::GridError;

    #[test]
    fn grid_errors_are_input_errors() {
        let error = DoctorError::from(GridError::UnknownBlock { id: "a".into() });
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "grid error: unknown block id: a");
    }

    #[test]
    fn failed_check_has_its_own_exit_code() {
        let error = DoctorError::CheckFailed { violations: 2 };
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn invalid_constructor_wraps_message() {
        let error = DoctorError::invalid("bad width");
        assert_eq!(error.to_string(), "invalid argument: bad width");
        assert_eq!(error.exit_code(), 2);
    }
}
