#![forbid(unsafe_code)]

//! `dashgrid-doctor`: run placement-engine operations over JSON layout
//! documents from the command line.

pub mod cli;
pub mod document;
pub mod error;
pub mod logging;

pub use cli::run_from_env;
pub use document::LayoutDocument;
pub use error::{DoctorError, Result};
