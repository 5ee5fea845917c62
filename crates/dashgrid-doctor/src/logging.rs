use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{DoctorError, Result};

const DEFAULT_FILTER: &str = "warn";

/// Build the log filter: an explicit `--log-level` wins, then `RUST_LOG`,
/// then `warn`.
pub fn filter_for(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|err| DoctorError::invalid(format!("--log-level {directive:?}: {err}"))),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install the stderr subscriber. A second call is a no-op.
pub fn init(level: Option<&str>) -> Result<()> {
    let filter = filter_for(level)?;
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
    Ok(())
}
