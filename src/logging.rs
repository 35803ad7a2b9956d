//! File logging setup
//!
//! The library itself only emits `tracing` events. Hosts that want the
//! classroom log on disk call [`init_file_logging`] once at startup.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use crate::error::{ExamError, Result};

/// Install a global subscriber that appends to `path`
///
/// The filter is read from `RUST_LOG`, with `examcore=info` added. Missing
/// parent directories are created. Fails with [`ExamError::LoggingError`]
/// if a global subscriber is already installed.
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let directive = "examcore=info"
        .parse::<Directive>()
        .map_err(|e| ExamError::LoggingError(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| ExamError::LoggingError(e.to_string()))?;

    tracing::info!("Logging to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_file_logging_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("latest.log");

        init_file_logging(&path).unwrap();
        assert!(path.exists());

        let again = init_file_logging(&path);
        assert!(matches!(again, Err(ExamError::LoggingError(_))));
    }
}
