//! Tracing subscriber setup
//!
//! Logs go to a file: while a line is being edited the terminal is in raw
//! mode and anything written to stderr would land in the middle of the line.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default log location, `<cache dir>/rill/rill.log`
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("rill").join("rill.log"))
}

/// Initialize the global tracing subscriber writing to `log_file_path`.
///
/// Returns false if the file could not be created; logging is then off.
pub fn init_global(log_file_path: &Path) -> bool {
    if let Some(parent) = log_file_path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(log_file) = File::create(log_file_path) else {
        return false;
    };

    build_subscriber(log_file).try_init().is_ok()
}

/// Build a subscriber with file logging filtered by `RUST_LOG` (default `info`).
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_warnings_reach_the_log_file() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log_file.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(bytes = "27 91 90", "unrecognized escape sequence");
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(contents.contains("WARN"));
        assert!(contents.contains("unrecognized escape sequence"));
        assert!(contents.contains("27 91 90"));
    }

    #[test]
    fn test_debug_is_filtered_by_default() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log_file.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("edit session started");
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(contents.is_empty());
        }
    }

    #[test]
    fn test_default_log_file_is_under_rill() {
        if let Some(path) = default_log_file() {
            assert!(path.ends_with("rill/rill.log"));
        }
    }
}
