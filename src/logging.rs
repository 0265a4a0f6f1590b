//! Tracing setup.
//!
//! The TUI owns the terminal, so log output only ever goes to a file.

use directories::ProjectDirs;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Maps `-v` count to a level: 0=warn, 1=info, 2=debug, 3+=trace
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Log file used when `-v` is given without `--log-file`.
///
/// The platform state dir where there is one (`~/.local/state/typespeed` on
/// Linux), the local data dir elsewhere.
pub fn default_log_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "typespeed")?;
    let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Some(dir.join("typespeed.log"))
}

/// Install a file-backed subscriber. `RUST_LOG` overrides the level.
pub fn init_logging(verbosity: u8, log_file: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("typespeed={}", level_for(verbosity))));

    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_file(verbosity >= 2)
                .with_line_number(verbosity >= 2),
        )
        .try_init()
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_mapping() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(3), "trace");
        assert_eq!(level_for(200), "trace");
    }

    #[test]
    fn default_log_path_names_the_app() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("typespeed.log"));
            assert!(path
                .parent()
                .is_some_and(|dir| dir.to_string_lossy().contains("typespeed")));
        }
    }

    // The global subscriber can be installed once per process; this is the only test that does it.
    #[test]
    fn init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("typespeed.log");

        init_logging(1, &path).unwrap();
        tracing::info!("hello from test");

        assert!(path.exists());
        assert!(matches!(
            init_logging(1, &path),
            Err(Error::Logging { .. })
        ));
    }
}
