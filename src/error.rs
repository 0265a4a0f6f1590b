//! Error types for typespeed.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for typespeed operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from underlying system calls.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The word list file could not be read.
    #[error("error reading word file {}: {source}", path.display())]
    WordSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The word list contained no words.
    #[error("word list {name} is empty")]
    EmptyWordList { name: String },

    /// No embedded word list with this name.
    #[error("embedded word list not found: {0}")]
    MissingWordList(String),

    /// The session countdown was started while already armed.
    #[error("timer already running")]
    TimerAlreadyRunning,

    /// Logging subscriber could not be installed.
    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

/// Result type alias using the typespeed Error.
pub type Result<T> = std::result::Result<T, Error>;
