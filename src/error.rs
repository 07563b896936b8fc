//! Error types for configuration loading and startup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can stop the game before (or while) it runs.
///
/// The simulation itself never fails; everything here comes from the
/// outside world — config files or the terminal.
#[derive(Debug, Error)]
pub enum GameError {
    /// Config file could not be read.
    #[error("Failed to read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `GameConfig`.
    #[error("Parse error in config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Config parsed but describes an unplayable field.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Host I/O failure (terminal, rendering, scheduling).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
