//! Error types for perfplot-core.
//!
//! Every variant is fatal to the current run: the pipeline never emits
//! partial results and never calls the renderer after a failure.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for perfplot operations.
pub type Result<T> = std::result::Result<T, PerfError>;

/// Main error type for perfplot.
#[derive(Error, Debug)]
pub enum PerfError {
    // Input decoding
    #[error("Log input is not valid UTF-8 (first invalid byte at offset {offset})")]
    Encoding { offset: usize },

    // Table shape
    #[error("Schema error at line {line}: {reason}")]
    Schema { line: usize, reason: String },

    // Typed parsing
    #[error("Unparsable timestamp {value:?} at line {line}")]
    Parse { line: usize, value: String },

    #[error("Non-numeric {column} value {value:?} at line {line}")]
    NumericParse {
        line: usize,
        column: String,
        value: String,
    },

    // Filesystem
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid time format string {format:?}")]
    TimeFormat { format: String },

    // Consumers
    #[error("Renderer failed on {panel}: {reason}")]
    Render { panel: String, reason: String },

    #[error("Export failed: {0}")]
    Export(String),
}

impl PerfError {
    /// Wrap an [`std::io::Error`] with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PerfError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<csv::Error> for PerfError {
    fn from(err: csv::Error) -> Self {
        PerfError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for PerfError {
    fn from(err: serde_json::Error) -> Self {
        PerfError::Export(err.to_string())
    }
}
