//! Configuration types for perfplot.
//!
//! [`Config::load`] reads `~/.config/perfplot/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] layers
//! an explicit file instead. [`Config::defaults`] returns the same defaults
//! without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{PerfError, Result};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[output]
directory    = "."
extension    = "jpg"
stamp_format = "%d%b%Y_%H%M%S"

[render]
figure_width   = 25.0
figure_height  = 12.0
created_format = "%d %b %Y %H:%M:%S"
axis_format    = "%d %b %H:%M"
overlay        = false

[parse]
epoch_seconds = true
timestamp_formats = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub parse: ParseConfig,
}

/// `[output]` section: where artifacts go and how they are named.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// chrono format for the `<Label>_<stamp>` part of artifact names.
    #[serde(default = "default_stamp_format")]
    pub stamp_format: String,
}

fn default_directory() -> PathBuf { PathBuf::from(".") }
fn default_extension() -> String { "jpg".to_string() }
fn default_stamp_format() -> String { "%d%b%Y_%H%M%S".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            extension: default_extension(),
            stamp_format: default_stamp_format(),
        }
    }
}

/// `[render]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderSettings {
    /// Figure size in inches.
    #[serde(default = "default_figure_width")]
    pub figure_width: f64,
    #[serde(default = "default_figure_height")]
    pub figure_height: f64,
    /// Format of the "Created Date" shown in chart titles.
    #[serde(default = "default_created_format")]
    pub created_format: String,
    /// Format of x-axis tick labels.
    #[serde(default = "default_axis_format")]
    pub axis_format: String,
    /// Also plan the single-axes overlay of all three metrics.
    #[serde(default)]
    pub overlay: bool,
}

fn default_figure_width() -> f64 { 25.0 }
fn default_figure_height() -> f64 { 12.0 }
fn default_created_format() -> String { "%d %b %Y %H:%M:%S".to_string() }
fn default_axis_format() -> String { "%d %b %H:%M".to_string() }

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            figure_width: default_figure_width(),
            figure_height: default_figure_height(),
            created_format: default_created_format(),
            axis_format: default_axis_format(),
            overlay: false,
        }
    }
}

/// `[parse]` section: how the index column becomes a timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    /// chrono formats tried in order before the built-in fallbacks.
    #[serde(default = "default_timestamp_formats")]
    pub timestamp_formats: Vec<String>,
    /// Read all-digit index text as Unix epoch seconds.
    #[serde(default = "default_epoch_seconds")]
    pub epoch_seconds: bool,
}

fn default_timestamp_formats() -> Vec<String> {
    [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%d-%b-%Y %H:%M:%S",
        "%d %b %Y %H:%M:%S",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_epoch_seconds() -> bool { true }

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            timestamp_formats: default_timestamp_formats(),
            epoch_seconds: default_epoch_seconds(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/perfplot/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| PerfError::io(parent, e))?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())
                .map_err(|e| PerfError::io(&path, e))?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit TOML file on top of the built-in defaults. A missing
    /// file is an error here, unlike [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("perfplot")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
