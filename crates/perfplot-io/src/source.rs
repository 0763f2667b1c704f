//! Log file source.
//!
//! Files are read whole; the handle is dropped before any parsing starts,
//! so a parse failure never leaves a file open.

use perfplot_core::error::{PerfError, Result};
use perfplot_core::normalizer;
use std::io::Read;
use std::path::Path;

/// Read a log file and return its normalized (comma-delimited) text.
///
/// Non-UTF-8 content fails with [`PerfError::Encoding`].
pub fn read_normalized(path: &Path) -> Result<String> {
    normalizer::normalize_bytes(&read_bytes(path)?)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let mut file = std::fs::File::open(path).map_err(|e| PerfError::io(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| PerfError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read log");
    Ok(bytes)
}

/// Persist normalized text, creating parent directories as needed.
pub fn write_normalized(path: &Path, normalized: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PerfError::io(parent, e))?;
    }
    std::fs::write(path, normalized).map_err(|e| PerfError::io(path, e))?;
    tracing::info!(path = %path.display(), "wrote normalized log");
    Ok(())
}
