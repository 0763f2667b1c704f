//! Normalizer — turns tab-delimited performance logs into comma-delimited text.
//!
//! Double tabs are replaced before single tabs: in these logs a double tab is
//! a single field boundary, and replacing single tabs first would split it
//! into an empty field.

use crate::error::{PerfError, Result};

/// Replace `"\t\t"` and then `"\t"` with `","`. Line structure is unchanged.
pub fn normalize(text: &str) -> String {
    text.replace("\t\t", ",").replace('\t', ",")
}

/// Decode `bytes` as UTF-8 and [`normalize`] it.
pub fn normalize_bytes(bytes: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(bytes).map_err(|e| PerfError::Encoding {
        offset: e.valid_up_to(),
    })?;
    Ok(normalize(text))
}

/// One non-blank row of normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// 1-based line number in the normalized text.
    pub line: usize,
    pub fields: Vec<String>,
}

impl NormalizedRecord {
    pub fn width(&self) -> usize {
        self.fields.len()
    }
}

/// Read normalized text as CSV records, skipping blank lines.
///
/// Widths are not checked here; rows may be ragged.
pub fn records(normalized: &str) -> Result<Vec<NormalizedRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(normalized.as_bytes());

    let mut out = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| PerfError::Schema {
            line: e.position().map_or(0, |p| p.line() as usize),
            reason: e.to_string(),
        })?;
        if record.len() <= 1 && record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        out.push(NormalizedRecord {
            line: record.position().map_or(0, |p| p.line() as usize),
            fields: record.iter().map(str::to_string).collect(),
        });
    }
    Ok(out)
}
