//! Metric coercion: `"45 %"` → `45.0`.

use crate::error::{PerfError, Result};
use crate::types::Metric;

/// Strip surrounding whitespace and trailing `%` signs, then parse as `f64`.
///
/// Returns `None` when nothing numeric is left.
pub fn coerce_percent(text: &str) -> Option<f64> {
    let stripped = text.trim().trim_end_matches('%').trim_end();
    if stripped.is_empty() {
        return None;
    }
    stripped.parse::<f64>().ok()
}

/// Coerce one metric cell, reporting the column and line on failure.
pub fn coerce_cell(metric: Metric, line: usize, text: &str) -> Result<f64> {
    coerce_percent(text).ok_or_else(|| PerfError::NumericParse {
        line,
        column: metric.label().to_string(),
        value: text.to_string(),
    })
}

/// Coerce a whole column. The first bad cell aborts the column.
pub fn coerce_column<'a, I>(metric: Metric, cells: I) -> Result<Vec<f64>>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    cells
        .into_iter()
        .map(|(line, text)| coerce_cell(metric, line, text))
        .collect()
}
