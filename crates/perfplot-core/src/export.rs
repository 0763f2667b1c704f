//! Export — write a [`Timeseries`] out as CSV or JSON Lines.
//!
//! CSV uses the rotated column labels (`Date,Memory,Disk,CPU`); JSONL writes
//! one serialized [`TimeseriesRow`](crate::TimeseriesRow) per line.

use std::io::Write;
use std::path::Path;

use crate::error::{PerfError, Result};
use crate::types::{Metric, Timeseries};

const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Jsonl,
}

impl ExportFormat {
    /// Guess from a file extension; anything unrecognised is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("json") => {
                ExportFormat::Jsonl
            }
            _ => ExportFormat::Csv,
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" | "json" => Ok(ExportFormat::Jsonl),
            other => Err(format!("unknown export format {other:?} (expected csv or jsonl)")),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

pub fn write_csv<W: Write>(series: &Timeseries, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(
        std::iter::once("Date").chain(Metric::ALL.iter().map(|m| m.label())),
    )?;
    for row in series {
        writer.write_record([
            row.timestamp.format(CSV_DATE_FORMAT).to_string(),
            row.memory_pct.to_string(),
            row.disk_pct.to_string(),
            row.cpu_pct.to_string(),
        ])?;
    }
    writer.flush().map_err(|e| PerfError::Export(e.to_string()))?;
    Ok(())
}

pub fn write_jsonl<W: Write>(series: &Timeseries, mut writer: W) -> Result<()> {
    for row in series {
        serde_json::to_writer(&mut writer, row)?;
        writer
            .write_all(b"\n")
            .map_err(|e| PerfError::Export(e.to_string()))?;
    }
    writer.flush().map_err(|e| PerfError::Export(e.to_string()))?;
    Ok(())
}

/// Write `series` to `path` in `format`. The file handle is closed on every
/// return path.
pub fn export_to_path(series: &Timeseries, path: &Path, format: ExportFormat) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| PerfError::io(path, e))?;
    let writer = std::io::BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(series, writer),
        ExportFormat::Jsonl => write_jsonl(series, writer),
    }?;
    tracing::info!(path = %path.display(), %format, rows = series.len(), "exported timeseries");
    Ok(())
}
