//! Timeseries Builder — normalized text → sorted [`Timeseries`].
//!
//! The log header is one name short of the data rows, so the leading field
//! of every data row acts as the table's row index. The builder reproduces
//! the column assignment that follows from that, positionally:
//!
//! ```text
//! frame position   0        1          2        3      4..
//! header label     index    Date-Time  Memory   Disk   CPU ..
//! rotated label    Date     Memory     Disk     CPU    (unchanged)
//! ```
//!
//! When the first data row is *not* one field wider than the header there is
//! no leading index field and the row sequence number (`"0"`, `"1"`, ...)
//! fills position 0 instead. Everything else shifts the same way. This is
//! the historical behaviour of these logs and is kept as is.

use tracing::{debug, warn};

use crate::coercer;
use crate::config::ParseConfig;
use crate::normalizer::{self, NormalizedRecord};
use crate::error::{PerfError, Result};
use crate::timestamp::parse_timestamp;
use crate::types::{Metric, Timeseries, TimeseriesRow};

/// Labels given to frame positions 0..=3.
pub const ROTATED_LABELS: [&str; 4] = ["Date", "Memory", "Disk", "CPU"];

const INDEX_LABEL: &str = "index";

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// One column of the rotated table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Position in the frame before empty columns were dropped.
    pub position: usize,
    pub label: String,
    pub cells: Vec<String>,
}

impl Column {
    /// Blank in every row. A cell holding only spaces is not blank.
    fn is_empty(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }
}

/// The parsed table after index resolution, rotation, and dropping
/// all-empty columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Line number of the header in the normalized text.
    pub header_line: usize,
    /// Source line of each data row.
    pub lines: Vec<usize>,
    pub columns: Vec<Column>,
    /// Whether position 0 came from a leading field in the data rows rather
    /// than from the row sequence number.
    pub leading_index: bool,
}

impl Frame {
    /// Read normalized text into a frame.
    ///
    /// Empty or header-only input produces a frame with no rows.
    pub fn parse(normalized: &str) -> Result<Self> {
        let mut records = normalizer::records(normalized)?.into_iter();
        let Some(header) = records.next() else {
            return Ok(Self {
                header_line: 0,
                lines: Vec::new(),
                columns: Vec::new(),
                leading_index: false,
            });
        };
        let rows: Vec<NormalizedRecord> = records.collect();
        let header_line = header.line;

        let leading_index = rows
            .first()
            .is_some_and(|row| row.width() == header.width() + 1);
        let data_width = header.width() + usize::from(leading_index);

        let mut columns: Vec<Column> = std::iter::once(INDEX_LABEL.to_string())
            .chain(header.fields)
            .enumerate()
            .map(|(position, original)| Column {
                position,
                label: ROTATED_LABELS
                    .get(position)
                    .map_or(original, |rotated| rotated.to_string()),
                cells: Vec::with_capacity(rows.len()),
            })
            .collect();

        let mut lines = Vec::with_capacity(rows.len());
        for (seq, NormalizedRecord { line, mut fields }) in rows.into_iter().enumerate() {
            if fields.len() > data_width {
                return Err(PerfError::Schema {
                    line,
                    reason: format!(
                        "expected at most {data_width} fields, saw {}",
                        fields.len()
                    ),
                });
            }
            fields.resize(data_width, String::new());

            let mut cells = fields.into_iter();
            let index = if leading_index {
                cells.next().unwrap_or_default()
            } else {
                seq.to_string()
            };
            for (column, cell) in columns.iter_mut().zip(std::iter::once(index).chain(cells)) {
                column.cells.push(cell);
            }
            lines.push(line);
        }

        if !lines.is_empty() {
            let before = columns.len();
            columns.retain(|column| {
                let keep = !column.is_empty();
                if !keep {
                    debug!(column = %column.label, position = column.position, "dropping empty column");
                }
                keep
            });
            debug!(
                rows = lines.len(),
                kept = columns.len(),
                dropped = before - columns.len(),
                leading_index,
                "parsed frame"
            );
        }

        Ok(Self {
            header_line,
            lines,
            columns,
            leading_index,
        })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Column that sits at `position` of the rotated frame, if it survived
    /// the empty-column drop.
    pub fn at_position(&self, position: usize) -> Option<&Column> {
        self.columns.iter().find(|c| c.position == position)
    }

    fn required(&self, position: usize) -> Result<&Column> {
        self.at_position(position).ok_or_else(|| PerfError::Schema {
            line: self.header_line,
            reason: format!(
                "{} column is missing or empty ({} usable columns: {:?})",
                ROTATED_LABELS[position],
                self.columns.len(),
                self.labels()
            ),
        })
    }

    /// Parse timestamps, coerce metrics, and sort.
    ///
    /// The first bad cell aborts the whole batch.
    pub fn into_timeseries(self, parse: &ParseConfig) -> Result<Timeseries> {
        if self.is_empty() {
            return Ok(Timeseries::default());
        }

        let date = self.required(0)?;
        let metric_columns = [self.required(1)?, self.required(2)?, self.required(3)?];

        let timestamps = date
            .cells
            .iter()
            .zip(&self.lines)
            .map(|(cell, &line)| {
                parse_timestamp(cell, parse).ok_or_else(|| PerfError::Parse {
                    line,
                    value: cell.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut values = Vec::with_capacity(Metric::ALL.len());
        for (metric, column) in Metric::ALL.into_iter().zip(metric_columns) {
            let cells = self.lines.iter().copied().zip(column.cells.iter().map(String::as_str));
            values.push(coercer::coerce_column(metric, cells)?);
        }

        let rows: Vec<TimeseriesRow> = timestamps
            .into_iter()
            .enumerate()
            .map(|(i, timestamp)| TimeseriesRow {
                timestamp,
                memory_pct: values[0][i],
                disk_pct: values[1][i],
                cpu_pct: values[2][i],
            })
            .collect();

        let out_of_range = rows
            .iter()
            .flat_map(|row| Metric::ALL.map(|m| row.value(m)))
            .filter(|v| !(0.0..=100.0).contains(v))
            .count();
        if out_of_range > 0 {
            warn!(out_of_range, "metric values outside 0..=100 kept as-is");
        }

        Ok(Timeseries::from_unsorted(rows))
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Build a sorted [`Timeseries`] from normalized text.
pub fn build_timeseries(normalized: &str, parse: &ParseConfig) -> Result<Timeseries> {
    let series = Frame::parse(normalized)?.into_timeseries(parse)?;
    debug!(rows = series.len(), "built timeseries");
    Ok(series)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
