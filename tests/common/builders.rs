//! Test builders — ergonomic constructors for rows, series, and timestamps.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{NaiveDate, NaiveDateTime};
use perfplot::{Timeseries, TimeseriesRow};

/// `2020-09-30 hh:mm:ss`.
pub fn sep30(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 9, 30)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// Fluent builder for [`TimeseriesRow`] fixtures.
///
/// ```rust
/// let row = RowBuilder::at(sep30(10, 0, 0)).memory(45.0).cpu(30.0).build();
/// ```
pub struct RowBuilder {
    row: TimeseriesRow,
}

impl RowBuilder {
    pub fn at(timestamp: NaiveDateTime) -> Self {
        Self {
            row: TimeseriesRow {
                timestamp,
                memory_pct: 0.0,
                disk_pct: 0.0,
                cpu_pct: 0.0,
            },
        }
    }

    pub fn memory(mut self, v: f64) -> Self {
        self.row.memory_pct = v;
        self
    }

    pub fn disk(mut self, v: f64) -> Self {
        self.row.disk_pct = v;
        self
    }

    pub fn cpu(mut self, v: f64) -> Self {
        self.row.cpu_pct = v;
        self
    }

    pub fn build(self) -> TimeseriesRow {
        self.row
    }
}

/// Shorthand for a fully specified row.
pub fn row(timestamp: NaiveDateTime, memory: f64, disk: f64, cpu: f64) -> TimeseriesRow {
    RowBuilder::at(timestamp)
        .memory(memory)
        .disk(disk)
        .cpu(cpu)
        .build()
}

/// The series [`LOG_WELL_FORMED`](super::LOG_WELL_FORMED) should produce.
pub fn well_formed_series() -> Timeseries {
    Timeseries::from_unsorted(vec![
        row(sep30(10, 0, 0), 45.0, 12.0, 30.0),
        row(sep30(10, 5, 0), 46.0, 13.0, 31.0),
        row(sep30(10, 10, 0), 47.0, 14.0, 33.0),
    ])
}
