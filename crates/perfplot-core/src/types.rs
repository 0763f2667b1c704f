//! Core types for perfplot-core.
//!
//! This module defines the data shared across the pipeline stages: the typed
//! [`TimeseriesRow`], the ordered [`Timeseries`] it lives in, the [`Metric`]
//! discriminant, and the [`HostIdentity`] metadata handed to renderers.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One resource-usage sample after coercion.
///
/// Percentages are not range-checked; whatever the log says is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeseriesRow {
    pub timestamp: NaiveDateTime,
    pub memory_pct: f64,
    pub disk_pct: f64,
    pub cpu_pct: f64,
}

impl TimeseriesRow {
    /// Value of a single metric in this row.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Memory => self.memory_pct,
            Metric::Disk => self.disk_pct,
            Metric::Cpu => self.cpu_pct,
        }
    }
}

/// The three metrics carried by every row, in log column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Metric {
    Memory,
    Disk,
    Cpu,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Memory, Metric::Disk, Metric::Cpu];

    /// Column label used in the rotated table and in exports.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Memory => "Memory",
            Metric::Disk => "Disk",
            Metric::Cpu => "CPU",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rows ordered ascending by timestamp.
///
/// The only way to build one is [`Timeseries::from_unsorted`], which sorts,
/// so every `Timeseries` a renderer sees is already in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timeseries {
    rows: Vec<TimeseriesRow>,
}

impl Timeseries {
    /// Sort `rows` by timestamp. The sort is stable, so samples sharing a
    /// timestamp keep their log order.
    pub fn from_unsorted(mut rows: Vec<TimeseriesRow>) -> Self {
        rows.sort_by_key(|row| row.timestamp);
        Self { rows }
    }

    pub fn rows(&self) -> &[TimeseriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(timestamp, value)` points for one metric, in series order.
    pub fn points(&self, metric: Metric) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.rows.iter().map(move |row| (row.timestamp, row.value(metric)))
    }
}

impl<'a> IntoIterator for &'a Timeseries {
    type Item = &'a TimeseriesRow;
    type IntoIter = std::slice::Iter<'a, TimeseriesRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

pub const UNKNOWN_HOSTNAME: &str = "Unable to get Hostname";
pub const UNKNOWN_HOST_IP: &str = "Unable to get Host IP";

/// Machine the log was rendered on, shown in chart titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostIdentity {
    pub hostname: String,
    pub ip: String,
}

impl HostIdentity {
    pub fn new(hostname: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ip: ip.into(),
        }
    }

    /// Placeholder identity used when the lookup fails.
    pub fn unresolved() -> Self {
        Self::new(UNKNOWN_HOSTNAME, UNKNOWN_HOST_IP)
    }
}
