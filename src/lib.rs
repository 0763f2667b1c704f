//! perfplot — turn CPU / Memory / Disk usage logs into typed timeseries.
//!
//! This crate re-exports the pipeline stages from `perfplot-core` and the
//! filesystem/host adapters from `perfplot-io` so that integration tests and
//! the binary import them from one place.
//!
//! # Architecture
//!
//! ```text
//! log file ──► normalizer ──► builder ──► coercer ──► renderer
//!   (io)                                      │
//!                                             └──► export
//! ```

pub use perfplot_core::{
    builder, coercer, config, error, export, normalizer, pipeline, render, timestamp, types,
};
pub use perfplot_core::{HostIdentity, Metric, PerfError, Result, Timeseries, TimeseriesRow};
pub use perfplot_io::{host, source};
