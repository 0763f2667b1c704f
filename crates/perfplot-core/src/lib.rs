//! perfplot-core — resource-usage log pipeline.
//!
//! This crate exposes each pipeline stage as a public module, plus the shared
//! types used across them.
//!
//! # Architecture
//!
//! ```text
//! raw text ──► normalizer ──► builder ──► coercer ──► sort ──► render
//!                                                       │
//!                                                       └──► export
//! ```
//!
//! Everything is synchronous and single-threaded. The first failing stage
//! aborts the run.

pub mod builder;
pub mod coercer;
pub mod config;
pub mod error;
pub mod export;
pub mod normalizer;
pub mod pipeline;
pub mod render;
pub mod timestamp;
pub mod types;

pub use error::{PerfError, Result};
pub use types::{HostIdentity, Metric, Timeseries, TimeseriesRow};
