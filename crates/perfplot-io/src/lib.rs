//! perfplot-io — filesystem and host adapters for perfplot.
//!
//! [`source`] reads and normalizes logs and optionally persists the result;
//! [`host`] looks up the hostname and IP shown in chart titles.

pub mod host;
pub mod source;

pub use host::resolve_host;
pub use source::{read_normalized, write_normalized};
