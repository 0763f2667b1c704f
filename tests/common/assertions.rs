//! Domain-specific assertion macros for perfplot harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which pipeline invariant was violated.

/// Assert that a `Timeseries` is in ascending timestamp order.
#[macro_export]
macro_rules! assert_sorted {
    ($series:expr) => {{
        let series: &perfplot::Timeseries = &$series;
        for pair in series.rows().windows(2) {
            if pair[0].timestamp > pair[1].timestamp {
                panic!(
                    "assert_sorted! failed: {} comes after {}",
                    pair[0].timestamp, pair[1].timestamp
                );
            }
        }
    }};
}

/// Assert that a result is a specific `PerfError` variant.
///
/// ```rust
/// assert_perf_error!(result, PerfError::Schema { .. });
/// ```
#[macro_export]
macro_rules! assert_perf_error {
    ($result:expr, $pattern:pat) => {{
        match $result {
            Err(err @ $pattern) => err,
            Err(other) => panic!(
                "assert_perf_error! failed:\n  expected: {}\n  actual:   {:?}",
                stringify!($pattern),
                other
            ),
            Ok(value) => panic!(
                "assert_perf_error! failed: expected {}, got Ok({:?})",
                stringify!($pattern),
                value
            ),
        }
    }};
}

/// Assert a row's three metrics.
#[macro_export]
macro_rules! assert_metrics {
    ($row:expr, $memory:expr, $disk:expr, $cpu:expr) => {{
        let row: &perfplot::TimeseriesRow = &$row;
        pretty_assertions::assert_eq!(
            (row.memory_pct, row.disk_pct, row.cpu_pct),
            ($memory, $disk, $cpu),
            "metrics of row at {}",
            row.timestamp
        );
    }};
}
