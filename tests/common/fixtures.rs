//! Static log corpora used across harnesses.
//!
//! Raw logs are tab-delimited the way the collector writes them: the header
//! separates `Date-Time` from the metrics with a double tab and every data
//! row ends with a trailing tab.

use std::path::{Path, PathBuf};

/// Three samples, deliberately out of order.
pub const LOG_WELL_FORMED: &str = "Date-Time\t\tMemory\tDisk\tCPU\n\
30/09/2020 10:10:00\t\t47 %\t14 %\t33 %\t\n\
30/09/2020 10:00:00\t\t45 %\t12 %\t30 %\t\n\
30/09/2020 10:05:00\t\t46 %\t13 %\t31 %\t\n";

/// Header and an identically wide data row: the index column is the row
/// number, so every metric column shifts onto the wrong field.
pub const LOG_EQUAL_WIDTH: &str =
    "idx\tDate-Time\tMemory\tDisk\n0\t2020-09-30 10:00:00\t45%\t12%\n";

/// Second row has an unparsable CPU value.
pub const LOG_BAD_METRIC: &str = "Date-Time\t\tMemory\tDisk\tCPU\n\
2020-09-30 10:00:00\t\t45%\t12%\t30%\t\n\
2020-09-30 10:01:00\t\t45%\t12%\tn/a%\t\n";

/// Second row has an unparsable timestamp.
pub const LOG_BAD_TIMESTAMP: &str = "Date-Time\t\tMemory\tDisk\tCPU\n\
2020-09-30 10:00:00\t\t45%\t12%\t30%\t\n\
not-a-date\t\t45%\t12%\t30%\t\n";

/// The CPU column is blank in every row and gets dropped. The row ends in
/// three tabs, which normalize to two empty trailing fields.
pub const LOG_MISSING_CPU: &str = "Date-Time\t\tMemory\tDisk\tCPU\n\
2020-09-30 10:00:00\t\t45%\t12%\t\t\t\n";

/// The CPU column holds only a space, which is a value, not a blank.
pub const LOG_SPACE_CPU: &str = "Date-Time\t\tMemory\tDisk\tCPU\n\
2020-09-30 10:00:00\t\t45%\t12%\t \t\n";

/// Month-first slash dates, out of order. `01/09/2020` is 9 January.
pub const LOG_US_DATES: &str = "Date-Time\t\tMemory\tDisk\tCPU\n\
09/30/2020 10:00:00\t\t45 %\t12 %\t30 %\t\n\
01/09/2020 10:00:00\t\t40 %\t10 %\t20 %\t\n";

pub const LOG_HEADER_ONLY: &str = "Date-Time\t\tMemory\tDisk\tCPU\n";

/// Generate `n` one-minute samples in descending time order.
pub fn log_with_rows(n: usize) -> String {
    let mut out = String::from("Date-Time\t\tMemory\tDisk\tCPU\n");
    for i in (0..n).rev() {
        out.push_str(&format!(
            "2020-09-30 {:02}:{:02}:00\t\t{} %\t{} %\t{} %\t\n",
            i / 60 % 24,
            i % 60,
            i % 100,
            (i * 3) % 100,
            (i * 7) % 100,
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Fixture file helpers
// ---------------------------------------------------------------------------

/// Write `contents` to `<dir>/cpu.csv` and return the path.
pub fn write_log(dir: &Path, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join("cpu.csv");
    std::fs::write(&path, contents).expect("write log fixture");
    path
}

/// File names (not paths) in `dir`, sorted.
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}
