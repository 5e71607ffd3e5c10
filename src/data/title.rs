use super::discover::{LATENCY_FILE_PREFIX, LATENCY_FILE_SUFFIX};

/// Turn a latency file name into a readable title.
///
/// `latencies_service_a__us_east.csv` → `service a us east`.  Steps run in a
/// fixed order: drop the prefix, `__` → space, `_` → space, drop the suffix.
/// Text without the prefix or suffix passes through untouched, so applying
/// this to its own output is a no-op.
pub fn derive_title(file_name: &str) -> String {
    file_name
        .replace(LATENCY_FILE_PREFIX, "")
        .replace("__", " ")
        .replace('_', " ")
        .replace(LATENCY_FILE_SUFFIX, "")
}
