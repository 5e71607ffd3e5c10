use std::io::Read;
use std::path::Path;

use crate::error::{ChartError, Result};

use super::model::LatencyRecord;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the records of one latency file, in file order.
///
/// Layout: no header, two positional columns `task_id,latency_ms`.  A
/// header-like first row is read as data, so it fails on `latency_ms`.
/// Blank lines are skipped; an empty file gives an empty vector.
pub fn load_latency_file(path: &Path) -> Result<Vec<LatencyRecord>> {
    let file = std::fs::File::open(path).map_err(|source| ChartError::Filesystem {
        path: path.to_path_buf(),
        source,
    })?;
    read_latency_records(file, path)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse `task_id,latency_ms` rows from any reader.  `path` only labels errors.
pub fn read_latency_records<R: Read>(input: R, path: &Path) -> Result<Vec<LatencyRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|source| ChartError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(row_no as u64 + 1);
        let parse_err = |reason: String| ChartError::Parse {
            path: path.to_path_buf(),
            line,
            reason,
        };

        if row.len() != 2 {
            return Err(parse_err(format!(
                "expected 2 fields (task_id,latency_ms), found {}",
                row.len()
            )));
        }

        let latency_ms = row[1]
            .parse::<f64>()
            .map_err(|_| parse_err(format!("latency_ms '{}' is not a number", &row[1])))?;

        records.push(LatencyRecord::new(&row[0], latency_ms));
    }

    log::debug!("{}: {} records", path.display(), records.len());
    Ok(records)
}
