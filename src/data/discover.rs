use std::path::Path;

use glob::Pattern;

use crate::error::{ChartError, Result};

use super::model::LatencyFile;

pub const LATENCY_FILE_PREFIX: &str = "latencies_";
pub const LATENCY_FILE_SUFFIX: &str = ".csv";

/// The `latencies_*.csv` file name pattern.
pub fn latency_file_pattern() -> Result<Pattern> {
    let pattern = format!(
        "{}*{}",
        Pattern::escape(LATENCY_FILE_PREFIX),
        Pattern::escape(LATENCY_FILE_SUFFIX)
    );
    Ok(Pattern::new(&pattern)?)
}

/// List the latency files directly inside `folder`, sorted by file name.
///
/// Only names are inspected.  A missing or unreadable folder is an error;
/// an empty result is not.
pub fn discover_latency_files(folder: &Path) -> Result<Vec<LatencyFile>> {
    let fs_err = |source: std::io::Error| ChartError::Filesystem {
        path: folder.to_path_buf(),
        source,
    };

    let pattern = latency_file_pattern()?;

    let mut names = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(fs_err)? {
        let entry = entry.map_err(fs_err)?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::debug!("skipping non UTF-8 entry {:?}", entry.file_name());
            continue;
        };
        if pattern.matches(&name) {
            names.push(name);
        }
    }
    names.sort();

    Ok(names
        .iter()
        .map(|name| LatencyFile::new(folder, name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "1,1.0\n").unwrap();
    }

    fn names(files: &[LatencyFile]) -> Vec<&str> {
        files.iter().map(|f| f.file_name.as_str()).collect()
    }

    #[test]
    fn finds_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "latencies_b.csv",
            "latencies_service_a__us_east.csv",
            "latencies_a.csv",
            "other_data.csv",
            "latencies_c.txt",
            "latency_d.csv",
            "notes.md",
        ] {
            touch(dir.path(), name);
        }

        let files = discover_latency_files(dir.path()).unwrap();
        assert_eq!(
            names(&files),
            vec!["latencies_a.csv", "latencies_b.csv", "latencies_service_a__us_east.csv"]
        );
        assert_eq!(files[2].title, "service a us east");
        assert_eq!(files[0].path, dir.path().join("latencies_a.csv"));
    }

    #[test]
    fn sorting_is_lexicographic_not_numeric() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["latencies_10.csv", "latencies_9.csv", "latencies_1.csv"] {
            touch(dir.path(), name);
        }
        let files = discover_latency_files(dir.path()).unwrap();
        assert_eq!(
            names(&files),
            vec!["latencies_1.csv", "latencies_10.csv", "latencies_9.csv"]
        );
    }

    #[test]
    fn empty_folder_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "other_data.csv");
        assert!(discover_latency_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_folder_is_a_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        match discover_latency_files(&missing) {
            Err(ChartError::Filesystem { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected filesystem error, got {other:?}"),
        }
    }

    #[test]
    fn matches_prefix_and_suffix_only() {
        let pattern = latency_file_pattern().unwrap();
        assert_eq!(pattern.as_str(), "latencies_*.csv");

        assert!(pattern.matches("latencies_.csv"));
        assert!(pattern.matches("latencies_x.csv"));
        assert!(pattern.matches("latencies_a.csv.csv"));
        assert!(!pattern.matches("xlatencies_x.csv"));
        assert!(!pattern.matches("latencies_x.csv.bak"));
        assert!(!pattern.matches("latencies_x.CSV"));
        assert!(!pattern.matches("other_data.csv"));
    }
}
