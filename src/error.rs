use std::path::PathBuf;

use thiserror::Error;

/// Failures while discovering, loading or saving latency charts.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The folder (or a file in it) could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row does not have the `task_id,latency_ms` shape.
    #[error("{}, line {line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// The CSV reader itself failed part-way through the file.
    #[error("reading CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The latency file name pattern did not compile.
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Writing an opt-in PNG snapshot failed.
    #[error("saving image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, ChartError>;
