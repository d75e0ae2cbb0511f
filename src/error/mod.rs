use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the dashboard library.
///
/// Missing or unmatched data is never an error here: an empty series is a
/// valid, renderable state.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("unknown timeframe `{0}` (expected one of 1D, 5D, 1M, 3M, 5M, 6M, YTD, 1Y, 5Y)")]
    UnknownTimeframe(String),

    #[error("unknown chart type `{0}`")]
    UnknownChartType(String),

    #[error("unknown data source `{0}` (expected `snapshot` or `mock`)")]
    UnknownSource(String),

    #[error("chart surface is not mounted")]
    NotMounted,

    #[error("chart surface is already mounted")]
    AlreadyMounted,

    #[error("unsupported snapshot format {0:?} (expected .json or .csv)")]
    UnsupportedSnapshot(PathBuf),

    #[error("failed to read snapshot {path:?}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON snapshot {path:?}")]
    SnapshotJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed CSV snapshot {path:?}")]
    SnapshotCsv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
