use std::path::PathBuf;
use thiserror::Error;

/// The main error type for oi2yolo operations.
///
/// Every failure is terminal for the run: there are no retries, and no
/// partial-success reporting beyond whatever was already written to disk
/// before the failure surfaced.
#[derive(Debug, Error)]
pub enum Oi2YoloError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read class list {path}: {source}")]
    ClassListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open detection table {path}: {source}")]
    DetectionCsvOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse detection table {path}: {source}")]
    DetectionCsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Directory argument {path} does not exist or is not a directory")]
    DestinationUnavailable { path: PathBuf },

    #[error("Source image for '{image_id}' not found at {path}: {source}")]
    ImageNotFound {
        image_id: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write label file {path}: {source}")]
    LabelWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A post-filter row's label was absent from the class index map.
    /// Filtering guarantees membership, so hitting this is a bug, not a
    /// user-recoverable condition.
    #[error(
        "Internal consistency error: label '{label}' survived filtering but has no class index"
    )]
    UnknownLabel { label: String },
}
