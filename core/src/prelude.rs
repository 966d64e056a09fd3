use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::analysis::{Bounds, Extent, RecordFilter, Region};
pub use crate::plt::MovementRecord;
pub use crate::trajectory::{RecordStream, TrajectoryFile, TrajectoryFileSet};

/// How the six-line PLT header is treated when a file is opened.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Discard up to six lines without looking at them.
    #[default]
    Lenient,
    /// Require the canonical GeoLife header and fail on any deviation.
    Strict,
}

/// Common error type for discovery, streaming and parsing.
#[derive(thiserror::Error, Debug)]
pub enum TrajectoryError {
    #[error("trajectory directory not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("i/o failure on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}:{line_number}: {reason} (line: {line:?})")]
    Parse {
        file: String,
        line_number: usize,
        line: String,
        reason: String,
    },
    #[error("{file}:{line_number}: malformed header, expected {expected:?}, found {found:?}")]
    MalformedHeader {
        file: String,
        line_number: usize,
        expected: String,
        found: Option<String>,
    },
    #[error("record stream exhausted")]
    Exhausted,
}

pub type TrajectoryResult<T> = Result<T, TrajectoryError>;
