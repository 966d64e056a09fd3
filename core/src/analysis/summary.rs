use crate::analysis::{Bounds, RecordFilter};
use crate::prelude::{HeaderMode, TrajectoryError, TrajectoryResult};
use crate::telemetry::{LogManager, MetricsSnapshot};
use crate::trajectory::{RecordStream, TrajectoryFileSet};
use serde::{Deserialize, Serialize};

/// Options applied to every user scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanOptions {
    pub header: HeaderMode,
    pub filter: RecordFilter,
}

/// Per-file result; `records` counts every parsed line, `bounds` only kept ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub name: String,
    pub records: usize,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: String,
    pub files: Vec<FileSummary>,
    pub bounds: Bounds,
    pub metrics: MetricsSnapshot,
}

impl UserSummary {
    pub fn records_read(&self) -> usize {
        self.metrics.records_read
    }

    pub fn records_kept(&self) -> usize {
        self.bounds.records
    }
}

/// Scans every record of one user and folds it into per-file and per-user bounds.
pub fn analyze_user(
    files: TrajectoryFileSet,
    options: &ScanOptions,
) -> TrajectoryResult<UserSummary> {
    let logger = LogManager::new();
    let user_id = files.user_id().to_string();
    if files.is_empty() {
        logger.anomaly(&format!(
            "User {} has no trajectory files in {}",
            user_id,
            files.directory().display()
        ));
    }
    let mut per_file = files
        .files()
        .iter()
        .map(|file| FileSummary {
            name: file.name().to_string(),
            records: 0,
            bounds: Bounds::new(),
        })
        .collect::<Vec<_>>();

    let mut stream = RecordStream::new(files, options.header);
    while stream.has_next() {
        let record = match stream.next_record() {
            Ok(record) => record,
            Err(TrajectoryError::Exhausted) => break,
            Err(err) => return Err(err),
        };
        let index = stream.current_index();
        let Some(summary) = index.and_then(|index| per_file.get_mut(index)) else {
            continue;
        };
        summary.records += 1;
        if options.filter.matches(&record) {
            summary.bounds.observe(&record);
        } else {
            stream.metrics().record_rejected();
        }
    }
    stream.close();

    let mut bounds = Bounds::new();
    for summary in &per_file {
        bounds.merge(&summary.bounds);
    }
    let metrics = stream.metrics().snapshot();
    logger.record(&format!(
        "User {}: {} records read, {} kept from {} files",
        user_id, metrics.records_read, bounds.records, metrics.files_opened
    ));

    Ok(UserSummary {
        user_id,
        files: per_file,
        bounds,
        metrics,
    })
}
