use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Counters maintained while a single user's records are scanned.
#[derive(Default)]
pub struct ScanMetrics {
    files_opened: Cell<usize>,
    records_read: Cell<usize>,
    records_rejected: Cell<usize>,
    open_handles: Cell<usize>,
    peak_open_handles: Cell<usize>,
}

/// Point-in-time copy of [`ScanMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub files_opened: usize,
    pub records_read: usize,
    pub records_rejected: usize,
    pub open_handles: usize,
    pub peak_open_handles: usize,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file_opened(&self) {
        self.files_opened.set(self.files_opened.get() + 1);
    }

    pub fn record_read(&self) {
        self.records_read.set(self.records_read.get() + 1);
    }

    pub fn record_rejected(&self) {
        self.records_rejected.set(self.records_rejected.get() + 1);
    }

    pub fn record_handle_opened(&self) {
        let open = self.open_handles.get() + 1;
        self.open_handles.set(open);
        self.peak_open_handles.set(self.peak_open_handles.get().max(open));
    }

    pub fn record_handle_released(&self) {
        self.open_handles.set(self.open_handles.get().saturating_sub(1));
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            files_opened: self.files_opened.get(),
            records_read: self.records_read.get(),
            records_rejected: self.records_rejected.get(),
            open_handles: self.open_handles.get(),
            peak_open_handles: self.peak_open_handles.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let metrics = ScanMetrics::new();
        metrics.record_file_opened();
        metrics.record_read();
        metrics.record_read();
        metrics.record_rejected();

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                files_opened: 1,
                records_read: 2,
                records_rejected: 1,
                open_handles: 0,
                peak_open_handles: 0,
            }
        );
    }

    #[test]
    fn handle_gauge_tracks_peak() {
        let metrics = ScanMetrics::new();
        metrics.record_handle_opened();
        metrics.record_handle_released();
        metrics.record_handle_opened();
        assert_eq!(metrics.snapshot().open_handles, 1);
        assert_eq!(metrics.snapshot().peak_open_handles, 1);

        metrics.record_handle_opened();
        metrics.record_handle_released();
        metrics.record_handle_released();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.open_handles, 0);
        assert_eq!(snapshot.peak_open_handles, 2);
    }
}
