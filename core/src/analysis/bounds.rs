use crate::plt::MovementRecord;
use serde::{Deserialize, Serialize};

/// Running spatial and temporal extrema over observed records.
///
/// X is longitude, Y is latitude, time is Unix seconds. Until a record is
/// observed every field holds its sentinel and `is_empty()` is true.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub min_time: i64,
    pub max_time: i64,
    pub records: usize,
}

/// Bounds of a non-empty observation set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub min_time: i64,
    pub max_time: i64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: f64::MAX,
            min_y: f64::MAX,
            max_x: f64::MIN,
            max_y: f64::MIN,
            min_time: i64::MAX,
            max_time: i64::MIN,
            records: 0,
        }
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, record: &MovementRecord) {
        let time = record.time();
        self.min_x = self.min_x.min(record.longitude);
        self.max_x = self.max_x.max(record.longitude);
        self.min_y = self.min_y.min(record.latitude);
        self.max_y = self.max_y.max(record.latitude);
        self.min_time = self.min_time.min(time);
        self.max_time = self.max_time.max(time);
        self.records += 1;
    }

    /// Widens these bounds to also cover `other`.
    pub fn merge(&mut self, other: &Bounds) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
        self.min_time = self.min_time.min(other.min_time);
        self.max_time = self.max_time.max(other.max_time);
        self.records += other.records;
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    pub fn extent(&self) -> Option<Extent> {
        if self.is_empty() {
            return None;
        }
        Some(Extent {
            min_x: self.min_x,
            min_y: self.min_y,
            max_x: self.max_x,
            max_y: self.max_y,
            min_time: self.min_time,
            max_time: self.max_time,
        })
    }
}

impl<'a> FromIterator<&'a MovementRecord> for Bounds {
    fn from_iter<I: IntoIterator<Item = &'a MovementRecord>>(iter: I) -> Self {
        let mut bounds = Bounds::new();
        for record in iter {
            bounds.observe(record);
        }
        bounds
    }
}
