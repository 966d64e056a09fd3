use crate::plt::MovementRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Axis-aligned area of interest in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Region {
    pub const ALL_CHINA: Region = Region {
        north: 53.567732,
        south: 18.126,
        east: 122.6,
        west: 73.4,
    };

    pub const BEIJING: Region = Region {
        north: 41.1398565,
        south: 38.5089264,
        east: 118.3662329,
        west: 115.3983897,
    };

    pub fn preset(name: &str) -> Option<Region> {
        match name.to_ascii_lowercase().as_str() {
            "all-china" | "china" => Some(Self::ALL_CHINA),
            "beijing" => Some(Self::BEIJING),
            _ => None,
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.south..=self.north).contains(&latitude) && (self.west..=self.east).contains(&longitude)
    }
}

/// Restricts which records contribute to the bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

impl RecordFilter {
    pub fn is_unrestricted(&self) -> bool {
        self.date.is_none() && self.region.is_none()
    }

    pub fn matches(&self, record: &MovementRecord) -> bool {
        if let Some(date) = self.date {
            if record.timestamp.date() != date {
                return false;
            }
        }
        match self.region {
            Some(region) => region.contains(record.latitude, record.longitude),
            None => true,
        }
    }
}
