use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of comma-separated fields on every PLT data line.
pub const FIELD_COUNT: usize = 7;

/// Altitude value GeoLife writes when no altitude was recorded.
const INVALID_ALTITUDE: f64 = -777.0;

/// One GPS fix parsed from a PLT data line.
///
/// Field order on disk: latitude, longitude, reserved, altitude (feet),
/// days since 1899-12-30, date, time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_ft: Option<f64>,
    pub days_since_epoch: f64,
    pub timestamp: NaiveDateTime,
}

impl MovementRecord {
    /// Unix seconds of the fix, read as UTC.
    pub fn time(&self) -> i64 {
        self.timestamp.and_utc().timestamp()
    }
}

fn parse_float(field: &str, name: &str) -> Result<f64, String> {
    field
        .parse::<f64>()
        .map_err(|err| format!("invalid {} {:?}: {}", name, field, err))
}

impl FromStr for MovementRecord {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields = line
            .trim_end()
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>();
        if fields.len() != FIELD_COUNT {
            return Err(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            ));
        }

        let latitude = parse_float(fields[0], "latitude")?;
        let longitude = parse_float(fields[1], "longitude")?;
        let altitude = parse_float(fields[3], "altitude")?;
        let days_since_epoch = parse_float(fields[4], "numeric date")?;
        let date = NaiveDate::parse_from_str(fields[5], "%Y-%m-%d")
            .map_err(|err| format!("invalid date {:?}: {}", fields[5], err))?;
        let time = NaiveTime::parse_from_str(fields[6], "%H:%M:%S")
            .map_err(|err| format!("invalid time {:?}: {}", fields[6], err))?;

        Ok(Self {
            latitude,
            longitude,
            altitude_ft: (altitude != INVALID_ALTITUDE).then_some(altitude),
            days_since_epoch,
            timestamp: NaiveDateTime::new(date, time),
        })
    }
}
