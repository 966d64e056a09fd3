use geolifecore::analysis::{Bounds, UserSummary};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Per-user record counts and bounds for people
    #[default]
    Text,
    /// The whole report as JSON
    Json,
    /// ONE external-movement header line for the combined bounds
    One,
}

/// A user whose scan was aborted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserFailure {
    pub user_id: String,
    pub error: String,
}

/// Outcome of scanning a batch of users.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub users: Vec<UserSummary>,
    pub failures: Vec<UserFailure>,
    pub combined: Bounds,
}

impl ScanReport {
    pub fn record_summary(&mut self, summary: UserSummary) {
        self.combined.merge(&summary.bounds);
        self.users.push(summary);
    }

    pub fn record_failure(&mut self, user_id: &str, error: &anyhow::Error) {
        self.failures.push(UserFailure {
            user_id: user_id.to_string(),
            error: format!("{:#}", error),
        });
    }

    pub fn records_kept(&self) -> usize {
        self.combined.records
    }
}
