use crate::report::model::ScanReport;
use crate::workflow::config::ScanConfig;
use crate::workflow::selection::select_users;
use anyhow::Context;
use geolifecore::analysis::{analyze_user, ScanOptions, UserSummary};
use geolifecore::Dataset;
use log::{info, warn};

#[derive(Clone)]
pub struct Runner {
    config: ScanConfig,
}

impl Runner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scans every selected user; one user's failure does not stop the
    /// others unless `fail_fast` is set.
    pub fn execute(&self) -> anyhow::Result<ScanReport> {
        let dataset = Dataset::locate(&self.config.data_root)
            .with_context(|| format!("locating GeoLife data under {}", self.config.data_root.display()))?;
        let options = self.config.to_scan_options()?;

        let available = if self.config.users.is_empty() {
            dataset.users().context("listing GeoLife users")?
        } else {
            Vec::new()
        };
        let users = select_users(
            available,
            &self.config.users,
            self.config.limit,
            self.config.randomize,
            self.config.seed,
        );
        info!("Scanning {} users under {}", users.len(), dataset.root().display());

        let mut report = ScanReport::default();
        for user_id in &users {
            match self.scan_user(&dataset, user_id, &options) {
                Ok(summary) => report.record_summary(summary),
                Err(err) if self.config.fail_fast => return Err(err),
                Err(err) => {
                    warn!("{:#}", err);
                    report.record_failure(user_id, &err);
                }
            }
        }
        Ok(report)
    }

    fn scan_user(
        &self,
        dataset: &Dataset,
        user_id: &str,
        options: &ScanOptions,
    ) -> anyhow::Result<UserSummary> {
        let files = dataset
            .user(user_id)
            .with_context(|| format!("discovering trajectories of user {}", user_id))?;
        analyze_user(files, options).with_context(|| format!("scanning user {}", user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geolifecore::HeaderMode;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const HEADER: &str = "Geolife trajectory\r\nWGS 84\r\nAltitude is in Feet\r\nReserved 3\r\n0,2,255,My Track,0,0,2,8421376\r\n0\r\n";

    fn write_plt(root: &Path, user: &str, name: &str, lines: &[&str]) {
        let dir = root.join(user).join("Trajectory");
        fs::create_dir_all(&dir).unwrap();
        let mut contents = HEADER.to_string();
        for line in lines {
            contents.push_str(line);
            contents.push_str("\r\n");
        }
        fs::write(dir.join(name), contents).unwrap();
    }

    fn dataset() -> TempDir {
        let root = TempDir::new().unwrap();
        let data = root.path().join("Geolife Trajectories 1.3").join("Data");
        write_plt(
            &data,
            "000",
            "20081023025304.plt",
            &[
                "10,20,0,492,39744.12,2008-10-23,02:53:04",
                "5,30,0,492,39744.12,2008-10-23,02:53:09",
            ],
        );
        write_plt(
            &data,
            "000",
            "20081024020959.plt",
            &[
                "15,-5,0,-777,39745.09,2008-10-24,02:09:59",
                "12,25,0,100,39745.09,2008-10-24,02:10:04",
                "11,26,0,100,39745.09,2008-10-24,02:10:09",
            ],
        );
        write_plt(
            &data,
            "001",
            "20081023055305.plt",
            &["39.9,116.3,0,100,39744.24,2008-10-23,05:53:05"],
        );
        root
    }

    #[test]
    fn runner_scans_all_users() {
        let root = dataset();
        let runner = Runner::new(ScanConfig::from_root(root.path().to_path_buf()));
        let report = runner.execute().unwrap();

        assert_eq!(report.users.len(), 2);
        assert!(report.failures.is_empty());
        let first = &report.users[0];
        assert_eq!(first.user_id, "000");
        assert_eq!(first.records_read(), 5);
        assert_eq!(first.bounds.min_x, -5.0);
        assert_eq!(first.bounds.max_x, 30.0);
        assert_eq!(report.combined.max_x, 116.3);
        assert_eq!(report.records_kept(), 6);
    }

    #[test]
    fn missing_user_is_reported_and_others_continue() {
        let root = dataset();
        let mut cfg = ScanConfig::from_root(root.path().to_path_buf());
        cfg.users = vec!["001".into(), "404".into()];
        let report = Runner::new(cfg.clone()).execute().unwrap();

        assert_eq!(report.users.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].user_id, "404");

        cfg.fail_fast = true;
        assert!(Runner::new(cfg).execute().is_err());
    }

    #[test]
    fn strict_header_and_limit_are_applied() {
        let root = dataset();
        let mut cfg = ScanConfig::from_root(root.path().to_path_buf());
        cfg.header = HeaderMode::Strict;
        cfg.limit = Some(1);
        let report = Runner::new(cfg).execute().unwrap();

        assert_eq!(report.users.len(), 1);
        assert_eq!(report.users[0].user_id, "000");
    }
}
