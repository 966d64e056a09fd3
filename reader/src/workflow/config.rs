use crate::report::model::ReportFormat;
use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use geolifecore::analysis::{RecordFilter, Region, ScanOptions};
use geolifecore::HeaderMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Area of interest, either a named preset or explicit edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionSpec {
    Named(String),
    Explicit(Region),
}

impl RegionSpec {
    pub fn resolve(&self) -> anyhow::Result<Region> {
        match self {
            RegionSpec::Named(name) => {
                Region::preset(name).ok_or_else(|| anyhow!("unknown region preset {:?}", name))
            }
            RegionSpec::Explicit(region) => {
                if region.south > region.north || region.west > region.east {
                    return Err(anyhow!("region edges are inverted: {:?}", region));
                }
                Ok(*region)
            }
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub data_root: PathBuf,
    pub users: Vec<String>,
    pub limit: Option<usize>,
    pub randomize: bool,
    pub seed: u64,
    pub header: HeaderMode,
    pub date: Option<NaiveDate>,
    pub region: Option<RegionSpec>,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub fail_fast: bool,
    pub per_file: bool,
}

impl ScanConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scan config {}", path_ref.display()))?;
        let config: ScanConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scan config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_root(data_root: PathBuf) -> Self {
        Self {
            data_root,
            ..Default::default()
        }
    }

    pub fn to_scan_options(&self) -> anyhow::Result<ScanOptions> {
        let region = self
            .region
            .as_ref()
            .map(RegionSpec::resolve)
            .transpose()
            .context("resolving region filter")?;
        Ok(ScanOptions {
            header: self.header,
            filter: RecordFilter {
                date: self.date,
                region,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_root_uses_lenient_defaults() {
        let cfg = ScanConfig::from_root(PathBuf::from("/data/geolife"));
        let options = cfg.to_scan_options().unwrap();
        assert_eq!(options.header, HeaderMode::Lenient);
        assert!(options.filter.is_unrestricted());
        assert_eq!(cfg.format, ReportFormat::Text);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"data_root: /data/geolife\nusers: ['000', '001']\nheader: strict\ndate: 2008-11-09\nregion: beijing\nformat: json\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = ScanConfig::load(&path).unwrap();
        assert_eq!(cfg.users, vec!["000", "001"]);
        assert_eq!(cfg.format, ReportFormat::Json);

        let options = cfg.to_scan_options().unwrap();
        assert_eq!(options.header, HeaderMode::Strict);
        assert_eq!(options.filter.date, NaiveDate::from_ymd_opt(2008, 11, 9));
        assert_eq!(options.filter.region, Some(Region::BEIJING));
    }

    #[test]
    fn explicit_region_is_read_from_yaml() {
        let cfg: ScanConfig = serde_yaml::from_str(
            "data_root: d\nregion: {north: 2.0, south: 1.0, east: 4.0, west: 3.0}\n",
        )
        .unwrap();
        let region = cfg.to_scan_options().unwrap().filter.region.unwrap();
        assert_eq!(region.east, 4.0);
    }

    #[test]
    fn bad_regions_are_rejected() {
        let mut cfg = ScanConfig::from_root(PathBuf::from("d"));
        cfg.region = Some(RegionSpec::Named("atlantis".into()));
        assert!(cfg.to_scan_options().is_err());

        cfg.region = Some(RegionSpec::Explicit(Region {
            north: 1.0,
            south: 2.0,
            east: 4.0,
            west: 3.0,
        }));
        assert!(cfg.to_scan_options().is_err());
    }
}
