use crate::prelude::{TrajectoryError, TrajectoryResult};
use crate::telemetry::LogManager;
use crate::trajectory::TrajectoryFileSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DATA_DIR: &str = "Data";
const TRAJECTORY_DIR: &str = "Trajectory";
const SEARCH_DEPTH: usize = 4;

/// A GeoLife data root: the directory holding one subdirectory per user.
#[derive(Debug, Clone)]
pub struct Dataset {
    root: PathBuf,
}

fn is_user_dir(path: &Path) -> bool {
    path.join(TRAJECTORY_DIR).is_dir()
}

fn is_data_root(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .any(|entry| is_user_dir(&entry.path()))
        })
        .unwrap_or(false)
}

impl Dataset {
    /// Uses `root` as-is, without checking its layout.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Finds the data root at `path` or in a `Data` directory below it.
    pub fn locate<P: AsRef<Path>>(path: P) -> TrajectoryResult<Self> {
        let path = path.as_ref();
        fs::metadata(path).map_err(|source| TrajectoryError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        if is_data_root(path) {
            return Ok(Self::new(path));
        }

        let found = WalkDir::new(path)
            .min_depth(1)
            .max_depth(SEARCH_DEPTH)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_dir() && entry.file_name() == DATA_DIR)
            .find(|entry| is_data_root(entry.path()));

        match found {
            Some(entry) => {
                LogManager::new().record(&format!(
                    "GeoLife root found at {}",
                    entry.path().display()
                ));
                Ok(Self::new(entry.into_path()))
            }
            None => Err(TrajectoryError::NotFound {
                path: path.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    "no GeoLife Data directory with user trajectories",
                ),
            }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// User IDs with a Trajectory directory, sorted.
    pub fn users(&self) -> TrajectoryResult<Vec<String>> {
        let not_found = |source| TrajectoryError::NotFound {
            path: self.root.clone(),
            source,
        };

        let mut users = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(not_found)? {
            let entry = entry.map_err(not_found)?;
            if !is_user_dir(&entry.path()) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                users.push(name.to_string());
            }
        }
        users.sort();
        Ok(users)
    }

    pub fn user(&self, user_id: &str) -> TrajectoryResult<TrajectoryFileSet> {
        TrajectoryFileSet::discover(&self.root, user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{trajectory_dir, write_plt};
    use tempfile::TempDir;

    #[test]
    fn locate_accepts_data_root_directly() {
        let root = TempDir::new().unwrap();
        trajectory_dir(root.path(), "000");

        let dataset = Dataset::locate(root.path()).unwrap();
        assert_eq!(dataset.root(), root.path());
    }

    #[test]
    fn locate_searches_for_nested_data_directory() {
        let root = TempDir::new().unwrap();
        let data = root.path().join("Geolife Trajectories 1.3").join(DATA_DIR);
        trajectory_dir(&data, "000");
        fs::create_dir_all(root.path().join("unrelated").join(DATA_DIR)).unwrap();

        let dataset = Dataset::locate(root.path()).unwrap();
        assert_eq!(dataset.root(), data.as_path());
    }

    #[test]
    fn locate_fails_without_users() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join(DATA_DIR).join("000")).unwrap();

        assert!(matches!(
            Dataset::locate(root.path()),
            Err(TrajectoryError::NotFound { .. })
        ));
        assert!(matches!(
            Dataset::locate(root.path().join("missing")),
            Err(TrajectoryError::NotFound { .. })
        ));
    }

    #[test]
    fn users_are_sorted_and_need_trajectory_directory() {
        let root = TempDir::new().unwrap();
        for user in ["010", "002", "000"] {
            trajectory_dir(root.path(), user);
        }
        fs::create_dir_all(root.path().join("999")).unwrap();
        fs::write(root.path().join("README"), "x").unwrap();

        let dataset = Dataset::new(root.path());
        assert_eq!(dataset.users().unwrap(), vec!["000", "002", "010"]);
    }

    #[test]
    fn user_discovers_file_set() {
        let root = TempDir::new().unwrap();
        let dir = trajectory_dir(root.path(), "004");
        write_plt(&dir, "20081023025304.plt", &[]);

        let set = Dataset::new(root.path()).user("004").unwrap();
        assert_eq!(set.len(), 1);
    }
}
