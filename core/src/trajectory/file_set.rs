use crate::prelude::{HeaderMode, TrajectoryError, TrajectoryResult};
use crate::telemetry::log::LogManager;
use crate::trajectory::stream::RecordStream;
use chrono::NaiveDateTime;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Only directory entries with this (case-sensitive) suffix are trajectories.
pub const PLT_SUFFIX: &str = ".plt";

const TRAJECTORY_DIR: &str = "Trajectory";
const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const STAMP_WIDTH: usize = 14;

/// A discovered PLT file. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryFile {
    path: PathBuf,
    name: String,
}

impl TrajectoryFile {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recording start encoded in the file name, e.g. `20081023025304.plt`.
    pub fn started_at(&self) -> Option<NaiveDateTime> {
        let stem = self.name.strip_suffix(PLT_SUFFIX)?;
        if stem.len() != STAMP_WIDTH || !stem.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        NaiveDateTime::parse_from_str(stem, STAMP_FORMAT).ok()
    }

    pub fn open(&self) -> TrajectoryResult<BufReader<File>> {
        let file = File::open(&self.path).map_err(|source| TrajectoryError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(BufReader::new(file))
    }
}

/// Chronologically ordered trajectory files of one user.
///
/// The ordered list never changes after discovery; consumption moves a
/// cursor forward, so `remaining()` is always the tail past the cursor.
#[derive(Debug, Clone)]
pub struct TrajectoryFileSet {
    user_id: String,
    directory: PathBuf,
    files: Vec<TrajectoryFile>,
    cursor: usize,
}

impl TrajectoryFileSet {
    /// Lists `<root>/<user_id>/Trajectory/*.plt` sorted by file name.
    ///
    /// File names are fixed-width timestamps, so byte order is chronological
    /// order. Names breaking that convention are still included but reported.
    pub fn discover<P: AsRef<Path>>(root: P, user_id: &str) -> TrajectoryResult<Self> {
        let directory = root.as_ref().join(user_id).join(TRAJECTORY_DIR);
        let not_found = |source| TrajectoryError::NotFound {
            path: directory.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&directory).map_err(not_found)? {
            let entry = entry.map_err(not_found)?;
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(PLT_SUFFIX) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();

        let logger = LogManager::new();
        logger.record(&format!("{} files found for user {}", names.len(), user_id));

        let files = names
            .into_iter()
            .map(|name| TrajectoryFile::new(directory.join(name)))
            .collect::<Vec<_>>();
        for file in files.iter().filter(|file| file.started_at().is_none()) {
            logger.anomaly(&format!(
                "{} does not follow the YYYYMMDDhhmmss naming; chronological order not guaranteed",
                file.path().display()
            ));
        }

        Ok(Self::from_files(user_id, directory, files))
    }

    /// Builds a set from files already in chronological order.
    pub fn from_files(user_id: &str, directory: PathBuf, files: Vec<TrajectoryFile>) -> Self {
        Self {
            user_id: user_id.to_string(),
            directory,
            files,
            cursor: 0,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Every discovered file in order, consumed or not.
    pub fn files(&self) -> &[TrajectoryFile] {
        &self.files
    }

    pub fn remaining(&self) -> &[TrajectoryFile] {
        &self.files[self.cursor..]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.files.len()
    }

    /// Hands out the next unconsumed file with its position in the set.
    pub fn next_file(&mut self) -> Option<(usize, TrajectoryFile)> {
        let file = self.files.get(self.cursor)?.clone();
        let index = self.cursor;
        self.cursor += 1;
        Some((index, file))
    }

    pub fn into_stream(self, header: HeaderMode) -> RecordStream {
        RecordStream::new(self, header)
    }
}
