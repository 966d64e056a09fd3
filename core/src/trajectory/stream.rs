use crate::plt::{skip_header, MovementRecord};
use crate::prelude::{HeaderMode, TrajectoryError, TrajectoryResult};
use crate::telemetry::{LogManager, ScanMetrics};
use crate::trajectory::file_set::{TrajectoryFile, TrajectoryFileSet};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::rc::Rc;

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

/// The single file handle a stream holds at any time.
struct OpenFile {
    index: usize,
    file: TrajectoryFile,
    reader: BufReader<File>,
    line_number: usize,
    /// Lines read ahead while looking past blank lines.
    pending: VecDeque<Vec<u8>>,
    metrics: Rc<ScanMetrics>,
}

impl OpenFile {
    fn new(
        index: usize,
        file: TrajectoryFile,
        metrics: Rc<ScanMetrics>,
    ) -> TrajectoryResult<Self> {
        let reader = file.open()?;
        metrics.record_handle_opened();
        Ok(Self {
            index,
            file,
            reader,
            line_number: 0,
            pending: VecDeque::new(),
            metrics,
        })
    }

    /// True if a non-blank line is still ahead; blank lines before it stay queued.
    fn has_data(&mut self) -> std::io::Result<bool> {
        if self.pending.iter().any(|line| !is_blank(line)) {
            return Ok(true);
        }
        loop {
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(false);
            }
            let blank = is_blank(&line);
            self.pending.push_back(line);
            if !blank {
                return Ok(true);
            }
        }
    }

    fn next_line(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        if let Some(line) = self.pending.pop_front() {
            return Ok(Some(line));
        }
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> TrajectoryError {
        TrajectoryError::Io {
            path: self.file.path().to_path_buf(),
            source,
        }
    }

    fn parse_error(&self, line: &str, reason: String) -> TrajectoryError {
        TrajectoryError::Parse {
            file: self.file.path().display().to_string(),
            line_number: self.line_number,
            line: line.trim_end().to_string(),
            reason,
        }
    }
}

impl Drop for OpenFile {
    fn drop(&mut self) {
        self.metrics.record_handle_released();
    }
}

/// Cursor yielding the movement records of a user's files in order.
///
/// Crossing a file boundary drops the previous handle before the next file
/// is opened and its header consumed.
pub struct RecordStream {
    files: TrajectoryFileSet,
    header: HeaderMode,
    current: Option<OpenFile>,
    metrics: Rc<ScanMetrics>,
    logger: LogManager,
    failed: bool,
}

impl RecordStream {
    pub fn new(files: TrajectoryFileSet, header: HeaderMode) -> Self {
        Self {
            files,
            header,
            current: None,
            metrics: Rc::new(ScanMetrics::new()),
            logger: LogManager::new(),
            failed: false,
        }
    }

    /// True while the open file has an unread line or more files remain.
    ///
    /// Blank lines at the very end of a file do not count as unread lines.
    /// No file is opened.
    pub fn has_next(&mut self) -> bool {
        if let Some(open) = self.current.as_mut() {
            match open.has_data() {
                Ok(false) => {}
                // Let next_record surface the failure.
                _ => return true,
            }
        }
        !self.files.is_exhausted()
    }

    /// Returns the next record, opening following files as needed.
    ///
    /// Fails with [`TrajectoryError::Exhausted`] once every file is drained.
    pub fn next_record(&mut self) -> TrajectoryResult<MovementRecord> {
        loop {
            if let Some(open) = self.current.as_mut() {
                let has_data = open.has_data().map_err(|err| open.io_error(err))?;
                if has_data {
                    return self.read_record();
                }
            }
            self.close();
            let (index, file) = self.files.next_file().ok_or(TrajectoryError::Exhausted)?;
            self.open(index, file)?;
        }
    }

    fn open(&mut self, index: usize, file: TrajectoryFile) -> TrajectoryResult<()> {
        self.logger.record(&format!(
            "User {} opening file {}",
            self.files.user_id(),
            file.name()
        ));
        let mut open = OpenFile::new(index, file, Rc::clone(&self.metrics))?;
        open.line_number = skip_header(&mut open.reader, self.header, open.file.path())?;
        self.metrics.record_file_opened();
        self.current = Some(open);
        Ok(())
    }

    fn read_record(&mut self) -> TrajectoryResult<MovementRecord> {
        let open = self
            .current
            .as_mut()
            .ok_or(TrajectoryError::Exhausted)?;

        let bytes = open
            .next_line()
            .map_err(|err| open.io_error(err))?
            .ok_or(TrajectoryError::Exhausted)?;
        open.line_number += 1;

        let line = String::from_utf8(bytes).map_err(|err| {
            let lossy = String::from_utf8_lossy(err.as_bytes()).into_owned();
            open.parse_error(&lossy, format!("invalid UTF-8: {}", err.utf8_error()))
        })?;
        let record = line
            .parse::<MovementRecord>()
            .map_err(|reason| open.parse_error(&line, reason))?;
        self.metrics.record_read();
        self.logger.detail(&format!(
            "{}:{} -> {:?}",
            open.file.name(),
            open.line_number,
            record
        ));
        Ok(record)
    }

    /// Releases the open handle, if any.
    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_file(&self) -> Option<&TrajectoryFile> {
        self.current.as_ref().map(|open| &open.file)
    }

    /// Position of the open file within the discovered set.
    pub fn current_index(&self) -> Option<usize> {
        self.current.as_ref().map(|open| open.index)
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }
}

impl Iterator for RecordStream {
    type Item = TrajectoryResult<MovementRecord>;

    /// Stops after the first failure; the error itself is yielded once.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.has_next() {
            return None;
        }
        match self.next_record() {
            Ok(record) => Some(Ok(record)),
            Err(TrajectoryError::Exhausted) => {
                self.close();
                None
            }
            Err(err) => {
                self.failed = true;
                self.close();
                Some(Err(err))
            }
        }
    }
}
