//! File-backed attendance log

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::{codec::HEADER, AttendanceStore, StoreError, StoreResult};

/// Attendance log stored as a newline-delimited text file
#[derive(Debug, Clone)]
pub struct TextLogStore {
    path: PathBuf,
}

impl TextLogStore {
    /// Store backed by the given file. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open for appending, ready to start a fresh line.
    fn open_for_append(&self) -> StoreResult<File> {
        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        if !ends_at_line_start(&mut file)? {
            writeln!(file)?;
            debug!(path = %self.path.display(), "Terminated unfinished last line");
        }
        Ok(file)
    }
}

/// True if the file is empty or its last byte is a newline
fn ends_at_line_start(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl AttendanceStore for TextLogStore {
    fn ensure_created(&self) -> StoreResult<bool> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(mut file) => {
                writeln!(file, "{}", HEADER)?;
                file.flush()?;
                debug!(path = %self.path.display(), "Attendance log created");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                // A zero-length file never received its header
                if fs::metadata(&self.path)?.len() == 0 {
                    let mut file = self.open_for_append()?;
                    writeln!(file, "{}", HEADER)?;
                    file.flush()?;
                    debug!(path = %self.path.display(), "Header written to empty log");
                    return Ok(true);
                }
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn read_lines(&self) -> StoreResult<Vec<String>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut raw: Vec<&[u8]> = bytes.split(|b| *b == b'\n').collect();
        if raw.last().is_some_and(|l| l.is_empty()) {
            raw.pop();
        }

        raw.into_iter()
            .enumerate()
            .map(|(idx, line)| {
                String::from_utf8(line.to_vec()).map_err(|e| StoreError::Parse {
                    line: idx + 1,
                    content: String::from_utf8_lossy(line).into_owned(),
                    message: format!("invalid UTF-8: {}", e.utf8_error()),
                })
            })
            .collect()
    }

    fn append_line(&self, line: &str) -> StoreResult<()> {
        let mut file = self.open_for_append()?;
        writeln!(file, "{}", line)?;
        file.flush()?;
        debug!(path = %self.path.display(), record = line, "Record appended");
        Ok(())
    }
}
