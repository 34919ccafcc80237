//! Store trait definitions

use punchclock_api::AttendanceEntry;

use crate::{codec, StoreError, StoreResult};

/// Append-only attendance log
///
/// Implementations never rewrite or reorder existing records. Callers that
/// need read-then-append atomicity must serialize access themselves.
pub trait AttendanceStore: Send + Sync {
    /// Create the log with its header if it does not exist yet.
    /// Returns `true` if this call created it.
    fn ensure_created(&self) -> StoreResult<bool>;

    /// Raw lines of the log, header included. Empty if the log does not exist.
    fn read_lines(&self) -> StoreResult<Vec<String>>;

    /// Append one record. The log must already exist.
    fn append_line(&self, line: &str) -> StoreResult<()>;

    /// All entries in file order (oldest first)
    fn load_entries(&self) -> StoreResult<Vec<AttendanceEntry>> {
        parse_lines(&self.read_lines()?)
    }

    /// Append one entry in the log's record format
    fn append_entry(&self, entry: &AttendanceEntry) -> StoreResult<()> {
        self.append_line(&codec::format_record(entry))
    }
}

/// Parse raw log lines into entries.
///
/// The first line must be the header. Blank lines are ignored; any other
/// malformed line fails with its 1-based line number.
pub fn parse_lines(lines: &[String]) -> StoreResult<Vec<AttendanceEntry>> {
    let mut iter = lines.iter().enumerate();

    match iter.next() {
        None => return Ok(Vec::new()),
        Some((_, first)) if codec::is_header(first) => {}
        Some((_, first)) => {
            return Err(StoreError::MissingHeader {
                found: first.clone(),
            });
        }
    }

    let mut entries = Vec::with_capacity(lines.len().saturating_sub(1));
    for (idx, line) in iter {
        if line.trim().is_empty() {
            continue;
        }
        let entry = codec::parse_record(line).map_err(|message| StoreError::Parse {
            line: idx + 1,
            content: line.clone(),
            message,
        })?;
        entries.push(entry);
    }

    Ok(entries)
}
