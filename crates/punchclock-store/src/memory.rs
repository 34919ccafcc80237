//! In-memory store (for testing)

use std::sync::{Mutex, MutexGuard};

use crate::{codec::HEADER, AttendanceStore, StoreResult};

/// Attendance log kept in memory; `None` means not yet created
#[derive(Debug, Default)]
pub struct MemoryStore {
    lines: Mutex<Option<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with raw lines, header included
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Mutex::new(Some(lines.into_iter().map(Into::into).collect())),
        }
    }

    /// Snapshot of the raw lines, or `None` if never created
    pub fn snapshot(&self) -> Option<Vec<String>> {
        self.guard().clone()
    }

    fn guard(&self) -> MutexGuard<'_, Option<Vec<String>>> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AttendanceStore for MemoryStore {
    fn ensure_created(&self) -> StoreResult<bool> {
        let mut lines = self.guard();
        match lines.as_mut() {
            Some(existing) if existing.is_empty() => {
                existing.push(HEADER.to_string());
                Ok(true)
            }
            Some(_) => Ok(false),
            None => {
                *lines = Some(vec![HEADER.to_string()]);
                Ok(true)
            }
        }
    }

    fn read_lines(&self) -> StoreResult<Vec<String>> {
        Ok(self.guard().clone().unwrap_or_default())
    }

    fn append_line(&self, line: &str) -> StoreResult<()> {
        let mut lines = self.guard();
        match lines.as_mut() {
            Some(existing) => {
                existing.push(line.to_string());
                Ok(())
            }
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "attendance log has not been created",
            )
            .into()),
        }
    }
}
