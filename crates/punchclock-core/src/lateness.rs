//! Lateness scan

use chrono::Duration;
use punchclock_api::AttendanceEntry;

/// A prior entry that makes a new entry late
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LateReference {
    pub previous: AttendanceEntry,
    pub gap: Duration,
}

/// Scan prior entries in file order and return the first one whose gap to
/// `entry` strictly exceeds `threshold`.
///
/// The scan follows persisted order, not recency: with an oldest-first log
/// the first match is usually the oldest qualifying entry. Entries later
/// than `entry` produce a negative gap and never qualify.
pub fn find_late_reference(
    prior: &[AttendanceEntry],
    entry: &AttendanceEntry,
    threshold: Duration,
) -> Option<LateReference> {
    let at = entry.at();
    prior.iter().find_map(|previous| {
        let gap = at.signed_duration_since(previous.at());
        (gap > threshold).then_some(LateReference {
            previous: *previous,
            gap,
        })
    })
}
