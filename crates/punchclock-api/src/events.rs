//! Event types broadcast by the engine to secondary observers

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{AttendanceEntry, LateArrival, RecordingOutcome, RejectionReason, API_VERSION};

/// Event envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub api_version: u32,
    pub timestamp: DateTime<Local>,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            api_version: API_VERSION,
            timestamp: punchclock_util::now(),
            payload,
        }
    }
}

/// Everything the engine reports about a `record` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    /// Entry accepted and appended on time
    EntryRecorded { entry: AttendanceEntry },

    /// Entry accepted and appended, but late
    LateArrival {
        entry: AttendanceEntry,
        #[serde(flatten)]
        details: LateArrival,
    },

    /// Entry refused; nothing was written
    EntryRejected {
        entry: AttendanceEntry,
        reason: RejectionReason,
    },
}

impl EventPayload {
    /// Derive the payload from the authoritative outcome of a `record` call.
    pub fn from_outcome(entry: AttendanceEntry, outcome: &RecordingOutcome) -> Self {
        match outcome {
            RecordingOutcome::Rejected { reason } => EventPayload::EntryRejected {
                entry,
                reason: reason.clone(),
            },
            RecordingOutcome::RecordedOnTime => EventPayload::EntryRecorded { entry },
            RecordingOutcome::RecordedLate(details) => EventPayload::LateArrival {
                entry,
                details: details.clone(),
            },
        }
    }
}
