//! Attendance engine

use chrono::NaiveDateTime;
use punchclock_api::{
    AttendanceEntry, Event, EventPayload, LateArrival, RecordingOutcome, RejectionReason,
    LATE_ARRIVAL_MESSAGE,
};
use punchclock_config::Policy;
use punchclock_store::{AttendanceStore, TextLogStore};
use punchclock_util::format_duration;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{find_late_reference, CoreResult};

/// Buffered events per subscriber before it starts lagging
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Records attendance entries against an append-only log
pub struct AttendanceEngine {
    policy: Policy,
    store: Arc<dyn AttendanceStore>,
    record_lock: Mutex<()>,
    events: broadcast::Sender<Event>,
}

impl AttendanceEngine {
    /// Create an engine over the given store
    pub fn new(policy: Policy, store: Arc<dyn AttendanceStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        info!(
            working_hours = %policy.working_hours,
            lateness_threshold_hours = policy.lateness_threshold_hours,
            "Attendance engine initialized"
        );

        Self {
            policy,
            store,
            record_lock: Mutex::new(()),
            events,
        }
    }

    /// Create an engine writing to the policy's log file
    pub fn with_text_log(policy: Policy) -> Self {
        let store = Arc::new(TextLogStore::new(policy.log_path.clone()));
        Self::new(policy, store)
    }

    /// Get current policy
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Subscribe to outcome events. Only events published after this call
    /// are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Record an attendance entry.
    ///
    /// Out-of-hours entries are rejected without touching the log. Accepted
    /// entries are checked for lateness against every prior entry and then
    /// appended; the read and the append happen under one lock.
    pub fn record(&self, entry_time: NaiveDateTime) -> CoreResult<RecordingOutcome> {
        let entry = AttendanceEntry::from_datetime(entry_time);
        let window = self.policy.working_hours;

        if !window.contains(&entry.at()) {
            let reason = RejectionReason::OutsideWorkingHours {
                hour: entry.hour(),
                start: window.start,
                end: window.end,
            };
            warn!(entry = %entry, working_hours = %window, "Entry rejected");

            let outcome = RecordingOutcome::Rejected { reason };
            self.publish(entry, &outcome);
            return Ok(outcome);
        }

        let late = {
            let _guard = self
                .record_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            if self.store.ensure_created()? {
                info!("Attendance log created");
            }

            let prior = self.store.load_entries()?;
            debug!(prior_entries = prior.len(), "Attendance log loaded");

            let late = find_late_reference(&prior, &entry, self.policy.lateness_threshold());
            self.store.append_entry(&entry)?;
            late
        };

        let outcome = match late {
            Some(reference) => {
                let gap_minutes = reference.gap.num_minutes();
                warn!(
                    entry = %entry,
                    previous = %reference.previous,
                    gap = %format_duration(reference.gap.to_std().unwrap_or_default()),
                    "Late arrival recorded"
                );
                RecordingOutcome::RecordedLate(LateArrival {
                    message: LATE_ARRIVAL_MESSAGE.to_string(),
                    previous: reference.previous,
                    gap_minutes,
                })
            }
            None => {
                info!(entry = %entry, "Attendance recorded");
                RecordingOutcome::RecordedOnTime
            }
        };

        self.publish(entry, &outcome);
        Ok(outcome)
    }

    /// All recorded entries in file order. Does not create the log.
    pub fn history(&self) -> CoreResult<Vec<AttendanceEntry>> {
        let _guard = self
            .record_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(self.store.load_entries()?)
    }

    fn publish(&self, entry: AttendanceEntry, outcome: &RecordingOutcome) {
        // No subscribers is not an error
        let _ = self
            .events
            .send(Event::new(EventPayload::from_outcome(entry, outcome)));
    }
}
