//! Trial and payment state
//!
//! `started_at` is write-once per user. Expiry is never stored: it is always
//! recomputed from `now - started_at` against the configured trial length.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Per-user trial record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct TrialState {
    pub started_at: Option<DateTime<Utc>>,
    pub paid: bool,
}

impl TrialState {
    /// Record the trial start. Returns `true` only on the call that actually
    /// set `started_at`; later calls leave the original timestamp in place.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// A trial that never started cannot be expired.
    pub fn is_expired(&self, now: DateTime<Utc>, trial_length: Duration) -> bool {
        self.started_at.is_some_and(|started| now - started >= trial_length)
    }
}
