//! Profile completeness
//!
//! Derived per decision point and never stored by the coordinator.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Whether the user has finished profile setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ProfileStatus {
    pub complete: bool,
}

impl ProfileStatus {
    /// Status used when the profile check fails or stalls: treat the profile
    /// as done so an unreliable check cannot pin the user to the setup screen.
    pub const fn assumed_complete() -> Self {
        Self { complete: true }
    }
}

impl From<bool> for ProfileStatus {
    fn from(complete: bool) -> Self {
        Self { complete }
    }
}
