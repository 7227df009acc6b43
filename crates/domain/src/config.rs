//! Configuration structures
//!
//! Every field has a default so a partial file (or no file at all) still
//! yields a usable configuration. Durations are stored in milliseconds and
//! exposed as [`std::time::Duration`] through accessors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BOOTSTRAP_HARD_DEADLINE_MS, DEFAULT_GATE_HARD_DEADLINE_MS, DEFAULT_LOG_LEVEL,
    DEFAULT_PROFILE_MAX_ATTEMPTS, DEFAULT_PROFILE_SERVICE_URL, DEFAULT_PROFILE_TIMEOUT_MS,
    DEFAULT_SOFT_SETTLE_MS, DEFAULT_TRIAL_DAYS,
};
use crate::errors::{Result, WaypointError};
use crate::types::RouteTable;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    pub routes: RouteTable,
    pub timing: TimingConfig,
    pub trial: TrialConfig,
    pub profile_service: ProfileServiceConfig,
    pub logging: LoggingConfig,
}

impl WaypointConfig {
    /// Reject configurations the coordinator cannot honour.
    ///
    /// # Errors
    /// Returns `WaypointError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.timing.validate()?;
        if self.trial.length_days == 0 {
            return Err(WaypointError::Config("trial.length_days must be positive".into()));
        }
        if self.profile_service.max_attempts == 0 {
            return Err(WaypointError::Config(
                "profile_service.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Timer configuration for both decision layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Minimum time the splash stays up before a natural decision lands
    pub soft_settle_ms: u64,
    /// Upper bound before bootstrap forces a decision
    pub bootstrap_hard_deadline_ms: u64,
    /// Upper bound before a route gate renders optimistically
    pub gate_hard_deadline_ms: u64,
}

impl TimingConfig {
    pub const fn soft_settle(&self) -> Duration {
        Duration::from_millis(self.soft_settle_ms)
    }

    pub const fn bootstrap_hard_deadline(&self) -> Duration {
        Duration::from_millis(self.bootstrap_hard_deadline_ms)
    }

    pub const fn gate_hard_deadline(&self) -> Duration {
        Duration::from_millis(self.gate_hard_deadline_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.bootstrap_hard_deadline_ms == 0 || self.gate_hard_deadline_ms == 0 {
            return Err(WaypointError::Config("hard deadlines must be positive".into()));
        }
        if self.soft_settle_ms >= self.bootstrap_hard_deadline_ms {
            return Err(WaypointError::Config(format!(
                "timing.soft_settle_ms ({}) must be shorter than \
                 timing.bootstrap_hard_deadline_ms ({})",
                self.soft_settle_ms, self.bootstrap_hard_deadline_ms
            )));
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            soft_settle_ms: DEFAULT_SOFT_SETTLE_MS,
            bootstrap_hard_deadline_ms: DEFAULT_BOOTSTRAP_HARD_DEADLINE_MS,
            gate_hard_deadline_ms: DEFAULT_GATE_HARD_DEADLINE_MS,
        }
    }
}

/// Trial configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    pub length_days: u32,
}

impl TrialConfig {
    pub fn length(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.length_days))
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self { length_days: DEFAULT_TRIAL_DAYS }
    }
}

/// Remote profile-status service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileServiceConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub max_attempts: usize,
}

impl ProfileServiceConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProfileServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROFILE_SERVICE_URL.to_string(),
            timeout_ms: DEFAULT_PROFILE_TIMEOUT_MS,
            max_attempts: DEFAULT_PROFILE_MAX_ATTEMPTS,
        }
    }
}

/// Logging output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}
