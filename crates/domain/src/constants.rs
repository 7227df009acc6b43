//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Route defaults
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_HOME_PATH: &str = "/app/home";
pub const DEFAULT_PROFILE_SETUP_PATH: &str = "/setup-profile";
pub const DEFAULT_PAYWALL_PATH: &str = "/app/subscribe";
pub const DEFAULT_AUTHENTICATED_PREFIX: &str = "/app";

// Bootstrap timers
pub const DEFAULT_SOFT_SETTLE_MS: u64 = 800;
pub const DEFAULT_BOOTSTRAP_HARD_DEADLINE_MS: u64 = 4000;

// Route gate safety timer (independent from bootstrap)
pub const DEFAULT_GATE_HARD_DEADLINE_MS: u64 = 4000;

// Trial
pub const DEFAULT_TRIAL_DAYS: u32 = 7;

// Profile service
pub const DEFAULT_PROFILE_SERVICE_URL: &str = "http://localhost:8080";
pub const DEFAULT_PROFILE_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_PROFILE_MAX_ATTEMPTS: usize = 2;

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
