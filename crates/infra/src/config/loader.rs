//! Configuration loader
//!
//! Loads the coordinator configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Attempts to load from environment variables (after `.env`, if any)
//! 2. Falls back to the first config file found by [`probe_config_paths`]
//! 3. Uses built-in defaults when neither source exists
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! `WAYPOINT_PROFILE_SERVICE_URL` selects the environment source; every other
//! variable is optional and falls back to its default.
//! - `WAYPOINT_PROFILE_SERVICE_URL`: profile-status service base URL
//! - `WAYPOINT_PROFILE_TIMEOUT_MS`, `WAYPOINT_PROFILE_MAX_ATTEMPTS`
//! - `WAYPOINT_SOFT_SETTLE_MS`, `WAYPOINT_BOOTSTRAP_HARD_DEADLINE_MS`,
//!   `WAYPOINT_GATE_HARD_DEADLINE_MS`
//! - `WAYPOINT_TRIAL_DAYS`
//! - `WAYPOINT_LOGIN_PATH`, `WAYPOINT_HOME_PATH`, `WAYPOINT_PROFILE_SETUP_PATH`,
//!   `WAYPOINT_PAYWALL_PATH`, `WAYPOINT_AUTHENTICATED_PREFIX`
//! - `WAYPOINT_LOG_LEVEL`, `WAYPOINT_LOG_JSON`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./waypoint.{toml,json}` and `./config.{toml,json}`
//! 2. The same names one and two directories up
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use url::Url;
use waypoint_domain::{Result, RoutePath, WaypointConfig, WaypointError};

const FILE_NAMES: [&str; 4] = ["waypoint.toml", "waypoint.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy.
///
/// # Errors
/// Returns `WaypointError::Config` if the selected source is malformed or
/// the resulting configuration fails validation.
pub fn load() -> Result<WaypointConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            return Ok(config);
        }
        Err(e) => tracing::debug!(error = %e, "Environment incomplete, trying file"),
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No config file found, using defaults");
            let config = WaypointConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Load configuration from `WAYPOINT_*` environment variables.
///
/// # Errors
/// Returns `WaypointError::Config` if `WAYPOINT_PROFILE_SERVICE_URL` is
/// missing or any variable holds an invalid value.
pub fn load_from_env() -> Result<WaypointConfig> {
    let mut config = WaypointConfig::default();

    let base_url = env_var("WAYPOINT_PROFILE_SERVICE_URL")?;
    Url::parse(&base_url).map_err(|e| {
        WaypointError::Config(format!("Invalid WAYPOINT_PROFILE_SERVICE_URL '{base_url}': {e}"))
    })?;
    config.profile_service.base_url = base_url;

    override_parsed("WAYPOINT_PROFILE_TIMEOUT_MS", &mut config.profile_service.timeout_ms)?;
    override_parsed("WAYPOINT_PROFILE_MAX_ATTEMPTS", &mut config.profile_service.max_attempts)?;
    override_parsed("WAYPOINT_SOFT_SETTLE_MS", &mut config.timing.soft_settle_ms)?;
    override_parsed(
        "WAYPOINT_BOOTSTRAP_HARD_DEADLINE_MS",
        &mut config.timing.bootstrap_hard_deadline_ms,
    )?;
    override_parsed("WAYPOINT_GATE_HARD_DEADLINE_MS", &mut config.timing.gate_hard_deadline_ms)?;
    override_parsed("WAYPOINT_TRIAL_DAYS", &mut config.trial.length_days)?;

    override_route("WAYPOINT_LOGIN_PATH", &mut config.routes.login)?;
    override_route("WAYPOINT_HOME_PATH", &mut config.routes.home)?;
    override_route("WAYPOINT_PROFILE_SETUP_PATH", &mut config.routes.profile_setup)?;
    override_route("WAYPOINT_PAYWALL_PATH", &mut config.routes.paywall)?;
    override_route("WAYPOINT_AUTHENTICATED_PREFIX", &mut config.routes.authenticated_prefix)?;

    if let Ok(level) = std::env::var("WAYPOINT_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("WAYPOINT_LOG_JSON", config.logging.json);

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations. The format is picked
/// by extension; missing sections and fields take their defaults.
///
/// # Errors
/// Returns `WaypointError::Config` if the file is missing, unreadable,
/// malformed or fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<WaypointConfig> {
    let config_path = match path {
        Some(p) if !p.exists() => {
            return Err(WaypointError::Config(format!("Config file not found: {}", p.display())));
        }
        Some(p) => p,
        None => probe_config_paths().ok_or_else(|| {
            WaypointError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| WaypointError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<WaypointConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WaypointError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| WaypointError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(WaypointError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the standard locations, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    let found = candidates(&roots).find(|path| path.exists());
    found
}

fn candidates(roots: &[PathBuf]) -> impl Iterator<Item = PathBuf> + '_ {
    roots.iter().flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        WaypointError::Config(format!("Missing required environment variable: {key}"))
    })
}

fn override_parsed<T>(key: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(raw) = std::env::var(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|e| WaypointError::Config(format!("Invalid {key} '{raw}': {e}")))?;
    }
    Ok(())
}

fn override_route(key: &str, target: &mut RoutePath) -> Result<()> {
    if let Ok(raw) = std::env::var(key) {
        *target = RoutePath::parse(&raw)
            .map_err(|e| WaypointError::Config(format!("Invalid {key}: {e}")))?;
    }
    Ok(())
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
