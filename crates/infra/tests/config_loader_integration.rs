//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! the environment.

use std::io::Write;
use std::time::Duration;

use serial_test::serial;
use tempfile::{Builder, NamedTempFile};
use waypoint_domain::WaypointError;
use waypoint_infra::config;

const ENV_KEYS: [&str; 6] = [
    "WAYPOINT_PROFILE_SERVICE_URL",
    "WAYPOINT_SOFT_SETTLE_MS",
    "WAYPOINT_BOOTSTRAP_HARD_DEADLINE_MS",
    "WAYPOINT_LOGIN_PATH",
    "WAYPOINT_TRIAL_DAYS",
    "WAYPOINT_LOG_JSON",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

fn config_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    file
}

#[test]
fn load_config_from_toml_file() {
    let file = config_file(
        ".toml",
        r#"
[routes]
login = "/sign-in"
paywall = "/app/billing"

[timing]
soft_settle_ms = 500
bootstrap_hard_deadline_ms = 3000

[profile_service]
base_url = "https://profiles.example.com"
max_attempts = 3
"#,
    );

    let config = config::load_from_file(Some(file.path().to_path_buf())).expect("config");

    assert_eq!(config.routes.login.as_str(), "/sign-in");
    assert_eq!(config.routes.paywall.as_str(), "/app/billing");
    assert_eq!(config.routes.home.as_str(), "/app/home");
    assert_eq!(config.timing.soft_settle(), Duration::from_millis(500));
    assert_eq!(config.timing.gate_hard_deadline(), Duration::from_millis(4000));
    assert_eq!(config.profile_service.max_attempts, 3);
}

#[test]
fn load_config_from_json_file() {
    let file = config_file(
        ".json",
        r#"{
            "trial": { "length_days": 14 },
            "logging": { "level": "debug", "json": true }
        }"#,
    );

    let config = config::load_from_file(Some(file.path().to_path_buf())).expect("config");

    assert_eq!(config.trial.length_days, 14);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn file_with_relative_route_is_rejected() {
    let file = config_file(".toml", "[routes]\nlogin = \"login\"\n");

    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, WaypointError::Config(_)), "got {err:?}");
}

#[test]
fn file_failing_validation_is_rejected() {
    let file = config_file(
        ".toml",
        "[timing]\nsoft_settle_ms = 5000\nbootstrap_hard_deadline_ms = 4000\n",
    );

    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, WaypointError::Config(msg) if msg.contains("soft_settle_ms")));
}

#[test]
#[serial]
fn load_from_env_overrides_defaults() {
    clear_env();
    std::env::set_var("WAYPOINT_PROFILE_SERVICE_URL", "http://profiles.internal:9000");
    std::env::set_var("WAYPOINT_SOFT_SETTLE_MS", "250");
    std::env::set_var("WAYPOINT_LOGIN_PATH", "/auth/login/");
    std::env::set_var("WAYPOINT_LOG_JSON", "true");

    let config = config::load_from_env().expect("config from env");
    clear_env();

    assert_eq!(config.profile_service.base_url, "http://profiles.internal:9000");
    assert_eq!(config.timing.soft_settle_ms, 250);
    assert_eq!(config.routes.login.as_str(), "/auth/login");
    assert!(config.logging.json);
    assert_eq!(config.trial.length_days, 7);
}

#[test]
#[serial]
fn load_from_env_requires_service_url() {
    clear_env();

    let err = config::load_from_env().unwrap_err();
    assert!(matches!(
        err,
        WaypointError::Config(msg) if msg.contains("WAYPOINT_PROFILE_SERVICE_URL")
    ));
}

#[test]
#[serial]
fn load_from_env_rejects_invalid_numbers() {
    clear_env();
    std::env::set_var("WAYPOINT_PROFILE_SERVICE_URL", "http://localhost:8080");
    std::env::set_var("WAYPOINT_TRIAL_DAYS", "a week");

    let result = config::load_from_env();
    clear_env();

    assert!(matches!(
        result,
        Err(WaypointError::Config(msg)) if msg.contains("WAYPOINT_TRIAL_DAYS")
    ));
}

#[test]
#[serial]
fn load_from_env_rejects_bad_deadlines() {
    clear_env();
    std::env::set_var("WAYPOINT_PROFILE_SERVICE_URL", "http://localhost:8080");
    std::env::set_var("WAYPOINT_BOOTSTRAP_HARD_DEADLINE_MS", "0");

    let result = config::load_from_env();
    clear_env();

    assert!(result.is_err());
}
