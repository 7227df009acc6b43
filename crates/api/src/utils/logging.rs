use std::time::Duration;

use tracing::{info, warn};
use waypoint_common::time::duration_ms;
use waypoint_domain::WaypointError;

/// Log the outcome of a command execution with structured fields.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = duration_ms(elapsed);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `WaypointError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &WaypointError) -> &'static str {
    match error {
        WaypointError::Config(_) => "config",
        WaypointError::Network(_) => "network",
        WaypointError::Auth(_) => "auth",
        WaypointError::NotFound(_) => "not_found",
        WaypointError::InvalidInput(_) => "invalid_input",
        WaypointError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(error_label(&WaypointError::InvalidInput("x".into())), "invalid_input");
        assert_eq!(error_label(&WaypointError::Config("x".into())), "config");
    }
}
