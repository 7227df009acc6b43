//! Coordinator error taxonomy
//!
//! None of these ever reach the user. Each has a fail-open default applied
//! where it is caught:
//!
//! | Error | Recovered as |
//! |-------|--------------|
//! | [`AuthResolutionTimeout`] | forced decision, absent identity treated as signed out |
//! | [`ProfileCheckError`] | profile treated as complete |
//! | [`SubscriptionStateUnavailable`] | user treated as within trial |

use std::time::Duration;

use thiserror::Error;
use waypoint_common::{impl_error_classification, CommonError, ErrorClassification, ErrorSeverity};

/// The auth source did not settle before the hard safety timer.
///
/// Only constructed to describe the forced path in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("auth source still loading after {waited:?}")]
pub struct AuthResolutionTimeout {
    pub waited: Duration,
}

impl ErrorClassification for AuthResolutionTimeout {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Failure to determine profile completeness
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileCheckError {
    #[error("profile service answered with status {status}")]
    Status { status: u16 },

    #[error("profile response could not be parsed: {0}")]
    Parse(String),

    #[error(transparent)]
    Common(#[from] CommonError),
}

impl_error_classification!(ProfileCheckError, Common,
    ProfileCheckError::Status { status } => {
        retryable: *status >= 500,
        severity: ErrorSeverity::Warning,
        critical: false,
    },
    ProfileCheckError::Parse(_) => {
        retryable: false,
        severity: ErrorSeverity::Error,
        critical: false,
    }
);

/// The subscription state source could not answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("subscription state unavailable: {0}")]
pub struct SubscriptionStateUnavailable(#[from] pub CommonError);

impl SubscriptionStateUnavailable {
    pub fn because(reason: impl Into<String>) -> Self {
        Self(CommonError::unavailable_because("subscription_state", reason))
    }
}

impl ErrorClassification for SubscriptionStateUnavailable {
    fn is_retryable(&self) -> bool {
        self.0.is_retryable()
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        self.0.retry_after()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_status_errors_retry_only_on_server_side() {
        assert!(ProfileCheckError::Status { status: 503 }.is_retryable());
        assert!(!ProfileCheckError::Status { status: 404 }.is_retryable());
        assert!(!ProfileCheckError::Parse("eof".into()).is_retryable());
    }

    #[test]
    fn profile_common_errors_delegate_classification() {
        let timeout = CommonError::timeout("profile_check", Duration::from_secs(3));
        let err = ProfileCheckError::from(timeout);

        assert!(err.is_retryable());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.to_string(), "Operation 'profile_check' timed out after 3s");
    }

    #[test]
    fn subscription_unavailable_is_a_warning() {
        let err = SubscriptionStateUnavailable::because("store offline");

        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("store offline"));
    }

    #[test]
    fn auth_timeout_describes_wait() {
        let err = AuthResolutionTimeout { waited: Duration::from_millis(4000) };
        assert_eq!(err.to_string(), "auth source still loading after 4s");
    }
}
