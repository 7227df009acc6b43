//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use waypoint_common::CommonError;
use waypoint_domain::WaypointError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub WaypointError);

impl From<InfraError> for WaypointError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<WaypointError> for InfraError {
    fn from(value: WaypointError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoWaypointError {
    fn into_waypoint(self) -> WaypointError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → WaypointError */
/* -------------------------------------------------------------------------- */

impl IntoWaypointError for HttpError {
    fn into_waypoint(self) -> WaypointError {
        if self.is_timeout() {
            return WaypointError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return WaypointError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => WaypointError::Auth(message),
                404 => WaypointError::NotFound(message),
                400..=499 if code != 429 => WaypointError::InvalidInput(message),
                _ => WaypointError::Network(message),
            };
        }

        WaypointError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_waypoint())
    }
}

/* -------------------------------------------------------------------------- */
/* WaypointError → CommonError (for port error types) */
/* -------------------------------------------------------------------------- */

/// Describe a failed call to `service` in the shared error vocabulary.
///
/// Only network failures stay retryable; everything else is a definite
/// answer from the backend.
pub fn backend_error(service: &str, error: WaypointError) -> CommonError {
    let retryable = matches!(error, WaypointError::Network(_));
    CommonError::backend(service, error.to_string(), retryable)
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use waypoint_common::ErrorClassification;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn status_error(status: StatusCode) -> HttpError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err()
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let mapped: WaypointError =
            InfraError::from(status_error(StatusCode::UNAUTHORIZED).await).into();
        match mapped {
            WaypointError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_status_429_stays_a_network_error() {
        let mapped: WaypointError =
            InfraError::from(status_error(StatusCode::TOO_MANY_REQUESTS).await).into();
        assert!(matches!(mapped, WaypointError::Network(_)), "got {mapped:?}");
    }

    #[test]
    fn backend_error_keeps_network_failures_retryable() {
        let transient = backend_error("profile_service", WaypointError::Network("reset".into()));
        let definite = backend_error("profile_service", WaypointError::Auth("HTTP 401".into()));

        assert!(transient.is_retryable());
        assert!(!definite.is_retryable());
        assert!(transient.to_string().contains("profile_service"));
    }
}
