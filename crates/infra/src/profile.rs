//! HTTP-backed [`ProfileChecker`]
//!
//! Asks the profile service `GET {base_url}/profiles/{user_id}/status` and
//! expects `{"complete": bool}`. A 404 means the user has no profile yet.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use url::Url;
use waypoint_common::CommonError;
use waypoint_core::{ProfileCheckError, ProfileChecker};
use waypoint_domain::{Identity, ProfileServiceConfig, ProfileStatus, WaypointError};

use crate::errors::backend_error;
use crate::http::HttpClient;

const SERVICE: &str = "profile_service";

pub struct HttpProfileChecker {
    client: HttpClient,
    base_url: Url,
}

impl HttpProfileChecker {
    /// # Errors
    /// Returns `WaypointError::Config` for an unusable base URL and
    /// `WaypointError::Network` if the HTTP client cannot be built.
    pub fn new(config: &ProfileServiceConfig) -> Result<Self, WaypointError> {
        Self::with_client(HttpClient::for_profile_service(config)?, &config.base_url)
    }

    pub fn with_client(client: HttpClient, base_url: &str) -> Result<Self, WaypointError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| WaypointError::Config(format!("invalid profile service URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(WaypointError::Config(format!(
                "profile service URL cannot carry a path: {base_url}"
            )));
        }
        Ok(Self { client, base_url })
    }

    fn status_url(&self, user_id: &str) -> Result<Url, ProfileCheckError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CommonError::config("profile service URL cannot carry a path"))?
            .pop_if_empty()
            .extend(["profiles", user_id, "status"]);
        Ok(url)
    }
}

#[async_trait]
impl ProfileChecker for HttpProfileChecker {
    async fn is_complete(&self, identity: &Identity) -> Result<bool, ProfileCheckError> {
        let url = self.status_url(&identity.user_id)?;
        let response = self
            .client
            .send(self.client.request(Method::GET, url))
            .await
            .map_err(|e| backend_error(SERVICE, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => {
                let body: ProfileStatus =
                    response.json().await.map_err(|e| ProfileCheckError::Parse(e.to_string()))?;
                Ok(body.complete)
            }
            status => Err(ProfileCheckError::Status { status: status.as_u16() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(base: &str) -> HttpProfileChecker {
        HttpProfileChecker::with_client(HttpClient::builder().build().unwrap(), base).unwrap()
    }

    #[test]
    fn status_url_appends_segments() {
        assert_eq!(
            checker("http://profiles.local/api/").status_url("u-1").unwrap().as_str(),
            "http://profiles.local/api/profiles/u-1/status"
        );
        assert_eq!(
            checker("http://profiles.local").status_url("a b/c").unwrap().as_str(),
            "http://profiles.local/profiles/a%20b%2Fc/status"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        let client = HttpClient::builder().build().unwrap();
        assert!(HttpProfileChecker::with_client(client.clone(), "not a url").is_err());
        assert!(HttpProfileChecker::with_client(client, "mailto:ops@example.com").is_err());
    }
}
