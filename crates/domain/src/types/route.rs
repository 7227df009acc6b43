//! Route paths and the route table
//!
//! Paths are compared after normalisation, so `/app/`, `/app?tab=1` and
//! `/app#top` all name the same route as `/app`.

use std::fmt;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::{
    DEFAULT_AUTHENTICATED_PREFIX, DEFAULT_HOME_PATH, DEFAULT_LOGIN_PATH, DEFAULT_PAYWALL_PATH,
    DEFAULT_PROFILE_SETUP_PATH,
};
use crate::errors::{Result, WaypointError};
use crate::types::decision::Destination;

/// Normalised absolute application path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, type = "string"))]
pub struct RoutePath(String);

impl RoutePath {
    /// Parse and normalise a raw path.
    ///
    /// # Errors
    /// Returns `WaypointError::InvalidInput` if the path is not absolute.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !trimmed.starts_with('/') {
            return Err(WaypointError::InvalidInput(format!(
                "route path must be absolute: '{trimmed}'"
            )));
        }
        Ok(Self(normalize(trimmed)))
    }

    /// The root path `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segment-aware prefix test: `/app` covers `/app` and `/app/x` but not
    /// `/apple`.
    pub fn is_under(&self, prefix: &RoutePath) -> bool {
        if prefix.0 == "/" {
            return true;
        }
        match self.0.strip_prefix(prefix.0.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with('/'),
            None => false,
        }
    }

    fn from_known(raw: &str) -> Self {
        Self(normalize(raw))
    }
}

fn normalize(raw: &str) -> String {
    let without_fragment = raw.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();

    let mut normalized = String::with_capacity(without_query.len());
    for segment in without_query.split('/').filter(|segment| !segment.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }

    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoutePath {
    type Error = WaypointError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for RoutePath {
    type Error = WaypointError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<RoutePath> for String {
    fn from(value: RoutePath) -> Self {
        value.0
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The fixed set of paths the coordinator routes between
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    pub login: RoutePath,
    pub home: RoutePath,
    pub profile_setup: RoutePath,
    pub paywall: RoutePath,
    /// Everything under this prefix requires a complete profile
    pub authenticated_prefix: RoutePath,
}

impl RouteTable {
    /// Path a bootstrap destination lands on.
    pub const fn resolve(&self, destination: Destination) -> &RoutePath {
        match destination {
            Destination::Login => &self.login,
            Destination::ProfileSetup => &self.profile_setup,
            Destination::Home => &self.home,
        }
    }

    /// Protected paths require a settled identity before content renders.
    pub fn is_protected(&self, path: &RoutePath) -> bool {
        path.is_under(&self.authenticated_prefix) || *path == self.profile_setup
    }

    pub fn is_authenticated_area(&self, path: &RoutePath) -> bool {
        path.is_under(&self.authenticated_prefix)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            login: RoutePath::from_known(DEFAULT_LOGIN_PATH),
            home: RoutePath::from_known(DEFAULT_HOME_PATH),
            profile_setup: RoutePath::from_known(DEFAULT_PROFILE_SETUP_PATH),
            paywall: RoutePath::from_known(DEFAULT_PAYWALL_PATH),
            authenticated_prefix: RoutePath::from_known(DEFAULT_AUTHENTICATED_PREFIX),
        }
    }
}
