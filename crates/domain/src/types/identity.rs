//! Identity types
//!
//! An identity is replaced wholesale on sign-in or sign-out and never
//! partially mutated, so both types here are plain values.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Opaque reference to the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Identity {
    pub user_id: String,
    /// Sign-in provider (e.g. "google", "password"), when known
    pub provider: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), provider: None }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}

/// What the auth source currently knows.
///
/// `loading == true` means the identity field is not yet meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct AuthSnapshot {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl AuthSnapshot {
    /// Snapshot for a session that has not resolved yet.
    pub const fn loading() -> Self {
        Self { identity: None, loading: true }
    }

    pub const fn signed_in(identity: Identity) -> Self {
        Self { identity: Some(identity), loading: false }
    }

    pub const fn signed_out() -> Self {
        Self { identity: None, loading: false }
    }

    /// True once the source has finished resolving, with or without a user.
    pub const fn is_settled(&self) -> bool {
        !self.loading
    }

    /// Identity if the snapshot is settled and a user is present.
    pub fn settled_identity(&self) -> Option<&Identity> {
        if self.loading {
            None
        } else {
            self.identity.as_ref()
        }
    }
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self::loading()
    }
}
