//! Session capability ports
//!
//! The coordinator never fetches identity, profile or trial state itself.
//! It consumes these three capabilities, and every call into them is a
//! suspension point where timers and other events may run first.
//!
//! # Example
//!
//! ```no_run
//! use waypoint_core::{settled_snapshot, AuthSource};
//!
//! async fn who_is_here(auth: &dyn AuthSource) -> Option<String> {
//!     let snapshot = settled_snapshot(auth).await?;
//!     snapshot.identity.map(|identity| identity.user_id)
//! }
//! ```

use async_trait::async_trait;
use tokio::sync::watch;
use waypoint_domain::{AuthSnapshot, Identity};

use crate::errors::{ProfileCheckError, SubscriptionStateUnavailable};

/// Source of the current identity.
///
/// Resolves once per session and may flip back to `loading` on token
/// refresh. Consumers subscribe to observe changes.
pub trait AuthSource: Send + Sync {
    /// Latest snapshot, possibly still loading
    fn current(&self) -> AuthSnapshot;

    /// Receiver that observes every subsequent snapshot
    fn subscribe(&self) -> watch::Receiver<AuthSnapshot>;
}

/// Port for the profile-completeness check
#[async_trait]
pub trait ProfileChecker: Send + Sync {
    /// Whether the identity has finished profile setup.
    ///
    /// # Errors
    /// Returns `ProfileCheckError` on transport or parsing failure.
    async fn is_complete(&self, identity: &Identity) -> Result<bool, ProfileCheckError>;
}

/// Port for trial and payment state
#[async_trait]
pub trait SubscriptionState: Send + Sync {
    /// Start the trial for this user. A second call for the same user is a
    /// no-op and leaves the original start time untouched.
    async fn start_trial(&self, identity: &Identity) -> Result<(), SubscriptionStateUnavailable>;

    /// Whether the trial has run past its fixed length
    async fn is_expired(&self, identity: &Identity) -> Result<bool, SubscriptionStateUnavailable>;

    /// Whether the user has paid
    async fn is_paid(&self, identity: &Identity) -> Result<bool, SubscriptionStateUnavailable>;
}

/// Wait until the auth source reports a settled snapshot.
///
/// Returns `None` if the source goes away while still loading; callers then
/// leave the decision to their safety timer.
pub async fn settled_snapshot(source: &dyn AuthSource) -> Option<AuthSnapshot> {
    let mut receiver = source.subscribe();
    let settled = receiver.wait_for(AuthSnapshot::is_settled).await.ok()?;
    Some(settled.clone())
}
