//! Session-backed [`AuthSource`]
//!
//! Holds the current snapshot in a `watch` channel. Sign-in and sign-out
//! replace the identity wholesale; a token refresh flips the snapshot back to
//! loading until [`WatchAuthSource::finish_refresh`] settles it again.

use tokio::sync::watch;
use tracing::info;
use waypoint_core::AuthSource;
use waypoint_domain::{AuthSnapshot, Identity};

pub struct WatchAuthSource {
    sender: watch::Sender<AuthSnapshot>,
}

impl WatchAuthSource {
    /// Source that has not resolved the session yet
    pub fn new() -> Self {
        Self::with_snapshot(AuthSnapshot::loading())
    }

    pub fn with_snapshot(snapshot: AuthSnapshot) -> Self {
        let (sender, _) = watch::channel(snapshot);
        Self { sender }
    }

    pub fn sign_in(&self, identity: Identity) {
        info!(user_id = %identity.user_id, provider = ?identity.provider, "signed in");
        self.sender.send_replace(AuthSnapshot::signed_in(identity));
    }

    pub fn sign_out(&self) {
        info!("signed out");
        self.sender.send_replace(AuthSnapshot::signed_out());
    }

    /// Mark the session as resolving again; the identity is kept but is not
    /// meaningful until the refresh finishes.
    pub fn begin_refresh(&self) {
        self.sender.send_modify(|snapshot| snapshot.loading = true);
    }

    pub fn finish_refresh(&self) {
        self.sender.send_modify(|snapshot| snapshot.loading = false);
    }
}

impl Default for WatchAuthSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthSource for WatchAuthSource {
    fn current(&self) -> AuthSnapshot {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.sender.subscribe()
    }
}
