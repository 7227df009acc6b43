//! In-memory [`SubscriptionState`]
//!
//! Keeps one [`TrialState`] per user. Trial starts are stamped from the
//! injected [`Clock`] and expiry is recomputed on every read.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};
use waypoint_common::{Clock, SystemClock};
use waypoint_core::{SubscriptionState, SubscriptionStateUnavailable};
use waypoint_domain::{Identity, TrialConfig, TrialState};

pub struct InMemorySubscriptionStore {
    trials: RwLock<HashMap<String, TrialState>>,
    clock: Arc<dyn Clock>,
    trial_length: chrono::Duration,
    available: AtomicBool,
}

impl InMemorySubscriptionStore {
    pub fn new(config: &TrialConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &TrialConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            trials: RwLock::new(HashMap::new()),
            clock,
            trial_length: config.length(),
            available: AtomicBool::new(true),
        }
    }

    /// Record a payment for `user_id`, creating the record if needed.
    pub fn mark_paid(&self, user_id: &str) {
        self.trials.write().entry(user_id.to_string()).or_default().paid = true;
        info!(user_id, "marked as paid");
    }

    /// Simulate the backing store going away (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn trial(&self, user_id: &str) -> Option<TrialState> {
        self.trials.read().get(user_id).cloned()
    }

    fn ensure_available(&self) -> Result<(), SubscriptionStateUnavailable> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SubscriptionStateUnavailable::because("in-memory store marked unavailable"))
        }
    }

    fn read<T>(&self, user_id: &str, f: impl FnOnce(&TrialState) -> T) -> T {
        let trials = self.trials.read();
        let state = trials.get(user_id).cloned().unwrap_or_default();
        f(&state)
    }
}

#[async_trait]
impl SubscriptionState for InMemorySubscriptionStore {
    async fn start_trial(&self, identity: &Identity) -> Result<(), SubscriptionStateUnavailable> {
        self.ensure_available()?;
        let now = self.clock.now_utc();
        let started = self.trials.write().entry(identity.user_id.clone()).or_default().start(now);
        if started {
            info!(user_id = %identity.user_id, started_at = %now, "trial started");
        } else {
            debug!(user_id = %identity.user_id, "trial already running");
        }
        Ok(())
    }

    async fn is_expired(&self, identity: &Identity) -> Result<bool, SubscriptionStateUnavailable> {
        self.ensure_available()?;
        let now = self.clock.now_utc();
        Ok(self.read(&identity.user_id, |state| state.is_expired(now, self.trial_length)))
    }

    async fn is_paid(&self, identity: &Identity) -> Result<bool, SubscriptionStateUnavailable> {
        self.ensure_available()?;
        Ok(self.read(&identity.user_id, |state| state.paid))
    }
}
