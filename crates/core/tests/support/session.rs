use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::watch;
use waypoint_core::{
    AuthSource, ProfileCheckError, ProfileChecker, SubscriptionState, SubscriptionStateUnavailable,
};
use waypoint_domain::{AuthSnapshot, Identity};

/// Auth source driven by the test.
pub struct ScriptedAuth {
    sender: Arc<watch::Sender<AuthSnapshot>>,
}

impl ScriptedAuth {
    pub fn loading() -> Arc<Self> {
        Self::starting_with(AuthSnapshot::loading())
    }

    pub fn signed_in(user_id: &str) -> Arc<Self> {
        Self::starting_with(AuthSnapshot::signed_in(Identity::new(user_id)))
    }

    /// Session that knows its user but is stuck refreshing tokens.
    pub fn refreshing(user_id: &str) -> Arc<Self> {
        Self::starting_with(AuthSnapshot { identity: Some(Identity::new(user_id)), loading: true })
    }

    pub fn signed_out() -> Arc<Self> {
        Self::starting_with(AuthSnapshot::signed_out())
    }

    fn starting_with(snapshot: AuthSnapshot) -> Arc<Self> {
        let (sender, _) = watch::channel(snapshot);
        Arc::new(Self { sender: Arc::new(sender) })
    }

    pub fn set(&self, snapshot: AuthSnapshot) {
        self.sender.send_replace(snapshot);
    }

    /// Publish `snapshot` once `delay` has elapsed.
    pub fn set_after(&self, delay: Duration, snapshot: AuthSnapshot) {
        let sender = Arc::clone(&self.sender);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sender.send_replace(snapshot);
        });
    }
}

impl AuthSource for ScriptedAuth {
    fn current(&self) -> AuthSnapshot {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.sender.subscribe()
    }
}

/// Profile checker answering a fixed result after a fixed delay.
pub struct ScriptedProfileChecker {
    answer: Option<Result<bool, ProfileCheckError>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedProfileChecker {
    pub fn complete() -> Arc<Self> {
        Self::answering(Ok(true), Duration::ZERO)
    }

    pub fn incomplete() -> Arc<Self> {
        Self::answering(Ok(false), Duration::ZERO)
    }

    pub fn failing() -> Arc<Self> {
        Self::answering(Err(ProfileCheckError::Status { status: 502 }), Duration::ZERO)
    }

    pub fn answering(answer: Result<bool, ProfileCheckError>, delay: Duration) -> Arc<Self> {
        Arc::new(Self { answer: Some(answer), delay, calls: AtomicUsize::new(0) })
    }

    /// Never answers; only a deadline can move past it.
    pub fn stalled() -> Arc<Self> {
        Arc::new(Self { answer: None, delay: Duration::ZERO, calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileChecker for ScriptedProfileChecker {
    async fn is_complete(&self, _identity: &Identity) -> Result<bool, ProfileCheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        match &self.answer {
            Some(answer) => answer.clone(),
            None => std::future::pending().await,
        }
    }
}

/// Trial state with switchable answers.
#[derive(Default)]
pub struct ScriptedSubscription {
    expired: AtomicBool,
    paid: AtomicBool,
    unavailable: AtomicBool,
    started: Mutex<Vec<String>>,
    start_calls: AtomicUsize,
}

impl ScriptedSubscription {
    pub fn within_trial() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn expired_unpaid() -> Arc<Self> {
        let subscription = Self::default();
        subscription.expired.store(true, Ordering::SeqCst);
        Arc::new(subscription)
    }

    pub fn expired_paid() -> Arc<Self> {
        let subscription = Self::default();
        subscription.expired.store(true, Ordering::SeqCst);
        subscription.paid.store(true, Ordering::SeqCst);
        Arc::new(subscription)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    /// Users with a started trial, each listed once
    pub fn started_users(&self) -> Vec<String> {
        self.started.lock().clone()
    }

    fn check(&self) -> Result<(), SubscriptionStateUnavailable> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(SubscriptionStateUnavailable::because("scripted outage"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SubscriptionState for ScriptedSubscription {
    async fn start_trial(&self, identity: &Identity) -> Result<(), SubscriptionStateUnavailable> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut started = self.started.lock();
        if !started.contains(&identity.user_id) {
            started.push(identity.user_id.clone());
        }
        Ok(())
    }

    async fn is_expired(&self, _identity: &Identity) -> Result<bool, SubscriptionStateUnavailable> {
        self.check()?;
        Ok(self.expired.load(Ordering::SeqCst))
    }

    async fn is_paid(&self, _identity: &Identity) -> Result<bool, SubscriptionStateUnavailable> {
        self.check()?;
        Ok(self.paid.load(Ordering::SeqCst))
    }
}
