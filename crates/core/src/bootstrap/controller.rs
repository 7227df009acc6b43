use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use waypoint_common::time::duration_ms;
use waypoint_common::{CommonError, ErrorClassification};
use waypoint_domain::constants::{DEFAULT_BOOTSTRAP_HARD_DEADLINE_MS, DEFAULT_SOFT_SETTLE_MS};
use waypoint_domain::{
    AuthSnapshot, DecisionId, Destination, Identity, ProfileStatus, RenderDecision, RouteTable,
    RoutePath, TimingConfig,
};

use super::events::{BootstrapEvent, EventSources};
use crate::decision::{CommitOutcome, DecisionPoint};
use crate::errors::AuthResolutionTimeout;
use crate::navigation_ports::Navigator;
use crate::session_ports::{AuthSource, ProfileChecker};

/// Bootstrap timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapTiming {
    /// Minimum splash time before a natural decision commits
    pub soft_settle: Duration,
    /// Upper bound before a forced decision
    pub hard_deadline: Duration,
}

impl Default for BootstrapTiming {
    fn default() -> Self {
        Self {
            soft_settle: Duration::from_millis(DEFAULT_SOFT_SETTLE_MS),
            hard_deadline: Duration::from_millis(DEFAULT_BOOTSTRAP_HARD_DEADLINE_MS),
        }
    }
}

impl From<&TimingConfig> for BootstrapTiming {
    fn from(config: &TimingConfig) -> Self {
        Self { soft_settle: config.soft_settle(), hard_deadline: config.bootstrap_hard_deadline() }
    }
}

/// What a bootstrap decision settled on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub decision_id: DecisionId,
    pub destination: Destination,
    /// Render decision held by the decision point after the run
    pub decision: RenderDecision,
    /// True when the hard deadline made the call
    pub forced: bool,
    pub elapsed: Duration,
}

/// Decides the first landing screen after application start.
///
/// Auth changes, profile results and both timers are funnelled into one
/// event queue and handled in arrival order, so no interleaving can produce
/// a second navigation.
pub struct BootstrapController {
    auth: Arc<dyn AuthSource>,
    profiles: Arc<dyn ProfileChecker>,
    navigator: Arc<dyn Navigator>,
    routes: RouteTable,
    timing: BootstrapTiming,
}

/// Per-decision progress. Dropped with the run.
#[derive(Default)]
struct BootstrapState {
    snapshot: AuthSnapshot,
    /// Last identity reported by the session, kept across refreshes
    last_identity: Option<Identity>,
    pending: Option<Destination>,
    soft_elapsed: bool,
    profile_results: HashMap<String, ProfileStatus>,
    profile_requested: HashSet<String>,
}

impl BootstrapController {
    pub fn new(
        auth: Arc<dyn AuthSource>,
        profiles: Arc<dyn ProfileChecker>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            profiles,
            navigator,
            routes: RouteTable::default(),
            timing: BootstrapTiming::default(),
        }
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_timing(mut self, timing: BootstrapTiming) -> Self {
        self.timing = timing;
        self
    }

    pub const fn timing(&self) -> BootstrapTiming {
        self.timing
    }

    /// Open the decision point for `entry` without deciding yet, so a view
    /// can subscribe to its render channel first.
    pub fn open(&self, entry: RoutePath) -> DecisionPoint {
        DecisionPoint::open(entry, Arc::clone(&self.navigator))
    }

    /// Open a decision point for `entry` and drive it to its single commit.
    pub async fn run(&self, entry: RoutePath) -> BootstrapOutcome {
        let point = self.open(entry);
        self.decide(&point).await
    }

    /// Like [`run`](Self::run), abandoning the decision if `cancel` fires
    /// before it commits.
    pub async fn run_until(
        &self,
        entry: RoutePath,
        cancel: &CancellationToken,
    ) -> Option<BootstrapOutcome> {
        let point = self.open(entry);
        self.decide_until(&point, cancel).await
    }

    pub async fn decide(&self, point: &DecisionPoint) -> BootstrapOutcome {
        match self.drive(point, std::future::pending::<Infallible>()).await {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }

    /// Returns `None` when cancelled before commit. Timers and pending
    /// checks are torn down and no navigation is issued.
    pub async fn decide_until(
        &self,
        point: &DecisionPoint,
        cancel: &CancellationToken,
    ) -> Option<BootstrapOutcome> {
        match self.drive(point, cancel.cancelled()).await {
            Ok(outcome) => Some(outcome),
            Err(()) => {
                let cancelled = CommonError::task_cancelled_with_reason(
                    point.id().to_string(),
                    "view left before bootstrap committed",
                );
                info!(
                    decision_id = %point.id(),
                    path = %point.path(),
                    elapsed_ms = duration_ms(point.elapsed()),
                    reason = %cancelled,
                    "bootstrap abandoned before commit"
                );
                None
            }
        }
    }

    async fn drive<C, E>(&self, point: &DecisionPoint, cancel: C) -> Result<BootstrapOutcome, E>
    where
        C: Future<Output = E>,
    {
        let started = Instant::now();
        let (sender, mut events) = mpsc::unbounded_channel();
        let mut sources = EventSources::new(sender);
        let mut state = BootstrapState::default();

        if self.timing.soft_settle.is_zero() {
            state.soft_elapsed = true;
        } else {
            sources.timer(started + self.timing.soft_settle, BootstrapEvent::SoftSettleElapsed);
        }
        sources.timer(started + self.timing.hard_deadline, BootstrapEvent::HardDeadlineElapsed);
        sources.auth(self.auth.subscribe());

        tokio::pin!(cancel);
        loop {
            let event = tokio::select! {
                biased;
                reason = &mut cancel => return Err(reason),
                event = events.recv() => event.unwrap_or(BootstrapEvent::HardDeadlineElapsed),
            };
            debug!(decision_id = %point.id(), event = ?event, "bootstrap event");

            if let Some(outcome) = self.apply(point, &mut state, &mut sources, event) {
                return Ok(outcome);
            }
        }
    }

    fn apply(
        &self,
        point: &DecisionPoint,
        state: &mut BootstrapState,
        sources: &mut EventSources,
        event: BootstrapEvent,
    ) -> Option<BootstrapOutcome> {
        match event {
            BootstrapEvent::Auth(snapshot) => {
                state.pending = None;
                if let Some(identity) = &snapshot.identity {
                    state.last_identity = Some(identity.clone());
                } else if snapshot.is_settled() {
                    state.last_identity = None;
                }

                if let Some(identity) = snapshot.settled_identity() {
                    if let Some(&status) = state.profile_results.get(&identity.user_id) {
                        state.pending = Some(destination_for(status));
                    } else if state.profile_requested.insert(identity.user_id.clone()) {
                        sources.profile_check(Arc::clone(&self.profiles), identity.clone());
                    }
                } else if snapshot.is_settled() {
                    state.pending = Some(Destination::Login);
                }
                state.snapshot = snapshot;
            }
            BootstrapEvent::Profile { user_id, result } => {
                let status = match result {
                    Ok(complete) => ProfileStatus::from(complete),
                    Err(error) => {
                        warn!(
                            decision_id = %point.id(),
                            error = %error,
                            severity = %error.severity(),
                            "profile check failed, assuming complete"
                        );
                        ProfileStatus::assumed_complete()
                    }
                };
                state.profile_results.insert(user_id.clone(), status);

                let current = state.snapshot.settled_identity().map(|identity| &identity.user_id);
                if current == Some(&user_id) {
                    state.pending = Some(destination_for(status));
                } else {
                    debug!(
                        decision_id = %point.id(),
                        "profile result for a replaced or refreshing identity held back"
                    );
                }
            }
            BootstrapEvent::SoftSettleElapsed => state.soft_elapsed = true,
            BootstrapEvent::HardDeadlineElapsed => {
                return Some(self.force(point, state));
            }
        }

        match state.pending {
            Some(destination) if state.soft_elapsed => Some(self.commit(point, destination, false)),
            _ => None,
        }
    }

    fn force(&self, point: &DecisionPoint, state: &BootstrapState) -> BootstrapOutcome {
        let destination = match (state.pending, &state.last_identity) {
            (Some(destination), _) => destination,
            (None, Some(identity)) => match state.profile_results.get(&identity.user_id) {
                Some(&status) => destination_for(status),
                None => {
                    warn!(
                        decision_id = %point.id(),
                        refreshing = state.snapshot.loading,
                        "profile check still pending at hard deadline, assuming complete"
                    );
                    destination_for(ProfileStatus::assumed_complete())
                }
            },
            (None, None) => {
                let timeout = AuthResolutionTimeout { waited: self.timing.hard_deadline };
                warn!(
                    decision_id = %point.id(),
                    error = %timeout,
                    "forcing unauthenticated destination"
                );
                Destination::Login
            }
        };

        self.commit(point, destination, true)
    }

    fn commit(
        &self,
        point: &DecisionPoint,
        destination: Destination,
        forced: bool,
    ) -> BootstrapOutcome {
        let outcome = point.commit_redirect(self.routes.resolve(destination));
        if outcome == CommitOutcome::AlreadyCommitted {
            let error = CommonError::internal("bootstrap decision point was already committed");
            warn!(
                decision_id = %point.id(),
                error = %error,
                severity = %error.severity(),
                "commit skipped"
            );
        }

        let elapsed = point.elapsed();
        info!(
            decision_id = %point.id(),
            destination = %destination,
            forced,
            elapsed_ms = duration_ms(elapsed),
            "bootstrap decided"
        );

        BootstrapOutcome {
            decision_id: point.id(),
            destination,
            decision: point.current(),
            forced,
            elapsed,
        }
    }
}

const fn destination_for(profile: ProfileStatus) -> Destination {
    if profile.complete {
        Destination::Home
    } else {
        Destination::ProfileSetup
    }
}
