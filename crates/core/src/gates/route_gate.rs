use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, warn};
use waypoint_common::time::duration_ms;
use waypoint_common::{CommonError, ErrorClassification};
use waypoint_domain::constants::DEFAULT_GATE_HARD_DEADLINE_MS;
use waypoint_domain::{DecisionId, ProfileStatus, RouteTable, RoutePath};

use super::{Gate, GateVerdict, NavigationRequest};
use crate::session_ports::{settled_snapshot, AuthSource, ProfileChecker};

/// Where a route-gate check ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unauthenticated,
    Complete,
    Incomplete,
    /// The hard deadline elapsed while still checking
    Forced { identity_known: bool },
}

impl From<ProfileStatus> for GateState {
    fn from(profile: ProfileStatus) -> Self {
        if profile.complete {
            Self::Complete
        } else {
            Self::Incomplete
        }
    }
}

/// Identity and profile-completeness gate.
///
/// Every check is bounded by its own hard deadline. A forced check with a
/// known identity renders content optimistically, even when that identity
/// is mid-refresh; one without any identity sends the user to login.
pub struct RouteGate {
    auth: Arc<dyn AuthSource>,
    profiles: Arc<dyn ProfileChecker>,
    routes: RouteTable,
    hard_deadline: Duration,
}

impl RouteGate {
    pub fn new(auth: Arc<dyn AuthSource>, profiles: Arc<dyn ProfileChecker>) -> Self {
        Self {
            auth,
            profiles,
            routes: RouteTable::default(),
            hard_deadline: Duration::from_millis(DEFAULT_GATE_HARD_DEADLINE_MS),
        }
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_hard_deadline(mut self, hard_deadline: Duration) -> Self {
        self.hard_deadline = hard_deadline;
        self
    }

    /// Resolve identity and profile state, bounded by the hard deadline.
    pub async fn check(&self, decision_id: DecisionId) -> GateState {
        match timeout(self.hard_deadline, self.resolve(decision_id)).await {
            Ok(state) => state,
            Err(_) => {
                let identity_known = self.auth.current().identity.is_some();
                let error = CommonError::timeout("route_gate_check", self.hard_deadline);
                warn!(
                    decision_id = %decision_id,
                    deadline_ms = duration_ms(self.hard_deadline),
                    identity_known,
                    error = %error,
                    "route gate check forced by hard deadline"
                );
                GateState::Forced { identity_known }
            }
        }
    }

    async fn resolve(&self, decision_id: DecisionId) -> GateState {
        let Some(snapshot) = settled_snapshot(self.auth.as_ref()).await else {
            // Source closed while loading; only the deadline can end this.
            return std::future::pending::<GateState>().await;
        };
        let Some(identity) = snapshot.identity else {
            return GateState::Unauthenticated;
        };

        match self.profiles.is_complete(&identity).await {
            Ok(complete) => GateState::from(ProfileStatus::from(complete)),
            Err(error) => {
                warn!(
                    decision_id = %decision_id,
                    error = %error,
                    severity = %error.severity(),
                    "profile check failed, assuming complete"
                );
                GateState::from(ProfileStatus::assumed_complete())
            }
        }
    }

    /// Map a resolved state to a verdict for `path`.
    pub fn verdict_for(&self, state: GateState, path: &RoutePath) -> GateVerdict {
        match state {
            GateState::Unauthenticated | GateState::Forced { identity_known: false } => {
                GateVerdict::Redirect(self.routes.login.clone())
            }
            GateState::Forced { identity_known: true } => GateVerdict::Allow,
            GateState::Complete if *path == self.routes.profile_setup => {
                GateVerdict::Redirect(self.routes.home.clone())
            }
            GateState::Incomplete if self.routes.is_authenticated_area(path) => {
                GateVerdict::Redirect(self.routes.profile_setup.clone())
            }
            GateState::Complete | GateState::Incomplete => GateVerdict::Allow,
        }
    }
}

#[async_trait]
impl Gate for RouteGate {
    fn name(&self) -> &'static str {
        "route"
    }

    async fn evaluate(&self, request: &NavigationRequest) -> GateVerdict {
        if !self.routes.is_protected(&request.path) {
            debug!(decision_id = %request.decision_id, path = %request.path, "path not protected");
            return GateVerdict::Allow;
        }

        let state = self.check(request.decision_id).await;
        debug!(decision_id = %request.decision_id, state = ?state, "route gate resolved");
        self.verdict_for(state, &request.path)
    }
}
