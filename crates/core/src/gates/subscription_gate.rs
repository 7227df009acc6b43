use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, warn};
use waypoint_common::time::duration_ms;
use waypoint_common::{CommonError, ErrorClassification};
use waypoint_domain::constants::DEFAULT_GATE_HARD_DEADLINE_MS;
use waypoint_domain::{DecisionId, Identity, RouteTable};

use super::{Gate, GateVerdict, NavigationRequest};
use crate::errors::SubscriptionStateUnavailable;
use crate::session_ports::{AuthSource, SubscriptionState};

/// Trial and payment gate.
///
/// Only protected paths are checked. Starts the trial on every such entry
/// with a known identity, then sends expired, unpaid users in the
/// authenticated area to the paywall. Any read that fails or stalls past
/// the deadline counts as "within trial".
pub struct SubscriptionGate {
    auth: Arc<dyn AuthSource>,
    subscriptions: Arc<dyn SubscriptionState>,
    routes: RouteTable,
    deadline: Duration,
}

impl SubscriptionGate {
    pub fn new(auth: Arc<dyn AuthSource>, subscriptions: Arc<dyn SubscriptionState>) -> Self {
        Self {
            auth,
            subscriptions,
            routes: RouteTable::default(),
            deadline: Duration::from_millis(DEFAULT_GATE_HARD_DEADLINE_MS),
        }
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    async fn requires_payment(&self, identity: &Identity, decision_id: DecisionId) -> bool {
        if let Err(error) = self.subscriptions.start_trial(identity).await {
            fail_open(decision_id, "start_trial", &error);
        }

        let expired = match self.subscriptions.is_expired(identity).await {
            Ok(expired) => expired,
            Err(error) => {
                fail_open(decision_id, "is_expired", &error);
                return false;
            }
        };
        if !expired {
            return false;
        }

        match self.subscriptions.is_paid(identity).await {
            Ok(paid) => !paid,
            Err(error) => {
                fail_open(decision_id, "is_paid", &error);
                false
            }
        }
    }
}

fn fail_open(decision_id: DecisionId, operation: &str, error: &SubscriptionStateUnavailable) {
    warn!(
        decision_id = %decision_id,
        operation,
        error = %error,
        severity = %error.severity(),
        "subscription state unavailable, treating user as within trial"
    );
}

#[async_trait]
impl Gate for SubscriptionGate {
    fn name(&self) -> &'static str {
        "subscription"
    }

    async fn evaluate(&self, request: &NavigationRequest) -> GateVerdict {
        if !self.routes.is_protected(&request.path) {
            debug!(decision_id = %request.decision_id, path = %request.path, "path not protected");
            return GateVerdict::Allow;
        }

        let snapshot = self.auth.current();
        let Some(identity) = snapshot.settled_identity() else {
            debug!(
                decision_id = %request.decision_id,
                "no settled identity, subscription not checked"
            );
            return GateVerdict::Allow;
        };

        let check = self.requires_payment(identity, request.decision_id);
        let blocked = match timeout(self.deadline, check).await {
            Ok(blocked) => blocked,
            Err(_) => {
                let error = CommonError::timeout("subscription_check", self.deadline);
                warn!(
                    decision_id = %request.decision_id,
                    deadline_ms = duration_ms(self.deadline),
                    error = %error,
                    "subscription state stalled, treating user as within trial"
                );
                false
            }
        };

        if blocked && self.routes.is_authenticated_area(&request.path) {
            GateVerdict::Redirect(self.routes.paywall.clone())
        } else {
            GateVerdict::Allow
        }
    }
}
