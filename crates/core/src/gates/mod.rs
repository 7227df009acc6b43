//! Per-navigation gates for protected routes
//!
//! Each gate inspects one [`NavigationRequest`] and either lets it through
//! or names a redirect target. A [`GateChain`] runs its gates in order and
//! commits the first non-`Allow` verdict through a single decision point,
//! which also turns any redirect to the requested path into content.

mod chain;
mod route_gate;
mod subscription_gate;

use async_trait::async_trait;
use waypoint_domain::{DecisionId, RoutePath};

pub use chain::{GateChain, GateOutcome};
pub use route_gate::{GateState, RouteGate};
pub use subscription_gate::SubscriptionGate;

/// A navigation attempt under evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub decision_id: DecisionId,
    pub path: RoutePath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    Allow,
    Redirect(RoutePath),
}

/// A guard consulted on every protected route entry.
///
/// Implementations must always return: failures and stalls inside a gate
/// resolve to a verdict rather than an error.
#[async_trait]
pub trait Gate: Send + Sync {
    /// Short label used in logs and outcomes
    fn name(&self) -> &'static str;

    async fn evaluate(&self, request: &NavigationRequest) -> GateVerdict;
}
