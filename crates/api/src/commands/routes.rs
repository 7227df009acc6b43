//! Route entry commands

use std::time::Instant;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;
use waypoint_core::GateOutcome;
use waypoint_domain::{DecisionId, RenderDecision, Result as DomainResult, RoutePath};

use crate::context::AppContext;
use crate::utils::logging::{error_label, log_command_execution};

/// Serializable view of one gated route entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteView {
    pub decision_id: DecisionId,
    pub path: RoutePath,
    pub decision: RenderDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deciding_gate: Option<&'static str>,
    pub suppressed_loop: bool,
}

impl RouteView {
    fn new(path: RoutePath, outcome: GateOutcome) -> Self {
        Self {
            decision_id: outcome.decision_id,
            path,
            decision: outcome.decision,
            deciding_gate: outcome.deciding_gate,
            suppressed_loop: outcome.suppressed_loop,
        }
    }
}

/// User navigation to `path`, run through the gate chain.
pub async fn enter_route(ctx: &AppContext, path: &str) -> DomainResult<RouteView> {
    let command_name = "routes::enter_route";
    let start = Instant::now();

    let result = async {
        let path = RoutePath::parse(path)?;
        ctx.navigator.visit(path.clone());
        let outcome = ctx.gates.enter(path.clone()).await;
        Ok(RouteView::new(path, outcome))
    }
    .await;

    if let Err(err) = &result {
        info!(command = command_name, error = error_label(err), "route entry rejected");
    }
    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// Returns `Ok(None)` when the route is left before the gates decide.
pub async fn enter_route_until(
    ctx: &AppContext,
    path: &str,
    cancel: &CancellationToken,
) -> DomainResult<Option<RouteView>> {
    let command_name = "routes::enter_route_until";
    let start = Instant::now();

    let result = async {
        let path = RoutePath::parse(path)?;
        ctx.navigator.visit(path.clone());
        let outcome = ctx.gates.enter_until(path.clone(), cancel).await;
        Ok(outcome.map(|outcome| RouteView::new(path, outcome)))
    }
    .await;

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}
