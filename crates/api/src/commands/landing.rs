//! Landing commands
//!
//! Resolve the first screen after application start.

use std::time::Instant;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;
use waypoint_common::time::duration_ms;
use waypoint_core::BootstrapOutcome;
use waypoint_domain::{
    DecisionId, Destination, RenderDecision, Result as DomainResult, RoutePath,
};

use crate::context::AppContext;
use crate::utils::logging::{error_label, log_command_execution};

/// Serializable view of a bootstrap decision handed to the view layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingView {
    pub decision_id: DecisionId,
    pub destination: Destination,
    pub decision: RenderDecision,
    pub forced: bool,
    pub elapsed_ms: u64,
}

impl From<BootstrapOutcome> for LandingView {
    fn from(outcome: BootstrapOutcome) -> Self {
        Self {
            decision_id: outcome.decision_id,
            destination: outcome.destination,
            decision: outcome.decision,
            forced: outcome.forced,
            elapsed_ms: duration_ms(outcome.elapsed),
        }
    }
}

/// Decide where the app lands when it is opened at `entry`.
///
/// The entry is recorded in history first so a redirect replaces it.
pub async fn resolve_landing(ctx: &AppContext, entry: &str) -> DomainResult<LandingView> {
    let command_name = "landing::resolve_landing";
    let start = Instant::now();

    let result = async {
        let entry = RoutePath::parse(entry)?;
        ctx.navigator.visit(entry.clone());
        Ok(LandingView::from(ctx.bootstrap.run(entry).await))
    }
    .await;

    if let Err(err) = &result {
        info!(command = command_name, error = error_label(err), "landing rejected");
    }
    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// Like [`resolve_landing`], abandoned without navigating if the screen
/// goes away (`cancel` fires) before the decision commits.
pub async fn resolve_landing_until(
    ctx: &AppContext,
    entry: &str,
    cancel: &CancellationToken,
) -> DomainResult<Option<LandingView>> {
    let command_name = "landing::resolve_landing_until";
    let start = Instant::now();

    let result = async {
        let entry = RoutePath::parse(entry)?;
        ctx.navigator.visit(entry.clone());
        Ok(ctx.bootstrap.run_until(entry, cancel).await.map(LandingView::from))
    }
    .await;

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}
