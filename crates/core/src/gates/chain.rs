use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use waypoint_common::time::duration_ms;
use waypoint_common::CommonError;
use waypoint_domain::{DecisionId, RenderDecision, RoutePath};

use super::{Gate, GateVerdict, NavigationRequest};
use crate::decision::{CommitOutcome, DecisionPoint};
use crate::navigation_ports::Navigator;

/// Result of one protected route entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub decision_id: DecisionId,
    pub decision: RenderDecision,
    /// Gate whose redirect verdict decided the entry, if any
    pub deciding_gate: Option<&'static str>,
    /// A gate asked to redirect to the requested path and content was shown
    pub suppressed_loop: bool,
}

/// Ordered list of gates evaluated on every protected route entry
pub struct GateChain {
    gates: Vec<Arc<dyn Gate>>,
    navigator: Arc<dyn Navigator>,
}

impl GateChain {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { gates: Vec::new(), navigator }
    }

    /// Chain holding one gate
    pub fn single(gate: Arc<dyn Gate>, navigator: Arc<dyn Navigator>) -> Self {
        Self::new(navigator).with_gate(gate)
    }

    pub fn with_gate(mut self, gate: Arc<dyn Gate>) -> Self {
        self.gates.push(gate);
        self
    }

    pub fn gate_names(&self) -> Vec<&'static str> {
        self.gates.iter().map(|gate| gate.name()).collect()
    }

    pub fn open(&self, path: RoutePath) -> DecisionPoint {
        DecisionPoint::open(path, Arc::clone(&self.navigator))
    }

    pub async fn enter(&self, path: RoutePath) -> GateOutcome {
        let point = self.open(path);
        self.decide(&point).await
    }

    /// Returns `None` if `cancel` fires before the entry commits.
    pub async fn enter_until(
        &self,
        path: RoutePath,
        cancel: &CancellationToken,
    ) -> Option<GateOutcome> {
        let point = self.open(path);
        self.decide_until(&point, cancel).await
    }

    pub async fn decide(&self, point: &DecisionPoint) -> GateOutcome {
        match self.drive(point, std::future::pending::<Infallible>()).await {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }

    pub async fn decide_until(
        &self,
        point: &DecisionPoint,
        cancel: &CancellationToken,
    ) -> Option<GateOutcome> {
        match self.drive(point, cancel.cancelled()).await {
            Ok(outcome) => Some(outcome),
            Err(()) => {
                let cancelled = CommonError::task_cancelled_with_reason(
                    point.id().to_string(),
                    "route left before gates decided",
                );
                info!(
                    decision_id = %point.id(),
                    path = %point.path(),
                    elapsed_ms = duration_ms(point.elapsed()),
                    reason = %cancelled,
                    "route entry abandoned before commit"
                );
                None
            }
        }
    }

    async fn drive<C, E>(&self, point: &DecisionPoint, cancel: C) -> Result<GateOutcome, E>
    where
        C: Future<Output = E>,
    {
        tokio::select! {
            biased;
            reason = cancel => Err(reason),
            outcome = self.evaluate(point) => Ok(outcome),
        }
    }

    async fn evaluate(&self, point: &DecisionPoint) -> GateOutcome {
        let request = NavigationRequest { decision_id: point.id(), path: point.path().clone() };

        for gate in &self.gates {
            let verdict = gate.evaluate(&request).await;
            debug!(
                decision_id = %request.decision_id,
                path = %request.path,
                gate = gate.name(),
                verdict = ?verdict,
                "gate evaluated"
            );

            if let GateVerdict::Redirect(target) = verdict {
                let commit = point.commit_redirect(&target);
                return self.outcome(point, Some(gate.name()), &commit);
            }
        }

        let commit = point.commit_content();
        self.outcome(point, None, &commit)
    }

    fn outcome(
        &self,
        point: &DecisionPoint,
        deciding_gate: Option<&'static str>,
        commit: &CommitOutcome,
    ) -> GateOutcome {
        GateOutcome {
            decision_id: point.id(),
            decision: point.current(),
            deciding_gate,
            suppressed_loop: *commit == CommitOutcome::LoopSuppressed,
        }
    }
}
