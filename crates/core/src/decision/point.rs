//! Decision point: one navigation attempt and its single commit

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info};
use waypoint_common::time::duration_ms;
use waypoint_domain::{DecisionId, RedirectOptions, RenderDecision, RoutePath};

use super::guard::RedirectGuard;
use crate::navigation_ports::Navigator;

/// Result of a commit attempt on a [`DecisionPoint`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// This call won the latch and the decision is now final
    Committed(RenderDecision),
    /// The redirect target was the current path; content was committed
    /// instead and no navigation was issued
    LoopSuppressed,
    /// Another call got there first; nothing happened
    AlreadyCommitted,
}

/// One navigation attempt awaiting its terminal decision.
///
/// Renders [`RenderDecision::ShowLoading`] until the first commit. The
/// committing call is the only one that reaches the [`Navigator`], so
/// concurrent timers and resolution callbacks can race freely on it.
pub struct DecisionPoint {
    id: DecisionId,
    path: RoutePath,
    guard: RedirectGuard<RenderDecision>,
    navigator: Arc<dyn Navigator>,
    render: watch::Sender<RenderDecision>,
    opened_at: Instant,
}

impl DecisionPoint {
    pub fn open(path: RoutePath, navigator: Arc<dyn Navigator>) -> Self {
        let (render, _) = watch::channel(RenderDecision::ShowLoading);
        let id = DecisionId::new();
        debug!(decision_id = %id, path = %path, "decision point opened");

        Self {
            id,
            path,
            guard: RedirectGuard::new(),
            navigator,
            render,
            opened_at: Instant::now(),
        }
    }

    pub const fn id(&self) -> DecisionId {
        self.id
    }

    /// Path this decision point was opened for
    pub const fn path(&self) -> &RoutePath {
        &self.path
    }

    /// Observe the render state; the receiver sees `ShowLoading` first and
    /// the committed decision afterwards.
    pub fn subscribe(&self) -> watch::Receiver<RenderDecision> {
        self.render.subscribe()
    }

    pub fn current(&self) -> RenderDecision {
        self.guard.committed().cloned().unwrap_or(RenderDecision::ShowLoading)
    }

    pub fn committed(&self) -> Option<&RenderDecision> {
        self.guard.committed()
    }

    pub fn is_committed(&self) -> bool {
        self.guard.is_committed()
    }

    pub fn elapsed(&self) -> Duration {
        self.opened_at.elapsed()
    }

    /// Commit a redirect to `target`, replacing the current history entry.
    ///
    /// A redirect to the path the point was opened for would re-enter the
    /// same decision, so it commits content instead.
    pub fn commit_redirect(&self, target: &RoutePath) -> CommitOutcome {
        if *target == self.path {
            return match self.commit(RenderDecision::ShowContent) {
                CommitOutcome::Committed(_) => {
                    info!(
                        decision_id = %self.id,
                        path = %self.path,
                        elapsed_ms = duration_ms(self.elapsed()),
                        "redirect to current path suppressed, showing content"
                    );
                    CommitOutcome::LoopSuppressed
                }
                other => other,
            };
        }

        self.commit(RenderDecision::Redirect(target.clone()))
    }

    pub fn commit_content(&self) -> CommitOutcome {
        self.commit(RenderDecision::ShowContent)
    }

    fn commit(&self, decision: RenderDecision) -> CommitOutcome {
        if !self.guard.try_commit(decision.clone()) {
            debug!(
                decision_id = %self.id,
                path = %self.path,
                late = ?decision,
                "decision already committed, ignoring"
            );
            return CommitOutcome::AlreadyCommitted;
        }

        if let RenderDecision::Redirect(target) = &decision {
            self.navigator.redirect(target, RedirectOptions::replace());
            info!(
                decision_id = %self.id,
                path = %self.path,
                target = %target,
                elapsed_ms = duration_ms(self.elapsed()),
                "redirect committed"
            );
        } else {
            info!(
                decision_id = %self.id,
                path = %self.path,
                elapsed_ms = duration_ms(self.elapsed()),
                "content committed"
            );
        }

        self.render.send_replace(decision.clone());
        CommitOutcome::Committed(decision)
    }
}

impl std::fmt::Debug for DecisionPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionPoint")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("committed", &self.guard.committed())
            .finish_non_exhaustive()
    }
}
