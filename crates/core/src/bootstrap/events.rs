use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};
use waypoint_domain::{AuthSnapshot, Identity};

use crate::errors::ProfileCheckError;
use crate::session_ports::ProfileChecker;

/// Everything that can move a bootstrap decision forward
#[derive(Debug)]
pub(crate) enum BootstrapEvent {
    Auth(AuthSnapshot),
    Profile { user_id: String, result: Result<bool, ProfileCheckError> },
    SoftSettleElapsed,
    HardDeadlineElapsed,
}

pub(crate) type EventSender = mpsc::UnboundedSender<BootstrapEvent>;

/// Producers feeding one decision's event queue.
///
/// Every producer is a task in the same [`JoinSet`]; dropping the set aborts
/// the timers and any in-flight check together.
pub(crate) struct EventSources {
    tasks: JoinSet<()>,
    sender: EventSender,
}

impl EventSources {
    pub(crate) fn new(sender: EventSender) -> Self {
        Self { tasks: JoinSet::new(), sender }
    }

    pub(crate) fn timer(&mut self, deadline: Instant, event: BootstrapEvent) {
        let sender = self.sender.clone();
        self.tasks.spawn(async move {
            sleep_until(deadline).await;
            let _ = sender.send(event);
        });
    }

    /// Forward the current snapshot, then every change, until the source
    /// closes or the queue is gone.
    pub(crate) fn auth(&mut self, mut receiver: watch::Receiver<AuthSnapshot>) {
        let sender = self.sender.clone();
        self.tasks.spawn(async move {
            let initial = receiver.borrow_and_update().clone();
            if sender.send(BootstrapEvent::Auth(initial)).is_err() {
                return;
            }
            while receiver.changed().await.is_ok() {
                let snapshot = receiver.borrow_and_update().clone();
                if sender.send(BootstrapEvent::Auth(snapshot)).is_err() {
                    break;
                }
            }
        });
    }

    pub(crate) fn profile_check(&mut self, checker: Arc<dyn ProfileChecker>, identity: Identity) {
        let sender = self.sender.clone();
        self.tasks.spawn(async move {
            let result = checker.is_complete(&identity).await;
            let _ = sender.send(BootstrapEvent::Profile { user_id: identity.user_id, result });
        });
    }
}
