//! Decision points and their commit latch
//!
//! A decision point is opened per navigation attempt: once for the bootstrap
//! entry and once per protected route entry. It starts out rendering the
//! loading state and commits exactly one terminal [`RenderDecision`]. The
//! navigation side effect is only ever issued by the committing call.
//!
//! [`RenderDecision`]: waypoint_domain::RenderDecision

mod guard;
mod point;

pub use guard::RedirectGuard;
pub use point::{CommitOutcome, DecisionPoint};
