//! Navigation port
//!
//! The single side effect the coordinator performs. It is only ever invoked
//! by a [`DecisionPoint`](crate::DecisionPoint) that has just won its commit
//! latch, so implementations see at most one call per decision point.

use waypoint_domain::{RedirectOptions, RoutePath};

/// Navigation primitive provided by the view layer
pub trait Navigator: Send + Sync {
    /// Move the user to `path`.
    ///
    /// The coordinator always passes `replace = true`.
    fn redirect(&self, path: &RoutePath, options: RedirectOptions);
}
