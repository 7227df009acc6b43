//! Domain types and models
//!
//! Snapshots the coordinator observes (identity, profile, trial) and the
//! routing vocabulary it answers in (paths, destinations, render decisions).

pub mod decision;
pub mod identity;
pub mod profile;
pub mod route;
pub mod subscription;

pub use decision::{DecisionId, Destination, RedirectOptions, RenderDecision};
pub use identity::{AuthSnapshot, Identity};
pub use profile::ProfileStatus;
pub use route::{RoutePath, RouteTable};
pub use subscription::TrialState;
