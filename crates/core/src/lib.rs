//! # Waypoint Core
//!
//! The route-gating coordinator - no infrastructure dependencies.
//!
//! This crate contains:
//! - Capability ports for auth, profile, subscription and navigation
//! - Decision points with their single-commit latch
//! - The bootstrap controller and the per-navigation gates
//!
//! ## Architecture Principles
//! - Only depends on `waypoint-common` and `waypoint-domain`
//! - No HTTP, storage or view code
//! - All external collaborators via traits
//! - Timers and queues from `tokio` only

pub mod bootstrap;
pub mod decision;
pub mod errors;
pub mod gates;

// Capability ports
pub mod navigation_ports;
pub mod session_ports;

pub use bootstrap::{BootstrapController, BootstrapOutcome, BootstrapTiming};
pub use decision::{CommitOutcome, DecisionPoint, RedirectGuard};
pub use errors::{AuthResolutionTimeout, ProfileCheckError, SubscriptionStateUnavailable};
pub use gates::{
    Gate, GateChain, GateOutcome, GateState, GateVerdict, NavigationRequest, RouteGate,
    SubscriptionGate,
};
pub use navigation_ports::Navigator;
pub use session_ports::{settled_snapshot, AuthSource, ProfileChecker, SubscriptionState};
