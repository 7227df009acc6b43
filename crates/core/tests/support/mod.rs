//! Shared test helpers for `waypoint-core` integration tests.
//!
//! Scripted stand-ins for every port so tests can control when and how each
//! signal resolves. All of them are meant to run under paused tokio time.

#![allow(dead_code)]

pub mod navigation;
pub mod session;

use waypoint_domain::RoutePath;

pub use navigation::RecordingNavigator;
pub use session::{ScriptedAuth, ScriptedProfileChecker, ScriptedSubscription};

pub fn path(raw: &str) -> RoutePath {
    RoutePath::parse(raw).unwrap()
}
