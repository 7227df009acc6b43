//! Decision vocabulary
//!
//! Every decision point answers with exactly one [`RenderDecision`]. While it
//! is still open the view shows [`RenderDecision::ShowLoading`].

use std::fmt;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use crate::impl_domain_label_conversions;
use crate::types::route::RoutePath;

/// Identifier attached to one decision point for log correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, type = "string"))]
pub struct DecisionId(Uuid);

impl DecisionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DecisionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where the first entry after app start lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum Destination {
    Login,
    ProfileSetup,
    Home,
}

impl_domain_label_conversions!(Destination {
    Login => "login",
    ProfileSetup => "profile_setup",
    Home => "home",
});

/// What the view layer should render for one navigation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum RenderDecision {
    ShowLoading,
    Redirect(RoutePath),
    ShowContent,
}

/// Options passed to the navigation primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectOptions {
    /// Overwrite the current history entry instead of pushing a new one
    pub replace: bool,
}

impl RedirectOptions {
    /// The only mode the coordinator issues: a stalled loading screen never
    /// stays reachable through history.
    pub const fn replace() -> Self {
        Self { replace: true }
    }

    pub const fn push() -> Self {
        Self { replace: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_decision_serializes_with_kind_tag() {
        let redirect = RenderDecision::Redirect(RoutePath::parse("/login").unwrap());
        let json = serde_json::to_value(&redirect).unwrap();

        assert_eq!(json["kind"], "redirect");
        assert_eq!(json["path"], "/login");
        let content = serde_json::to_value(RenderDecision::ShowContent).unwrap();
        assert_eq!(content["kind"], "show_content");
    }

    #[test]
    fn decision_ids_are_unique() {
        assert_ne!(DecisionId::new(), DecisionId::new());
    }
}
