//! First-entry landing decision
//!
//! [`BootstrapController`] races the auth source and the profile check
//! against a soft-settle timer and a hard safety deadline. A natural
//! decision commits once both the signals and the soft timer are in; the
//! hard deadline forces whatever is known, falling back to the login screen
//! when identity never resolved.

mod controller;
mod events;

pub use controller::{BootstrapController, BootstrapOutcome, BootstrapTiming};
