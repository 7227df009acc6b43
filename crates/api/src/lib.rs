//! # Waypoint App
//!
//! Application layer - commands and the composition root.
//!
//! This crate contains:
//! - Commands (view layer → coordinator bridge)
//! - Application context (dependency injection)
//! - Main entry point and setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the adapters into the bootstrap controller and the gate chain

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
