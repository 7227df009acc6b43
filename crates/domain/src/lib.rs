//! # Waypoint Domain
//!
//! Business domain types and models for Waypoint.
//!
//! This crate contains:
//! - Identity, profile and trial snapshots observed by the coordinator
//! - Route paths, the route table and render decisions
//! - Configuration structures
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other Waypoint crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
