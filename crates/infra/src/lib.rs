//! # Waypoint Infrastructure
//!
//! Infrastructure implementations of the coordinator ports.
//!
//! This crate contains:
//! - Configuration loading (environment, TOML/JSON files)
//! - Tracing initialisation
//! - HTTP client and the profile-service checker
//! - Session, subscription and navigation adapters
//!
//! ## Architecture
//! - Implements traits defined in `waypoint-core`
//! - Contains all "impure" code (I/O, global subscribers)

pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod navigation;
pub mod observability;
pub mod profile;
pub mod subscription;

// Re-export commonly used items
pub use auth::WatchAuthSource;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use navigation::{HistoryNavigator, NavigationRecord};
pub use observability::init_tracing;
pub use profile::HttpProfileChecker;
pub use subscription::InMemorySubscriptionStore;
