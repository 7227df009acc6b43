//! Testing utilities and helpers
//!
//! - **[`async_utils`]**: Async helpers that work under a paused tokio clock
//! - Clock mocks re-exported from [`crate::time`]
//!
//! ## Usage
//!
//! ```rust
//! use waypoint_common::testing::MockClock;
//!
//! let clock = MockClock::new();
//! clock.advance(std::time::Duration::from_secs(5));
//! ```

pub mod async_utils;

pub use async_utils::{poll_until, settle, timeout_ok};

pub use crate::time::{Clock, MockClock, SystemClock};
