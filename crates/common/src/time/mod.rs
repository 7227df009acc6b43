//! Time utilities and abstractions
//!
//! - **[`clock`]**: Real and mock clocks. Trial expiry and any other
//!   wall-clock arithmetic read time through [`Clock`] so tests can move it.
//! - **[`duration`]**: [`duration_ms`] for `elapsed_ms`-style log fields.
//!
//! Decision timers do not go through this module: they are `tokio::time`
//! sleeps owned by the decision point, which tests drive with a paused
//! runtime.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use waypoint_common::time::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let start = clock.now_utc();
//! clock.advance(Duration::from_secs(60));
//! assert_eq!((clock.now_utc() - start).num_seconds(), 60);
//! ```

pub mod clock;
pub mod duration;

pub use clock::{Clock, MockClock, SystemClock};
pub use duration::duration_ms;
