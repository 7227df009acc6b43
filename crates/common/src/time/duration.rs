//! Duration helpers for structured logging

use std::time::Duration;

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use waypoint_common::time::duration_ms;
///
/// assert_eq!(duration_ms(Duration::from_millis(4000)), 4000);
/// assert_eq!(duration_ms(Duration::MAX), u64::MAX);
/// ```
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
