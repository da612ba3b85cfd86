use chrono::{DateTime, Utc};
use serde::Serialize;

const NANOS_PER_DAY: i64 = 86_400_000_000_000;
const MILLIS_PER_DAY: i64 = 86_400_000;

/// Result of comparing the remaining days against the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// More days left than the buffer, nothing to do
    Healthy,
    /// Days left reached or fell below the buffer
    ExpiringSoon,
}

impl Evaluation {
    #[must_use]
    pub const fn should_notify(self) -> bool {
        matches!(self, Self::ExpiringSoon)
    }
}

/// Whole days between `now` and `not_after`, rounded towards negative
/// infinity (negative if already expired)
#[must_use]
pub fn days_left(not_after: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta = not_after - now;
    // nanoseconds overflow past ~292 years, fall back to milliseconds
    delta.num_nanoseconds().map_or_else(
        || delta.num_milliseconds().div_euclid(MILLIS_PER_DAY),
        |nanos| nanos.div_euclid(NANOS_PER_DAY),
    )
}

/// Reaching the buffer exactly counts as expiring
#[must_use]
pub const fn evaluate(days_left: i64, buffer: i64) -> Evaluation {
    if days_left > buffer {
        Evaluation::Healthy
    } else {
        Evaluation::ExpiringSoon
    }
}
