//! Pure metric arithmetic

use chrono::{DateTime, Utc};

/// Arithmetic mean; an empty input yields 0.0 rather than dividing by zero
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Elapsed hours between two instants
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_seconds() as f64 / 3600.0
}

/// Whole days elapsed since `since`, measured at `now`
pub fn days_since(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_days()
}

/// Share of configured members that opened a PR, as a percentage.
/// A team with no configured members reports 0.0.
pub fn participation_rate(active: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        active as f64 / total as f64 * 100.0
    }
}
