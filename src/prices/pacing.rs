// src/prices/pacing.rs
use std::time::{Duration, Instant};

/// Minimum spacing between consecutive requests made by one client.
///
/// The price APIs are rate limited but publish no limit; callers doing many
/// lookups in a row pick a spacing here instead of sleeping themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pacing {
    min_interval: Duration,
}

impl Pacing {
    pub const fn none() -> Self {
        Self { min_interval: Duration::ZERO }
    }

    pub const fn every(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    pub const fn from_millis(ms: u64) -> Self {
        Self::every(Duration::from_millis(ms))
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn is_none(&self) -> bool {
        self.min_interval.is_zero()
    }

    /// How long to hold a request issued at `now` when the previous one
    /// went out at `last`.
    pub fn delay_before(&self, last: Option<Instant>, now: Instant) -> Duration {
        match last {
            None => Duration::ZERO,
            Some(prev) => self.min_interval.saturating_sub(now.saturating_duration_since(prev)),
        }
    }
}
