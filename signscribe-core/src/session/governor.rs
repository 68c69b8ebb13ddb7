//! Frame-rate governor.

use std::time::{Duration, Instant};

/// Admits a tick only if at least `min_interval` has passed since the last
/// admitted one. A zero interval admits everything.
#[derive(Debug, Clone)]
pub struct TickGovernor {
    min_interval: Duration,
    last_admitted: Option<Instant>,
}

impl TickGovernor {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_admitted: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_admitted {
            if now.saturating_duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_admitted = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last_admitted = None;
    }
}
