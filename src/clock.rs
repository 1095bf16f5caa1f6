//! Creation timestamps for resting orders.

use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock nanosecond source that never goes backwards.
///
/// If the system clock steps back, the last issued value is repeated
/// until wall time catches up.
#[derive(Debug, Clone, Default)]
pub struct MonotonicClock {
    last: u64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nanoseconds since the Unix epoch, at least the previous reading
    pub fn now(&mut self) -> u64 {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        self.last = self.last.max(wall);
        self.last
    }
}
