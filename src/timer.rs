use std::time::{Duration, Instant};

use tracing::trace;

pub const TICK_RATE_MS: u64 = 100;

/// Identifies one started schedule; a restarted timer never reuses an id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Schedule {
    id: TimerId,
    next_due: Instant,
}

/// Cancellable periodic tick with at most one outstanding schedule.
///
/// Nothing here owns a thread: the event loop polls it with the current
/// instant and it answers whether a tick is due.
#[derive(Debug, Clone)]
pub struct Timer {
    period: Duration,
    active: Option<Schedule>,
    next_id: u64,
}

impl Timer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            active: None,
            next_id: 0,
        }
    }

    /// Start a fresh schedule, replacing any active one
    pub fn start(&mut self, now: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.active = Some(Schedule {
            id,
            next_due: now + self.period,
        });
        trace!(id = id.0, "timer started");
        id
    }

    /// Cancel the active schedule, if any
    pub fn stop(&mut self) -> Option<TimerId> {
        let stopped = self.active.take().map(|s| s.id);
        if let Some(id) = stopped {
            trace!(id = id.0, "timer stopped");
        }
        stopped
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Time left until the next tick, if a schedule is active
    pub fn until_due(&self, now: Instant) -> Option<Duration> {
        self.active
            .map(|s| s.next_due.saturating_duration_since(now))
    }

    /// Returns the schedule id when a tick is due and advances the schedule.
    ///
    /// Missed periods collapse into a single tick.
    pub fn poll(&mut self, now: Instant) -> Option<TimerId> {
        let period = self.period;
        let schedule = self.active.as_mut()?;
        if now < schedule.next_due {
            return None;
        }
        while schedule.next_due <= now {
            schedule.next_due += period;
        }
        Some(schedule.id)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}
