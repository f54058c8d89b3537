use tracing::debug;

/// What one second of elapsed time produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Seconds left after the decrement; never zero.
    Tick(u32),
    /// The countdown just ran out. Delivered exactly once per `start`.
    Expired,
}

/// Per-turn countdown, driven by the host once per wall-clock second.
///
/// There is no timer thread: the owning session is single-threaded and the
/// host calls `tick()` on its own schedule, so expiry can never race a state
/// transition. `start` replaces any countdown already running, which is what
/// rules out the overlapping-timer bug where a stale timer kept firing into
/// a new turn.
#[derive(Debug, Default)]
pub struct TurnClock {
    duration: u32,
    remaining: Option<u32>,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a countdown of `duration` seconds, stopping any previous one.
    pub fn start(&mut self, duration: u32) {
        if self.remaining.is_some() {
            debug!(duration, "restarting turn clock over a running countdown");
        }
        self.duration = duration;
        self.remaining = Some(duration);
    }

    /// Halt the countdown. Safe to call when not running.
    pub fn stop(&mut self) {
        self.remaining = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left, or zero when stopped.
    pub fn remaining(&self) -> u32 {
        self.remaining.unwrap_or(0)
    }

    /// Fraction of the turn still available, for ring-style timer displays.
    pub fn fraction(&self) -> f32 {
        match self.remaining {
            Some(remaining) if self.duration > 0 => remaining as f32 / self.duration as f32,
            _ => 0.0,
        }
    }

    /// Advance by one second. Yields `Tick(remaining)` while time is left,
    /// one `Expired` when the countdown hits zero, and `None` after that
    /// until the next `start`.
    pub fn tick(&mut self) -> Option<ClockTick> {
        let remaining = self.remaining?;
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.remaining = None;
            debug!("turn clock expired");
            Some(ClockTick::Expired)
        } else {
            self.remaining = Some(remaining);
            Some(ClockTick::Tick(remaining))
        }
    }
}
