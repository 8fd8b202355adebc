/// Coarse state of the stopwatch, derived from the accumulator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Not running and nothing accumulated.
    Fresh,
    Running,
    /// Not running with some time accumulated.
    Paused,
}

/// Elapsed-time accounting across any number of run segments.
///
/// While running, elapsed time is `frozen_ms + (now - segment_start_ms)`,
/// which is the same as measuring from a reference instant of
/// `segment_start_ms - frozen_ms` without ever going below zero.
#[derive(Clone, Debug, Default)]
pub struct ClockAccumulator {
    running: bool,
    frozen_ms: u64,
    segment_start_ms: u64,
}

impl ClockAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the accumulator was already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.running {
            return false;
        }
        self.segment_start_ms = now_ms;
        self.running = true;
        true
    }

    /// Freezes the elapsed time. Returns `false` if it was not running.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        self.frozen_ms = self.sample(now_ms);
        self.running = false;
        true
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.frozen_ms = 0;
        self.segment_start_ms = 0;
    }

    pub fn sample(&self, now_ms: u64) -> u64 {
        if self.running {
            self.frozen_ms
                .saturating_add(now_ms.saturating_sub(self.segment_start_ms))
        } else {
            self.frozen_ms
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// A pause with nothing accumulated yet reads as `Fresh`, so Reset is
    /// disabled there even though a pause happened.
    pub fn phase(&self) -> Phase {
        match (self.running, self.frozen_ms) {
            (true, _) => Phase::Running,
            (false, 0) => Phase::Fresh,
            (false, _) => Phase::Paused,
        }
    }
}
