//! Run clock
//!
//! Survival time is derived from timestamps, not counted in ticks, so it
//! stays correct when frames are dropped.

/// Tracks when the current run started
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameClock {
    run_start_ms: f64,
}

impl GameClock {
    pub fn start(&mut self, now_ms: f64) {
        self.run_start_ms = now_ms;
    }

    pub fn run_start_ms(&self) -> f64 {
        self.run_start_ms
    }

    /// Whole seconds since the run started. A clock that stepped backwards
    /// reads as zero rather than negative.
    pub fn elapsed_secs(&self, now_ms: f64) -> u32 {
        let elapsed = (now_ms - self.run_start_ms) / 1000.0;
        if elapsed.is_nan() || elapsed <= 0.0 {
            0
        } else {
            // `as` saturates at u32::MAX
            elapsed.floor() as u32
        }
    }
}
