//! Run countdown timer
//!
//! Counts remaining run time down to zero and latches a time-up flag.

use serde::{Deserialize, Serialize};

use crate::consts::RUN_DURATION_SECS;

/// Countdown clock for a single run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Full run length in seconds
    duration: f32,
    /// Seconds elapsed since the run started. Summed in f64 so thousands of
    /// frame-sized steps still add up to the duration.
    elapsed: f64,
    /// Latched once elapsed reaches the duration
    time_up: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(RUN_DURATION_SECS)
    }
}

impl Clock {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            time_up: false,
        }
    }

    /// Restart the countdown from the full duration
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.time_up = false;
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns true only on the tick that crosses zero; every later call is a no-op.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.time_up {
            return false;
        }

        self.elapsed += dt.max(0.0) as f64;

        if self.elapsed >= self.duration as f64 {
            self.time_up = true;
            log::info!("Time up after {:.2}s", self.elapsed);
            return true;
        }
        false
    }

    /// Seconds left, always in [0, duration]
    #[inline]
    pub fn remaining(&self) -> f32 {
        if self.time_up {
            return 0.0;
        }
        (self.duration as f64 - self.elapsed).max(0.0) as f32
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn is_time_up(&self) -> bool {
        self.time_up
    }

    /// Remaining time split into whole minutes and seconds (for a mm:ss label)
    pub fn minutes_seconds(&self) -> (u32, u32) {
        let remaining = self.remaining();
        let minutes = (remaining / 60.0).floor() as u32;
        let seconds = (remaining % 60.0).floor() as u32;
        (minutes, seconds)
    }
}
