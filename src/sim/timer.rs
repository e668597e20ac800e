//! Pause-compensated session clock
//!
//! The session runs off wall-clock timestamps (milliseconds). Pausing records
//! when the pause began; resuming folds the pause length into an accumulator
//! that is subtracted from elapsed time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    /// Session length in seconds
    pub duration_secs: f64,
    start_ms: f64,
    paused_total_ms: f64,
    pause_started_ms: Option<f64>,
    /// Remaining seconds as of the last `update`
    remaining_secs: f64,
}

impl SessionTimer {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            start_ms: 0.0,
            paused_total_ms: 0.0,
            pause_started_ms: None,
            remaining_secs: duration_secs,
        }
    }

    /// Restart the clock at `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
        self.paused_total_ms = 0.0;
        self.pause_started_ms = None;
        self.remaining_secs = self.duration_secs;
    }

    /// Begin a pause. Returns false if already paused.
    pub fn pause(&mut self, now_ms: f64) -> bool {
        if self.pause_started_ms.is_some() {
            return false;
        }
        self.pause_started_ms = Some(now_ms);
        true
    }

    /// End a pause, adding its length to the accumulator. Returns false if
    /// not paused.
    pub fn resume(&mut self, now_ms: f64) -> bool {
        match self.pause_started_ms.take() {
            Some(started) => {
                self.paused_total_ms += (now_ms - started).max(0.0);
                true
            }
            None => false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.pause_started_ms.is_some()
    }

    pub fn paused_total_ms(&self) -> f64 {
        self.paused_total_ms
    }

    /// Active (unpaused) milliseconds since start; frozen while paused
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        let now = self.pause_started_ms.unwrap_or(now_ms);
        (now - self.start_ms - self.paused_total_ms).max(0.0)
    }

    /// Recompute and cache the remaining time, clamped at zero
    pub fn update(&mut self, now_ms: f64) -> f64 {
        let elapsed_secs = self.elapsed_ms(now_ms) / 1000.0;
        self.remaining_secs = (self.duration_secs - elapsed_secs).max(0.0);
        self.remaining_secs
    }

    /// Remaining seconds as of the last update
    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs <= 0.0
    }
}
