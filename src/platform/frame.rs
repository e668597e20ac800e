//! Animation frame loop bookkeeping
//!
//! Tracks whether the loop should run and which requestAnimationFrame
//! callback is queued, so stopping can cancel it.

/// Loop state kept alongside the game
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameLoop {
    running: bool,
    pending: Option<i32>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Record the handle of the callback just queued
    pub fn scheduled(&mut self, handle: i32) {
        self.pending = Some(handle);
    }

    /// A queued callback fired. Returns whether the frame should run.
    pub fn fired(&mut self) -> bool {
        self.pending = None;
        self.running
    }

    /// Stop the loop. Returns the queued callback that must be cancelled.
    pub fn stop(&mut self) -> Option<i32> {
        self.running = false;
        self.pending.take()
    }
}
