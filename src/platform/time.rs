//! Frame clock
//!
//! Turns the host's monotonic timestamps (`requestAnimationFrame` time on the
//! web, `Instant` on native) into per-frame deltas for the simulation.

use crate::consts::{FRAME_MS, MAX_FRAME_MS};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous frame
    ///
    /// The first frame reports a nominal frame. Long stalls are clamped and
    /// timestamps that go backwards count as zero.
    pub fn delta_ms(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last).max(0.0) as f32).min(MAX_FRAME_MS),
            None => FRAME_MS,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (after a pause or restart)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
