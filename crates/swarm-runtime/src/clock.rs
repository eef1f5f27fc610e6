//! Wall-clock frame timer

use std::time::Instant;

/// Largest wall-clock gap reported to systems in one frame.
pub const MAX_HOST_DELTA: f64 = 0.25;

/// Tracks real elapsed time between frames for the host loop.
///
/// This is the host's view of time. Simulation time is owned by whatever
/// system consumes the deltas, which may clamp them further.
pub struct FrameClock {
    /// Total elapsed wall time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Number of frames ticked so far
    pub frame_count: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock from the wall clock. Call once per frame.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            self.frame_count += 1;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance by an explicit amount, for hosts that drive time themselves.
    pub fn advance(&mut self, elapsed: f64) -> f64 {
        self.first_tick = false;
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        self.delta_time = elapsed.min(MAX_HOST_DELTA);
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }
}
