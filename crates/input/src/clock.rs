use std::time::{Duration, Instant};

/// Measures the time between frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
    max_delta: f32,
}

impl FrameClock {
    /// `max_delta` caps a single frame's delta in seconds so a stall (window
    /// drag, breakpoint) does not teleport the camera.
    pub fn new(max_delta: f32) -> Self {
        Self::starting_at(Instant::now(), max_delta)
    }

    pub fn starting_at(start: Instant, max_delta: f32) -> Self {
        Self {
            last: start,
            max_delta: max_delta.max(0.0),
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = self.last.max(now);
        let dt = elapsed.as_secs_f32();
        if dt > self.max_delta {
            tracing::debug!(dt, max = self.max_delta, "frame delta capped");
        }
        dt.min(self.max_delta)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(100).as_secs_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_between_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 0.1);
        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
        let dt = clock.tick_at(start + Duration::from_millis(48));
        assert!((dt - 0.032).abs() < 1e-6);
    }

    #[test]
    fn delta_is_capped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 0.1);
        assert_eq!(clock.tick_at(start + Duration::from_secs(5)), 0.1);
    }

    #[test]
    fn time_going_backwards_yields_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start, 0.1);
        assert_eq!(clock.tick_at(start - Duration::from_millis(500)), 0.0);
        let dt = clock.tick_at(start + Duration::from_millis(10));
        assert!((dt - 0.010).abs() < 1e-6);
    }
}
