//! Frame timing for the animation loop

use std::time::{Duration, Instant};

/// Single time source for the frame loop.
///
/// Tracks elapsed seconds since scene start and a per-frame delta clamped to
/// `max_delta`, so a stalled frame (tab backgrounded, debugger pause) never
/// produces a huge integration step.
#[derive(Clone, Debug)]
pub struct FrameClock {
    start: Instant,
    /// Elapsed time at the previous tick, relative to `start`
    last: Duration,
    elapsed: f32,
    delta: f32,
    max_delta: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock starting now
    pub fn new(max_delta: f32) -> Self {
        Self {
            start: Instant::now(),
            last: Duration::ZERO,
            elapsed: 0.0,
            delta: 0.0,
            max_delta: max_delta.max(0.0),
            frame_count: 0,
        }
    }

    /// Advance using the wall clock
    pub fn tick(&mut self) {
        let now = self.start.elapsed();
        self.tick_at(now);
    }

    /// Advance to an explicit elapsed time since start.
    ///
    /// Used by headless runs and tests for reproducible frame sequences.
    /// Time never runs backwards: an earlier `elapsed` yields a zero delta.
    pub fn tick_at(&mut self, elapsed: Duration) {
        let elapsed = elapsed.max(self.last);
        let raw = (elapsed - self.last).as_secs_f32();
        self.last = elapsed;
        self.elapsed = elapsed.as_secs_f32();
        self.delta = raw.min(self.max_delta);
        self.frame_count += 1;
    }

    /// Seconds since scene start
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }

    /// Clamped delta of the last tick in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    /// Upper bound applied to every delta
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Total ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = FrameClock::new(0.05);
        clock.tick_at(Duration::from_millis(16));
        assert!((clock.delta_secs() - 0.016).abs() < 1e-6);

        // A two-second stall still integrates as a single capped step
        clock.tick_at(Duration::from_millis(2016));
        assert_eq!(clock.delta_secs(), 0.05);
        assert!((clock.elapsed_secs() - 2.016).abs() < 1e-5);
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let mut clock = FrameClock::new(0.05);
        clock.tick_at(Duration::from_secs(1));
        clock.tick_at(Duration::from_millis(500));
        assert_eq!(clock.delta_secs(), 0.0);
        assert_eq!(clock.elapsed_secs(), 1.0);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_wall_clock_tick_advances() {
        let mut clock = FrameClock::default();
        clock.tick();
        assert!(clock.delta_secs() >= 0.0);
        assert!(clock.delta_secs() <= clock.max_delta());
    }
}
