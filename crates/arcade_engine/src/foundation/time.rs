//! Time measurement utilities

use std::time::{Duration, Instant};

/// Wall-clock timer for one measured section
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Start timing now
    pub fn start_new() -> Self {
        Self { started: Instant::now() }
    }

    /// Time since the stopwatch was started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// [`elapsed`](Self::elapsed) in milliseconds
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

/// Per-frame timing handed to collision handlers and deferred actions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Index of the frame, starting at 1 for the first update
    pub frame: u64,
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Seconds of simulation time accumulated so far
    pub elapsed: f64,
}

impl FrameTime {
    /// Timing for the first frame of a simulation
    pub fn first(delta_time: f32) -> Self {
        Self {
            frame: 1,
            delta_time,
            elapsed: f64::from(delta_time),
        }
    }

    /// Advance to the following frame
    pub fn next(self, delta_time: f32) -> Self {
        Self {
            frame: self.frame + 1,
            delta_time,
            elapsed: self.elapsed + f64::from(delta_time),
        }
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self {
            frame: 0,
            delta_time: 0.0,
            elapsed: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_is_monotonic() {
        let stopwatch = Stopwatch::start_new();
        let first = stopwatch.elapsed();
        let second = stopwatch.elapsed();
        assert!(second >= first);
        assert!(stopwatch.elapsed_millis() >= 0.0);
    }

    #[test]
    fn test_frame_time_advances() {
        let t = FrameTime::first(0.5).next(0.25);
        assert_eq!(t.frame, 2);
        assert!((t.elapsed - 0.75).abs() < 1e-9);
        assert!((t.delta_time - 0.25).abs() < f32::EPSILON);
    }
}
