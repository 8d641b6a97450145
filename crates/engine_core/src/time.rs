//! Animation clock for the render loop.

use std::time::{Duration, Instant};

/// Monotonic clock driving every animated object in the scene.
///
/// Advanced exactly once per frame by the render loop; everything else reads
/// it. The first frame reports a zero delta, which consumers must tolerate.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Sample the wall clock at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    /// Advance by a synthetic delta. Lets tests (and headless runs) drive the
    /// same animation code without a real display refresh.
    pub fn advance(&mut self, dt: Duration) {
        self.delta = dt;
        self.elapsed += dt;
        self.frame_count += 1;
    }

    /// Delta of the last frame in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Total elapsed time in seconds, full precision (message timestamps).
    pub fn elapsed_seconds_f64(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Instantaneous FPS from the last delta. Zero until the clock moves.
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let time = Time::new();
        assert_eq!(time.delta_seconds(), 0.0);
        assert_eq!(time.fps(), 0.0);
    }

    #[test]
    fn synthetic_advance_accumulates() {
        let mut time = Time::new();
        for _ in 0..60 {
            time.advance(Duration::from_secs_f64(1.0 / 60.0));
        }
        assert_eq!(time.frame_count(), 60);
        assert!((time.elapsed_seconds() - 1.0).abs() < 1e-4);
        assert!((time.fps() - 60.0).abs() < 0.1);
    }
}
