//! Wall-clock frame timing for hosts.
//!
//! The animations advance a fixed amount per frame and never look at the
//! clock. Hosts use [`FrameClock`] to report frame rate and frame time.
//!
//! # Example
//!
//! ```ignore
//! use morphfield::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // Once per presented frame:
//! clock.tick();
//! if let Some(fps) = clock.take_fps_update() {
//!     log::trace!("{:.1} fps", fps);
//! }
//! ```

use std::time::{Duration, Instant};

/// Counts presented frames and measures their rate.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    /// Frame count at the last rate sample.
    sample_frames: u64,
    sample_time: Instant,
    sample_interval: Duration,
    fresh_sample: bool,
}

impl FrameClock {
    /// Start measuring from now, sampling the rate every half second.
    pub fn new() -> Self {
        Self::with_sample_interval(Duration::from_millis(500))
    }

    /// Start measuring from now with a custom rate sampling interval.
    pub fn with_sample_interval(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            sample_frames: 0,
            sample_time: now,
            sample_interval: interval,
            fresh_sample: false,
        }
    }

    /// Record one presented frame. Returns seconds since the previous one.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let since_sample = now.duration_since(self.sample_time);
        if since_sample >= self.sample_interval {
            let frames = self.frame_count - self.sample_frames;
            self.fps = frames as f32 / since_sample.as_secs_f32();
            self.sample_frames = self.frame_count;
            self.sample_time = now;
            self.fresh_sample = true;
        }

        self.delta_secs
    }

    /// Seconds since the clock started.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Seconds between the last two ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames recorded so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame_count
    }

    /// Most recent frame rate sample.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// The frame rate, if it was resampled since the last call.
    pub fn take_fps_update(&mut self) -> Option<f32> {
        std::mem::take(&mut self.fresh_sample).then_some(self.fps)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frames(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_tick_measures_delta() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();
        assert!(delta > 0.0);
        assert_eq!(clock.delta(), delta);
        assert_eq!(clock.frames(), 1);
        assert!(clock.elapsed() >= delta);
    }

    #[test]
    fn test_fps_sample_reported_once() {
        let mut clock = FrameClock::with_sample_interval(Duration::from_millis(5));
        clock.tick();
        thread::sleep(Duration::from_millis(10));
        clock.tick();
        let fps = clock.take_fps_update();
        assert!(fps.is_some_and(|f| f > 0.0));
        assert_eq!(clock.take_fps_update(), None);
    }
}
