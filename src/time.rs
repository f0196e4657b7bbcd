//! Host clock.
//!
//! The field takes timestamps as plain [`Duration`]s since an arbitrary
//! origin. [`Clock`] is the origin the native host uses, plus frame counting
//! and a periodically refreshed FPS figure for the window title.

use std::time::{Duration, Instant};

/// Monotonic clock with frame statistics.
#[derive(Debug)]
pub struct Clock {
    origin: Instant,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Time since the clock was created.
    #[inline]
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Count a presented frame. Returns `true` when the FPS figure was
    /// refreshed.
    pub fn tick(&mut self) -> bool {
        self.frame_count += 1;

        let now = Instant::now();
        let since = now.duration_since(self.fps_update_time);
        if since < self.fps_update_interval {
            return false;
        }

        let frames = self.frame_count - self.fps_frame_count;
        self.fps = frames as f32 / since.as_secs_f32();
        self.fps_frame_count = self.frame_count;
        self.fps_update_time = now;
        true
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Clock {
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
        let clock = Clock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_now_is_monotonic() {
        let clock = Clock::new();
        let a = clock.now();
        thread::sleep(Duration::from_millis(5));
        assert!(clock.now() > a);
    }

    #[test]
    fn test_fps_refresh() {
        let mut clock = Clock::new();
        assert!(!clock.tick());

        thread::sleep(Duration::from_millis(520));
        assert!(clock.tick());
        assert_eq!(clock.frame(), 2);
        assert!(clock.fps() > 0.0);
    }
}
