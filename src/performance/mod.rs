//! # Frame Rate Measurement
//!
//! Frames are counted over one-second windows. When a window closes, the
//! average rate over it is published as a whole number and counting starts
//! again.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use spindle::performance::FrameStats;
//!
//! let start = Instant::now();
//! let mut stats = FrameStats::new(start);
//!
//! // In your main loop
//! for frame in 1..=30 {
//!     stats.record_frame(start + Duration::from_millis(frame * 40));
//! }
//! assert_eq!(stats.last_fps(), Some(25));
//! ```

use std::time::{Duration, Instant};

/// Length of one measurement window
pub const FPS_WINDOW: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_count: u32,
    window_start: Instant,
    last_fps: Option<u32>,
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self {
            frame_count: 0,
            window_start: now,
            last_fps: None,
        }
    }

    /// Counts a frame finished at `now`. Returns the new rate when this frame
    /// closes a window.
    pub fn record_frame(&mut self, now: Instant) -> Option<u32> {
        self.frame_count += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < FPS_WINDOW {
            return None;
        }

        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let fps = (f64::from(self.frame_count) * 1000.0 / elapsed_ms).round() as u32;
        log::debug!("{fps} fps over {elapsed_ms:.0} ms");

        self.last_fps = Some(fps);
        self.frame_count = 0;
        self.window_start = now;
        Some(fps)
    }

    /// Frames counted in the open window
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Most recently published rate
    pub fn last_fps(&self) -> Option<u32> {
        self.last_fps
    }
}
