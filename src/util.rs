//! Shared utilities

use std::time::{Duration, Instant};

/// Pack an opaque colour into the buffer's pixel format
///
/// Layout is R,G,B,A from the most significant byte down, alpha always 255.
/// On little-endian hosts `to_ne_bytes` yields the byte order SDL expects for
/// an RGBA8888 texture.
#[inline]
pub const fn pack_rgba(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xFF
}

/// Split a packed pixel back into (r, g, b, a)
#[inline]
pub const fn unpack_rgba(pixel: u32) -> (u8, u8, u8, u8) {
    (
        (pixel >> 24) as u8,
        (pixel >> 16) as u8,
        (pixel >> 8) as u8,
        pixel as u8,
    )
}

// ============================================================================
// Frame Rate Report
// ============================================================================

/// Frame timing summary over one reporting interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsReport {
    pub frames: u32,
    pub avg_fps: f32,
    pub avg_frame_ms: f32,
    pub slowest_frame_ms: f32,
}

/// Counts ticks and hands back a report once per interval
pub struct FpsCounter {
    interval: Duration,
    window_start: Instant,
    last_frame: Instant,
    frames: u32,
    slowest: Duration,
}

impl FpsCounter {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    fn starting_at(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            window_start: now,
            last_frame: now,
            frames: 0,
            slowest: Duration::ZERO,
        }
    }

    /// Record one tick; `Some` when the interval has elapsed
    pub fn tick(&mut self) -> Option<FpsReport> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<FpsReport> {
        self.frames += 1;
        self.slowest = self.slowest.max(now.saturating_duration_since(self.last_frame));
        self.last_frame = now;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }

        let secs = elapsed.as_secs_f32();
        let report = FpsReport {
            frames: self.frames,
            avg_fps: self.frames as f32 / secs,
            avg_frame_ms: secs * 1000.0 / self.frames as f32,
            slowest_frame_ms: self.slowest.as_secs_f32() * 1000.0,
        };
        self.window_start = now;
        self.frames = 0;
        self.slowest = Duration::ZERO;
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgba_layout() {
        assert_eq!(pack_rgba(0, 128, 0), 0x0080_00FF);
        assert_eq!(pack_rgba(128, 0, 0), 0x8000_00FF);
        assert_eq!(unpack_rgba(pack_rgba(1, 2, 3)), (1, 2, 3, 255));
    }

    #[test]
    fn test_fps_reports_once_per_interval() {
        let start = Instant::now();
        let mut fps = FpsCounter::starting_at(Duration::from_secs(1), start);
        let frame = Duration::from_millis(10);

        for i in 1..100 {
            assert!(fps.tick_at(start + frame * i).is_none(), "tick {i}");
        }
        let report = fps.tick_at(start + frame * 100).unwrap();
        assert_eq!(report.frames, 100);
        assert!((report.avg_fps - 100.0).abs() < 0.01);
        assert!((report.avg_frame_ms - 10.0).abs() < 0.01);
        assert!((report.slowest_frame_ms - 10.0).abs() < 0.01);

        // Counting restarts after a report
        assert!(fps.tick_at(start + frame * 101).is_none());
    }

    #[test]
    fn test_fps_tracks_slowest_frame() {
        let start = Instant::now();
        let mut fps = FpsCounter::starting_at(Duration::from_millis(100), start);
        fps.tick_at(start + Duration::from_millis(5));
        fps.tick_at(start + Duration::from_millis(45));
        let report = fps.tick_at(start + Duration::from_millis(100)).unwrap();
        assert_eq!(report.frames, 3);
        assert!((report.slowest_frame_ms - 55.0).abs() < 0.01);
    }
}
