//! Shared utilities

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Deterministic xorshift64 generator for demo data
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    /// Seed from the wall clock
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Self::new(nanos)
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() & 0xFF_FFFF) as f32 / 0x100_0000 as f32
    }

    /// Uniform in [min, max], `min` when the range is empty
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        (min as i64 + (self.next_u64() % span) as i64) as i32
    }

    /// Uniform index below `len`
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            (self.next_u64() % len as u64) as usize
        }
    }
}

// ============================================================================
// FPS Counter
// ============================================================================

/// Rolling average of frame times
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count: sample_count.max(1),
        }
    }

    /// Call once per frame. Returns (delta seconds, average fps).
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        (dt, self.avg_fps())
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    pub fn avg_frame_time_ms(&self) -> f32 {
        let avg: f32 = self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        avg * 1000.0
    }

    pub fn avg_fps(&self) -> f32 {
        let ms = self.avg_frame_time_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }
}

/// Milliseconds as a float, for timing tables
#[inline]
pub fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_rng_zero_seed_still_moves() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_range_i32_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let v = rng.range_i32(1, 20);
            assert!((1..=20).contains(&v));
        }
        assert_eq!(rng.range_i32(5, 5), 5);
        assert_eq!(rng.range_i32(9, 3), 9);
    }

    #[test]
    fn test_next_f32_unit_interval() {
        let mut rng = Rng::new(3);
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_fps_rolling_window() {
        let mut fps = FpsCounter::new(2);
        fps.record(0.010);
        fps.record(0.020);
        fps.record(0.030);
        assert!((fps.avg_frame_time_ms() - 25.0).abs() < 1e-3);
        assert!((fps.avg_fps() - 40.0).abs() < 1e-2);
    }
}
