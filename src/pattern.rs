//! Synthetic test pattern.
//!
//! The publisher emits a smoothly animated plaid pattern computed as a
//! closed-form function of pixel coordinates and elapsed time. Each channel is
//! an independent sine wave:
//!
//! - r = 128 + 127 * sin(0.01 * x + t)
//! - g = 128 + 127 * sin(0.01 * y + t)
//! - b = 128 + 127 * sin(0.01 * (x + y) + t)
//!
//! with each value clipped and cast into the 0..=255 range.

use crate::frame::RgbFrame;

const SPATIAL_FREQ: f64 = 0.01;

/// Generator for the animated plaid pattern at a fixed resolution.
#[derive(Clone, Debug)]
pub struct TestPattern {
    width: u32,
    height: u32,
}

impl TestPattern {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Evaluate the pattern for one pixel at time `t` (seconds).
    pub fn pixel_at(x: u32, y: u32, t: f64) -> [u8; 3] {
        let r = wave(SPATIAL_FREQ * x as f64 + t);
        let g = wave(SPATIAL_FREQ * y as f64 + t);
        let b = wave(SPATIAL_FREQ * (x as f64 + y as f64) + t);
        [r, g, b]
    }

    /// Render a full frame at time `t` (seconds).
    pub fn render(&self, t: f64) -> RgbFrame {
        let mut data = Vec::with_capacity((self.width * self.height * 3) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                data.extend_from_slice(&Self::pixel_at(x, y, t));
            }
        }
        RgbFrame::from_raw(data, self.width, self.height)
            .expect("pattern buffer matches its own dimensions")
    }
}

impl Default for TestPattern {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

fn wave(phase: f64) -> u8 {
    let v = 128.0 + 127.0 * phase.sin();
    v.clamp(0.0, 255.0) as u8
}
