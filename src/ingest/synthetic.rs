//! Synthetic capture backend.
//!
//! Renders the animated test pattern instead of touching hardware. With a
//! frame limit set it behaves like a short clip and reports end of stream,
//! which lets the viewer's file-mode termination path run in tests.

use anyhow::Result;

use crate::frame::RgbFrame;
use crate::pattern::TestPattern;

pub(crate) struct SyntheticSource {
    pattern: TestPattern,
    frame_count: u64,
    frame_limit: Option<u64>,
}

impl SyntheticSource {
    pub(crate) fn new(width: u32, height: u32, frame_limit: Option<u64>) -> Self {
        Self {
            pattern: TestPattern::new(width, height),
            frame_count: 0,
            frame_limit,
        }
    }

    pub(crate) fn next_frame(&mut self) -> Result<Option<RgbFrame>> {
        if let Some(limit) = self.frame_limit {
            if self.frame_count >= limit {
                return Ok(None);
            }
        }
        // Advance the pattern by a nominal 100ms per frame.
        let t = self.frame_count as f64 * 0.1;
        self.frame_count += 1;
        Ok(Some(self.pattern.render(t)))
    }

    pub(crate) fn frames_captured(&self) -> u64 {
        self.frame_count
    }
}
