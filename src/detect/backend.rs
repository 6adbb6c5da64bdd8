use anyhow::Result;

use crate::detect::record::DetectionRecord;
use crate::frame::RgbFrame;

/// Detector backend trait.
///
/// One synchronous forward pass per frame. Implementations must treat the
/// frame as read-only and must not retain it across calls.
pub trait Detector {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run detection on a frame and return all raw records.
    ///
    /// Threshold filtering happens at the drawing layer, not here: callers may
    /// want to inspect low-confidence records.
    fn detect(&mut self, frame: &RgbFrame) -> Result<Vec<DetectionRecord>>;
}

/// Stub detector returning a fixed record list. Used in tests and demo runs
/// where no model file is available.
pub struct StubDetector {
    records: Vec<DetectionRecord>,
    pub frames_seen: u64,
}

impl StubDetector {
    pub fn new(records: Vec<DetectionRecord>) -> Self {
        Self {
            records,
            frames_seen: 0,
        }
    }

    /// A stub that never detects anything.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl Detector for StubDetector {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _frame: &RgbFrame) -> Result<Vec<DetectionRecord>> {
        self.frames_seen += 1;
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_detector_replays_records() {
        let rec = DetectionRecord::from_row(&[1.0, 1.0, 5.0, 5.0, 0.8, 2.0]).unwrap();
        let mut det = StubDetector::new(vec![rec]);
        let frame = RgbFrame::black(8, 8);

        let out = det.detect(&frame).unwrap();
        assert_eq!(out, vec![rec]);
        det.detect(&frame).unwrap();
        assert_eq!(det.frames_seen, 2);
    }
}
