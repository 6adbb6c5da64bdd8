//! The capture -> infer -> draw -> display loop.
//!
//! Lifecycle: INIT (open source, load model, create sink) happens before this
//! module is entered; RUNNING is the loop below; STOPPED is reached on end of
//! stream, a close request (ESC / window closed), or a capture error. Every
//! exit path releases the capture and display handles by dropping them in the
//! caller.
//!
//! The loop is single-threaded and blocking: each iteration fully completes
//! capture, inference, overlay, and display before the next begins. Close
//! requests are observed once per iteration.

use anyhow::Result;

use crate::detect::Detector;
use crate::draw::draw_detections;
use crate::frame::RgbFrame;
use crate::ingest::CaptureSource;

/// Where annotated frames go. The on-screen window implements this; tests
/// use `NullSink`.
pub trait FrameSink {
    fn present(&mut self, frame: &RgbFrame) -> Result<()>;

    /// True when the user asked to stop (key press, closed window).
    fn wants_close(&self) -> bool {
        false
    }
}

/// Sink that discards frames. Never requests a close.
#[derive(Debug, Default)]
pub struct NullSink {
    pub frames_presented: u64,
}

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &RgbFrame) -> Result<()> {
        self.frames_presented += 1;
        Ok(())
    }
}

/// Counters reported when the loop stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewerSummary {
    pub frames: u64,
    /// Records drawn (above threshold), not records produced.
    pub detections: u64,
}

/// Run the viewer loop until end of stream or a close request.
///
/// Detections are overlaid on the captured frame in its own coordinate
/// space; boxes are not rescaled from the model's input resolution.
pub fn run(
    source: &mut CaptureSource,
    detector: &mut dyn Detector,
    sink: &mut dyn FrameSink,
    score_thresh: f32,
) -> Result<ViewerSummary> {
    let mut summary = ViewerSummary::default();
    log::info!(
        "viewer running: detector={} score_thresh={}",
        detector.name(),
        score_thresh
    );

    loop {
        if sink.wants_close() {
            log::info!("close requested, stopping");
            break;
        }

        let Some(mut frame) = source.next_frame()? else {
            log::info!("end of stream after {} frames", summary.frames);
            break;
        };

        let records = detector.detect(&frame)?;
        let drawn = draw_detections(&mut frame, &records, score_thresh);
        if drawn > 0 {
            log::debug!("frame {}: drew {} of {} records", summary.frames, drawn, records.len());
        }
        summary.detections += drawn as u64;

        sink.present(&frame)?;
        summary.frames += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{DetectionRecord, StubDetector};

    #[test]
    fn loop_terminates_on_end_of_stream_without_close_request() {
        let mut source = CaptureSource::synthetic(16, 16, Some(5));
        let mut detector = StubDetector::empty();
        let mut sink = NullSink::default();

        let summary = run(&mut source, &mut detector, &mut sink, 0.4).unwrap();
        assert_eq!(summary.frames, 5);
        assert_eq!(sink.frames_presented, 5);
        assert_eq!(detector.frames_seen, 5);
    }

    #[test]
    fn drawn_detections_respect_the_threshold() {
        let records = vec![
            DetectionRecord::from_row(&[1.0, 1.0, 10.0, 10.0, 0.39, 0.0]).unwrap(),
            DetectionRecord::from_row(&[2.0, 2.0, 12.0, 12.0, 0.41, 1.0]).unwrap(),
        ];
        let mut source = CaptureSource::synthetic(16, 16, Some(3));
        let mut detector = StubDetector::new(records);
        let mut sink = NullSink::default();

        let summary = run(&mut source, &mut detector, &mut sink, 0.4).unwrap();
        assert_eq!(summary.frames, 3);
        // One of the two records per frame is above threshold.
        assert_eq!(summary.detections, 3);
    }

    struct CloseAfter {
        remaining: u64,
    }

    impl FrameSink for CloseAfter {
        fn present(&mut self, _frame: &RgbFrame) -> Result<()> {
            self.remaining = self.remaining.saturating_sub(1);
            Ok(())
        }

        fn wants_close(&self) -> bool {
            self.remaining == 0
        }
    }

    #[test]
    fn loop_stops_when_the_sink_requests_close() {
        let mut source = CaptureSource::synthetic(16, 16, None);
        let mut detector = StubDetector::empty();
        let mut sink = CloseAfter { remaining: 4 };

        let summary = run(&mut source, &mut detector, &mut sink, 0.4).unwrap();
        assert_eq!(summary.frames, 4);
    }
}
