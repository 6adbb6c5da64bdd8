//! End-to-end viewer pipeline tests against the public API, using the
//! synthetic capture source and the stub detector so no hardware, model
//! file, or display server is needed.

use camprobe::{
    viewer, CaptureSource, DetectionRecord, Detector, FrameSink, NullSink, RgbFrame, StubDetector,
};

#[test]
fn synthetic_stream_runs_to_end_of_stream() {
    let mut source = CaptureSource::synthetic(64, 48, Some(10));
    let mut detector = StubDetector::empty();
    let mut sink = NullSink::default();

    let summary = viewer::run(&mut source, &mut detector, &mut sink, 0.4).unwrap();

    assert_eq!(summary.frames, 10);
    assert_eq!(summary.detections, 0);
    assert_eq!(sink.frames_presented, 10);
    assert_eq!(source.frames_captured(), 10);
}

/// Sink that checks overlay pixels actually landed on the presented frame.
struct OverlayProbe {
    saw_overlay: bool,
}

impl FrameSink for OverlayProbe {
    fn present(&mut self, frame: &RgbFrame) -> anyhow::Result<()> {
        // Top edge of the (10,10)-(40,40) box drawn in overlay green.
        if frame.pixel(10, 10) == Some([0, 255, 0]) {
            self.saw_overlay = true;
        }
        Ok(())
    }
}

#[test]
fn detections_above_threshold_are_drawn_on_presented_frames() {
    let records = vec![
        DetectionRecord::from_row(&[10.0, 10.0, 40.0, 40.0, 0.9, 2.0]).unwrap(),
        // At the threshold, not above it; must not be counted.
        DetectionRecord::from_row(&[5.0, 5.0, 8.0, 8.0, 0.4, 0.0]).unwrap(),
    ];
    let mut source = CaptureSource::synthetic(64, 64, Some(4));
    let mut detector = StubDetector::new(records);
    let mut sink = OverlayProbe { saw_overlay: false };

    let summary = viewer::run(&mut source, &mut detector, &mut sink, 0.4).unwrap();

    assert_eq!(summary.frames, 4);
    assert_eq!(summary.detections, 4);
    assert!(sink.saw_overlay);
    assert_eq!(detector.frames_seen, 4);
}

/// A detector error must abort the loop, not be swallowed.
struct FailingDetector;

impl Detector for FailingDetector {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn detect(&mut self, _frame: &RgbFrame) -> anyhow::Result<Vec<DetectionRecord>> {
        anyhow::bail!("inference backend fell over")
    }
}

#[test]
fn detector_errors_propagate_out_of_the_loop() {
    let mut source = CaptureSource::synthetic(32, 32, None);
    let mut detector = FailingDetector;
    let mut sink = NullSink::default();

    let err = viewer::run(&mut source, &mut detector, &mut sink, 0.4).unwrap_err();
    assert!(err.to_string().contains("fell over"));
    assert_eq!(sink.frames_presented, 0);
}
