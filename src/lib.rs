//! camprobe - camera pipeline test tools
//!
//! This crate bundles three small, independent utilities used to exercise a
//! camera/detection pipeline:
//!
//! - `image_publisher`: renders a synthetic animated test pattern and publishes
//!   it on a pub/sub topic at a fixed cadence, for downstream consumers.
//! - `jpeg_to_raw`: one-shot converter from a compressed image file to a
//!   headerless raw RGB8 byte file at an exact target resolution.
//! - `video_detect`: opens a camera or video file, runs every frame through an
//!   ONNX detection model, and renders the annotated stream to a window.
//!
//! # Module Structure
//!
//! - `frame`: RGB8 frame buffer with shape validation
//! - `pattern`: closed-form synthetic test pattern
//! - `publish`: pub/sub image publisher (MQTT client lifecycle + wire envelope)
//! - `convert`: compressed image to raw RGB conversion
//! - `ingest`: capture sources (synthetic, V4L2 cameras, video files)
//! - `detect`: detection records and detector backends (tract ONNX, stub)
//! - `draw`: overlay primitives (boxes, digit labels)
//! - `display`: on-screen window sink
//! - `viewer`: the capture -> infer -> draw -> display loop
//!
//! The utilities share no state: each is a closed loop from an external input
//! to an external output. All loops are single-threaded and blocking;
//! cancellation (Ctrl-C, ESC) is only observed between iterations.

pub mod convert;
pub mod detect;
pub mod display;
pub mod draw;
pub mod frame;
pub mod ingest;
pub mod pattern;
pub mod publish;
pub mod viewer;

pub use convert::{convert_to_raw, ConvertReport, ConvertRequest};
pub use detect::{DetectionRecord, Detector, StubDetector, TractDetector, MODEL_INPUT_SIZE};
pub use display::DisplayWindow;
pub use frame::RgbFrame;
pub use ingest::{CaptureSource, SourceSpec};
pub use pattern::TestPattern;
pub use publish::{FramePublisher, ImageMessage, PublisherSettings};
pub use viewer::{FrameSink, NullSink, ViewerSummary};
