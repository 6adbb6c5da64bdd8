//! Detection records and detector backends.
//!
//! A detector consumes one RGB frame and produces a list of detection
//! records (bounding box, confidence score, class id). Two backends exist:
//!
//! - `TractDetector`: tract-onnx inference against a local model file
//! - `StubDetector`: canned records for tests

mod backend;
mod record;
mod tract;

pub use backend::{Detector, StubDetector};
pub use record::DetectionRecord;
pub use tract::{TractDetector, MODEL_INPUT_SIZE};
