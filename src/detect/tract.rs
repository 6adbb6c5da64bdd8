//! Tract-based ONNX detector.
//!
//! The model is loaded once at startup and bound to a fixed
//! `[1, 3, 640, 640]` f32 input. Per frame: resize to the model resolution
//! (bilinear), repack HWC bytes into channel-first floats, add the batch
//! dimension, and run one synchronous pass. The first output tensor is read
//! as rows of at least 6 fields each (x1, y1, x2, y2, score, class).
//!
//! Pixel values are fed to the model as raw 0..255 floats, without
//! normalization. Detections come back in the model's coordinate space and
//! are passed through unscaled.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::imageops::FilterType;
use image::RgbImage;
use tract_onnx::prelude::*;

use crate::detect::backend::Detector;
use crate::detect::record::DetectionRecord;
use crate::frame::RgbFrame;

/// Fixed model input edge length (square input).
pub const MODEL_INPUT_SIZE: u32 = 640;

pub struct TractDetector {
    plan: TypedSimplePlan<TypedModel>,
}

impl TractDetector {
    /// Load an ONNX model from disk and prepare it for inference.
    pub fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        let size = MODEL_INPUT_SIZE as usize;
        let plan = tract_onnx::onnx()
            .model_for_path(model_path)
            .with_context(|| format!("failed to load ONNX model from {}", model_path.display()))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 3, size, size)),
            )
            .context("failed to set input fact")?
            .into_optimized()
            .context("failed to optimize ONNX model")?
            .into_runnable()
            .context("failed to build runnable ONNX model")?;

        Ok(Self { plan })
    }

    fn build_input(&self, frame: &RgbFrame) -> Result<Tensor> {
        let rgb = RgbImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
            .ok_or_else(|| anyhow!("frame buffer does not match its dimensions"))?;
        let resized = image::imageops::resize(
            &rgb,
            MODEL_INPUT_SIZE,
            MODEL_INPUT_SIZE,
            FilterType::Triangle,
        );
        Ok(chw_tensor(&resized))
    }
}

impl Detector for TractDetector {
    fn name(&self) -> &'static str {
        "tract"
    }

    fn detect(&mut self, frame: &RgbFrame) -> Result<Vec<DetectionRecord>> {
        let input = self.build_input(frame)?;
        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .context("ONNX inference failed")?;
        let output = outputs
            .first()
            .ok_or_else(|| anyhow!("model produced no outputs"))?;
        let view = output
            .to_array_view::<f32>()
            .context("model output tensor was not f32")?;

        let row_len = view.shape().last().copied().unwrap_or(0);
        let flat: Vec<f32> = view.iter().copied().collect();
        Ok(parse_rows(&flat, row_len))
    }
}

/// Pack an HWC RGB8 image into a `[1, 3, h, w]` f32 tensor, keeping raw
/// 0..255 values.
fn chw_tensor(img: &RgbImage) -> Tensor {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let pixels = img.as_raw();
    let input = tract_ndarray::Array4::from_shape_fn(
        (1, 3, height, width),
        |(_, channel, y, x)| pixels[(y * width + x) * 3 + channel] as f32,
    );
    input.into_tensor()
}

/// Split a flat output buffer into fixed-length rows and parse each row.
/// Malformed rows (shorter than 6 fields) are skipped silently.
fn parse_rows(flat: &[f32], row_len: usize) -> Vec<DetectionRecord> {
    if row_len == 0 {
        return Vec::new();
    }
    flat.chunks_exact(row_len)
        .filter_map(DetectionRecord::from_row)
        .collect()
}
