//! Compressed image to raw RGB conversion.
//!
//! Decodes one image file, forces 3-channel RGB, resamples to an exact target
//! resolution with Lanczos3, and writes the pixel buffer verbatim: no header,
//! no compression. The output is `width * height * 3` bytes, row-major and
//! channel-interleaved; readers must know the dimensions out-of-band.
//!
//! Aspect-ratio mismatches stretch rather than letter-box. That matches the
//! historical behavior of this tool and is deliberately carried over.
//!
//! Failures do not propagate: every decode, resize, or I/O error is caught at
//! this boundary and reported as a failed `ConvertReport`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use image::imageops::FilterType;

/// Input/output paths and target resolution for one conversion.
#[derive(Clone, Debug)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ConvertRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            width: 640,
            height: 640,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Success flag plus a printable diagnostic.
#[derive(Clone, Debug)]
pub struct ConvertReport {
    pub success: bool,
    pub detail: String,
}

/// Run one conversion. Never panics and never returns an error; failures are
/// folded into the report.
pub fn convert_to_raw(request: &ConvertRequest) -> ConvertReport {
    match run(request) {
        Ok(detail) => ConvertReport {
            success: true,
            detail,
        },
        Err(e) => ConvertReport {
            success: false,
            detail: format!("{:#}", e),
        },
    }
}

fn run(request: &ConvertRequest) -> Result<String> {
    let decoded = image::open(&request.input)
        .with_context(|| format!("failed to decode {}", request.input.display()))?;
    log::info!(
        "input image: {}x{} ({:?})",
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    // Force 3-channel RGB regardless of the source mode (grayscale, palette,
    // alpha), then stretch to the exact target resolution.
    let rgb = decoded.to_rgb8();
    let resized = image::imageops::resize(&rgb, request.width, request.height, FilterType::Lanczos3);

    let bytes = resized.into_raw();
    std::fs::write(&request.output, &bytes)
        .with_context(|| format!("failed to write {}", request.output.display()))?;

    Ok(format!(
        "wrote {} bytes ({}x{} rgb8) to {}",
        bytes.len(),
        request.width,
        request.height,
        request.output.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn raw_len(path: &std::path::Path) -> u64 {
        std::fs::metadata(path).unwrap().len()
    }

    #[test]
    fn output_size_is_target_times_three() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.rgb");
        let img = RgbImage::from_pixel(100, 60, Rgb([12, 200, 34]));
        img.save(&input).unwrap();

        let report = convert_to_raw(&ConvertRequest::new(&input, &output).with_size(32, 48));
        assert!(report.success, "{}", report.detail);
        assert_eq!(raw_len(&output), 32 * 48 * 3);
    }

    #[test]
    fn grayscale_input_is_forced_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gray.png");
        let output = dir.path().join("gray.rgb");
        let img = GrayImage::from_pixel(20, 20, Luma([77]));
        img.save(&input).unwrap();

        let report = convert_to_raw(&ConvertRequest::new(&input, &output).with_size(10, 10));
        assert!(report.success, "{}", report.detail);
        assert_eq!(raw_len(&output), 10 * 10 * 3);

        // A uniform gray source stays uniform after resampling.
        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.iter().all(|&b| b == 77));
    }

    #[test]
    fn aspect_mismatch_stretches_full_target() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("wide.png");
        let output = dir.path().join("wide.rgb");
        // A solid wide image stretched to a square still fills every pixel.
        let img = RgbImage::from_pixel(64, 16, Rgb([255, 0, 0]));
        img.save(&input).unwrap();

        let report = convert_to_raw(&ConvertRequest::new(&input, &output).with_size(24, 24));
        assert!(report.success, "{}", report.detail);
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(bytes.len(), 24 * 24 * 3);
        for px in bytes.chunks_exact(3) {
            assert_eq!(px, [255, 0, 0]);
        }
    }

    #[test]
    fn missing_input_yields_failure_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = convert_to_raw(&ConvertRequest::new(
            dir.path().join("does_not_exist.jpg"),
            dir.path().join("out.rgb"),
        ));
        assert!(!report.success);
        assert!(report.detail.contains("failed to decode"));
    }

    #[test]
    fn corrupt_input_yields_failure_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.jpg");
        std::fs::write(&input, b"this is not a jpeg").unwrap();
        let report = convert_to_raw(&ConvertRequest::new(&input, dir.path().join("out.rgb")));
        assert!(!report.success);
    }
}
