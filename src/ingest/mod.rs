//! Capture sources for the detection viewer.
//!
//! A source is either a live camera (numeric index) or a video file path.
//! Backends:
//! - Synthetic (`stub://...`) - always available, used by tests and demos
//! - V4L2 devices (feature: ingest-v4l2)
//! - Video files via FFmpeg (feature: ingest-file-ffmpeg)
//!
//! All sources hand out `RgbFrame` buffers. `next_frame` returns `Ok(None)`
//! at end of stream (file sources); live sources never report end of stream.
//! A failed open is fatal to the caller: there is no retry logic, and no
//! timeout is applied to capture reads.

#[cfg(feature = "ingest-file-ffmpeg")]
pub(crate) mod file_ffmpeg;
mod synthetic;
#[cfg(feature = "ingest-v4l2")]
pub(crate) mod v4l2;

use std::path::PathBuf;

use anyhow::Result;

use crate::frame::RgbFrame;
use synthetic::SyntheticSource;

/// Number of frames a `stub://` source produces before reporting end of
/// stream, so file-mode termination is exercisable without a real file.
const STUB_FRAME_LIMIT: u64 = 90;

/// Parsed source specifier: a camera index or a file path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSpec {
    Camera(u32),
    File(PathBuf),
}

impl SourceSpec {
    /// A specifier that parses as an unsigned integer is a camera index;
    /// anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(index) => SourceSpec::Camera(index),
            Err(_) => SourceSpec::File(PathBuf::from(raw)),
        }
    }
}

impl std::fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceSpec::Camera(index) => write!(f, "camera {}", index),
            SourceSpec::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Capture parameters requested from live sources. File sources use the
/// file's native geometry.
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            target_fps: 10,
        }
    }
}

/// One open capture device or file.
pub struct CaptureSource {
    backend: CaptureBackend,
}

enum CaptureBackend {
    Synthetic(SyntheticSource),
    #[cfg(feature = "ingest-v4l2")]
    Camera(v4l2::CameraSource),
    #[cfg(feature = "ingest-file-ffmpeg")]
    File(file_ffmpeg::FfmpegFileSource),
}

impl CaptureSource {
    /// Open the capture backend for a source specifier. Acquired once at
    /// startup; released on drop.
    pub fn open(spec: &SourceSpec, config: &CaptureConfig) -> Result<Self> {
        match spec {
            SourceSpec::Camera(index) => Self::open_camera(*index, config),
            SourceSpec::File(path) => {
                let path_str = path.to_string_lossy();
                if path_str.starts_with("stub://") {
                    log::info!("capture source: {} (synthetic)", path_str);
                    return Ok(Self::synthetic(
                        config.width,
                        config.height,
                        Some(STUB_FRAME_LIMIT),
                    ));
                }
                Self::open_file(&path_str)
            }
        }
    }

    /// A synthetic source with an optional frame limit (`None` = endless).
    pub fn synthetic(width: u32, height: u32, frame_limit: Option<u64>) -> Self {
        Self {
            backend: CaptureBackend::Synthetic(SyntheticSource::new(width, height, frame_limit)),
        }
    }

    #[cfg(feature = "ingest-v4l2")]
    fn open_camera(index: u32, config: &CaptureConfig) -> Result<Self> {
        let device = format!("/dev/video{}", index);
        Ok(Self {
            backend: CaptureBackend::Camera(v4l2::CameraSource::open(&device, config)?),
        })
    }

    #[cfg(not(feature = "ingest-v4l2"))]
    fn open_camera(index: u32, _config: &CaptureConfig) -> Result<Self> {
        anyhow::bail!(
            "camera {} requires the ingest-v4l2 feature (use a stub:// source instead)",
            index
        )
    }

    #[cfg(feature = "ingest-file-ffmpeg")]
    fn open_file(path: &str) -> Result<Self> {
        Ok(Self {
            backend: CaptureBackend::File(file_ffmpeg::FfmpegFileSource::open(path)?),
        })
    }

    #[cfg(not(feature = "ingest-file-ffmpeg"))]
    fn open_file(path: &str) -> Result<Self> {
        anyhow::bail!(
            "file source '{}' requires the ingest-file-ffmpeg feature (use a stub:// source instead)",
            path
        )
    }

    /// Capture the next frame. `Ok(None)` means the source is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<RgbFrame>> {
        match &mut self.backend {
            CaptureBackend::Synthetic(source) => source.next_frame(),
            #[cfg(feature = "ingest-v4l2")]
            CaptureBackend::Camera(source) => source.next_frame(),
            #[cfg(feature = "ingest-file-ffmpeg")]
            CaptureBackend::File(source) => source.next_frame(),
        }
    }

    /// Frames captured so far.
    pub fn frames_captured(&self) -> u64 {
        match &self.backend {
            CaptureBackend::Synthetic(source) => source.frames_captured(),
            #[cfg(feature = "ingest-v4l2")]
            CaptureBackend::Camera(source) => source.frames_captured(),
            #[cfg(feature = "ingest-file-ffmpeg")]
            CaptureBackend::File(source) => source.frames_captured(),
        }
    }
}
