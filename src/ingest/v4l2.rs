//! V4L2 camera capture backend.
//!
//! Opens a local device node (e.g. /dev/video0), requests RGB3 at the
//! configured geometry and frame rate, and captures via an mmap buffer
//! stream. Capture reads block with no timeout; a read error is fatal to the
//! viewer loop.

use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use super::CaptureConfig;
use crate::frame::RgbFrame;

pub(crate) struct CameraSource {
    state: CameraState,
    device: String,
    width: u32,
    height: u32,
    frame_count: u64,
}

#[self_referencing]
struct CameraState {
    device: v4l::Device,
    #[borrows(mut device)]
    #[covariant]
    stream: v4l::prelude::MmapStream<'this, v4l::Device>,
}

impl CameraSource {
    pub(crate) fn open(device_path: &str, config: &CaptureConfig) -> Result<Self> {
        use v4l::buffer::Type;
        use v4l::video::Capture;

        let device = v4l::Device::with_path(device_path)
            .with_context(|| format!("open v4l2 device {}", device_path))?;

        let mut format = device.format().context("read v4l2 format")?;
        format.width = config.width;
        format.height = config.height;
        format.fourcc = v4l::FourCC::new(b"RGB3");

        let format = match device.set_format(&format) {
            Ok(format) => format,
            Err(err) => {
                log::warn!("failed to set format on {}: {}", device_path, err);
                device
                    .format()
                    .context("read v4l2 format after set failure")?
            }
        };

        if format.fourcc != v4l::FourCC::new(b"RGB3") {
            return Err(anyhow!(
                "device {} does not provide RGB3 frames (got {})",
                device_path,
                format.fourcc
            ));
        }

        if config.target_fps > 0 {
            let params = v4l::video::capture::Parameters::with_fps(config.target_fps);
            if let Err(err) = device.set_params(&params) {
                log::warn!("failed to set fps on {}: {}", device_path, err);
            }
        }

        let width = format.width;
        let height = format.height;

        let state = CameraStateBuilder {
            device,
            stream_builder: |device| {
                v4l::prelude::MmapStream::with_buffers(device, Type::VideoCapture, 4)
                    .map_err(|err| anyhow::Error::new(err).context("create v4l2 buffer stream"))
            },
        }
        .try_build()?;

        log::info!("capture source: {} ({}x{})", device_path, width, height);

        Ok(Self {
            state,
            device: device_path.to_string(),
            width,
            height,
            frame_count: 0,
        })
    }

    pub(crate) fn next_frame(&mut self) -> Result<Option<RgbFrame>> {
        use v4l::io::traits::CaptureStream;

        // Copy out inside the closure: the mmap buffer only lives for the
        // duration of the stream borrow.
        let pixels = self
            .state
            .with_mut(|fields| fields.stream.next().map(|(buf, _meta)| buf.to_vec()))
            .with_context(|| format!("capture v4l2 frame from {}", self.device))?;

        self.frame_count += 1;
        let frame = RgbFrame::from_raw(pixels, self.width, self.height)
            .with_context(|| format!("v4l2 frame from {} has unexpected size", self.device))?;
        Ok(Some(frame))
    }

    pub(crate) fn frames_captured(&self) -> u64 {
        self.frame_count
    }
}
