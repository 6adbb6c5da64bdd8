//! RGB8 frame buffer.
//!
//! A frame is a row-major, channel-interleaved byte buffer (height x width x 3).
//! The only invariant is shape consistency: the buffer length must equal
//! `width * height * 3`. Frames are transient; they carry no identity beyond
//! the current loop iteration.

use anyhow::{anyhow, Result};

pub const RGB_CHANNELS: usize = 3;

/// One RGB8 image buffer, row-major and channel-interleaved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl RgbFrame {
    /// Wrap an existing byte buffer. Fails if the length does not match the
    /// declared dimensions.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(RGB_CHANNELS))
            .ok_or_else(|| anyhow!("frame dimensions overflow"))?;
        if data.len() != expected {
            return Err(anyhow!(
                "frame buffer size mismatch: expected {} bytes for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Allocate a black frame.
    pub fn black(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * RGB_CHANNELS;
        Self {
            data: vec![0u8; len],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes (width * 3).
    pub fn step(&self) -> u32 {
        self.width * RGB_CHANNELS as u32
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Read one pixel. Out-of-bounds coordinates return None.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * RGB_CHANNELS;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Write one pixel. Out-of-bounds coordinates are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * RGB_CHANNELS;
        self.data[idx..idx + RGB_CHANNELS].copy_from_slice(&rgb);
    }
}
