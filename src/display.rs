//! On-screen frame display.
//!
//! Wraps a `minifb` window. The window is created on the first presented
//! frame (capture geometry is not known before that) and is released exactly
//! once when the viewer drops it.

use anyhow::{anyhow, Result};
use minifb::{Key, Window, WindowOptions};

use crate::frame::RgbFrame;
use crate::viewer::FrameSink;

pub struct DisplayWindow {
    title: String,
    window: Option<Window>,
}

impl DisplayWindow {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            window: None,
        }
    }

    fn ensure_window(&mut self, width: u32, height: u32) -> Result<&mut Window> {
        if self.window.is_none() {
            let window = Window::new(
                &self.title,
                width as usize,
                height as usize,
                WindowOptions::default(),
            )
            .map_err(|e| anyhow!("failed to create display window: {}", e))?;
            log::info!("display window opened ({}x{})", width, height);
            self.window = Some(window);
        }
        Ok(self.window.as_mut().expect("window was just created"))
    }
}

impl FrameSink for DisplayWindow {
    fn present(&mut self, frame: &RgbFrame) -> Result<()> {
        let width = frame.width();
        let height = frame.height();
        let argb = rgb_to_argb(frame.as_bytes(), width as usize, height as usize);
        let window = self.ensure_window(width, height)?;
        window
            .update_with_buffer(&argb, width as usize, height as usize)
            .map_err(|e| anyhow!("failed to update display window: {}", e))?;
        Ok(())
    }

    fn wants_close(&self) -> bool {
        match &self.window {
            Some(window) => !window.is_open() || window.is_key_down(Key::Escape),
            None => false,
        }
    }
}

/// Pack an HWC RGB buffer into the 0RGB u32 layout minifb expects.
fn rgb_to_argb(buf: &[u8], width: usize, height: usize) -> Vec<u32> {
    debug_assert!(buf.len() >= width * height * 3);
    let mut argb = Vec::with_capacity(width * height);
    for px in buf.chunks_exact(3).take(width * height) {
        let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
        argb.push((r << 16) | (g << 8) | b);
    }
    argb
}
