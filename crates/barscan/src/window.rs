//! On-screen display through `minifb`.

use std::thread;
use std::time::Duration;

use barscan_core::Frame;
use log::debug;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::sink::FrameSink;
use crate::ScanError;

const ACK_POLL: Duration = Duration::from_millis(16);

/// One window per session, opened on the first frame and sized to it.
///
/// Escape or closing the window requests cancellation; any key press (or
/// closing the window) acknowledges a frame.
pub struct WindowSink {
    title: String,
    window: Option<Window>,
    buffer: Vec<u32>,
}

impl WindowSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window: None,
            buffer: Vec::new(),
        }
    }

    fn ensure_window(&mut self, width: usize, height: usize) -> Result<&mut Window, ScanError> {
        let window = match self.window.take() {
            Some(window) => window,
            None => {
                debug!("opening window `{}` at {width}x{height}", self.title);
                Window::new(&self.title, width, height, WindowOptions::default())
                    .map_err(|e| ScanError::Display(e.to_string()))?
            }
        };
        Ok(self.window.insert(window))
    }
}

fn pack_0rgb(frame: &Frame, out: &mut Vec<u32>) {
    out.clear();
    out.extend(frame.pixels().map(|p| {
        let [r, g, b] = p.0;
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }));
}

impl FrameSink for WindowSink {
    fn show(&mut self, frame: &Frame) -> Result<(), ScanError> {
        let (w, h) = (frame.width() as usize, frame.height() as usize);
        let mut buffer = std::mem::take(&mut self.buffer);
        pack_0rgb(frame, &mut buffer);
        let result = self
            .ensure_window(w, h)?
            .update_with_buffer(&buffer, w, h)
            .map_err(|e| ScanError::Display(e.to_string()));
        self.buffer = buffer;
        result
    }

    fn wait_for_ack(&mut self) -> Result<(), ScanError> {
        let Some(window) = self.window.as_mut() else {
            return Ok(());
        };
        while window.is_open() {
            if !window.get_keys_pressed(KeyRepeat::No).is_empty() {
                break;
            }
            window.update();
            thread::sleep(ACK_POLL);
        }
        Ok(())
    }

    fn cancel_requested(&mut self) -> bool {
        self.window
            .as_ref()
            .is_some_and(|w| !w.is_open() || w.is_key_down(Key::Escape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn pixels_pack_as_0rgb() {
        let frame = Frame::from_pixel(2, 1, Rgb([0x12, 0x34, 0x56]));
        let mut out = Vec::new();
        pack_0rgb(&frame, &mut out);
        assert_eq!(out, vec![0x0012_3456, 0x0012_3456]);
    }
}
