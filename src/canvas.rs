// The persistent ink layer and how it is laid over the live camera frame.
//
// Black means "no ink". Erasing paints black, so an erased pixel and a
// never-touched pixel are indistinguishable; compositing shows live video
// through both.

use crate::draw::draw_thick_line;
use crate::error::Error;
use crate::types::{Color, FrameBuffer, Point};
use image::{ImageBuffer, Rgb};
use std::path::Path;

/// Canvas pixels at or below this gray level let the live frame show through.
pub const INK_THRESHOLD: u8 = 50;

pub struct Canvas {
    buffer: FrameBuffer,
}

impl Canvas {
    /// All-black canvas matching the frame resolution.
    pub fn new(width: usize, height: usize) -> Self {
        Self { buffer: FrameBuffer::new(width, height) }
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.buffer.get(x, y)
    }

    /// Append one straight segment. Nothing is ever undone.
    pub fn stroke(&mut self, from: Point, to: Point, color: Color, width: u32) {
        draw_thick_line(&mut self.buffer, from, to, color, width);
    }

    /// True if no pixel carries ink.
    pub fn is_blank(&self) -> bool {
        self.buffer.pixels.iter().all(|p| *p == Color::BLACK.0)
    }

    /// Lay the canvas over `frame` with a binary mask:
    /// `frame = (frame & mask) | canvas`, where the mask is all-ones for
    /// pixels whose gray level is at most [`INK_THRESHOLD`] and zero elsewhere.
    /// Dark ink (pure blue is gray 29) is OR-ed into the video rather than
    /// replacing it.
    pub fn composite_onto(&self, frame: &mut FrameBuffer) -> Result<(), Error> {
        if frame.width != self.buffer.width || frame.height != self.buffer.height {
            return Err(Error::CameraFrame(format!(
                "composite: frame {}x{} does not match canvas {}x{}",
                frame.width, frame.height, self.buffer.width, self.buffer.height
            )));
        }
        for (out, &ink) in frame.pixels.iter_mut().zip(&self.buffer.pixels) {
            let mask = if Color(ink).gray() > INK_THRESHOLD { 0 } else { 0x00_FF_FF_FF };
            *out = (*out & mask) | ink;
        }
        Ok(())
    }

    /// Write the canvas to an RGB PNG (or any format the extension names).
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let w = self.buffer.width as u32;
        let h = self.buffer.height as u32;
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(w, h, |x, y| {
            let c = Color(self.buffer.pixels[y as usize * self.buffer.width + x as usize]);
            Rgb([c.r(), c.g(), c.b()])
        });
        img.save(path)?;
        Ok(())
    }
}
