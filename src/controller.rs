// Stroke and canvas controller.
//
// Owns the canvas and the session's drawing state and advances it one
// classified frame at a time. A stroke continues only across consecutive
// frames of the same stroke mode (Draw or Erase); any other frame drops the
// stroke cursor, so the next stroke starts fresh instead of joining an
// unrelated point.

use crate::canvas::Canvas;
use crate::config::{Swatch, WhiteboardConfig};
use crate::gesture::{Classification, Mode};
use crate::types::{Color, Point};
use log::debug;

/// Piecewise-linear interpolation clamped to the output ends outside `from`.
pub fn interp(value: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    let (x0, x1) = from;
    let (y0, y1) = to;
    if value <= x0 {
        return y0;
    }
    if value >= x1 {
        return y1;
    }
    y0 + (value - x0) * (y1 - y0) / (x1 - x0)
}

/// Eraser width from a thumb/index pinch distance (normalized units).
/// Wider pinch, thinner eraser.
pub fn pinch_width(distance: f32, range: (u32, u32)) -> u32 {
    let raw = (20.0 + (1.0 - distance) * 80.0) as i64;
    raw.clamp(range.0 as i64, range.1 as i64) as u32
}

/// Eraser width from the index fingertip's pixel y over `band`.
pub fn height_width(y: i32, band: (f32, f32), range: (u32, u32)) -> u32 {
    interp(y as f32, band, (range.0 as f32, range.1 as f32)) as u32
}

/// Slider handle y for an eraser width: the inverse of [`height_width`] with
/// the band flipped, so a wider eraser puts the handle higher on screen.
pub fn slider_y(width: u32, range: (u32, u32), band: (f32, f32)) -> i32 {
    interp(width as f32, (range.0 as f32, range.1 as f32), (band.1, band.0)) as i32
}

/// Palette slot under pixel column `x`: lower swatch edge inclusive, clamped to the palette.
pub fn swatch_index(x: i32, swatch_width: i32, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    let slot = x.max(0) / swatch_width.max(1);
    Some((slot as usize).min(last))
}

pub struct Controller {
    config: WhiteboardConfig,
    canvas: Canvas,
    /// Last point of the stroke in progress and the mode drawing it;
    /// `None` when no stroke is active.
    cursor: Option<(Mode, Point)>,
    color: usize,
    eraser_width: u32,
    last_mode: Mode,
}

impl Controller {
    pub fn new(width: usize, height: usize, config: WhiteboardConfig) -> Self {
        let (lo, hi) = config.eraser_range;
        let eraser_width = config.eraser_default.clamp(lo, hi);
        Self {
            config,
            canvas: Canvas::new(width, height),
            cursor: None,
            color: 0,
            eraser_width,
            last_mode: Mode::Idle,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn config(&self) -> &WhiteboardConfig {
        &self.config
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor.map(|(_, point)| point)
    }

    pub fn swatch(&self) -> Swatch {
        self.config.palette[self.color]
    }

    pub fn draw_color(&self) -> Color {
        self.swatch().color
    }

    pub fn eraser_width(&self) -> u32 {
        self.eraser_width
    }

    pub fn brush_width(&self) -> u32 {
        self.config.brush_width
    }

    /// Mode applied on the most recent frame.
    pub fn mode(&self) -> Mode {
        self.last_mode
    }

    /// Apply one frame.
    pub fn update(&mut self, frame: &Classification) {
        if frame.mode != self.last_mode {
            debug!("mode {:?} -> {:?}", self.last_mode, frame.mode);
            self.last_mode = frame.mode;
        }

        match frame.mode {
            Mode::Draw => {
                let (color, width) = (self.draw_color(), self.config.brush_width);
                self.extend_stroke(Mode::Draw, frame.point, color, width);
            }
            Mode::Erase => {
                self.extend_stroke(Mode::Erase, frame.point, Color::BLACK, self.eraser_width);
            }
            Mode::ColorSelect => {
                self.cursor = None;
                let slots = self.config.palette.len();
                if let Some(slot) = swatch_index(frame.point.x, self.config.swatch_width, slots) {
                    if slot != self.color {
                        debug!("color -> {}", self.config.palette[slot].name);
                    }
                    self.color = slot;
                }
            }
            Mode::PinchResize => {
                self.cursor = None;
                self.set_eraser_width(pinch_width(frame.pinch_distance, self.config.eraser_range));
            }
            Mode::HeightResize => {
                self.cursor = None;
                let (band, range) = (self.config.height_band, self.config.eraser_range);
                let width = height_width(frame.point.y, band, range);
                self.set_eraser_width(width);
            }
            Mode::Idle => self.cursor = None,
        }
    }

    /// First frame of a stroke only records the start; later frames draw one segment each.
    /// Switching between Draw and Erase starts a new stroke.
    fn extend_stroke(&mut self, mode: Mode, point: Point, color: Color, width: u32) {
        if let Some((stroke_mode, prev)) = self.cursor {
            if stroke_mode == mode {
                self.canvas.stroke(prev, point, color, width);
            }
        }
        self.cursor = Some((mode, point));
    }

    fn set_eraser_width(&mut self, width: u32) {
        if width != self.eraser_width {
            debug!("eraser width {} -> {}", self.eraser_width, width);
            self.eraser_width = width;
        }
    }
}
