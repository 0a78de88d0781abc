// Window + software drawing utilities.
// Provided here:
// 1) A window that shows the composited camera image and reports quit/snapshot keys.
// 2) Pixel primitives: thick lines, filled discs, rectangles.
// 3) A 5x7 bitmap font (scalable) for HUD text.

use crate::error::Error;
use crate::types::{Color, FrameBuffer, Point};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the camera feed.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// The session's only control signal: Q or ESC.
    pub fn quit_pressed(&self) -> bool {
        self.window.is_key_down(Key::Q) || self.window.is_key_down(Key::Escape)
    }

    /// S saves a snapshot of the canvas.
    pub fn s_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }
}

/* ---------- Software drawing ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color.0;
}

/// Visit every pixel of the Bresenham line from `a` to `b`, endpoints included.
/// Error terms are kept in i64 so endpoints anywhere in the i32 range cannot overflow.
fn bresenham(a: Point, b: Point, mut plot: impl FnMut(i32, i32)) {
    let (mut x0, mut y0) = (a.x, a.y);
    let dx = (i64::from(b.x) - i64::from(x0)).abs();
    let sx = if x0 < b.x { 1 } else { -1 };
    let dy = -(i64::from(b.y) - i64::from(y0)).abs();
    let sy = if y0 < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        plot(x0, y0);
        if x0 == b.x && y0 == b.y { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// 1-pixel line.
pub fn draw_line(fb: &mut FrameBuffer, a: Point, b: Point, color: Color) {
    bresenham(a, b, |x, y| put_pixel(fb, x, y, color));
}

/// Line of the given thickness with round caps: a disc stamped at every step.
pub fn draw_thick_line(fb: &mut FrameBuffer, a: Point, b: Point, color: Color, thickness: u32) {
    if thickness <= 1 {
        draw_line(fb, a, b, color);
        return;
    }
    let radius = (thickness / 2) as i32;
    bresenham(a, b, |x, y| fill_circle(fb, Point::new(x, y), radius, color));
}

/// Solid disc centered at `c`.
pub fn fill_circle(fb: &mut FrameBuffer, c: Point, radius: i32, color: Color) {
    if radius <= 0 {
        put_pixel(fb, c.x, c.y, color);
        return;
    }
    let r2 = radius * radius;
    for dy in -radius..=radius {
        // widest dx for this row, so each row is one contiguous span
        let span = ((r2 - dy * dy) as f32).sqrt() as i32;
        for dx in -span..=span {
            put_pixel(fb, c.x + dx, c.y + dy, color);
        }
    }
}

/// Filled rectangle covering [x0,x1) x [y0,y1), clipped to the buffer.
pub fn fill_rect(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let xa = x0.max(0) as usize;
    let ya = y0.max(0) as usize;
    let xb = (x1.max(0) as usize).min(fb.width);
    let yb = (y1.max(0) as usize).min(fb.height);
    for y in ya..yb {
        let row = y * fb.width;
        fb.pixels[row + xa.min(xb)..row + xb].fill(color.0);
    }
}

/// Rectangle outline with the given border thickness (drawn inward).
pub fn stroke_rect(
    fb: &mut FrameBuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
    thickness: i32,
) {
    let t = thickness.max(1);
    fill_rect(fb, x0, y0, x1, y0 + t, color);
    fill_rect(fb, x0, y1 - t, x1, y1, color);
    fill_rect(fb, x0, y0, x0 + t, y1, color);
    fill_rect(fb, x1 - t, y0, x1, y1, color);
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters render as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '&' => g!(0b01100,0b10010,0b10100,0b01000,0b10101,0b10010,0b01101),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), each font pixel a `scale`-sized block.
/// A 1-block black shadow keeps it readable over live video.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: Color, scale: i32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (offset, ink) in [(scale, Color::BLACK), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    let px = x + rx * scale + offset;
                    let py = y + ry as i32 * scale + offset;
                    fill_rect(fb, px, py, px + scale, py + scale, ink);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
pub fn draw_text_5x7(
    fb: &mut FrameBuffer,
    mut x: i32,
    y: i32,
    text: &str,
    color: Color,
    scale: i32,
) {
    let scale = scale.max(1);
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, scale);
        x += 6 * scale; // 5 pixels glyph width + 1 pixel spacing
    }
}

/// Width in pixels `draw_text_5x7` will use for `text`.
pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * 6 * scale.max(1)
}
