// On-screen overlays. Nothing here changes drawing state; it only paints
// the current state onto the outgoing frame.

use crate::config::{Swatch, PALETTE_HEIGHT};
use crate::controller::{slider_y, Controller};
use crate::draw::{draw_line, draw_text_5x7, fill_circle, fill_rect, stroke_rect, text_width};
use crate::gesture::{to_pixel, Classification, Mode};
use crate::landmarks::{HandLandmarks, HAND_CONNECTIONS};
use crate::types::{Color, FrameBuffer, Point};

const TRACK_COLOR: Color = Color::rgb(200, 200, 200);
const HANDLE_COLOR: Color = Color::rgb(255, 0, 0);
const INSTRUCTION_COLOR: Color = Color::rgb(255, 255, 0);
const BONE_COLOR: Color = Color::rgb(255, 255, 255);
const JOINT_COLOR: Color = Color::rgb(255, 0, 0);

const SLIDER_X: (i32, i32) = (50, 80);
const FINGERTIP_RADIUS: i32 = 10;

pub const INSTRUCTIONS: &str =
    "Draw: Index & Middle | Erase: Index Only | Resize: All Fingers | Color: 3 Fingers";

/// Palette strip across the top, one labelled block per swatch.
pub fn draw_palette(fb: &mut FrameBuffer, palette: &[Swatch], swatch_width: i32) {
    for (i, swatch) in palette.iter().enumerate() {
        let x0 = i as i32 * swatch_width;
        fill_rect(fb, x0, 0, x0 + swatch_width, PALETTE_HEIGHT, swatch.color);
        draw_text_5x7(fb, x0 + 100, 49, swatch.name, Color::BLACK, 3);
    }
}

pub fn draw_selected_label(fb: &mut FrameBuffer, swatch: &Swatch) {
    let label = format!("Selected Color: {}", swatch.name);
    draw_text_5x7(fb, 10, PALETTE_HEIGHT + 12, &label, swatch.color, 3);
}

/// Vertical eraser-width slider on the left edge; a wider eraser sits higher.
pub fn draw_eraser_slider(fb: &mut FrameBuffer, width: u32, range: (u32, u32), band: (f32, f32)) {
    let (top, bottom) = (band.0 as i32, band.1 as i32);
    stroke_rect(fb, SLIDER_X.0, top, SLIDER_X.1, bottom, TRACK_COLOR, 2);
    let handle_y = slider_y(width, range, band);
    let cx = (SLIDER_X.0 + SLIDER_X.1) / 2;
    fill_circle(fb, Point::new(cx, handle_y), 10, HANDLE_COLOR);
    draw_text_5x7(fb, 40, handle_y - 34, &width.to_string(), Color::WHITE, 2);
}

/// Gesture cheat-sheet along the bottom edge.
pub fn draw_instructions(fb: &mut FrameBuffer) {
    let scale = if text_width(INSTRUCTIONS, 2) + 20 <= fb.width as i32 { 2 } else { 1 };
    let y = fb.height as i32 - 7 * scale - 20;
    draw_text_5x7(fb, 10, y, INSTRUCTIONS, INSTRUCTION_COLOR, scale);
}

/// Dot under the fingertip while a stroke gesture is held.
pub fn draw_fingertip(fb: &mut FrameBuffer, frame: &Classification, ink: Color) {
    match frame.mode {
        Mode::Draw => fill_circle(fb, frame.point, FINGERTIP_RADIUS, ink),
        Mode::Erase => fill_circle(fb, frame.point, FINGERTIP_RADIUS, Color::BLACK),
        _ => {}
    }
}

/// Bones and joints of the tracked hand.
pub fn draw_skeleton(fb: &mut FrameBuffer, hand: &HandLandmarks) {
    let (w, h) = (fb.width, fb.height);
    let px: Vec<Point> = hand.points().iter().map(|p| to_pixel(p.x, p.y, w, h)).collect();
    for (a, b) in HAND_CONNECTIONS {
        draw_line(fb, px[a], px[b], BONE_COLOR);
    }
    for p in &px {
        fill_circle(fb, *p, 3, JOINT_COLOR);
    }
}

/// Everything drawn after the canvas has been composited.
pub fn draw_hud(fb: &mut FrameBuffer, controller: &Controller) {
    let cfg = controller.config();
    draw_palette(fb, &cfg.palette, cfg.swatch_width);
    draw_selected_label(fb, &controller.swatch());
    draw_eraser_slider(fb, controller.eraser_width(), cfg.eraser_range, cfg.height_band);
    draw_instructions(fb);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{WhiteboardConfig, PALETTE};

    #[test]
    fn palette_blocks_fill_the_strip() {
        let mut fb = FrameBuffer::new(1280, 720);
        draw_palette(&mut fb, &PALETTE, 320);
        assert_eq!(fb.get(5, 5), Some(PALETTE[0].color));
        assert_eq!(fb.get(330, 95), Some(PALETTE[1].color));
        assert_eq!(fb.get(1279, 0), Some(PALETTE[3].color));
        assert_eq!(fb.get(5, 100), Some(Color::BLACK));
    }

    #[test]
    fn slider_handle_tracks_width() {
        let cfg = WhiteboardConfig::default();
        let mut fb = FrameBuffer::new(1280, 720);
        draw_eraser_slider(&mut fb, 80, cfg.eraser_range, cfg.height_band);
        assert_eq!(fb.get(65, 100), Some(HANDLE_COLOR));

        let mut fb = FrameBuffer::new(1280, 720);
        draw_eraser_slider(&mut fb, 10, cfg.eraser_range, cfg.height_band);
        assert_eq!(fb.get(65, 600), Some(HANDLE_COLOR));
        assert_eq!(fb.get(65, 350), Some(Color::BLACK));
    }

    #[test]
    fn fingertip_marker_only_for_strokes() {
        let ink = Color::rgb(0, 255, 0);
        let mut fb = FrameBuffer { width: 40, height: 40, pixels: vec![0x00_10_10_10; 1600] };
        let mut frame = Classification {
            mode: Mode::Idle,
            point: Point::new(20, 20),
            ..Classification::idle()
        };
        draw_fingertip(&mut fb, &frame, ink);
        assert_eq!(fb.get(20, 20), Some(Color(0x00_10_10_10)));

        frame.mode = Mode::Draw;
        draw_fingertip(&mut fb, &frame, ink);
        assert_eq!(fb.get(20, 20), Some(ink));

        frame.mode = Mode::Erase;
        draw_fingertip(&mut fb, &frame, ink);
        assert_eq!(fb.get(20, 20), Some(Color::BLACK));
    }

    #[test]
    fn instructions_fit_small_frames() {
        let mut fb = FrameBuffer::new(640, 480);
        draw_instructions(&mut fb);
        assert!(fb.pixels.iter().any(|p| *p == INSTRUCTION_COLOR.0));
    }
}
