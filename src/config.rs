// Drawing constants and command-line flags.

use crate::types::Color;
use clap::Parser;
use std::path::PathBuf;

/// Width of one palette swatch in pixels.
pub const SWATCH_WIDTH: i32 = 320;
/// Height of the palette strip; ColorSelect only fires above this line.
pub const PALETTE_HEIGHT: i32 = 100;
/// Fixed brush thickness for Draw.
pub const BRUSH_WIDTH: u32 = 8;
pub const ERASER_MIN: u32 = 10;
pub const ERASER_MAX: u32 = 80;
pub const ERASER_DEFAULT: u32 = 20;
/// Pixel-y band mapped onto the eraser range by HeightResize (and mirrored by the slider).
pub const HEIGHT_BAND: (f32, f32) = (100.0, 600.0);

/// One selectable ink color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub color: Color,
}

pub const PALETTE: [Swatch; 4] = [
    Swatch { name: "Blue", color: Color::rgb(0, 0, 255) },
    Swatch { name: "Green", color: Color::rgb(0, 255, 0) },
    Swatch { name: "Red", color: Color::rgb(255, 0, 0) },
    Swatch { name: "White", color: Color::WHITE },
];

/// Tunables the controller reads; defaults reproduce the stock whiteboard.
#[derive(Debug, Clone)]
pub struct WhiteboardConfig {
    pub palette: Vec<Swatch>,
    pub swatch_width: i32,
    pub brush_width: u32,
    pub eraser_range: (u32, u32),
    pub eraser_default: u32,
    pub height_band: (f32, f32),
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            palette: PALETTE.to_vec(),
            swatch_width: SWATCH_WIDTH,
            brush_width: BRUSH_WIDTH,
            eraser_range: (ERASER_MIN, ERASER_MAX),
            eraser_default: ERASER_DEFAULT,
            height_band: HEIGHT_BAND,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "gesture-whiteboard",
    version,
    about = "Draw on a virtual canvas with hand gestures"
)]
pub struct Args {
    /// Camera index (0 = default webcam)
    #[arg(short, long, default_value_t = 0)]
    pub camera: u32,

    /// Requested capture width; the camera may pick the closest it supports
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Requested capture height
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Requested frame rate
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Show the raw camera orientation instead of the mirrored selfie view
    #[arg(long)]
    pub no_mirror: bool,

    /// Landmark feed: one JSON value per frame, `-` for stdin. Without it no hand is ever seen.
    #[arg(short, long)]
    pub landmarks: Option<PathBuf>,

    /// Frames a new gesture must persist before it takes effect (1 = react immediately)
    #[arg(long, default_value_t = 1)]
    pub debounce: u32,

    /// Window title
    #[arg(long, default_value = "Gesture Whiteboard")]
    pub title: String,
}
