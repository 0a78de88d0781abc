// Gesture whiteboard: draw on a persistent canvas with hand poses alone.
//
// Per frame a landmark set (21 points from an external hand detector) is
// reduced to five finger-up flags and a `gesture::Mode`:
//
// | Fingers up (thumb..pinky) | Mode |
// |---|---|
// | `0 1 1 1 0`, fingertip in the palette strip | ColorSelect |
// | `0 1 1 0 0` | Draw |
// | `0 1 0 0 0` | Erase |
// | thumb + index only | PinchResize (eraser width) |
// | `1 1 1 1 1` | HeightResize (eraser width) |
// | anything else, or no hand | Idle |
//
// The `Controller` turns those modes into strokes on the `Canvas`.
// Camera capture and the window sit in `camera` and `draw`; the binary
// wires them together.

pub mod app;
pub mod camera;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod detector;
pub mod draw;
pub mod error;
pub mod filter;
pub mod gesture;
pub mod hud;
pub mod landmarks;
pub mod types;

pub use app::Whiteboard;
pub use controller::Controller;
pub use error::Error;
pub use gesture::{classify, Classification, Mode};
