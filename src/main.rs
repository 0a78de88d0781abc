// Gesture whiteboard.
// • Live camera (mirrored) is the base image; ink from the canvas sits on top.
// • Index + middle up: draw.  Index only: erase.  Three fingers in the top
//   strip: pick a color.  Thumb + index pinch or an open hand: eraser size.
// • S saves the canvas. Q or ESC quits.

use clap::Parser;
use gesture_whiteboard::camera::{CameraCapture, CaptureSettings};
use gesture_whiteboard::config::{Args, WhiteboardConfig};
use gesture_whiteboard::detector::open_detector;
use gesture_whiteboard::draw::Drawer;
use gesture_whiteboard::{Error, Whiteboard};
use log::{error, info};
use std::path::Path;
use std::time::{Duration, Instant};

fn main() -> Result<(), Error> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    info!("gesture-whiteboard v{} starting", env!("CARGO_PKG_VERSION"));

    let result = run(&args);
    if let Err(e) = &result {
        error!("{e}");
    }
    result
}

fn run(args: &Args) -> Result<(), Error> {
    /* --- Camera + window setup --- */
    let mut cam = CameraCapture::open(CaptureSettings {
        index: args.camera,
        width: args.width,
        height: args.height,
        fps: args.fps,
        mirror: !args.no_mirror,
    })?;
    let (w, h) = cam.resolution();
    let mut drawer = Drawer::new(&args.title, w as usize, h as usize)?;

    /* --- Landmark source --- */
    let mut detector = open_detector(args.landmarks.as_deref())?;

    /* --- Drawing state: canvas, color, widths, stroke cursor --- */
    let config = WhiteboardConfig::default();
    let mut board = Whiteboard::new(w as usize, h as usize, config, args.debounce);

    /* --- FPS bookkeeping --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.quit_pressed() {
        // 1) Live frame. A failed grab ends the session.
        let mut screen = cam.next_frame()?;

        // 2) Landmarks for this frame; none means Idle.
        let hand = detector.detect(&screen)?;

        // 3) Classify, update canvas, composite, HUD.
        board.step(&mut screen, hand.as_ref())?;

        // 4) Snapshot on S. A failed save is reported but not fatal.
        if drawer.s_pressed_once() {
            if let Err(e) = board.snapshot(Path::new(".")) {
                error!("snapshot failed: {e}");
            }
        }

        // 5) Present.
        drawer.present(&screen)?;

        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("session ended");
    Ok(())
}
