// One frame of the whiteboard, start to finish, minus camera and window.
//
// Order per frame: classify -> (optional debounce) -> controller update ->
// transient markers -> composite canvas -> HUD.

use crate::config::WhiteboardConfig;
use crate::controller::Controller;
use crate::error::Error;
use crate::filter::ModeDebouncer;
use crate::gesture::{classify_frame, Classification};
use crate::hud;
use crate::landmarks::HandLandmarks;
use crate::types::FrameBuffer;
use log::info;
use std::path::{Path, PathBuf};

pub struct Whiteboard {
    controller: Controller,
    debouncer: ModeDebouncer,
    snapshots: u32,
}

impl Whiteboard {
    pub fn new(width: usize, height: usize, config: WhiteboardConfig, debounce: u32) -> Self {
        Self {
            controller: Controller::new(width, height, config),
            debouncer: ModeDebouncer::new(debounce),
            snapshots: 0,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Advance the drawing state by one frame. No rendering.
    pub fn apply(
        &mut self,
        hand: Option<&HandLandmarks>,
        width: usize,
        height: usize,
    ) -> Classification {
        let raw = classify_frame(hand, width, height);
        let frame = self.debouncer.filter(raw);
        self.controller.update(&frame);
        frame
    }

    /// Advance one frame and paint the result into `frame` (the live image).
    pub fn step(
        &mut self,
        frame: &mut FrameBuffer,
        hand: Option<&HandLandmarks>,
    ) -> Result<Classification, Error> {
        let classified = self.apply(hand, frame.width, frame.height);

        hud::draw_fingertip(frame, &classified, self.controller.draw_color());
        if let Some(hand) = hand {
            hud::draw_skeleton(frame, hand);
        }
        self.controller.canvas().composite_onto(frame)?;
        hud::draw_hud(frame, &self.controller);
        Ok(classified)
    }

    /// Save the canvas as the next free `whiteboard-NNN.png` in `dir`.
    pub fn snapshot(&mut self, dir: &Path) -> Result<PathBuf, Error> {
        let path = loop {
            self.snapshots += 1;
            let candidate = dir.join(format!("whiteboard-{:03}.png", self.snapshots));
            if !candidate.exists() {
                break candidate;
            }
        };
        self.controller.canvas().save(&path)?;
        info!("canvas saved to {}", path.display());
        Ok(path)
    }
}
