// Opens a camera and hands back frames as 0x00RRGGBB buffers, mirrored into
// selfie view unless asked otherwise. The thumb finger-up test assumes the
// mirrored orientation.

use crate::error::Error;
use crate::types::FrameBuffer;
use log::info;

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// What to ask the device for; it may settle on the closest mode it has.
#[derive(Debug, Clone, Copy)]
pub struct CaptureSettings {
    pub index: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub mirror: bool,
}

pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
    mirror: bool,
}

impl CameraCapture {
    pub fn open(settings: CaptureSettings) -> Result<Self, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(settings.width, settings.height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            settings.fps,
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(CameraIndex::Index(settings.index), req)
            .map_err(|e| Error::CameraInit(format!("Create camera {}: {e}", settings.index)))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        let actual = cam.resolution();
        info!(
            "camera {} streaming at {}x{} (requested {}x{} @ {} fps)",
            settings.index,
            actual.width(),
            actual.height(),
            settings.width,
            settings.height,
            settings.fps
        );

        Ok(Self { cam, width: actual.width(), height: actual.height(), mirror: settings.mirror })
    }

    /// Block for the next frame. Any failure here ends the session.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;
        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let pixels = rgb_img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();
        let mut fb = FrameBuffer { width: w as usize, height: h as usize, pixels };
        if self.mirror {
            fb.flip_horizontal();
        }
        Ok(fb)
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        if let Err(e) = self.cam.stop_stream() {
            log::warn!("stopping camera stream: {e}");
        } else {
            info!("camera released");
        }
    }
}
