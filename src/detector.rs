// The hand-landmark detector seam.
//
// Detection itself (a neural landmark model) lives outside this program.
// A detector here only has to answer, once per frame, "is there a hand,
// and where are its 21 landmarks?".

use crate::error::Error;
use crate::landmarks::{parse_feed_line, HandLandmarks};
use crate::types::FrameBuffer;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub trait HandDetector {
    /// Landmarks for the first hand in `frame`, if any.
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Option<HandLandmarks>, Error>;
}

/// Never sees a hand. Lets the window run without a landmark source.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDetector;

impl HandDetector for NullDetector {
    fn detect(&mut self, _frame: &FrameBuffer) -> Result<Option<HandLandmarks>, Error> {
        Ok(None)
    }
}

/// Reads one JSON value per frame from a line-oriented feed, typically a
/// landmark model running as a sidecar process and piping into stdin.
///
/// Each line is `null` or an array of 21 points (`[x,y]`, `[x,y,z]` or
/// `{"x":..,"y":..}`). Blank lines count as `null`. A malformed line is
/// logged and treated as "no hand" for that frame. Once the feed ends, every
/// later frame has no hand.
pub struct JsonLinesDetector<R> {
    reader: R,
    line: String,
    line_no: usize,
    exhausted: bool,
}

impl<R: BufRead> JsonLinesDetector<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: String::new(), line_no: 0, exhausted: false }
    }

    fn next_hand(&mut self) -> Result<Option<HandLandmarks>, Error> {
        if self.exhausted {
            return Ok(None);
        }
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            info!("landmark feed ended after {} frames", self.line_no);
            self.exhausted = true;
            return Ok(None);
        }
        self.line_no += 1;

        let trimmed = self.line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match parse_feed_line(trimmed) {
            Ok(hand) => Ok(hand),
            Err(e) => {
                warn!("landmark feed line {}: {e}", self.line_no);
                Ok(None)
            }
        }
    }
}

impl<R: BufRead> HandDetector for JsonLinesDetector<R> {
    fn detect(&mut self, _frame: &FrameBuffer) -> Result<Option<HandLandmarks>, Error> {
        self.next_hand()
    }
}

/// Open the detector named on the command line: a file path, `-` for
/// stdin, or nothing at all.
pub fn open_detector(source: Option<&Path>) -> Result<Box<dyn HandDetector>, Error> {
    match source {
        None => {
            info!("no landmark feed given; running without hand detection");
            Ok(Box::new(NullDetector))
        }
        Some(path) if path.as_os_str() == "-" => {
            info!("reading landmarks from stdin");
            Ok(Box::new(JsonLinesDetector::new(BufReader::new(io::stdin()))))
        }
        Some(path) => {
            info!("reading landmarks from {}", path.display());
            let file = File::open(path)?;
            Ok(Box::new(JsonLinesDetector::new(BufReader::new(file))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::INDEX_TIP;
    use std::io::Cursor;

    fn hand_line(x: f32) -> String {
        format!("[{}]", vec![format!("[{x},0.5]"); 21].join(","))
    }

    #[test]
    fn feed_yields_one_result_per_frame() {
        let feed = format!("{}\nnull\n\n{}\n", hand_line(0.1), hand_line(0.9));
        let mut det = JsonLinesDetector::new(Cursor::new(feed));
        let frame = FrameBuffer::new(2, 2);

        let first = det.detect(&frame).unwrap().unwrap();
        assert!((first[INDEX_TIP].x - 0.1).abs() < 1e-6);
        assert!(det.detect(&frame).unwrap().is_none());
        assert!(det.detect(&frame).unwrap().is_none());
        assert!(det.detect(&frame).unwrap().is_some());

        // end of feed: no hand from now on
        assert!(det.detect(&frame).unwrap().is_none());
        assert!(det.detect(&frame).unwrap().is_none());
    }

    #[test]
    fn malformed_lines_mean_no_hand() {
        let feed = format!("[[0.1,0.2]]\n{{oops\n{}\n", hand_line(0.3));
        let mut det = JsonLinesDetector::new(Cursor::new(feed));
        let frame = FrameBuffer::new(1, 1);
        assert!(det.detect(&frame).unwrap().is_none());
        assert!(det.detect(&frame).unwrap().is_none());
        assert!(det.detect(&frame).unwrap().is_some());
    }

    #[test]
    fn out_of_range_coordinate_means_no_hand() {
        let feed = format!("{}\n{}\n", hand_line(1e9), hand_line(0.4));
        let mut det = JsonLinesDetector::new(Cursor::new(feed));
        let frame = FrameBuffer::new(1, 1);
        assert!(det.detect(&frame).unwrap().is_none());
        let next = det.detect(&frame).unwrap().unwrap();
        assert!((next[INDEX_TIP].x - 0.4).abs() < 1e-6);
    }

    #[test]
    fn null_detector_sees_nothing() {
        assert!(NullDetector.detect(&FrameBuffer::new(1, 1)).unwrap().is_none());
    }

    #[test]
    fn missing_feed_file_is_an_error() {
        let err = open_detector(Some(Path::new("/definitely/not/here.jsonl")));
        assert!(matches!(err, Err(Error::Io(_))));
    }
}
