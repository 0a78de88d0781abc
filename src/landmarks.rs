// Hand landmark model: 21 normalized points in the MediaPipe index layout.

use crate::error::Error;
use serde::Deserialize;

pub const LANDMARK_COUNT: usize = 21;

/// Normalized coordinates outside this range cannot come from a real
/// detection; they are rejected before anything is scaled to pixels.
pub const COORD_RANGE: (f32, f32) = (-1.0, 2.0);

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Bones drawn for the on-screen skeleton overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP),
    (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (WRIST, PINKY_MCP),
];

/// One normalized landmark; x and y in [0,1] of the frame, z is carried but unused.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Finite and inside [`COORD_RANGE`] on both axes.
    pub fn is_plausible(&self) -> bool {
        let (lo, hi) = COORD_RANGE;
        (lo..=hi).contains(&self.x) && (lo..=hi).contains(&self.y)
    }

    /// Planar distance in normalized units.
    pub fn distance(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A complete landmark set for one detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Accepts any sequence of exactly 21 plausible points.
    pub fn from_points(points: &[Landmark]) -> Result<Self, Error> {
        let points: [Landmark; LANDMARK_COUNT] = points.try_into().map_err(|_| {
            Error::Landmarks(format!("expected {LANDMARK_COUNT} points, got {}", points.len()))
        })?;
        if let Some(i) = points.iter().position(|p| !p.is_plausible()) {
            let p = points[i];
            return Err(Error::Landmarks(format!("point {i} out of range: ({}, {})", p.x, p.y)));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

impl std::ops::Index<usize> for HandLandmarks {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.points[index]
    }
}

/// Wire forms a detector may emit for a single point.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Pair([f32; 2]),
    Triple([f32; 3]),
    Object {
        x: f32,
        y: f32,
        #[serde(default)]
        z: f32,
    },
}

impl From<RawPoint> for Landmark {
    fn from(raw: RawPoint) -> Self {
        match raw {
            RawPoint::Pair([x, y]) => Landmark { x, y, z: 0.0 },
            RawPoint::Triple([x, y, z]) => Landmark { x, y, z },
            RawPoint::Object { x, y, z } => Landmark { x, y, z },
        }
    }
}

/// Decode one feed line: `null` (no hand) or an array of 21 points.
pub fn parse_feed_line(line: &str) -> Result<Option<HandLandmarks>, Error> {
    let raw: Option<Vec<RawPoint>> =
        serde_json::from_str(line).map_err(|e| Error::Landmarks(format!("bad feed line: {e}")))?;
    match raw {
        None => Ok(None),
        Some(raw) => {
            let points: Vec<Landmark> = raw.into_iter().map(Landmark::from).collect();
            HandLandmarks::from_points(&points).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_of(n: usize, point: &str) -> String {
        format!("[{}]", vec![point; n].join(","))
    }

    #[test]
    fn null_means_no_hand() {
        assert_eq!(parse_feed_line("null").unwrap(), None);
    }

    #[test]
    fn accepts_pairs_triples_and_objects() {
        let hand = parse_feed_line(&line_of(21, "[0.25,0.5]")).unwrap().unwrap();
        assert_eq!(hand[INDEX_TIP], Landmark::new(0.25, 0.5));

        let hand = parse_feed_line(&line_of(21, "[0.1,0.2,-0.3]")).unwrap().unwrap();
        assert_eq!(hand[WRIST].z, -0.3);

        let hand = parse_feed_line(&line_of(21, r#"{"x":0.4,"y":0.6}"#)).unwrap().unwrap();
        assert_eq!(hand[THUMB_TIP], Landmark::new(0.4, 0.6));
    }

    #[test]
    fn wrong_point_count_is_rejected() {
        assert!(matches!(parse_feed_line(&line_of(20, "[0.1,0.1]")), Err(Error::Landmarks(_))));
        assert!(parse_feed_line("{not json").is_err());
    }

    #[test]
    fn far_out_of_range_point_is_rejected() {
        let mut points = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        points[INDEX_TIP] = Landmark::new(1e9, 0.5);
        assert!(matches!(HandLandmarks::from_points(&points), Err(Error::Landmarks(_))));

        points[INDEX_TIP] = Landmark::new(f32::NAN, 0.5);
        assert!(HandLandmarks::from_points(&points).is_err());

        // slightly off-frame is still a hand
        points[INDEX_TIP] = Landmark::new(-0.05, 1.1);
        assert!(HandLandmarks::from_points(&points).is_ok());
    }

    #[test]
    fn feed_line_with_huge_coordinate_is_an_error() {
        let mut line = vec!["[0.5,0.5]"; LANDMARK_COUNT];
        line[INDEX_TIP] = "[1e9,0.5]";
        let line = format!("[{}]", line.join(","));
        assert!(matches!(parse_feed_line(&line), Err(Error::Landmarks(_))));
    }

    #[test]
    fn distance_is_planar() {
        let a = Landmark { x: 0.0, y: 0.0, z: 5.0 };
        let b = Landmark::new(0.3, 0.4);
        assert!((a.distance(&b) - 0.5).abs() < 1e-6);
    }
}
