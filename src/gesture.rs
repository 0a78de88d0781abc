// Gesture classification: landmarks -> finger-up vector -> `Mode`.
//
// Stateless. Every frame is classified from scratch, so a hand hovering on
// the edge of two poses can flicker between modes; see `filter` for
// the optional stage that damps that.

use crate::config::PALETTE_HEIGHT;
use crate::landmarks::{
    HandLandmarks, COORD_RANGE, INDEX_TIP, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_IP, THUMB_TIP,
};
use crate::types::Point;

/// Finger order used everywhere a finger-up vector appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] =
        [Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Landmark index of the fingertip.
    pub const fn tip(self) -> usize {
        match self {
            Finger::Thumb => THUMB_TIP,
            Finger::Index => INDEX_TIP,
            Finger::Middle => MIDDLE_TIP,
            Finger::Ring => RING_TIP,
            Finger::Pinky => PINKY_TIP,
        }
    }

    /// Joint the tip is compared against: IP for the thumb, PIP otherwise.
    pub const fn joint(self) -> usize {
        match self {
            Finger::Thumb => THUMB_IP,
            _ => self.tip() - 2,
        }
    }
}

/// Which fingers are extended, in [`Finger::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerState(pub [bool; 5]);

impl FingerState {
    /// Build from a `[0,1,1,0,0]`-style bit pattern.
    pub const fn from_bits(bits: [u8; 5]) -> Self {
        FingerState([bits[0] != 0, bits[1] != 0, bits[2] != 0, bits[3] != 0, bits[4] != 0])
    }
}

/// Read the finger-up vector off a landmark set.
///
/// Fingers are up when the tip sits above its PIP joint (image y grows
/// downward). The thumb folds sideways, so it compares x instead; the test
/// assumes the mirrored selfie view the capture loop produces.
pub fn fingers_up(hand: &HandLandmarks) -> FingerState {
    let mut state = [false; 5];
    for finger in Finger::ALL {
        let tip = hand[finger.tip()];
        let joint = hand[finger.joint()];
        state[finger as usize] = match finger {
            Finger::Thumb => tip.x < joint.x,
            _ => tip.y < joint.y,
        };
    }
    FingerState(state)
}

/// The single interaction state for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    ColorSelect,
    Draw,
    Erase,
    PinchResize,
    HeightResize,
    Idle,
}

impl Mode {
    /// Modes that extend the current stroke.
    pub fn is_stroke(self) -> bool {
        matches!(self, Mode::Draw | Mode::Erase)
    }
}

/// How a decision-table row matches a finger vector.
enum Pattern {
    Exact(FingerState),
    /// Thumb and index up, the rest down.
    ThumbIndexOnly,
}

struct Rule {
    pattern: Pattern,
    /// Reference point must sit inside the palette strip.
    in_palette: bool,
    mode: Mode,
}

/// Evaluated top to bottom, first match wins.
const RULES: [Rule; 5] = [
    Rule {
        pattern: Pattern::Exact(FingerState::from_bits([0, 1, 1, 1, 0])),
        in_palette: true,
        mode: Mode::ColorSelect,
    },
    Rule {
        pattern: Pattern::Exact(FingerState::from_bits([0, 1, 1, 0, 0])),
        in_palette: false,
        mode: Mode::Draw,
    },
    Rule {
        pattern: Pattern::Exact(FingerState::from_bits([0, 1, 0, 0, 0])),
        in_palette: false,
        mode: Mode::Erase,
    },
    Rule { pattern: Pattern::ThumbIndexOnly, in_palette: false, mode: Mode::PinchResize },
    Rule {
        pattern: Pattern::Exact(FingerState::from_bits([1, 1, 1, 1, 1])),
        in_palette: false,
        mode: Mode::HeightResize,
    },
];

impl Pattern {
    fn matches(&self, fingers: FingerState) -> bool {
        match self {
            Pattern::Exact(expected) => *expected == fingers,
            Pattern::ThumbIndexOnly => {
                let [thumb, index, middle, ring, pinky] = fingers.0;
                thumb && index && !(middle || ring || pinky)
            }
        }
    }
}

/// Map a finger vector and the index fingertip position to a mode.
pub fn decide(fingers: FingerState, point: Point) -> Mode {
    RULES
        .iter()
        .find(|rule| {
            rule.pattern.matches(fingers) && (!rule.in_palette || point.y < PALETTE_HEIGHT)
        })
        .map_or(Mode::Idle, |rule| rule.mode)
}

/// Everything the controller needs from one classified frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub mode: Mode,
    pub fingers: FingerState,
    /// Index fingertip in frame pixels.
    pub point: Point,
    /// Thumb-tip to index-tip distance in normalized units.
    pub pinch_distance: f32,
}

impl Classification {
    /// What a frame without a detected hand classifies as.
    pub fn idle() -> Self {
        Self {
            mode: Mode::Idle,
            fingers: FingerState::default(),
            point: Point::default(),
            pinch_distance: 0.0,
        }
    }
}

/// Scale a normalized landmark to frame pixels, truncating toward zero.
/// Coordinates are first clamped to [`COORD_RANGE`], so a point never lands
/// more than one frame size outside the frame.
pub fn to_pixel(x: f32, y: f32, width: usize, height: usize) -> Point {
    let (lo, hi) = COORD_RANGE;
    let x = x.clamp(lo, hi);
    let y = y.clamp(lo, hi);
    Point::new((x * width as f32) as i32, (y * height as f32) as i32)
}

/// Classify one hand. The reference point is computed whatever the mode.
pub fn classify(hand: &HandLandmarks, width: usize, height: usize) -> Classification {
    let tip = hand[INDEX_TIP];
    let point = to_pixel(tip.x, tip.y, width, height);
    let fingers = fingers_up(hand);
    Classification {
        mode: decide(fingers, point),
        fingers,
        point,
        pinch_distance: hand[THUMB_TIP].distance(&tip),
    }
}

/// Classify a frame that may not contain a hand.
pub fn classify_frame(hand: Option<&HandLandmarks>, width: usize, height: usize) -> Classification {
    hand.map_or_else(Classification::idle, |hand| classify(hand, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Landmark, LANDMARK_COUNT};

    /// Synthetic hand: every finger's joint at y=0.5, tips raised or lowered.
    /// The index tip sits at `tip`; the thumb IP joint at x=0.5.
    fn hand_with(fingers: [u8; 5], tip: (f32, f32)) -> HandLandmarks {
        let mut pts = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        pts[THUMB_TIP] = Landmark::new(if fingers[0] != 0 { 0.4 } else { 0.6 }, 0.5);
        for (i, finger) in Finger::ALL.iter().enumerate().skip(1) {
            let y = if fingers[i] != 0 { 0.3 } else { 0.7 };
            pts[finger.tip()] = Landmark::new(0.5, y);
            pts[finger.joint()] = Landmark::new(0.5, 0.5);
        }
        // Move the index finger as a whole so the up/down relation survives.
        let up = fingers[1] != 0;
        pts[INDEX_TIP] = Landmark::new(tip.0, tip.1);
        let joint_y = if up { tip.1 + 0.05 } else { tip.1 - 0.05 };
        pts[Finger::Index.joint()] = Landmark::new(tip.0, joint_y);
        HandLandmarks::new(pts)
    }

    const TOP: Point = Point::new(50, 50);
    const LOW: Point = Point::new(50, 400);

    #[test]
    fn finger_up_compares_tip_to_joint() {
        let hand = hand_with([1, 0, 1, 0, 1], (0.5, 0.5));
        assert_eq!(fingers_up(&hand), FingerState::from_bits([1, 0, 1, 0, 1]));
    }

    #[test]
    fn tip_level_with_joint_counts_as_down() {
        let mut pts = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        pts[THUMB_TIP] = Landmark::new(0.5, 0.2);
        let state = fingers_up(&HandLandmarks::new(pts));
        assert_eq!(state, FingerState::default());
    }

    #[test]
    fn decision_table_rows() {
        assert_eq!(decide(FingerState::from_bits([0, 1, 1, 1, 0]), TOP), Mode::ColorSelect);
        assert_eq!(decide(FingerState::from_bits([0, 1, 1, 0, 0]), LOW), Mode::Draw);
        assert_eq!(decide(FingerState::from_bits([0, 1, 0, 0, 0]), LOW), Mode::Erase);
        assert_eq!(decide(FingerState::from_bits([1, 1, 0, 0, 0]), LOW), Mode::PinchResize);
        assert_eq!(decide(FingerState::from_bits([1, 1, 1, 1, 1]), LOW), Mode::HeightResize);
    }

    #[test]
    fn color_select_needs_the_palette_strip() {
        let three = FingerState::from_bits([0, 1, 1, 1, 0]);
        assert_eq!(decide(three, Point::new(50, 99)), Mode::ColorSelect);
        assert_eq!(decide(three, Point::new(50, 100)), Mode::Idle);
        assert_eq!(decide(three, LOW), Mode::Idle);
    }

    #[test]
    fn draw_and_erase_work_inside_palette_strip_too() {
        assert_eq!(decide(FingerState::from_bits([0, 1, 1, 0, 0]), TOP), Mode::Draw);
        assert_eq!(decide(FingerState::from_bits([0, 1, 0, 0, 0]), TOP), Mode::Erase);
    }

    #[test]
    fn every_other_vector_is_idle() {
        let defined =
            [[0, 1, 1, 1, 0], [0, 1, 1, 0, 0], [0, 1, 0, 0, 0], [1, 1, 0, 0, 0], [1, 1, 1, 1, 1]];
        for bits in 0u8..32 {
            let v = [bits >> 4 & 1, bits >> 3 & 1, bits >> 2 & 1, bits >> 1 & 1, bits & 1];
            if defined.contains(&v) {
                continue;
            }
            for point in [TOP, LOW] {
                let mode = decide(FingerState::from_bits(v), point);
                assert_eq!(mode, Mode::Idle, "{v:?} at {point:?}");
            }
        }
    }

    #[test]
    fn classify_scales_reference_point() {
        let hand = hand_with([0, 1, 1, 0, 0], (0.25, 0.5));
        let c = classify(&hand, 1280, 720);
        assert_eq!(c.point, Point::new(320, 360));
        assert_eq!(c.mode, Mode::Draw);
    }

    #[test]
    fn classify_reports_pinch_distance() {
        let hand = hand_with([1, 1, 0, 0, 0], (0.4, 0.8));
        let c = classify(&hand, 1280, 720);
        assert_eq!(c.mode, Mode::PinchResize);
        // thumb tip at (0.4, 0.5)
        assert!((c.pinch_distance - 0.3).abs() < 1e-5);
    }

    #[test]
    fn to_pixel_clamps_wild_coordinates() {
        assert_eq!(to_pixel(1e9, 0.5, 1280, 720), Point::new(2560, 360));
        assert_eq!(to_pixel(-1e9, -1e9, 1280, 720), Point::new(-1280, -720));
        assert_eq!(to_pixel(0.25, 0.5, 1280, 720), Point::new(320, 360));
    }

    #[test]
    fn missing_hand_is_idle() {
        assert_eq!(classify_frame(None, 1280, 720).mode, Mode::Idle);
    }
}
