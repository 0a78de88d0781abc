// Optional stage between the classifier and the controller that damps
// mode flicker. The default `hold = 1` passes every frame through untouched.

use crate::gesture::{Classification, Mode};

/// Holds the committed mode until a different mode has been seen on `hold`
/// consecutive frames. While a change is pending, the last committed frame
/// is repeated whole, so a pen held through a one-frame tracking loss stays
/// where it was instead of jumping to the hand-less frame's origin.
#[derive(Debug, Clone)]
pub struct ModeDebouncer {
    hold: u32,
    committed: Classification,
    candidate: Mode,
    streak: u32,
}

impl ModeDebouncer {
    pub fn new(hold: u32) -> Self {
        Self {
            hold: hold.max(1),
            committed: Classification::idle(),
            candidate: Mode::Idle,
            streak: 0,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.hold == 1
    }

    pub fn filter(&mut self, frame: Classification) -> Classification {
        if self.is_passthrough() {
            return frame;
        }
        if frame.mode != self.committed.mode {
            if frame.mode == self.candidate {
                self.streak += 1;
            } else {
                self.candidate = frame.mode;
                self.streak = 1;
            }
            if self.streak < self.hold {
                return self.committed.clone();
            }
        }
        self.streak = 0;
        self.committed = frame.clone();
        frame
    }
}

impl Default for ModeDebouncer {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn frame(mode: Mode) -> Classification {
        Classification { mode, point: Point::new(7, 9), ..Classification::idle() }
    }

    fn run(filter: &mut ModeDebouncer, modes: &[Mode]) -> Vec<Mode> {
        modes.iter().map(|m| filter.filter(frame(*m)).mode).collect()
    }

    #[test]
    fn hold_one_passes_through() {
        let mut f = ModeDebouncer::default();
        let modes = [Mode::Draw, Mode::Idle, Mode::Erase, Mode::Draw];
        assert_eq!(run(&mut f, &modes), modes);
    }

    #[test]
    fn single_frame_blip_is_absorbed() {
        let mut f = ModeDebouncer::new(2);
        let out = run(&mut f, &[Mode::Draw, Mode::Draw, Mode::Idle, Mode::Draw, Mode::Draw]);
        assert_eq!(out, [Mode::Idle, Mode::Draw, Mode::Draw, Mode::Draw, Mode::Draw]);
    }

    #[test]
    fn interrupted_candidate_restarts_count() {
        let mut f = ModeDebouncer::new(3);
        let seen = [Mode::Draw, Mode::Draw, Mode::Erase, Mode::Draw, Mode::Draw, Mode::Draw];
        let out = run(&mut f, &seen);
        assert_eq!(out, [Mode::Idle, Mode::Idle, Mode::Idle, Mode::Idle, Mode::Idle, Mode::Draw]);
    }

    #[test]
    fn pending_change_repeats_committed_frame() {
        let mut f = ModeDebouncer::new(2);
        f.filter(frame(Mode::Draw));
        let committed = f.filter(frame(Mode::Draw));
        assert_eq!(committed.mode, Mode::Draw);

        let held = f.filter(Classification::idle());
        assert_eq!(held, committed);
        assert_eq!(held.point, Point::new(7, 9));
    }
}
