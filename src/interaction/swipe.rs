//! Horizontal swipe classification from raw touch X coordinates.
//!
//! A gesture is recorded as a start X (touch start) and the latest X seen
//! during touch move. On touch end the horizontal distance `start - end` is
//! compared with a threshold:
//!
//! ```text
//! distance >  threshold  → Left   (finger moved left, show the next slide)
//! distance < -threshold  → Right  (finger moved right, show the previous slide)
//! otherwise              → None
//! ```
//!
//! A tap (no move events) never produces an end coordinate and therefore
//! always classifies as `None`.

use crate::locale::Direction;

/// Default minimum horizontal travel, in CSS pixels.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    None,
}

impl SwipeDirection {
    /// Swap `Left` and `Right`; `None` is unchanged.
    pub fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }
}

/// Classify a completed gesture. Pure; missing coordinates yield `None`.
pub fn classify(start_x: Option<f64>, end_x: Option<f64>, threshold: f64) -> SwipeDirection {
    let (Some(start), Some(end)) = (start_x, end_x) else {
        return SwipeDirection::None;
    };
    let distance = start - end;
    if distance > threshold {
        SwipeDirection::Left
    } else if distance < -threshold {
        SwipeDirection::Right
    } else {
        SwipeDirection::None
    }
}

/// Tracks one touch sequence at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeDetector {
    threshold: f64,
    invert: bool,
    start_x: Option<f64>,
    end_x: Option<f64>,
}

impl SwipeDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            invert: false,
            start_x: None,
            end_x: None,
        }
    }

    /// A detector whose results are mirrored for right-to-left layouts,
    /// where the "next" slide sits to the left of the current one.
    pub fn for_direction(threshold: f64, direction: Direction) -> Self {
        Self {
            invert: direction == Direction::Rtl,
            ..Self::new(threshold)
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
        self.end_x = None;
    }

    pub fn touch_move(&mut self, x: f64) {
        if self.start_x.is_some() {
            self.end_x = Some(x);
        }
    }

    /// Finish the gesture and reset. The result already has the inversion
    /// flag applied.
    pub fn touch_end(&mut self) -> SwipeDirection {
        let raw = classify(self.start_x.take(), self.end_x.take(), self.threshold);
        if self.invert { raw.mirrored() } else { raw }
    }

    /// Drop an in-flight gesture (touch cancel).
    pub fn cancel(&mut self) {
        self.start_x = None;
        self.end_x = None;
    }
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}
