//! Index controller for slide carousels.
//!
//! The carousel owns a fixed number of slides and a current index. Moving
//! past either end is governed by a [`BoundaryPolicy`]: the before/after
//! gallery clamps at the ends, the reviews carousel wraps around. An empty
//! carousel accepts every operation and stays at index 0.
//!
//! The visual track offset is derived from the index on demand, never stored.

use serde::{Deserialize, Serialize};

use super::swipe::SwipeDirection;
use crate::locale::Direction;

/// What `next`/`prev` do at the ends of the slide list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Stay on the first/last slide.
    #[default]
    Clamp,
    /// Continue from the other end.
    Wrap,
}

impl BoundaryPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Wrap => "wrap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    count: usize,
    policy: BoundaryPolicy,
}

impl Carousel {
    pub fn new(count: usize, policy: BoundaryPolicy) -> Self {
        Self {
            current: 0,
            count,
            policy,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.count
    }

    /// Advance one slide. Returns whether the index changed.
    pub fn next(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        let target = match self.policy {
            BoundaryPolicy::Clamp if self.current + 1 < self.count => self.current + 1,
            BoundaryPolicy::Clamp => self.current,
            BoundaryPolicy::Wrap => (self.current + 1) % self.count,
        };
        self.set(target)
    }

    /// Step back one slide. Returns whether the index changed.
    pub fn prev(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        let target = match self.policy {
            BoundaryPolicy::Clamp => self.current.saturating_sub(1),
            BoundaryPolicy::Wrap => (self.current + self.count - 1) % self.count,
        };
        self.set(target)
    }

    /// Jump to `index`. Out-of-range requests are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.count {
            tracing::debug!(index, count = self.count, "carousel: go_to out of range ignored");
            return false;
        }
        self.set(index)
    }

    /// `Left` shows the next slide and `Right` the previous one. The swipe
    /// detector has already mirrored the gesture for right-to-left pages.
    pub fn apply_swipe(&mut self, swipe: SwipeDirection) -> bool {
        match swipe {
            SwipeDirection::Left => self.next(),
            SwipeDirection::Right => self.prev(),
            SwipeDirection::None => false,
        }
    }

    /// Horizontal translation of the slide track, in pixels.
    ///
    /// Left-to-right tracks slide towards negative X; right-to-left tracks
    /// are laid out from the right edge and slide towards positive X.
    pub fn track_offset(&self, slide_width: f64, direction: Direction) -> f64 {
        let distance = self.current as f64 * slide_width;
        match direction {
            Direction::Ltr => 0.0 - distance,
            Direction::Rtl => distance,
        }
    }

    /// CSS `transform` value for the track at the current index.
    pub fn track_transform(&self, slide_width: f64, direction: Direction) -> String {
        format!("translateX({}px)", self.track_offset(slide_width, direction))
    }

    /// Same as [`track_transform`](Self::track_transform) for slides that
    /// each fill the viewport, expressed in percent so it needs no layout.
    pub fn track_transform_percent(&self, direction: Direction) -> String {
        format!("translateX({}%)", self.track_offset(100.0, direction))
    }

    /// Signed distance of `item` from the current slide.
    ///
    /// Under the wrap policy the shortest way round is used, so with five
    /// slides and slide 0 current, slide 4 is at `-1`. Used to place the
    /// neighbours of the active review card.
    pub fn relative_position(&self, item: usize) -> isize {
        let raw = item as isize - self.current as isize;
        if self.policy == BoundaryPolicy::Clamp || self.count == 0 {
            return raw;
        }
        let n = self.count as isize;
        let wrapped = raw.rem_euclid(n);
        if wrapped > n / 2 { wrapped - n } else { wrapped }
    }

    fn set(&mut self, index: usize) -> bool {
        if index == self.current {
            return false;
        }
        tracing::debug!(from = self.current, to = index, "carousel: index changed");
        self.current = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_in_bounds(c: &Carousel) {
        assert!(c.current() < c.count(), "index {} escaped count {}", c.current(), c.count());
    }

    #[test]
    fn clamp_stops_at_last_slide() {
        let mut c = Carousel::new(3, BoundaryPolicy::Clamp);
        assert!(c.next());
        assert!(c.next());
        assert!(!c.next());
        assert_eq!(c.current(), 2);
        assert!(c.is_last());
    }

    #[test]
    fn clamp_stops_at_first_slide() {
        let mut c = Carousel::new(3, BoundaryPolicy::Clamp);
        assert!(!c.prev());
        assert_eq!(c.current(), 0);
        assert!(c.is_first());
    }

    #[test]
    fn wrap_cycles_forward_and_back() {
        let mut c = Carousel::new(3, BoundaryPolicy::Wrap);
        c.next();
        c.next();
        c.next();
        assert_eq!(c.current(), 0);
        c.prev();
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn clamp_sequences_stay_in_bounds() {
        let mut c = Carousel::new(4, BoundaryPolicy::Clamp);
        let ops = [0, 0, 0, 0, 0, 1, 2, 1, 1, 1, 1, 1, 2, 0, 2];
        for (i, op) in ops.iter().enumerate() {
            match op {
                0 => {
                    c.next();
                }
                1 => {
                    c.prev();
                }
                _ => {
                    c.go_to(i);
                }
            }
            assert_in_bounds(&c);
        }
    }

    #[test]
    fn wrap_sequences_follow_modular_arithmetic() {
        let count = 5;
        let mut c = Carousel::new(count, BoundaryPolicy::Wrap);
        let mut expected: usize = 0;
        for step in 0..23 {
            if step % 3 == 0 {
                c.prev();
                expected = (expected + count - 1) % count;
            } else {
                c.next();
                expected = (expected + 1) % count;
            }
            assert_eq!(c.current(), expected);
        }
    }

    #[test]
    fn go_to_out_of_range_is_noop() {
        for policy in [BoundaryPolicy::Clamp, BoundaryPolicy::Wrap] {
            let mut c = Carousel::new(3, policy);
            c.go_to(1);
            let before = c.clone();
            assert!(!c.go_to(3));
            assert!(!c.go_to(usize::MAX));
            assert_eq!(c, before);
        }
    }

    #[test]
    fn go_to_in_range_sets_index() {
        let mut c = Carousel::new(3, BoundaryPolicy::Clamp);
        assert!(c.go_to(2));
        assert_eq!(c.current(), 2);
        assert!(!c.go_to(2));
    }

    #[test]
    fn empty_carousel_ignores_everything() {
        let mut c = Carousel::new(0, BoundaryPolicy::Wrap);
        assert!(!c.next());
        assert!(!c.prev());
        assert!(!c.go_to(0));
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn single_slide_wrap_stays_put() {
        let mut c = Carousel::new(1, BoundaryPolicy::Wrap);
        assert!(!c.next());
        assert!(!c.prev());
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn swipe_left_advances_right_goes_back() {
        let mut c = Carousel::new(3, BoundaryPolicy::Clamp);
        assert!(c.apply_swipe(SwipeDirection::Left));
        assert_eq!(c.current(), 1);
        assert!(c.apply_swipe(SwipeDirection::Right));
        assert_eq!(c.current(), 0);
        assert!(!c.apply_swipe(SwipeDirection::None));
    }

    #[test]
    fn track_offset_sign_follows_direction() {
        let mut c = Carousel::new(4, BoundaryPolicy::Clamp);
        c.go_to(2);
        assert_eq!(c.track_offset(300.0, Direction::Ltr), -600.0);
        assert_eq!(c.track_offset(300.0, Direction::Rtl), 600.0);
        assert_eq!(c.track_transform(300.0, Direction::Ltr), "translateX(-600px)");
    }

    #[test]
    fn track_offset_is_zero_on_first_slide() {
        let c = Carousel::new(4, BoundaryPolicy::Clamp);
        assert_eq!(c.track_offset(300.0, Direction::Ltr), 0.0);
        assert_eq!(c.track_transform_percent(Direction::Ltr), "translateX(0%)");
    }

    #[test]
    fn percent_transform_for_rtl_moves_right() {
        let mut c = Carousel::new(3, BoundaryPolicy::Clamp);
        c.go_to(2);
        assert_eq!(c.track_transform_percent(Direction::Rtl), "translateX(200%)");
        assert_eq!(c.track_transform_percent(Direction::Ltr), "translateX(-200%)");
    }

    #[test]
    fn relative_position_wraps_to_shortest_side() {
        let c = Carousel::new(5, BoundaryPolicy::Wrap);
        assert_eq!(c.relative_position(0), 0);
        assert_eq!(c.relative_position(1), 1);
        assert_eq!(c.relative_position(4), -1);
        assert_eq!(c.relative_position(2), 2);
        assert_eq!(c.relative_position(3), -2);
    }

    #[test]
    fn relative_position_clamp_is_plain_difference() {
        let mut c = Carousel::new(5, BoundaryPolicy::Clamp);
        c.go_to(1);
        assert_eq!(c.relative_position(4), 3);
        assert_eq!(c.relative_position(0), -1);
    }

    #[test]
    fn policy_parses_from_toml_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: BoundaryPolicy,
        }
        let w: Wrapper = toml::from_str(r#"policy = "wrap""#).unwrap();
        assert_eq!(w.policy, BoundaryPolicy::Wrap);
        assert_eq!(w.policy.as_str(), "wrap");
    }
}
