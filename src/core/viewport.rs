//! The scrollable viewport over a [`Document`](super::dom::Document).
//!
//! Smooth scrolling uses exponential ease-out: each tick closes a fixed
//! fraction of the remaining distance to the target, so motion decelerates
//! as it arrives.

use super::geometry::Rect;

/// Distance (px) below which an animation snaps to its target.
const SNAP_DISTANCE: f64 = 0.5;

/// How a scroll command reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone)]
pub struct Viewport {
    scroll_y: f64,
    width: f64,
    height: f64,
    content_height: f64,
    /// Pending smooth-scroll target, if animating.
    target: Option<f64>,
    /// Fraction of the remaining distance covered per tick.
    speed: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, content_height: f64, speed: f64) -> Self {
        Self {
            scroll_y: 0.0,
            width: width.max(0.0),
            height: height.max(0.0),
            content_height: content_height.max(0.0),
            target: None,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Current vertical scroll offset (`pageYOffset`).
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Viewport box in viewport coordinates.
    pub fn client_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.height).max(0.0)
    }

    fn clamp(&self, y: f64) -> f64 {
        y.clamp(0.0, self.max_scroll())
    }

    /// Resize the viewport and/or content.  Returns `true` when the scroll
    /// offset had to move to stay in range.
    pub fn resize(&mut self, width: f64, height: f64, content_height: f64) -> bool {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.content_height = content_height.max(0.0);
        if let Some(target) = self.target {
            self.target = Some(self.clamp(target));
        }
        let clamped = self.clamp(self.scroll_y);
        let moved = clamped != self.scroll_y;
        self.scroll_y = clamped;
        moved
    }

    /// `window.scrollTo`.  Returns `true` when the offset changed right away
    /// (always `false` for smooth scrolls, which move on [`tick`](Self::tick)).
    /// Non-finite targets are ignored.
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) -> bool {
        if !top.is_finite() {
            tracing::trace!(top, "ignoring non-finite scroll target");
            return false;
        }
        let top = self.clamp(top);
        match behavior {
            ScrollBehavior::Instant => {
                self.target = None;
                let moved = top != self.scroll_y;
                self.scroll_y = top;
                moved
            }
            ScrollBehavior::Smooth => {
                self.target = (top != self.scroll_y).then_some(top);
                false
            }
        }
    }

    /// User-driven scroll (wheel, keys).  Cancels any running animation.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.scroll_to(self.scroll_y + delta, ScrollBehavior::Instant)
    }

    /// Advance the smooth-scroll animation by one frame.
    /// Returns `true` when the offset moved.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let remaining = target - self.scroll_y;
        if remaining.abs() < SNAP_DISTANCE {
            self.scroll_y = target;
            self.target = None;
        } else {
            self.scroll_y += remaining * self.speed;
        }
        true
    }

    /// True while a smooth scroll is in flight.
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<f64> {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_targets_are_ignored() {
        let mut vp = Viewport::new(800.0, 600.0, 2000.0, 0.3);
        vp.scroll_to(300.0, ScrollBehavior::Instant);
        assert!(!vp.scroll_to(f64::NAN, ScrollBehavior::Smooth));
        assert!(!vp.is_animating());
        assert!(!vp.scroll_to(f64::INFINITY, ScrollBehavior::Instant));
        assert_eq!(vp.scroll_y(), 300.0);
    }

    #[test]
    fn instant_scroll_is_clamped() {
        let mut vp = Viewport::new(800.0, 600.0, 2000.0, 0.3);
        assert!(vp.scroll_to(5000.0, ScrollBehavior::Instant));
        assert_eq!(vp.scroll_y(), 1400.0);
        assert!(vp.scroll_by(-9000.0));
        assert_eq!(vp.scroll_y(), 0.0);
        assert!(!vp.scroll_by(-10.0));
    }

    #[test]
    fn smooth_scroll_settles_on_target() {
        let mut vp = Viewport::new(800.0, 600.0, 2000.0, 0.3);
        assert!(!vp.scroll_to(440.0, ScrollBehavior::Smooth));
        assert!(vp.is_animating());

        let mut last = vp.scroll_y();
        let mut frames = 0;
        while vp.tick() {
            assert!(vp.scroll_y() >= last, "ease-out never overshoots");
            last = vp.scroll_y();
            frames += 1;
            assert!(frames < 200);
        }
        assert_eq!(vp.scroll_y(), 440.0);
        assert!(!vp.is_animating());
    }

    #[test]
    fn user_scroll_cancels_animation() {
        let mut vp = Viewport::new(800.0, 600.0, 2000.0, 0.3);
        vp.scroll_to(1000.0, ScrollBehavior::Smooth);
        vp.tick();
        vp.scroll_by(10.0);
        assert!(!vp.is_animating());
    }

    #[test]
    fn shrinking_content_pulls_offset_back() {
        let mut vp = Viewport::new(800.0, 600.0, 2000.0, 0.3);
        vp.scroll_to(1400.0, ScrollBehavior::Instant);
        assert!(vp.resize(800.0, 600.0, 1000.0));
        assert_eq!(vp.scroll_y(), 400.0);
    }

    #[test]
    fn short_content_cannot_scroll() {
        let mut vp = Viewport::new(800.0, 600.0, 300.0, 0.3);
        assert_eq!(vp.max_scroll(), 0.0);
        assert!(!vp.scroll_to(100.0, ScrollBehavior::Smooth));
        assert!(!vp.is_animating());
    }
}
