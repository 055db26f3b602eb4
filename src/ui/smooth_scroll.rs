//! Scroll-offset animator with exponential ease-out.
//!
//! The host owns the scroll offset the layout engine consumes.  When a
//! gesture ends, the settled page becomes the target; each tick the offset
//! closes a fixed fraction of the remaining distance, which gives a visible
//! deceleration into the page.

/// Offset animator, in layout points.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Offset handed to the layout engine this frame.
    offset: f64,
    /// Where the offset is heading.
    target: f64,
    /// Damping: `remaining *= (1 - speed)` each tick.
    /// Higher speed = faster settle.  Good range: 0.2–0.4 at 30 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Animate toward `target` from wherever the offset is now.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Move both offset and target — used while a drag is in progress so
    /// the strip tracks the pointer exactly.
    pub fn jump_to(&mut self, offset: f64) {
        self.offset = offset;
        self.target = offset;
    }

    /// Close part of the remaining distance.  Call once per frame.
    pub fn tick(&mut self) {
        let remaining = self.target - self.offset;
        if remaining.abs() < 0.5 {
            self.offset = self.target;
        } else {
            self.offset += remaining * self.speed;
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True while the offset has not reached its target.
    pub fn is_animating(&self) -> bool {
        self.offset != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_on_target() {
        let mut scroll = SmoothScroll::new(0.3);
        scroll.set_target(300.0);
        assert!(scroll.is_animating());

        let mut last = scroll.offset();
        for _ in 0..100 {
            scroll.tick();
            assert!(scroll.offset() >= last);
            last = scroll.offset();
        }
        assert_eq!(scroll.offset(), 300.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn jump_stops_animation() {
        let mut scroll = SmoothScroll::new(0.3);
        scroll.set_target(900.0);
        scroll.tick();
        scroll.jump_to(-40.0);
        assert_eq!(scroll.offset(), -40.0);
        assert_eq!(scroll.target(), -40.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn speed_is_clamped() {
        let mut scroll = SmoothScroll::new(5.0);
        scroll.set_target(100.0);
        scroll.tick();
        assert!(scroll.offset() < 100.0);
    }
}
