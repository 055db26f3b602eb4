//! The per-card record a layout pass hands back to the host.

use super::geometry::{Point, Size, Transform};

/// Draw order for a pinned card re-rendered from the cache: behind every
/// active stack card.
pub const PINNED_Z_INDEX: i32 = i32::MIN;

/// Everything a host needs to place one card on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardAttributes {
    pub index: usize,
    /// Card centre in content space (before `transform` is applied).
    pub center: Point,
    /// Untransformed card size.
    pub size: Size,
    pub transform: Transform,
    /// `0.0` means the host may skip drawing the card.
    pub opacity: f64,
    /// Larger values draw on top.
    pub z_index: i32,
    /// The card is frozen at the stopping line.
    pub is_pinned: bool,
}

impl CardAttributes {
    /// Centre relative to the viewport's left edge.
    pub fn screen_center(&self, scroll_offset: f64) -> Point {
        Point::new(self.center.x - scroll_offset, self.center.y)
    }

    /// On-screen size after scaling.
    pub fn scaled_size(&self) -> Size {
        self.transform.apply_to_size(self.size)
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}
