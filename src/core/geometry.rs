//! Plain geometry values shared by the engine and its hosts.
//!
//! All coordinates live in *content space*: the x axis runs along the whole
//! strip of cards, so a point at `x = scroll_offset` sits on the left edge of
//! the viewport.

use super::error::LayoutError;

// ───────────────────────────────────────── points & sizes ────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ───────────────────────────────────────── transform ─────────

/// Uniform scale about the card centre, optionally combined with a
/// translation applied after scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn scale(scale: f64) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    /// Size of a `size`-sized card once this transform is applied.
    pub fn apply_to_size(&self, size: Size) -> Size {
        Size::new(size.width * self.scale, size.height * self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ───────────────────────────────────────── viewport ──────────

/// Per-frame state reported by the host that owns the scrollable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Horizontal content offset.  Goes negative while the host overscrolls
    /// past the first card.
    pub scroll_offset: f64,
    pub width: f64,
    pub height: f64,
    pub item_count: usize,
}

impl Viewport {
    pub fn new(scroll_offset: f64, width: f64, height: f64, item_count: usize) -> Self {
        Self {
            scroll_offset,
            width,
            height,
            item_count,
        }
    }

    /// Centre of the viewport along x, in content space.
    pub fn content_center_x(&self) -> f64 {
        self.scroll_offset + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Reject inputs every formula downstream would choke on.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.scroll_offset.is_finite() {
            return Err(LayoutError::InvalidViewport("scroll offset is not finite"));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(LayoutError::InvalidViewport("width must be finite and > 0"));
        }
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(LayoutError::InvalidViewport("height must be finite and >= 0"));
        }
        Ok(())
    }
}
