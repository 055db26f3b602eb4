//! In-page scroll progress.

/// How far the strip has moved into the current page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollProgress {
    /// Signed distance into the page, in points.  Negative while the host
    /// overscrolls past the first card.
    pub delta_offset: f64,
    /// `delta_offset / viewport_width`; `0` at a page boundary, approaching
    /// `1` just before the next one.
    pub percentage_offset: f64,
}

/// Split `scroll_offset` into page-relative progress.
///
/// Backward overscroll is damped: the negative percentage is multiplied by
/// `overscroll_damping` and the delta recomputed from it, which gives the
/// rubber-band resistance when dragging before the first card.
pub fn normalize_offset(
    scroll_offset: f64,
    viewport_width: f64,
    overscroll_damping: f64,
) -> ScrollProgress {
    // `%` on floats keeps the dividend's sign, which is what overscroll needs.
    let mut delta_offset = scroll_offset % viewport_width;
    let mut percentage_offset = delta_offset / viewport_width;

    if percentage_offset < 0.0 {
        percentage_offset *= overscroll_damping;
        delta_offset = percentage_offset * viewport_width;
    }

    ScrollProgress {
        delta_offset,
        percentage_offset,
    }
}
