//! Visible-range resolution — which item indices take part in this frame.
//!
//! One page equals one viewport width.  Cards render narrower than that, but
//! each still owns a full-width virtual slot along the strip.

use std::ops::Range;

/// Half-open `[min_index, max_index)` of cards that are candidates for
/// rendering at `scroll_offset`.
///
/// `viewport_width` must be positive; callers validate before getting here.
/// The range is empty (never inverted) once the offset has run past the last
/// card.
pub fn resolve_range(
    scroll_offset: f64,
    viewport_width: f64,
    item_count: usize,
    max_visible_items: usize,
) -> Range<usize> {
    let page = (scroll_offset / viewport_width).floor().max(0.0);
    let min_index = page as usize;
    let max_index = min_index.saturating_add(max_visible_items).min(item_count);
    min_index..max_index.max(min_index)
}
