//! Stacking math — per-depth scale, slot position and fade.
//!
//! `depth` is the card's distance from the front of the stack
//! (`index - min_index`), so `0` is the front card.

use crate::config::StackConfig;

/// Static scale at `depth`: `base ^ (depth - max_visible / 2)`.
///
/// The exponent is centred on the middle of the fan, so middle cards sit
/// near scale 1, the front card is slightly enlarged and the tail recedes.
/// `depth` may be `-1`; the front card interpolates toward that value.
pub fn depth_scale(depth: isize, max_visible_items: usize, base: f64) -> f64 {
    let exponent = depth as f64 - max_visible_items as f64 / 2.0;
    base.powf(exponent)
}

/// Animated scale of the card at `depth` for in-page progress
/// `percentage_offset`.
///
/// - Trailing cards grow toward the previous depth's scale as the page
///   advances, anticipating their move forward.
/// - The front card shrinks away from the viewer, but never below
///   `minimum_front_scale`.
/// - The last visible card stays at its static scale so the next card can
///   enter without a visible pop.
pub fn card_scale(depth: usize, percentage_offset: f64, config: &StackConfig) -> f64 {
    let max = config.max_visible_items;
    let base = config.scale_decay_base;
    if depth >= max {
        return 1.0;
    }

    let d = depth as isize;
    let raw = depth_scale(d, max, base);
    let previous = depth_scale(d - 1, max, base);
    let delta = (previous - raw) * percentage_offset;

    if depth == 0 {
        (raw - delta).max(config.minimum_front_scale)
    } else if depth == max - 1 {
        raw
    } else {
        raw + delta
    }
}

/// Slot used for positioning.  The last visible depth (and anything past it)
/// shares the slot of the card in front so its fade hides the hand-over.
pub fn effective_depth(depth: usize, max_visible_items: usize) -> usize {
    if depth == 0 {
        0
    } else if depth + 1 >= max_visible_items {
        max_visible_items.saturating_sub(2)
    } else {
        depth
    }
}

/// Whether the card at `depth` creeps toward the front proportionally to
/// scroll progress (depths `1..=max_visible - 2`).
pub fn creeps_forward(depth: usize, max_visible_items: usize) -> bool {
    depth >= 1 && depth + 2 <= max_visible_items
}

pub fn card_opacity(depth: usize, percentage_offset: f64, max_visible_items: usize) -> f64 {
    if depth >= max_visible_items {
        0.0
    } else if depth > 0 && depth == max_visible_items - 1 {
        percentage_offset.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Draw order for a stack card; larger values draw on top.
pub fn stack_z_index(depth: usize, max_visible_items: usize) -> i32 {
    let max = i32::try_from(max_visible_items).unwrap_or(i32::MAX);
    let depth = i32::try_from(depth).unwrap_or(i32::MAX);
    max.saturating_sub(depth)
}
