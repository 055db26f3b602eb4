//! The layout pass — turns a [`Viewport`] into one [`CardAttributes`] per
//! rendered card.
//!
//! Per pass:
//! 1. Resolve the visible range `[min_index, max_index)`.
//! 2. Split the offset into in-page progress (damped when overscrolling).
//! 3. Compute every card in the range in ascending index order.  The front
//!    card runs the pin state machine and may write the pinned cache.
//! 4. If the card just before the range is pinned, re-anchor it at the
//!    stopping line and put it in front of the list.

use std::collections::HashMap;

use crate::config::{FrontCardMotion, StackConfig};

use super::attributes::CardAttributes;
use super::error::LayoutError;
use super::geometry::{Point, Size, Transform, Viewport};
use super::offset::{normalize_offset, ScrollProgress};
use super::pinned::{PinnedCard, PinnedCardCache};
use super::range::resolve_range;
use super::scale::{card_opacity, card_scale, creeps_forward, effective_depth, stack_z_index};

/// Last record computed for an index, kept so a host can hand a departing
/// front card to the pinned cache after the fact.
#[derive(Debug, Clone, Copy)]
struct SeenCard {
    scroll_offset: f64,
    depth: usize,
    attributes: CardAttributes,
}

/// Card-stack layout engine.
///
/// The only state carried between passes is the pinned cache (plus the
/// last-seen records backing [`CardStackLayout::on_item_scrolled_out`]);
/// everything else is recomputed from the viewport every frame.
#[derive(Debug, Clone)]
pub struct CardStackLayout {
    config: StackConfig,
    pinned: PinnedCardCache,
    last_seen: HashMap<usize, SeenCard>,
}

impl CardStackLayout {
    pub fn new(config: StackConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self {
            config,
            pinned: PinnedCardCache::new(),
            last_seen: HashMap::new(),
        })
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Replace the configuration between passes.  Pinned entries survive.
    pub fn set_config(&mut self, config: StackConfig) -> Result<(), LayoutError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn pinned(&self) -> &PinnedCardCache {
        &self.pinned
    }

    /// Size of the whole scrollable strip: one viewport width per card.
    pub fn content_size(&self, viewport: &Viewport) -> Size {
        Size::new(viewport.width * viewport.item_count as f64, viewport.height)
    }

    /// Run one layout pass.  Records come back ordered by item index.
    pub fn layout(&mut self, viewport: &Viewport) -> Result<Vec<CardAttributes>, LayoutError> {
        viewport.validate()?;

        let range = resolve_range(
            viewport.scroll_offset,
            viewport.width,
            viewport.item_count,
            self.config.max_visible_items,
        );
        let progress = normalize_offset(
            viewport.scroll_offset,
            viewport.width,
            self.config.overscroll_damping,
        );
        let content_center_x = viewport.content_center_x();

        let mut out = Vec::with_capacity(range.len() + 1);

        if range.start > 0 {
            let anchor = Point::new(
                viewport.scroll_offset + self.config.stopping_line,
                viewport.mid_y(),
            );
            let size = self.config.card_size();
            if let Some(pinned) = self.pinned.reanchored(range.start - 1, anchor, size) {
                out.push(pinned);
            }
        }

        for index in range.clone() {
            let attributes =
                self.compute_attributes(index, range.start, content_center_x, progress, viewport);
            self.last_seen.insert(
                index,
                SeenCard {
                    scroll_offset: viewport.scroll_offset,
                    depth: index - range.start,
                    attributes,
                },
            );
            out.push(attributes);
        }

        tracing::trace!(
            "layout: offset={:.1} range={:?} progress={:.3} records={}",
            viewport.scroll_offset,
            range,
            progress.percentage_offset,
            out.len()
        );

        Ok(out)
    }

    /// Compute the record for `index`, whose stacking depth is
    /// `index - min_index`.
    ///
    /// For the front card this also runs the pin check: once the distance to
    /// the next page boundary is within `stopping_line`, the card is frozen
    /// at `scroll_offset + stopping_line` and stored in the pinned cache.
    pub fn compute_attributes(
        &mut self,
        index: usize,
        min_index: usize,
        content_center_x: f64,
        progress: ScrollProgress,
        viewport: &Viewport,
    ) -> CardAttributes {
        debug_assert!(
            index >= min_index,
            "index {index} is in front of min_index {min_index}"
        );
        let config = &self.config;
        let max = config.max_visible_items;
        let depth = index.saturating_sub(min_index);
        let pct = progress.percentage_offset;

        let slot = effective_depth(depth, max) as f64;
        let mut center = Point::new(
            content_center_x + config.horizontal_spacing * slot,
            viewport.mid_y() + config.vertical_spacing * slot,
        );
        let transform = Transform::scale(card_scale(depth, pct, config));
        let mut is_pinned = false;

        if depth == 0 {
            let next_card_offset = viewport.width * (index + 1) as f64;
            let distance_to_stopping_line = (next_card_offset - viewport.scroll_offset).abs();

            if distance_to_stopping_line <= config.stopping_line {
                center = Point::new(
                    viewport.scroll_offset + config.stopping_line,
                    viewport.mid_y(),
                );
                is_pinned = true;
            } else {
                center.x -= match config.front_card_motion {
                    FrontCardMotion::Follow => progress.delta_offset,
                    FrontCardMotion::ClampToCardWidth => {
                        progress.delta_offset.min(config.card_width)
                    }
                };
            }
        } else if creeps_forward(depth, max) {
            center.x -= config.horizontal_spacing * pct;
            center.y -= config.vertical_spacing * pct;
        }

        let attributes = CardAttributes {
            index,
            center,
            size: config.card_size(),
            transform,
            opacity: card_opacity(depth, pct, max),
            z_index: stack_z_index(depth, max),
            is_pinned,
        };

        if is_pinned {
            let previous = self.pinned.put(
                index,
                PinnedCard {
                    offset_when_pinned: viewport.scroll_offset,
                    attributes,
                },
            );
            if previous.is_none() {
                tracing::debug!("card {index} pinned at offset {:.1}", viewport.scroll_offset);
            }
        }

        attributes
    }

    /// Host notification that `index` has left the render range.
    ///
    /// If the card was last drawn as the front card but never pinned (a
    /// fast fling can step over the pin window in a single frame), its last
    /// record seeds the pinned cache so it still shows at the edge.  Returns
    /// `true` when an entry was seeded.
    pub fn on_item_scrolled_out(&mut self, index: usize) -> bool {
        let Some(seen) = self.last_seen.remove(&index) else {
            return false;
        };
        if seen.depth != 0 || self.pinned.contains(index) {
            return false;
        }

        let mut attributes = seen.attributes;
        attributes.is_pinned = true;
        self.pinned.put(
            index,
            PinnedCard {
                offset_when_pinned: seen.scroll_offset,
                attributes,
            },
        );
        tracing::debug!(
            "card {index} seeded into pinned cache from offset {:.1}",
            seen.scroll_offset
        );
        true
    }

    /// Where a paging scroll view should settle after a gesture ends.
    ///
    /// `velocity` is in pages per gesture.  Above the flick threshold the
    /// target jumps `round(velocity)` pages from the nearest one; otherwise
    /// it settles on the current or adjacent page depending on the sign.
    /// The result is clamped to the card strip and shifted by the
    /// configured calibration offset.
    pub fn target_content_offset(
        &self,
        proposed_offset: f64,
        velocity: f64,
        viewport: &Viewport,
    ) -> Result<f64, LayoutError> {
        Viewport {
            scroll_offset: proposed_offset,
            ..*viewport
        }
        .validate()?;
        if !velocity.is_finite() {
            return Err(LayoutError::InvalidVelocity);
        }

        let approximate_page = proposed_offset / viewport.width;
        let page = if velocity.abs() > self.config.flick_velocity_threshold {
            approximate_page.round() + velocity.round()
        } else if velocity < 0.0 {
            approximate_page.floor()
        } else if velocity > 0.0 {
            approximate_page.ceil()
        } else {
            approximate_page.round()
        };

        let last_page = viewport.item_count.saturating_sub(1) as f64;
        let page = page.clamp(0.0, last_page);
        let target = page * viewport.width + self.config.paging_snap_offset;

        tracing::trace!(
            "settle: proposed={proposed_offset:.1} velocity={velocity:.2} -> page {page} ({target:.1})"
        );
        Ok(target)
    }
}
