//! Central host state.
//!
//! The host owns everything the layout engine treats as external: the
//! scroll offset and its animation, the stage size, drag tracking, and the
//! records of the last pass waiting to be painted.

use std::collections::BTreeSet;

use anyhow::Result;

use card_stack::config::StackConfig;
use card_stack::core::{
    attributes::CardAttributes, geometry::Viewport, layout::CardStackLayout, range::resolve_range,
};

use crate::ui::card_widget::POINTS_PER_COL;
use crate::ui::smooth_scroll::SmoothScroll;

/// Stage size the configured card geometry is expressed against.  The
/// config is scaled from this to whatever the terminal offers.
pub const REFERENCE_WIDTH: f64 = 300.0;
pub const REFERENCE_HEIGHT: f64 = 600.0;

/// Pages skipped by a keyboard flick.
const FLICK_PAGES: f64 = 3.0;

/// Release velocity (pages) per page-width of movement in the last drag event.
const DRAG_VELOCITY_GAIN: f64 = 8.0;

/// Scale the size-like fields of `base` from the reference stage to a
/// `width × height` stage.  Ratios (decay, damping, thresholds) are kept.
pub fn fit_config(base: &StackConfig, width: f64, height: f64) -> StackConfig {
    let sx = width / REFERENCE_WIDTH;
    let sy = height / REFERENCE_HEIGHT;
    StackConfig {
        card_width: base.card_width * sx,
        card_height: base.card_height * sy,
        horizontal_spacing: base.horizontal_spacing * sx,
        vertical_spacing: base.vertical_spacing * sy,
        stopping_line: base.stopping_line * sx,
        paging_snap_offset: base.paging_snap_offset * sx,
        ..base.clone()
    }
}

/// In-progress pointer drag.
#[derive(Debug, Clone, Copy)]
pub struct Drag {
    /// Column of the last drag event.
    pub last_column: u16,
    /// Points moved by the last drag event; positive = content moved forward.
    pub last_delta: f64,
}

/// Top-level host state.
pub struct AppState {
    pub layout: CardStackLayout,
    pub scroll: SmoothScroll,
    pub item_count: usize,
    /// Stage size in layout points.
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Records of the most recent pass, in index order.
    pub records: Vec<CardAttributes>,
    pub drag: Option<Drag>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Config as loaded, before fitting to the stage.
    base_config: StackConfig,
    /// Indices laid out by the previous pass.
    in_range: BTreeSet<usize>,
}

impl AppState {
    pub fn new(config: StackConfig, item_count: usize, scroll_speed: f64) -> Result<Self> {
        let layout = CardStackLayout::new(config.clone())?;
        Ok(Self {
            layout,
            scroll: SmoothScroll::new(scroll_speed),
            item_count,
            viewport_width: REFERENCE_WIDTH,
            viewport_height: REFERENCE_HEIGHT,
            records: Vec::new(),
            drag: None,
            should_quit: false,
            status_message: None,
            base_config: config,
            in_range: BTreeSet::new(),
        })
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.scroll.offset(),
            self.viewport_width,
            self.viewport_height,
            self.item_count,
        )
    }

    fn has_stage(&self) -> bool {
        self.viewport_width > 0.0 && self.viewport_height > 0.0
    }

    fn last_page(&self) -> usize {
        self.item_count.saturating_sub(1)
    }

    /// Adopt a new stage size, refit the card geometry and keep the current
    /// page in view.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        if width == self.viewport_width && height == self.viewport_height {
            return Ok(());
        }
        let page = if self.viewport_width > 0.0 {
            (self.scroll.target() / self.viewport_width).round().max(0.0)
        } else {
            0.0
        };

        self.viewport_width = width;
        self.viewport_height = height;
        if !self.has_stage() {
            return Ok(());
        }

        self.layout
            .set_config(fit_config(&self.base_config, width, height))?;
        self.scroll.jump_to(page * width);
        tracing::debug!("stage resized to {width:.0}x{height:.0} points, page {page}");
        Ok(())
    }

    /// Advance the animation one tick and run a layout pass.  Cards that
    /// left the range since the previous pass are reported to the engine
    /// before the pass, so a seeded card is drawn in the same frame.
    pub fn frame(&mut self) -> Result<()> {
        self.scroll.tick();
        if !self.has_stage() {
            self.records.clear();
            return Ok(());
        }

        let viewport = self.viewport();
        viewport.validate()?;
        let range = resolve_range(
            viewport.scroll_offset,
            viewport.width,
            viewport.item_count,
            self.layout.config().max_visible_items,
        );
        let now: BTreeSet<usize> = range.collect();
        for &gone in self.in_range.difference(&now) {
            if self.layout.on_item_scrolled_out(gone) {
                tracing::debug!("card {gone} handed to pinned cache on scroll-out");
            }
        }
        self.in_range = now;

        self.records = self.layout.layout(&viewport)?;
        Ok(())
    }

    // ── paging ──────────────────────────────────────────────────

    /// Ask the engine where to settle and animate there.
    pub fn settle(&mut self, proposed_offset: f64, velocity: f64) -> Result<()> {
        if !self.has_stage() {
            return Ok(());
        }
        let target = self
            .layout
            .target_content_offset(proposed_offset, velocity, &self.viewport())?;
        self.scroll.set_target(target);
        Ok(())
    }

    /// One page forward (`direction > 0`) or back.
    pub fn step(&mut self, direction: f64) -> Result<()> {
        let proposed = self.scroll.target() + direction.signum() * self.viewport_width / 2.0;
        self.settle(proposed, direction.signum() * 0.5)
    }

    /// Fast gesture: skips several pages at once.
    pub fn flick(&mut self, direction: f64) -> Result<()> {
        self.settle(self.scroll.target(), direction.signum() * FLICK_PAGES)
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        let page = page.min(self.last_page());
        self.settle(page as f64 * self.viewport_width, 0.0)
    }

    pub fn go_to_last_page(&mut self) -> Result<()> {
        self.go_to_page(self.last_page())
    }

    // ── dragging ────────────────────────────────────────────────

    pub fn begin_drag(&mut self, column: u16) {
        self.scroll.jump_to(self.scroll.offset());
        self.drag = Some(Drag {
            last_column: column,
            last_delta: 0.0,
        });
    }

    /// Track the pointer.  Dragging left moves the strip forward.  The
    /// offset may run half a page past either end; the engine damps the
    /// backward overscroll itself.
    pub fn drag_to(&mut self, column: u16) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let delta = (drag.last_column as f64 - column as f64) * POINTS_PER_COL;
        drag.last_column = column;
        drag.last_delta = delta;

        let half = self.viewport_width / 2.0;
        let strip = self.layout.content_size(&self.viewport()).width;
        let max = (strip - self.viewport_width).max(0.0) + half;
        let offset = (self.scroll.offset() + delta).clamp(-half, max);
        self.scroll.jump_to(offset);
    }

    pub fn end_drag(&mut self) -> Result<()> {
        let Some(drag) = self.drag.take() else {
            return Ok(());
        };
        let velocity = if self.viewport_width > 0.0 {
            drag.last_delta / self.viewport_width * DRAG_VELOCITY_GAIN
        } else {
            0.0
        };
        self.settle(self.scroll.offset(), velocity)
    }

    // ── status ──────────────────────────────────────────────────

    pub fn current_page(&self) -> usize {
        if self.viewport_width <= 0.0 {
            return 0;
        }
        let page = (self.scroll.offset() / self.viewport_width).round().max(0.0) as usize;
        page.min(self.last_page())
    }

    pub fn status_line(&self) -> String {
        format!(
            " card {}/{}{} | offset {:.0} | pinned {} | ←/→ page  H/L flick  drag  q quit",
            self.current_page() + 1,
            self.item_count,
            if self.scroll.is_animating() { " ~" } else { "" },
            self.scroll.offset(),
            self.layout.pinned().len(),
        )
    }
}
