//! Card-stack pager layout.
//!
//! The engine in [`core`] maps a scroll offset and a viewport onto one
//! visual record per card: the front card peels left and pins near the
//! viewport edge, trailing cards fan out behind it with shrinking scale and
//! fade out past the visible window.  Nothing here touches a terminal or any
//! other rendering surface; hosts feed [`core::geometry::Viewport`] values in
//! and draw whatever comes back.

pub mod config;
pub mod core;
