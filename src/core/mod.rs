//! Core layout engine — visible range, scroll progress, stacking math, the
//! pinned-card cache and the layout pass that ties them together.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so a host can move the engine across threads.

pub mod attributes;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod offset;
pub mod pinned;
pub mod range;
pub mod scale;
