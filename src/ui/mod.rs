//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the records a layout pass produced and turns them into
//! cells on the terminal.  No layout math happens here.

pub mod card_widget;
pub mod layout;
pub mod smooth_scroll;
pub mod theme;
