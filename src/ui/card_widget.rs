//! Ratatui widget that paints a layout pass onto the terminal.
//!
//! Layout runs in *points*; one terminal column is [`POINTS_PER_COL`] points
//! wide and one row [`POINTS_PER_ROW`] points tall, so cards keep roughly
//! their aspect ratio on a typical 1:2 terminal cell.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use card_stack::core::attributes::CardAttributes;

use super::theme::Theme;

pub const POINTS_PER_COL: f64 = 4.0;
pub const POINTS_PER_ROW: f64 = 8.0;

/// Viewport size in points for a stage of `area`.
pub fn viewport_points(area: Rect) -> (f64, f64) {
    (
        area.width as f64 * POINTS_PER_COL,
        area.height as f64 * POINTS_PER_ROW,
    )
}

/// Cell rectangle covered by `card`, clipped to `area`.  `None` when the
/// card is entirely off-stage.
pub fn card_rect(card: &CardAttributes, scroll_offset: f64, area: Rect) -> Option<Rect> {
    let center = card.screen_center(scroll_offset);
    let cx = center.x + card.transform.translate_x;
    let cy = center.y + card.transform.translate_y;
    let size = card.scaled_size();

    let x0 = ((cx - size.width / 2.0) / POINTS_PER_COL).round().max(0.0);
    let x1 = ((cx + size.width / 2.0) / POINTS_PER_COL).round().min(area.width as f64);
    let y0 = ((cy - size.height / 2.0) / POINTS_PER_ROW).round().max(0.0);
    let y1 = ((cy + size.height / 2.0) / POINTS_PER_ROW).round().min(area.height as f64);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some(Rect::new(
        area.x + x0 as u16,
        area.y + y0 as u16,
        (x1 - x0) as u16,
        (y1 - y0) as u16,
    ))
}

/// Paints cards back to front (ascending `z_index`), skipping invisible ones.
pub struct CardStackWidget<'a> {
    pub records: &'a [CardAttributes],
    pub scroll_offset: f64,
}

impl Widget for CardStackWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(Theme::background()));

        let mut cards: Vec<&CardAttributes> =
            self.records.iter().filter(|c| c.is_visible()).collect();
        cards.sort_by_key(|c| c.z_index);

        for card in cards {
            let Some(rect) = card_rect(card, self.scroll_offset, area) else {
                continue;
            };
            let fill = Theme::card_color(card.index, card.opacity);
            buf.set_style(rect, Style::default().bg(fill));

            let (label, style) = if card.is_pinned {
                (format!(" #{} pinned ", card.index), Theme::pinned_label_style(fill))
            } else {
                (format!(" #{} ", card.index), Theme::card_label_style(fill))
            };
            buf.set_stringn(rect.x, rect.y, label, rect.width as usize, style);
        }
    }
}
