//! Chapter card rendering.

use chapnav::{ChapterNumber, LogStatus, OrderedItem, StripPalette};
use eframe::egui;
use egui::{Align2, FontId, Rect, Stroke};

use crate::presentation::color_mapping::{self, CardState};
use crate::rendering::text_utils::fit_text;

/// Everything needed to paint one card.
pub struct CardView<'a> {
    pub number: ChapterNumber,
    /// Label prefix, e.g. "Ch." or "Ep."
    pub prefix: &'a str,
    pub status: Option<LogStatus>,
    /// None while metadata is still loading
    pub meta: Option<&'a OrderedItem>,
    pub state: CardState,
}

/// Paints a card into `rect`.
pub fn paint_card(painter: &egui::Painter, rect: Rect, card: &CardView<'_>, palette: &StripPalette) {
    let fill = color_mapping::card_fill(card.status, card.state, palette);
    painter.rect_filled(rect, 6.0, fill);
    if let Some(border) = color_mapping::card_border(card.state, palette) {
        let width = if card.state.active { 2.0 } else { 1.0 };
        painter.rect_stroke(rect, 6.0, Stroke::new(width, border), egui::StrokeKind::Inside);
    }

    let text_color = color_mapping::card_text(card.status, palette);
    let inner = rect.shrink(8.0);

    painter.text(
        inner.left_top(),
        Align2::LEFT_TOP,
        format!("{} {}", card.prefix, card.number),
        FontId::proportional(16.0),
        text_color,
    );

    let title_font = FontId::proportional(12.0);
    let title = match card.meta {
        Some(meta) => meta.title.as_deref().unwrap_or(""),
        None => "…",
    };
    let title = fit_text(title, inner.width(), &title_font, painter);
    painter.text(
        inner.left_top() + egui::vec2(0.0, 24.0),
        Align2::LEFT_TOP,
        title,
        title_font,
        palette.text_dim,
    );

    let badge = match card.status {
        Some(LogStatus::Completed) => Some("✔ read"),
        Some(LogStatus::InProgress) => Some("● reading"),
        Some(LogStatus::Planned) => Some("○ planned"),
        None => None,
    };
    if let Some(badge) = badge {
        painter.text(
            inner.left_bottom(),
            Align2::LEFT_BOTTOM,
            badge,
            FontId::proportional(11.0),
            text_color,
        );
    }
}

/// Paints a placeholder for cards scrolled out of the rendered window.
pub fn paint_spacer(painter: &egui::Painter, rect: Rect, palette: &StripPalette) {
    if rect.width() <= 0.0 {
        return;
    }
    painter.rect_filled(rect, 0.0, chapnav::with_alpha(palette.card, 40));
}
