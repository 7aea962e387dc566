//! Section bar UI rendering
//!
//! One progress ring per section (volume or chapter range). Clicking a ring
//! jumps the strip to the section's first item.

use chapnav::StripPalette;
use eframe::egui;
use egui::{Align2, FontId, Sense, Stroke};

use crate::app::AppState;
use crate::rendering::progress_ring::paint_progress_ring;
use crate::rendering::text_utils::fit_text;

const CELL_WIDTH: f32 = 76.0;
const CELL_HEIGHT: f32 = 78.0;
const RING_RADIUS: f32 = 22.0;

/// Result of user interaction with the section bar
pub enum SectionBarInteraction {
    SectionClicked(usize),
}

/// Renders the horizontally scrollable row of section rings.
pub fn render_section_bar(
    ui: &mut egui::Ui,
    state: &AppState,
    palette: &StripPalette,
) -> Option<SectionBarInteraction> {
    let mut interaction = None;
    let navigator = state.strip.navigator();
    let sections = navigator.space().sections();
    if sections.is_empty() {
        ui.label("No sections");
        return None;
    }

    let focus = navigator.snap_target().or(navigator.active_index());
    let active_section = focus.and_then(|index| navigator.space().section_of_index(index));

    egui::ScrollArea::horizontal()
        .id_salt("section_bar")
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for (i, section) in sections.iter().enumerate() {
                    let Some(progress) = state.series.progress().get(i) else {
                        continue;
                    };
                    let (rect, response) =
                        ui.allocate_exact_size(egui::vec2(CELL_WIDTH, CELL_HEIGHT), Sense::click());
                    let painter = ui.painter_at(rect);

                    if active_section == Some(i) {
                        painter.rect_stroke(rect.shrink(1.0), 4.0, Stroke::new(1.5, palette.accent), egui::StrokeKind::Inside);
                    } else if response.hovered() {
                        painter.rect_filled(rect.shrink(1.0), 4.0, palette.card_hover);
                    }

                    let center = rect.center_top() + egui::vec2(0.0, RING_RADIUS + 6.0);
                    paint_progress_ring(&painter, center, RING_RADIUS, progress, palette);

                    let font = FontId::proportional(11.0);
                    let label = fit_text(&section.label, rect.width() - 6.0, &font, &painter);
                    painter.text(
                        rect.center_bottom() - egui::vec2(0.0, 4.0),
                        Align2::CENTER_BOTTOM,
                        label,
                        font,
                        palette.text,
                    );

                    let range = match (section.first(), section.last()) {
                        (Some(first), Some(last)) => format!("{}: {} to {}", section.title(), first, last),
                        _ => section.title(),
                    };
                    let response = response.on_hover_text(range);
                    if response.clicked() {
                        interaction = Some(SectionBarInteraction::SectionClicked(i));
                    }
                }
            });
        });

    interaction
}
