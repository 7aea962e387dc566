//! Strip panel UI rendering
//!
//! Paints the virtualized card strip and its scrollbar and drives the
//! navigator once per frame.
//!
//! Only the cards inside the navigator's committed window are painted; the
//! rest of the strip is represented by the leading and trailing spacers.

use chapnav::{Preset, Scrollable, StripPalette};
use eframe::egui;
use egui::{Rect, Sense};
use std::time::Instant;

use crate::app::AppState;
use crate::presentation::color_mapping::CardState;
use crate::rendering::card_renderer::{paint_card, paint_spacer, CardView};
use crate::ui::input::strip_input_handler::{handle_strip_input, StripInputResult};

const SCROLLBAR_HEIGHT: f32 = 10.0;
const SCROLLBAR_GAP: f32 = 6.0;

/// Result of user interaction with the strip panel
pub enum StripPanelInteraction {
    /// A click on card `index` made it through the navigator
    CardClicked(usize),
}

fn card_prefix(preset: Preset) -> &'static str {
    match preset {
        Preset::Chapters => "Ch.",
        Preset::Episodes => "Ep.",
        Preset::CharactersMobile => "#",
    }
}

/// Card height for a preset; episode thumbnails are landscape.
fn card_height(preset: Preset, card_width: f32) -> f32 {
    match preset {
        Preset::Episodes => card_width * 0.6,
        Preset::Chapters | Preset::CharactersMobile => card_width * 1.4,
    }
}

/// Renders the strip, handling its input and animation for this frame.
pub fn render_strip_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    palette: &StripPalette,
) -> Option<StripPanelInteraction> {
    let now = Instant::now();
    let preset = state.layout.preset();
    let card_width = state.strip.navigator().config().card_width;
    let cards_height = card_height(preset, card_width);

    let (strip_rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), cards_height + SCROLLBAR_GAP + SCROLLBAR_HEIGHT),
        Sense::hover(),
    );
    let cards_rect = Rect::from_min_size(strip_rect.min, egui::vec2(strip_rect.width(), cards_height));
    let scrollbar_rect = Rect::from_min_size(
        egui::pos2(strip_rect.left(), cards_rect.bottom() + SCROLLBAR_GAP),
        egui::vec2(strip_rect.width(), SCROLLBAR_HEIGHT),
    );

    state.strip.sync_viewport_width(cards_rect.width());

    let mut interaction = None;
    let (navigator, hovered_index) = state.strip.for_input_handler();
    if let StripInputResult::CardClicked(index) =
        handle_strip_input(ui.ctx(), cards_rect, navigator, hovered_index, now)
    {
        interaction = Some(StripPanelInteraction::CardClicked(index));
    }

    handle_scrollbar(ui, state, scrollbar_rect, now);

    let report = state.strip.navigator_mut().frame(now);
    if report.needs_frame {
        ui.ctx().request_repaint();
    }

    paint_cards(ui, state, cards_rect, palette, card_prefix(preset));
    paint_scrollbar(ui, state, scrollbar_rect, palette);

    interaction
}

/// Dragging the scrollbar scrolls the pane natively; the navigator sees a
/// plain scroll event and settles once the user lets go.
fn handle_scrollbar(ui: &mut egui::Ui, state: &mut AppState, rect: Rect, now: Instant) {
    let response = ui.interact(rect, ui.id().with("strip_scrollbar"), Sense::drag());
    if !response.dragged() {
        return;
    }
    let delta = response.drag_delta().x;
    if delta == 0.0 {
        return;
    }

    let navigator = state.strip.navigator_mut();
    let Some(pane) = navigator.container_mut() else {
        return;
    };
    let viewport = pane.viewport_size().max(1.0);
    let ratio = pane.content_size() / viewport;
    let offset = pane.offset();
    pane.set_offset(offset + delta * ratio);
    navigator.on_native_scroll(now);
}

fn paint_cards(ui: &egui::Ui, state: &AppState, rect: Rect, palette: &StripPalette, prefix: &str) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, palette.background);

    let navigator = state.strip.navigator();
    let Some(window) = navigator.window() else {
        let message = if state.series.series().is_some() {
            "This series has no items"
        } else {
            "Open a series file or generate a sample"
        };
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            message,
            egui::FontId::proportional(16.0),
            palette.text_dim,
        );
        return;
    };

    let config = navigator.config();
    let step = config.step();
    let offset = navigator.container().map(|pane| pane.offset()).unwrap_or(0.0);
    let origin_x = rect.left() - offset;

    let leading = Rect::from_min_size(
        egui::pos2(origin_x, rect.top()),
        egui::vec2(window.leading_spacer, rect.height()),
    );
    paint_spacer(&painter, leading, palette);
    let trailing_start = origin_x + window.leading_spacer + window.rendered_width(step);
    let trailing = Rect::from_min_size(
        egui::pos2(trailing_start, rect.top()),
        egui::vec2(window.trailing_spacer, rect.height()),
    );
    paint_spacer(&painter, trailing, palette);

    let active = navigator.active_index();
    let snap_target = navigator.snap_target();
    for index in window.indices() {
        let Some(number) = navigator.space().item(index) else {
            break;
        };
        let card_rect = Rect::from_min_size(
            egui::pos2(origin_x + index as f32 * step, rect.top()),
            egui::vec2(config.card_width, rect.height()),
        );
        if !card_rect.intersects(rect) {
            continue;
        }

        let card = CardView {
            number,
            prefix,
            status: state.series.status_of(number),
            meta: state.strip.metadata().get(number),
            state: CardState {
                active: active == Some(index),
                hovered: state.strip.hovered_index() == Some(index),
                snap_target: snap_target == Some(index),
            },
        };
        paint_card(&painter, card_rect, &card, palette);
    }
}

fn paint_scrollbar(ui: &egui::Ui, state: &AppState, rect: Rect, palette: &StripPalette) {
    let Some(pane) = state.strip.navigator().container() else {
        return;
    };
    let content = pane.content_size();
    let viewport = pane.viewport_size();
    if content <= viewport || content <= 0.0 {
        return;
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, SCROLLBAR_HEIGHT / 2.0, palette.ring_track);

    let thumb_width = (rect.width() * viewport / content).max(24.0);
    let travel = (rect.width() - thumb_width).max(0.0);
    let fraction = pane.offset() / pane.max_offset().max(1.0);
    let thumb = Rect::from_min_size(
        egui::pos2(rect.left() + travel * fraction.clamp(0.0, 1.0), rect.top()),
        egui::vec2(thumb_width, rect.height()),
    );
    painter.rect_filled(thumb, SCROLLBAR_HEIGHT / 2.0, palette.accent);
}
