//! Details panel UI rendering
//!
//! Shows the hovered (or active) item with its metadata, the series summary
//! and the most recent navigator events.

use chapnav::{NavigatorEvent, StripPalette};
use eframe::egui;
use egui::{RichText, ScrollArea};

use crate::app::AppState;

const RECENT_EVENTS: usize = 12;

/// Renders the details panel.
pub fn render_details_panel(ui: &mut egui::Ui, state: &AppState, palette: &StripPalette) {
    let Some(series) = state.series.series() else {
        ui.colored_label(palette.text_dim, "No series loaded");
        return;
    };

    ui.label(RichText::new(&series.title).strong());
    ui.colored_label(palette.text_dim, &series.series_id);
    ui.separator();

    let navigator = state.strip.navigator();
    let focus = state.strip.hovered_index().or(navigator.active_index());
    match focus.and_then(|index| navigator.space().item(index).map(|n| (index, n))) {
        Some((index, number)) => {
            ui.label(RichText::new(format!("Item {} (index {})", number, index)).strong());
            if let Some(section) = navigator
                .space()
                .section_of_index(index)
                .and_then(|s| navigator.space().sections().get(s))
            {
                ui.label(section.title());
            }

            let status = state
                .series
                .status_of(number)
                .map(|s| format!("{:?}", s))
                .unwrap_or_else(|| "Unread".to_string());
            ui.label(format!("Status: {}", status));

            match state.strip.metadata().get(number) {
                Some(meta) => {
                    let json = serde_json::to_string(meta).unwrap_or_default();
                    ui.colored_label(palette.accent, json);
                }
                None => {
                    ui.colored_label(palette.text_dim, "(metadata loading)");
                }
            }
        }
        None => {
            ui.colored_label(palette.text_dim, "Hover a card for details");
        }
    }

    ui.add_space(10.0);
    ui.label(RichText::new("Events:").strong());

    ScrollArea::vertical()
        .id_salt("details_events")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let events = state.events.recent(RECENT_EVENTS);
            if events.is_empty() {
                ui.colored_label(palette.text_dim, "(none yet)");
            }
            for event in events {
                ui.label(describe_event(&event));
            }
        });
}

fn describe_event(event: &NavigatorEvent) -> String {
    match event {
        NavigatorEvent::SnapStarted { index, number } => format!("snap → {} (#{})", number, index),
        NavigatorEvent::Settled { index, number } => format!("settled on {} (#{})", number, index),
        NavigatorEvent::ItemActivated { index, number } => format!("opened {} (#{})", number, index),
    }
}
