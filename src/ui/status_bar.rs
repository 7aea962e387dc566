//! Status bar UI rendering
//!
//! Shows memory usage, the loaded series and the strip's window.

use chapnav::Scrollable;
use eframe::egui;
use egui::RichText;

use crate::app::AppState;
use crate::utils::{format_memory_mb, format_progress, MemoryProbe};

/// Renders the status bar at the bottom of the window.
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState, memory: &mut MemoryProbe) {
    ui.horizontal(|ui| {
        let memory_text = format_memory_mb(memory.current_mb());
        ui.label(RichText::new(&memory_text).strong());

        if state.series.series().is_none() {
            ui.label(RichText::new("| No series loaded").strong());
            return;
        }
        ui.label(RichText::new("|").strong());

        let source = match state.series.file_path() {
            Some(path) => path.display().to_string(),
            None => format!("Sample (seed {})", state.layout.sample_seed()),
        };
        let navigator = state.strip.navigator();
        let completed: usize = state.series.progress().iter().map(|p| p.completed).sum();
        let total: usize = state.series.progress().iter().map(|p| p.total).sum();

        ui.label(
            RichText::new(format!(
                "{} | Items: {} | Sections: {} | Read: {}",
                source,
                navigator.space().len(),
                navigator.space().sections().len(),
                format_progress(completed, total),
            ))
            .strong(),
        );

        if let Some(window) = navigator.window() {
            let offset = navigator.container().map(|pane| pane.offset()).unwrap_or(0.0);
            ui.label(RichText::new("|").strong());
            ui.label(
                RichText::new(format!(
                    "Window: {}..={} ({} cards) | Offset: {:.0} px | Metadata: {} (+{} pending)",
                    window.start_index,
                    window.end_index,
                    window.len(),
                    offset,
                    state.strip.metadata().len(),
                    state.strip.metadata().in_flight_count(),
                ))
                .strong(),
            );
        }

        if let Some(current) = state.series.current() {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(format!("Current: {}", current)).strong());
        }
    });
}
