//! Header panel UI rendering
//!
//! Handles the top bar with series controls, preset selection, panel toggles
//! and the theme selector.

use chapnav::{Preset, StripPalette};
use eframe::egui;
use std::path::PathBuf;

use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a series file
    OpenFileRequested(PathBuf),
    /// User clicked "Sample"
    OpenSampleRequested,
    /// User chose another strip preset
    PresetSelected(Preset),
    /// User asked to center the current item
    CenterOnCurrentRequested,
}

/// Renders the application header.
pub fn render_header(
    ui: &mut egui::Ui,
    state: &mut AppState,
    palette: &StripPalette,
    is_loading: bool,
) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open Series").clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("Series Files", &["json", "br"])
                .add_filter("Compressed Series", &["br"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🎲 Sample").clicked() {
            interaction = Some(HeaderInteraction::OpenSampleRequested);
        }
        ui.checkbox(state.layout.sample_volumes_mut(), "Volumes")
            .on_hover_text("Generate samples with a volume mapping");

        if is_loading {
            ui.spinner();
        }

        ui.separator();

        let current = state.layout.preset();
        let mut selected = current;
        egui::ComboBox::from_id_salt("preset_selector")
            .selected_text(current.label())
            .show_ui(ui, |ui| {
                for preset in Preset::ALL {
                    ui.selectable_value(&mut selected, preset, preset.label());
                }
            });
        if selected != current {
            interaction = Some(HeaderInteraction::PresetSelected(selected));
        }

        if state.series.series().is_some() && ui.button("⌖ Current").clicked() {
            interaction = Some(HeaderInteraction::CenterOnCurrentRequested);
        }

        ui.separator();
        ui.checkbox(state.layout.show_section_bar_mut(), "Sections");
        ui.checkbox(state.layout.show_details_mut(), "Details");

        // Push theme selector to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let old_theme = state.theme.current_theme_name().to_string();
            let mut current_theme = old_theme.clone();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(&current_theme)
                .show_ui(ui, |ui| {
                    for theme_name in state.theme.theme_manager().list_themes() {
                        ui.selectable_value(&mut current_theme, theme_name.to_string(), theme_name);
                    }
                });

            if old_theme != current_theme {
                state.theme.set_theme(current_theme);
                ui.ctx().request_repaint();
            }

            ui.label("Theme:");
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(palette.error, err);
    }

    interaction
}
