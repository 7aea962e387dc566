//! Panel orchestration and layout management.
//!
//! Lays out the header, strip, section bar, details and status panels and
//! funnels their interactions into one enum for the application coordinator.

use eframe::egui;

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::ui::{details_panel, header, section_bar, status_bar, strip_panel};
use crate::utils::MemoryProbe;

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    /// User requested to open a file
    OpenFileRequested(std::path::PathBuf),
    /// User requested a generated sample
    OpenSampleRequested,
    /// User switched the strip preset
    PresetSelected(chapnav::Preset),
    /// User asked to center the current item
    CenterOnCurrentRequested,
    /// A card click came through the navigator
    CardClicked(usize),
    /// A section ring was clicked
    SectionClicked(usize),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// Called from `eframe::App::update()` once per frame.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &AsyncLoader,
        memory: &mut MemoryProbe,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;
        let palette = state.theme.palette().clone();

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) =
                header::render_header(ui, state, &palette, loader.is_loading())
            {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::OpenFileRequested(path) => {
                        PanelInteraction::OpenFileRequested(path)
                    }
                    header::HeaderInteraction::OpenSampleRequested => {
                        PanelInteraction::OpenSampleRequested
                    }
                    header::HeaderInteraction::PresetSelected(preset) => {
                        PanelInteraction::PresetSelected(preset)
                    }
                    header::HeaderInteraction::CenterOnCurrentRequested => {
                        PanelInteraction::CenterOnCurrentRequested
                    }
                });
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state, memory);
        });

        // Details on the right
        if state.layout.show_details() {
            egui::SidePanel::right("details_panel")
                .default_width(ctx.content_rect().width() * 0.25)
                .resizable(true)
                .show(ctx, |ui| {
                    egui::Frame::default().inner_margin(4.0).show(ui, |ui| {
                        details_panel::render_details_panel(ui, state, &palette);
                    });
                });
        }

        let strip_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(8))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(strip_frame)
            .show(ctx, |ui| {
                if let Some(series) = state.series.series() {
                    ui.heading(&series.title);
                } else {
                    ui.heading(state.layout.preset().label());
                }
                ui.separator();

                if let Some(strip_interaction) = strip_panel::render_strip_panel(ui, state, &palette) {
                    interaction = Some(match strip_interaction {
                        strip_panel::StripPanelInteraction::CardClicked(index) => {
                            PanelInteraction::CardClicked(index)
                        }
                    });
                }

                if state.layout.show_section_bar() {
                    ui.add_space(12.0);
                    ui.label(egui::RichText::new("Sections").strong());
                    if let Some(section_interaction) =
                        section_bar::render_section_bar(ui, state, &palette)
                    {
                        interaction = Some(match section_interaction {
                            section_bar::SectionBarInteraction::SectionClicked(section) => {
                                PanelInteraction::SectionClicked(section)
                            }
                        });
                    }
                }
            });

        interaction
    }
}
