//! Chapter Strip Viewer GUI Application
//!
//! An interactive viewer for series files using the egui framework.
//! The viewer features:
//! - A virtualized horizontal card strip with drag, flick and wheel navigation
//! - Snap-to-card settling after every gesture
//! - Section rings showing reading progress per volume or chapter range

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
//! - Asynchronous file loading and background metadata fetching
//! - Multiple theme support with persistent preferences
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `presentation/` - Visual styling and color mapping
//! - `io/` - Series loading and metadata workers
//! - `utils/` - Formatting and memory probing
//! - `ui/` - UI panel rendering, interaction, and input handling
//! - `rendering/` - Low-level painting for cards and progress rings
//! - `state/` - State management for the series, strip and layout

use eframe::egui;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::path::PathBuf;

mod app;
mod io;
mod presentation;
mod rendering;
mod state;
mod ui;
mod utils;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator, ThemeCoordinator};
use io::{AsyncLoader, MetadataLoader};
use state::LayoutState;
use ui::panel_manager::{PanelInteraction, PanelManager};
use utils::MemoryProbe;

const LAYOUT_KEY: &str = "layout";

fn init_logger() {
    if std::env::var("RUST_LOG").is_err() {
        Builder::new()
            .target(Target::Stdout)
            .filter_level(LevelFilter::Warn)
            .filter_module("chapnav", LevelFilter::Info)
            .init();
    } else {
        env_logger::init();
    }
}

/// Main application entry point.
fn main() -> eframe::Result {
    init_logger();

    // Optional series file to open on startup
    let initial_file = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 520.0])
            .with_title("Chapter Strip Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "Chapter Strip Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(StripViewerApp::new(cc, initial_file)))),
    )
}

/// The main viewer application.
///
/// Delegates to coordinators:
/// - `ApplicationCoordinator` handles loading, metadata and strip commands
/// - `ThemeCoordinator` handles theme persistence and application
/// - `PanelManager` handles UI panel layout and rendering
struct StripViewerApp {
    state: AppState,
    loader: AsyncLoader,
    /// Worker for the loaded series, if any
    metadata: Option<MetadataLoader>,
    memory: MemoryProbe,
    /// Optional file to load on first frame
    pending_file_load: Option<PathBuf>,
}

impl StripViewerApp {
    /// Creates the viewer with theme and layout restored from storage and the
    /// navigator configuration read from the user's config file.
    fn new(cc: &eframe::CreationContext, initial_file: Option<PathBuf>) -> Self {
        let theme_name = ThemeCoordinator::load_theme_from_storage(cc.storage);
        let layout: LayoutState = SettingsCoordinator::load_setting(cc.storage, LAYOUT_KEY);

        let config_path = chapnav::config::default_config_path();
        let config = chapnav::config::load_or(config_path.as_deref(), layout.preset().config());

        Self {
            state: AppState::new(theme_name, layout, config),
            loader: AsyncLoader::new(),
            metadata: None,
            memory: MemoryProbe::new(),
            pending_file_load: initial_file,
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::OpenFileRequested(path) => {
                ApplicationCoordinator::open_file(
                    &mut self.state,
                    &mut self.loader,
                    &mut self.metadata,
                    path,
                    ctx,
                );
            }
            PanelInteraction::OpenSampleRequested => {
                ApplicationCoordinator::open_sample(
                    &mut self.state,
                    &mut self.loader,
                    &mut self.metadata,
                    ctx,
                );
            }
            PanelInteraction::PresetSelected(preset) => {
                ApplicationCoordinator::set_preset(&mut self.state, preset);
            }
            PanelInteraction::CenterOnCurrentRequested => {
                ApplicationCoordinator::center_on_current(&mut self.state);
            }
            PanelInteraction::CardClicked(index) => {
                if let Some(number) = ApplicationCoordinator::activate_card(&mut self.state, index) {
                    log::info!("opened item {}", number);
                }
            }
            PanelInteraction::SectionClicked(section) => {
                ApplicationCoordinator::jump_to_section(
                    &mut self.state,
                    section,
                    std::time::Instant::now(),
                );
            }
        }
        ctx.request_repaint();
    }

    fn save_settings(&self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, self.state.theme.current_theme_name());
        SettingsCoordinator::save_setting(storage, LAYOUT_KEY, &self.state.layout);
    }
}

impl eframe::App for StripViewerApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.save_settings(storage);
    }

    /// Main update loop:
    /// 1. Apply finished loads and metadata answers
    /// 2. Apply theme
    /// 3. Load the command line file on the first frame
    /// 4. Render all panels via PanelManager
    /// 5. Handle panel interactions
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_loading_completion(
            &mut self.state,
            &mut self.loader,
            &mut self.metadata,
            ctx,
        );
        ApplicationCoordinator::sync_metadata(&mut self.state, &self.metadata);

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        if let Some(path) = self.pending_file_load.take() {
            ApplicationCoordinator::open_file(
                &mut self.state,
                &mut self.loader,
                &mut self.metadata,
                path,
                ctx,
            );
        }

        if let Some(interaction) =
            PanelManager::render_all_panels(ctx, &mut self.state, &self.loader, &mut self.memory)
        {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
