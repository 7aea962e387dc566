//! Centralized application state for the strip viewer.
//!
//! Composes focused state components that each manage one aspect of the
//! application, so panels can borrow them independently.

use chapnav::{navigation_events, NavigatorConfig, Preset};

use crate::state::{EventLog, LayoutState, SeriesState, StripState, ThemeState};

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Focused State Components =====
    /// Series data and file state
    pub series: SeriesState,

    /// Navigator, scroll pane and metadata cache
    pub strip: StripState,

    /// Theme and styling state
    pub theme: ThemeState,

    /// UI layout state
    pub layout: LayoutState,

    /// Recent navigator events
    pub events: EventLog,

    // ===== Top-Level State =====
    /// Current error message to display (if any)
    pub error_message: Option<String>,

    /// Configuration read at startup, tied to the preset it was loaded for
    startup_config: (Preset, NavigatorConfig),
}

impl AppState {
    /// Creates the state with persisted theme and layout choices.
    ///
    /// `startup_config` applies to the persisted preset; other presets use
    /// their built-in defaults.
    pub fn new(theme_name: String, layout: LayoutState, startup_config: NavigatorConfig) -> Self {
        let preset = layout.preset();
        Self {
            series: SeriesState::new(),
            strip: StripState::new(startup_config.clone()),
            theme: ThemeState::with_theme(theme_name),
            layout,
            events: EventLog::subscribe_to(navigation_events()),
            error_message: None,
            startup_config: (preset, startup_config),
        }
    }

    /// Navigator configuration for `preset`.
    pub fn config_for(&self, preset: Preset) -> NavigatorConfig {
        let (startup_preset, config) = &self.startup_config;
        if *startup_preset == preset {
            config.clone()
        } else {
            preset.config()
        }
    }

    // ===== High-Level Coordination Methods =====

    /// Resets the series-related state before loading a new series.
    pub fn reset_series_state(&mut self) {
        self.series.clear();
        self.strip.clear();
        self.events.clear();
        self.error_message = None;
    }
}
