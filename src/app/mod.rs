//! Application-level modules for the strip viewer.
//!
//! This module contains the coordinators and the centralized state.

mod app_state;
mod application_coordinator;
mod settings_coordinator;
mod theme_coordinator;

pub use app_state::AppState;
pub use application_coordinator::ApplicationCoordinator;
pub use settings_coordinator::SettingsCoordinator;
pub use theme_coordinator::ThemeCoordinator;
