//! State management modules for the strip viewer.
//!
//! This module contains state-only logic (no UI concerns):
//! - Series state (series file, path, section progress)
//! - Strip state (navigator, scroll pane, metadata cache)
//! - Theme state (theme manager, current theme)
//! - Layout state (preset, panel toggles, sample options)
//! - Event log (recent navigator events)

mod event_log;
mod layout_state;
mod series_state;
mod strip_state;
mod theme_state;

pub use event_log::EventLog;
pub use layout_state::LayoutState;
pub use series_state::SeriesState;
pub use strip_state::StripState;
pub use theme_state::ThemeState;
