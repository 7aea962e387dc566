//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the strip viewer:
//! - Header panel (series controls, preset and theme selectors)
//! - Strip panel (virtualized card strip and scrollbar)
//! - Section bar (progress rings, jump to section)
//! - Details panel (focused item, recent events)
//! - Status bar (memory, series and window summary)
//! - Panel manager (panel orchestration and layout)
//! - Input handling (drag, flick, wheel, clicks)

pub mod details_panel;
pub mod header;
pub mod input;
pub mod panel_manager;
pub mod section_bar;
pub mod status_bar;
pub mod strip_panel;
