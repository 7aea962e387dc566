//! Rendering subsystem for the strip viewer
//!
//! - Card rendering (chapter cards and window spacers)
//! - Progress rings (section completion)
//! - Text utilities (text measurement and truncation)

pub mod card_renderer;
pub mod progress_ring;
pub mod text_utils;
