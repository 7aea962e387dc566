//! Input handling subsystem for UI interactions.
//!
//! - Strip input handling (drag, flick, wheel, card clicks, arrow keys)

pub mod strip_input_handler;
