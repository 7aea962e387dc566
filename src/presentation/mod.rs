//! Presentation layer for visual styling and color mapping.
//!
//! - Card colors by log status and interaction state
//! - Section ring colors by completion

pub mod color_mapping;
