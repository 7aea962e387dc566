//! Utility modules for the strip viewer.

pub mod formatting;

// Re-export commonly used items
pub use formatting::{format_memory_mb, format_progress, MemoryProbe};
