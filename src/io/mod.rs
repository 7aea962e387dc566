//! I/O modules for series loading and metadata fetching.

pub mod async_loader;
pub mod file_loader;
pub mod metadata_loader;

// Re-export commonly used types
pub use async_loader::{AsyncLoader, LoadResult};
pub use file_loader::LoadingState;
pub use metadata_loader::{MetadataLoader, MetadataResponse};
