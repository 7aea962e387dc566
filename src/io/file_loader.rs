//! Shared loading state for background series loads.

/// Holds the state of an async series loading operation.
///
/// Only the in_progress flag is shared; results come through a channel.
/// Wrapped in an `Arc<Mutex<>>` so the loader thread can clear it.
#[derive(Debug, Default)]
pub struct LoadingState {
    /// True while a series file is being read
    pub in_progress: bool,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }
}
