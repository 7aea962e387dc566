use crate::index_space::{ChapterNumber, OrderedItem};

/// Capability of a horizontally scrollable container.
///
/// The navigator never touches a platform widget directly; it reads and
/// writes the scroll position through this trait. Implementations apply
/// their own bounds, the way a native scroll container clamps `scrollLeft`.
pub trait Scrollable {
    /// Returns the current horizontal scroll offset in pixels
    fn offset(&self) -> f32;

    /// Sets the horizontal scroll offset. Implementations clamp to their bounds.
    fn set_offset(&mut self, offset: f32);

    /// Returns the visible width of the container
    fn viewport_size(&self) -> f32;

    /// Returns the total width of the scrollable content
    fn content_size(&self) -> f32;

    /// Returns the largest reachable offset
    fn max_offset(&self) -> f32 {
        (self.content_size() - self.viewport_size()).max(0.0)
    }
}

/// Source of per-item metadata (titles, covers).
///
/// Implemented by whatever catalog client the host application owns.
/// Requests are batched by the caller; implementations may return fewer
/// entries than requested when some are unknown.
pub trait MetadataSource: Send + Sync {
    /// Fetches metadata for a batch of item numbers
    fn fetch_batch(&self, numbers: &[ChapterNumber]) -> anyhow::Result<Vec<OrderedItem>>;
}
