//! In-memory scroll container.

use crate::traits::Scrollable;

/// A scroll container that owns its offset and clamps it to
/// `[0, content - viewport]`.
///
/// Used by the GUI strip (which paints its own cards) and by tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollPane {
    offset: f32,
    viewport: f32,
    content: f32,
}

impl ScrollPane {
    pub fn new(viewport: f32, content: f32) -> Self {
        Self {
            offset: 0.0,
            viewport: viewport.max(0.0),
            content: content.max(0.0),
        }
    }

    /// Updates the viewport width, re-clamping the offset.
    pub fn set_viewport_size(&mut self, viewport: f32) {
        self.viewport = viewport.max(0.0);
        self.offset = self.clamp(self.offset);
    }

    /// Updates the content width, re-clamping the offset.
    pub fn set_content_size(&mut self, content: f32) {
        self.content = content.max(0.0);
        self.offset = self.clamp(self.offset);
    }

    fn clamp(&self, offset: f32) -> f32 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_offset())
    }
}

impl Scrollable for ScrollPane {
    fn offset(&self) -> f32 {
        self.offset
    }

    fn set_offset(&mut self, offset: f32) {
        self.offset = self.clamp(offset);
    }

    fn viewport_size(&self) -> f32 {
        self.viewport
    }

    fn content_size(&self) -> f32 {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_clamped() {
        let mut pane = ScrollPane::new(400.0, 1000.0);
        pane.set_offset(-50.0);
        assert_eq!(pane.offset(), 0.0);
        pane.set_offset(5000.0);
        assert_eq!(pane.offset(), 600.0);
    }

    #[test]
    fn test_viewport_wider_than_content() {
        let mut pane = ScrollPane::new(800.0, 300.0);
        pane.set_offset(100.0);
        assert_eq!(pane.offset(), 0.0);
        assert_eq!(pane.max_offset(), 0.0);
    }

    #[test]
    fn test_resize_reclamps() {
        let mut pane = ScrollPane::new(400.0, 1000.0);
        pane.set_offset(600.0);
        pane.set_viewport_size(700.0);
        assert_eq!(pane.offset(), 300.0);
    }
}
