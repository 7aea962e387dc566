//! Strip navigator state.
//!
//! Wraps the navigator over an in-memory scroll pane together with the
//! metadata cache for the cards it renders.

use chapnav::{
    navigation_events, ChapterNumber, IndexSpace, MetadataCache, Navigator, NavigatorConfig,
    ScrollPane,
};

/// State of the chapter strip.
///
/// Responsibilities:
/// - Owning the navigator and its scroll container
/// - Caching card metadata
/// - Tracking the hovered card
pub struct StripState {
    navigator: Navigator<ScrollPane>,
    metadata: MetadataCache,
    hovered_index: Option<usize>,
}

impl std::fmt::Debug for StripState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripState")
            .field("items", &self.navigator.space().len())
            .field("hovered_index", &self.hovered_index)
            .finish_non_exhaustive()
    }
}

impl StripState {
    /// Creates an empty strip publishing to the process-wide event store.
    pub fn new(config: NavigatorConfig) -> Self {
        let mut navigator = Navigator::new(config, IndexSpace::default())
            .with_events(navigation_events().clone());
        navigator.attach(ScrollPane::default());

        Self {
            navigator,
            metadata: MetadataCache::new(),
            hovered_index: None,
        }
    }

    /// Replaces the item space, optionally centering the reader's item.
    pub fn load_space(&mut self, space: IndexSpace, current: Option<ChapterNumber>) {
        self.navigator.set_space(space);
        self.sync_content_size();
        self.metadata.clear();
        self.hovered_index = None;

        if let Some(number) = current {
            self.navigator.center_on(number);
        }
    }

    /// Swaps the navigator configuration, re-centering the active item.
    pub fn apply_config(&mut self, config: NavigatorConfig) {
        let active = self.navigator.active_item();
        self.navigator.set_config(config);
        self.sync_content_size();
        if let Some(number) = active {
            self.navigator.center_on(number);
        }
    }

    /// Keeps the pane geometry in step with the allocated strip width.
    ///
    /// A width change re-centers the active item when no gesture is running.
    pub fn sync_viewport_width(&mut self, width: f32) {
        let width = width.max(0.0);
        if (self.navigator.viewport().width - width).abs() < 0.5 {
            return;
        }
        if let Some(pane) = self.navigator.container_mut() {
            pane.set_viewport_size(width);
        }
        self.navigator.resize(width);

        let idle = !self.navigator.is_dragging() && !self.navigator.is_snapping();
        if let (true, Some(number)) = (idle, self.navigator.active_item()) {
            self.navigator.center_on(number);
        }
    }

    fn sync_content_size(&mut self) {
        let content = self.navigator.content_size();
        if let Some(pane) = self.navigator.container_mut() {
            pane.set_content_size(content);
        }
    }

    /// Window items still lacking metadata, marked in flight.
    pub fn missing_metadata(&mut self) -> Vec<ChapterNumber> {
        let Some(window) = self.navigator.window() else {
            return Vec::new();
        };
        let batch = self.navigator.config().metadata_batch;
        self.metadata
            .missing_in_window(self.navigator.space(), &window, batch)
    }

    pub fn clear(&mut self) {
        self.load_space(IndexSpace::default(), None);
    }

    // ===== Queries =====

    pub fn navigator(&self) -> &Navigator<ScrollPane> {
        &self.navigator
    }

    pub fn metadata(&self) -> &MetadataCache {
        &self.metadata
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered_index
    }

    // ===== Mutations =====

    pub fn navigator_mut(&mut self) -> &mut Navigator<ScrollPane> {
        &mut self.navigator
    }

    pub fn metadata_mut(&mut self) -> &mut MetadataCache {
        &mut self.metadata
    }

    /// Returns split borrows for the input handler.
    pub(crate) fn for_input_handler(&mut self) -> (&mut Navigator<ScrollPane>, &mut Option<usize>) {
        (&mut self.navigator, &mut self.hovered_index)
    }
}
