pub mod animator;
pub mod config;
pub mod gesture;
pub mod index_space;
pub mod metadata;
pub mod navigator;
pub mod observable;
pub mod progress;
pub mod sample;
pub mod scroll_pane;
pub mod series_file;
pub mod theme;
pub mod traits;
pub mod viewport;
pub mod wheel;
pub mod window;

// Export traits
pub use traits::{MetadataSource, Scrollable};

// Export the index space
pub use index_space::{
    build_chapter_nav_groups, ChapterNumber, IndexSpace, OrderedItem, Section, SectionKind,
    VolumeMapping, DEFAULT_CHUNK_SIZE, MAX_TOTAL_ITEMS,
};

// Export the navigator and its building blocks
pub use animator::{ease_out_cubic, SnapAnimation, SnapAnimator, SnapFrame};
pub use gesture::{
    DragSession, PointerButton, PointerDown, PointerKind, Release, ReleaseKind, StripMetrics,
};
pub use navigator::{FrameReport, Navigator, NavigatorEvent, PointerRelease};
pub use scroll_pane::ScrollPane;
pub use viewport::{ScrollTracker, ViewportState};
pub use wheel::{redirect_wheel, Modifiers, WheelInput, WheelUnit};
pub use window::{compute_window, VirtualWindow, DEFAULT_BUFFER_ITEMS};

// Export configuration
pub use config::{ConfigError, GestureConfig, NavigatorConfig, Preset, SnapConfig, WheelConfig};

// Export events, progress and metadata
pub use metadata::{MetadataCache, SampleMetadataSource};
pub use observable::{navigation_events, Observable, Subscription};
pub use progress::{aggregate_progress, LogRecord, LogStatus, SectionProgress};

// Export series files
pub use sample::{generate_series, SampleOptions};
pub use series_file::{read_series_file, write_series_file, SeriesFile};

// Export theme support
pub use theme::{hex_to_color32, mix, with_alpha, StripPalette, Theme, ThemeManager};
