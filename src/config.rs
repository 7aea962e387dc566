//! Navigator configuration.
//!
//! All gesture, snap and wheel tuning lives here so every strip variant
//! (chapters, episodes, mobile characters) is one parameterized navigator.
//! The thresholds are empirical; keep them configurable rather than derived.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::index_space::{DEFAULT_CHUNK_SIZE, MAX_TOTAL_ITEMS};
use crate::window::DEFAULT_BUFFER_ITEMS;

/// Default tuning values.
pub mod defaults {
    /// Pointer gesture classification.
    pub mod gesture {
        /// Movement (px) after which a press becomes a drag.
        pub const DRAG_THRESHOLD_PX: f32 = 6.0;
        /// Movement (px) after which the release click is swallowed.
        pub const CLICK_SUPPRESS_PX: f32 = 12.0;
        /// Rolling window (ms) of samples used for release velocity.
        pub const VELOCITY_WINDOW_MS: u64 = 120;
        /// Minimum release speed (px/ms) for a flick.
        pub const FLICK_VELOCITY: f32 = 0.6;
        /// A drag that scrolled more than this many steps is never a flick.
        pub const FAR_DRAG_STEPS: f32 = 1.1;
        /// Gestures up to this long (ms) may be tiny flicks.
        pub const TINY_FLICK_MAX_MS: u64 = 90;
        /// Gestures up to this displacement (px) may be tiny flicks.
        pub const TINY_FLICK_MAX_PX: f32 = 30.0;
        /// Fraction of a step a slow drag must cover to move on.
        pub const MOVED_FAR_FRACTION: f32 = 0.22;
    }

    /// Snap animation.
    pub mod snap {
        /// Duration (ms) of the snap after native scrolling settles.
        pub const SETTLE_DURATION_MS: u64 = 220;
        /// Duration (ms) of the snap after a drag release.
        pub const RELEASE_DURATION_MS: u64 = 260;
        /// Quiet time (ms) after the last scroll event before settling.
        pub const SETTLE_DELAY_MS: u64 = 130;
    }

    /// Wheel redirection.
    pub mod wheel {
        /// Window (ms) after a wheel event during which settling waits.
        pub const FAST_WINDOW_MS: u64 = 170;
        /// Pixels per wheel line for line-based deltas.
        pub const LINE_HEIGHT_PX: f32 = 40.0;
    }

    /// Maximum number of metadata keys requested at once.
    pub const METADATA_BATCH: usize = 80;
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Thresholds for pointer gesture classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub drag_threshold_px: f32,
    pub click_suppress_px: f32,
    pub velocity_window_ms: u64,
    pub flick_velocity: f32,
    pub far_drag_steps: f32,
    pub tiny_flick_max_ms: u64,
    pub tiny_flick_max_px: f32,
    pub moved_far_fraction: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        use defaults::gesture::*;
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            click_suppress_px: CLICK_SUPPRESS_PX,
            velocity_window_ms: VELOCITY_WINDOW_MS,
            flick_velocity: FLICK_VELOCITY,
            far_drag_steps: FAR_DRAG_STEPS,
            tiny_flick_max_ms: TINY_FLICK_MAX_MS,
            tiny_flick_max_px: TINY_FLICK_MAX_PX,
            moved_far_fraction: MOVED_FAR_FRACTION,
        }
    }
}

impl GestureConfig {
    pub fn velocity_window(&self) -> Duration {
        Duration::from_millis(self.velocity_window_ms)
    }

    pub fn tiny_flick_max(&self) -> Duration {
        Duration::from_millis(self.tiny_flick_max_ms)
    }
}

/// Snap animation timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub settle_duration_ms: u64,
    pub release_duration_ms: u64,
    pub settle_delay_ms: u64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        use defaults::snap::*;
        Self {
            settle_duration_ms: SETTLE_DURATION_MS,
            release_duration_ms: RELEASE_DURATION_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
        }
    }
}

impl SnapConfig {
    pub fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.settle_duration_ms)
    }

    pub fn release_duration(&self) -> Duration {
        Duration::from_millis(self.release_duration_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Wheel handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub fast_window_ms: u64,
    pub line_height_px: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            fast_window_ms: defaults::wheel::FAST_WINDOW_MS,
            line_height_px: defaults::wheel::LINE_HEIGHT_PX,
        }
    }
}

impl WheelConfig {
    pub fn fast_window(&self) -> Duration {
        Duration::from_millis(self.fast_window_ms)
    }
}

/// Named strip variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Chapters,
    Episodes,
    CharactersMobile,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Chapters, Preset::Episodes, Preset::CharactersMobile];

    pub fn label(self) -> &'static str {
        match self {
            Preset::Chapters => "Chapters",
            Preset::Episodes => "Episodes",
            Preset::CharactersMobile => "Characters (mobile)",
        }
    }

    pub fn config(self) -> NavigatorConfig {
        match self {
            Preset::Chapters => NavigatorConfig::chapters(),
            Preset::Episodes => NavigatorConfig::episodes(),
            Preset::CharactersMobile => NavigatorConfig::characters_mobile(),
        }
    }
}

/// Complete navigator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Card width in pixels
    pub card_width: f32,
    /// Gap between consecutive cards
    pub card_gap: f32,
    /// Items rendered past each viewport edge
    pub buffer_items: usize,
    /// Items per section when no mapping exists
    pub chunk_size: usize,
    /// Maximum metadata keys per request
    pub metadata_batch: usize,
    pub gesture: GestureConfig,
    pub snap: SnapConfig,
    pub wheel: WheelConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self::chapters()
    }
}

impl NavigatorConfig {
    /// Chapter strip: compact cover cards.
    pub fn chapters() -> Self {
        Self {
            card_width: 120.0,
            card_gap: 12.0,
            buffer_items: DEFAULT_BUFFER_ITEMS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            metadata_batch: defaults::METADATA_BATCH,
            gesture: GestureConfig::default(),
            snap: SnapConfig::default(),
            wheel: WheelConfig::default(),
        }
    }

    /// Episode strip: wide thumbnails, fewer on screen.
    pub fn episodes() -> Self {
        Self {
            card_width: 200.0,
            card_gap: 16.0,
            buffer_items: 10,
            ..Self::chapters()
        }
    }

    /// Mobile character strip: small avatars, shorter release snap.
    pub fn characters_mobile() -> Self {
        Self {
            card_width: 88.0,
            card_gap: 10.0,
            buffer_items: 14,
            snap: SnapConfig {
                release_duration_ms: defaults::snap::SETTLE_DURATION_MS,
                ..SnapConfig::default()
            },
            ..Self::chapters()
        }
    }

    /// Distance between consecutive card positions.
    pub fn step(&self) -> f32 {
        self.card_width + self.card_gap
    }

    /// Checks that the values can drive a navigator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Result<(), ConfigError> {
            Err(ConfigError::InvalidValue {
                field,
                reason: reason.into(),
            })
        }

        if !(self.card_width.is_finite() && self.card_width >= 1.0) {
            return invalid("card_width", "must be at least 1 px");
        }
        if !(self.card_gap.is_finite() && self.card_gap >= 0.0) {
            return invalid("card_gap", "must be non-negative");
        }
        if self.chunk_size == 0 {
            return invalid("chunk_size", "must be positive");
        }
        if self.chunk_size > MAX_TOTAL_ITEMS {
            return invalid(
                "chunk_size",
                format!("must not exceed {}", MAX_TOTAL_ITEMS),
            );
        }
        if self.metadata_batch == 0 {
            return invalid("metadata_batch", "must be positive");
        }
        if self.snap.settle_duration_ms == 0 || self.snap.release_duration_ms == 0 {
            return invalid("snap", "durations must be positive");
        }
        if self.gesture.velocity_window_ms == 0 {
            return invalid("gesture.velocity_window_ms", "must be positive");
        }
        if self.gesture.click_suppress_px < self.gesture.drag_threshold_px {
            return invalid(
                "gesture.click_suppress_px",
                format!(
                    "must not be below drag_threshold_px ({})",
                    self.gesture.drag_threshold_px
                ),
            );
        }
        if self.gesture.flick_velocity <= 0.0 {
            return invalid("gesture.flick_velocity", "must be positive");
        }
        Ok(())
    }
}

/// Default location of the user configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chapnav").join("navigator.json"))
}

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<NavigatorConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: NavigatorConfig =
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

/// Loads a configuration file, falling back to `fallback` on any failure.
///
/// A missing file is expected and logged at debug level; anything else is
/// logged as a warning.
pub fn load_or(path: Option<&Path>, fallback: NavigatorConfig) -> NavigatorConfig {
    let Some(path) = path else {
        return fallback;
    };

    match load_config(path) {
        Ok(config) => {
            log::info!("loaded navigator config from {}", path.display());
            config
        }
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no navigator config at {}, using defaults", path.display());
            fallback
        }
        Err(err) => {
            log::warn!("{}; using defaults", err);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_presets_are_valid() {
        for preset in Preset::ALL {
            preset.config().validate().unwrap();
        }
        assert_eq!(NavigatorConfig::chapters().step(), 132.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: NavigatorConfig =
            serde_json::from_str(r#"{ "card_width": 150, "gesture": { "flick_velocity": 0.8 } }"#)
                .unwrap();
        assert_eq!(config.card_width, 150.0);
        assert_eq!(config.gesture.flick_velocity, 0.8);
        assert_eq!(config.gesture.drag_threshold_px, defaults::gesture::DRAG_THRESHOLD_PX);
        assert_eq!(config.snap, SnapConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = NavigatorConfig::chapters();
        config.card_width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "card_width", .. })
        ));

        let mut config = NavigatorConfig::chapters();
        config.gesture.click_suppress_px = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_chunk() {
        let config: NavigatorConfig =
            serde_json::from_str(r#"{ "chunk_size": 18446744073709551615 }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "chunk_size", .. })
        ));

        let mut config = NavigatorConfig::chapters();
        config.chunk_size = MAX_TOTAL_ITEMS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_falls_back() {
        let missing = env::temp_dir().join("chapnav_missing_config.json");
        let _ = fs::remove_file(&missing);
        assert_eq!(load_or(Some(&missing), NavigatorConfig::episodes()), NavigatorConfig::episodes());

        let broken = env::temp_dir().join("chapnav_broken_config.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(load_config(&broken), Err(ConfigError::Parse { .. })));
        assert_eq!(load_or(Some(&broken), NavigatorConfig::chapters()), NavigatorConfig::chapters());
        let _ = fs::remove_file(&broken);
    }

    #[test]
    fn test_load_valid_file() {
        let path = env::temp_dir().join("chapnav_valid_config.json");
        fs::write(&path, serde_json::to_string(&NavigatorConfig::characters_mobile()).unwrap()).unwrap();
        assert_eq!(load_config(&path).unwrap(), NavigatorConfig::characters_mobile());
        let _ = fs::remove_file(&path);
    }
}
