//! UI layout state management.

use chapnav::Preset;
use serde::{Deserialize, Serialize};

/// Persisted layout choices.
///
/// Responsibilities:
/// - Remembering the selected strip preset
/// - Toggling the section bar and details panel
/// - Sample generation options shown in the header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutState {
    preset: Preset,
    show_section_bar: bool,
    show_details: bool,
    /// Generate samples with volume mappings
    sample_volumes: bool,
    sample_seed: u64,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            preset: Preset::Chapters,
            show_section_bar: true,
            show_details: true,
            sample_volumes: true,
            sample_seed: 42,
        }
    }
}

impl LayoutState {
    // ===== Layout Queries =====

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn show_section_bar(&self) -> bool {
        self.show_section_bar
    }

    pub fn show_details(&self) -> bool {
        self.show_details
    }

    pub fn sample_volumes(&self) -> bool {
        self.sample_volumes
    }

    pub fn sample_seed(&self) -> u64 {
        self.sample_seed
    }

    // ===== Layout Mutations =====

    pub fn set_preset(&mut self, preset: Preset) {
        self.preset = preset;
    }

    /// Advances the seed so the next sample differs.
    pub fn next_sample_seed(&mut self) -> u64 {
        self.sample_seed = self.sample_seed.wrapping_add(1);
        self.sample_seed
    }

    // ===== Low-Level Accessors (for UI handlers) =====

    pub(crate) fn show_section_bar_mut(&mut self) -> &mut bool {
        &mut self.show_section_bar
    }

    pub(crate) fn show_details_mut(&mut self) -> &mut bool {
        &mut self.show_details
    }

    pub(crate) fn sample_volumes_mut(&mut self) -> &mut bool {
        &mut self.sample_volumes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_round_trips_through_json() {
        let mut layout = LayoutState::default();
        layout.set_preset(Preset::Episodes);
        *layout.show_details_mut() = false;

        let json = serde_json::to_string(&layout).unwrap();
        let restored: LayoutState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, layout);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let restored: LayoutState = serde_json::from_str(r#"{ "preset": "characters_mobile" }"#).unwrap();
        assert_eq!(restored.preset(), Preset::CharactersMobile);
        assert!(restored.show_section_bar());
    }
}
