//! Theme selection state.

use chapnav::{StripPalette, ThemeManager};

/// State related to the visual theme.
///
/// Responsibilities:
/// - Owning the theme manager
/// - Tracking the selected theme name
pub struct ThemeState {
    theme_manager: ThemeManager,
    current_theme_name: String,
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current_theme_name", &self.current_theme_name)
            .finish_non_exhaustive()
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::with_theme("Dark".to_string())
    }
}

impl ThemeState {
    pub fn with_theme(theme_name: String) -> Self {
        Self {
            theme_manager: ThemeManager::new(),
            current_theme_name: theme_name,
        }
    }

    // ===== Theme Queries =====

    pub fn theme_manager(&self) -> &ThemeManager {
        &self.theme_manager
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme_name
    }

    /// Palette of the selected theme (or the default one if the stored
    /// name is unknown).
    pub fn palette(&self) -> &StripPalette {
        &self
            .theme_manager
            .theme_or_default(&self.current_theme_name)
            .palette
    }

    // ===== Theme Mutations =====

    pub fn set_theme(&mut self, theme_name: String) {
        self.current_theme_name = theme_name;
    }
}
