//! Settings persistence over eframe storage.
//!
//! Any serializable setting is stored as a JSON string under its own key.

use serde::{Deserialize, Serialize};

/// Coordinates generic settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting, falling back to `T::default()` when the key is
    /// missing or holds invalid JSON.
    ///
    /// # Examples
    /// ```ignore
    /// let layout: LayoutState = SettingsCoordinator::load_setting(storage, "layout");
    /// ```
    pub fn load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        let Some(json_str) = storage.and_then(|storage| storage.get_string(key)) else {
            return T::default();
        };
        match serde_json::from_str(&json_str) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("ignoring stored setting '{}': {}", key, e);
                T::default()
            }
        }
    }

    /// Saves a setting and flushes the storage.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                storage.set_string(key, json_str);
                storage.flush();
            }
            Err(e) => log::warn!("could not serialize setting '{}': {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LayoutState;
    use chapnav::Preset;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: HashMap::new(),
            }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_layout_survives_storage() {
        let mut storage = MockStorage::new();
        let mut layout = LayoutState::default();
        layout.set_preset(Preset::CharactersMobile);

        SettingsCoordinator::save_setting(&mut storage, "layout", &layout);
        let loaded: LayoutState = SettingsCoordinator::load_setting(Some(&storage), "layout");
        assert_eq!(loaded, layout);
    }

    #[test]
    fn test_missing_key_gives_default() {
        let storage = MockStorage::new();
        let loaded: LayoutState = SettingsCoordinator::load_setting(Some(&storage), "layout");
        assert_eq!(loaded, LayoutState::default());

        let loaded: LayoutState = SettingsCoordinator::load_setting(None, "layout");
        assert_eq!(loaded, LayoutState::default());
    }

    #[test]
    fn test_invalid_json_gives_default() {
        let mut storage = MockStorage::new();
        eframe::Storage::set_string(&mut storage, "layout", "{not json".to_string());

        let loaded: LayoutState = SettingsCoordinator::load_setting(Some(&storage), "layout");
        assert_eq!(loaded, LayoutState::default());
    }
}
