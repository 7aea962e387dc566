//! Application-level coordination and workflow management.
//!
//! Handles series loading, metadata fetching, preset switches and the strip
//! commands issued by the panels.

use chapnav::{ChapterNumber, Preset, SampleMetadataSource, SampleOptions, SeriesFile};
use std::path::PathBuf;
use std::time::Instant;

use crate::app::AppState;
use crate::io::{AsyncLoader, LoadResult, MetadataLoader, MetadataResponse};

/// Seed for metadata of series loaded from disk.
const FILE_METADATA_SEED: u64 = 0;

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Managing series loading workflows
/// - Feeding the metadata worker with visible items
/// - Applying presets and strip commands
/// - Managing error states
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Initiates asynchronous file loading.
    ///
    /// Clears the previous series right away so the loading indicator shows.
    pub fn open_file(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        metadata: &mut Option<MetadataLoader>,
        path: PathBuf,
        ctx: &egui::Context,
    ) {
        state.reset_series_state();
        *metadata = None;
        loader.start_file_load(path, ctx);
    }

    /// Generates a sample series with the next seed and loads it.
    pub fn open_sample(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        metadata: &mut Option<MetadataLoader>,
        ctx: &egui::Context,
    ) {
        let seed = state.layout.next_sample_seed();
        let options = SampleOptions {
            with_volumes: state.layout.sample_volumes(),
            ..SampleOptions::default()
        };
        let series = loader.load_sample(seed, &options);

        state.reset_series_state();
        Self::apply_series(state, metadata, series, None, seed, Some(ctx));
    }

    /// Applies a finished background load.
    ///
    /// Called once per frame. Returns true if a load completed.
    pub fn check_loading_completion(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        metadata: &mut Option<MetadataLoader>,
        ctx: &egui::Context,
    ) -> bool {
        match loader.check_completion() {
            LoadResult::Success { series, path } => {
                Self::apply_series(state, metadata, series, path, FILE_METADATA_SEED, Some(ctx));
                true
            }
            LoadResult::Error(error_msg) => {
                state.error_message = Some(format!("Error loading series: {}", error_msg));
                state.series.clear();
                true
            }
            LoadResult::None => false,
        }
    }

    /// Installs a series: builds its index space, centers the current item
    /// and starts a metadata worker for it.
    pub fn apply_series(
        state: &mut AppState,
        metadata: &mut Option<MetadataLoader>,
        series: SeriesFile,
        path: Option<PathBuf>,
        metadata_seed: u64,
        ctx: Option<&egui::Context>,
    ) {
        let chunk_size = state.strip.navigator().config().chunk_size;
        let space = series.index_space(chunk_size);
        let source = SampleMetadataSource::new(series.series_id.clone(), metadata_seed);

        log::info!(
            "showing '{}': {} items in {} sections",
            series.title,
            space.len(),
            space.sections().len()
        );

        state.series.load_series(series, path, &space);
        let current = state.series.current();
        state.strip.load_space(space, current);
        state.error_message = None;

        *metadata = Some(MetadataLoader::spawn(Box::new(source), ctx.cloned()));
    }

    /// Requests metadata for window items not cached yet and applies answers.
    pub fn sync_metadata(state: &mut AppState, metadata: &Option<MetadataLoader>) {
        let Some(loader) = metadata else {
            return;
        };

        for response in loader.poll() {
            match response {
                MetadataResponse::Loaded { requested, items } => {
                    state.strip.metadata_mut().insert_batch(&requested, items);
                }
                MetadataResponse::Failed { requested, error } => {
                    // Cached bare so the strip does not refetch every frame
                    state.strip.metadata_mut().insert_batch(&requested, Vec::new());
                    state.error_message = Some(format!("Metadata unavailable: {}", error));
                }
            }
        }

        let batch = state.strip.missing_metadata();
        if batch.is_empty() {
            return;
        }
        if !loader.request(batch.clone()) {
            log::warn!("metadata worker stopped; dropping {} keys", batch.len());
            state.strip.metadata_mut().fail_batch(&batch);
        }
    }

    /// Switches the strip preset and rebuilds the space with its chunking.
    pub fn set_preset(state: &mut AppState, preset: Preset) {
        if state.layout.preset() == preset {
            return;
        }
        state.layout.set_preset(preset);
        let config = state.config_for(preset);
        let chunk_size = config.chunk_size;
        let focus = state
            .strip
            .navigator()
            .active_item()
            .or(state.series.current());

        state.strip.apply_config(config);
        let Some(space) = state.series.series().map(|s| s.index_space(chunk_size)) else {
            return;
        };
        state.series.refresh_progress(&space);
        state.strip.load_space(space, focus);
    }

    /// Handles a card click. Clicks that end a drag are swallowed.
    pub fn activate_card(state: &mut AppState, index: usize) -> Option<ChapterNumber> {
        let number = state.strip.navigator_mut().activate(index)?;
        state.series.set_current(number);
        Some(number)
    }

    /// Animates the strip to the first item of `section`.
    pub fn jump_to_section(state: &mut AppState, section: usize, now: Instant) {
        if !state.strip.navigator_mut().jump_to_section(section, now) {
            log::debug!("section {} has no items", section);
        }
    }

    /// Centers the reader's current item without animating.
    pub fn center_on_current(state: &mut AppState) {
        if let Some(number) = state.series.current() {
            state.strip.navigator_mut().center_on(number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LayoutState;
    use chapnav::{generate_series, NavigatorConfig};

    fn state() -> AppState {
        AppState::new(
            "Dark".to_string(),
            LayoutState::default(),
            NavigatorConfig::chapters(),
        )
    }

    fn load_sample(state: &mut AppState) {
        let mut metadata = None;
        let series = generate_series(5, &SampleOptions::default());
        ApplicationCoordinator::apply_series(state, &mut metadata, series, None, 5, None);
        state.strip.sync_viewport_width(800.0);
    }

    #[test]
    fn test_apply_series_centers_current_item() {
        let mut state = state();
        load_sample(&mut state);

        let active = state.strip.navigator().active_item();
        assert_eq!(active, state.series.current());
        assert!(!state.series.progress().is_empty());
    }

    #[test]
    fn test_set_preset_keeps_focus() {
        let mut state = state();
        load_sample(&mut state);
        let before = state.strip.navigator().active_item();

        ApplicationCoordinator::set_preset(&mut state, Preset::Episodes);

        assert_eq!(state.layout.preset(), Preset::Episodes);
        assert_eq!(state.strip.navigator().config().card_width, 200.0);
        assert_eq!(state.strip.navigator().active_item(), before);
    }

    #[test]
    fn test_activate_card_updates_current() {
        let mut state = state();
        load_sample(&mut state);

        let number = ApplicationCoordinator::activate_card(&mut state, 3);
        assert!(number.is_some());
        assert_eq!(state.series.current(), number);
    }
}
