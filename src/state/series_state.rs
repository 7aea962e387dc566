//! Loaded series state.
//!
//! Holds the series file, where it came from, and the per-section progress
//! derived from its log records.

use chapnav::{aggregate_progress, ChapterNumber, IndexSpace, LogStatus, SectionProgress, SeriesFile};
use std::collections::HashMap;
use std::path::PathBuf;

/// State related to the loaded series.
///
/// Responsibilities:
/// - Owning the series file and its source path
/// - Caching section progress and per-item log status
/// - Tracking the reader's current item
#[derive(Debug, Default)]
pub struct SeriesState {
    series: Option<SeriesFile>,
    /// None for generated samples
    file_path: Option<PathBuf>,
    progress: Vec<SectionProgress>,
    status: HashMap<ChapterNumber, LogStatus>,
    current: Option<ChapterNumber>,
}

impl SeriesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a series and derives progress against `space`.
    pub fn load_series(&mut self, series: SeriesFile, path: Option<PathBuf>, space: &IndexSpace) {
        self.progress = aggregate_progress(space.sections(), &series.logs);
        self.status = series.logs.iter().map(|log| (log.number, log.status)).collect();
        self.current = series.current_number();
        self.series = Some(series);
        self.file_path = path;
    }

    /// Recomputes section progress after the space was rebuilt.
    pub fn refresh_progress(&mut self, space: &IndexSpace) {
        if let Some(series) = &self.series {
            self.progress = aggregate_progress(space.sections(), &series.logs);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // ===== Queries =====

    pub fn series(&self) -> Option<&SeriesFile> {
        self.series.as_ref()
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    pub fn progress(&self) -> &[SectionProgress] {
        &self.progress
    }

    pub fn status_of(&self, number: ChapterNumber) -> Option<LogStatus> {
        self.status.get(&number).copied()
    }

    pub fn current(&self) -> Option<ChapterNumber> {
        self.current
    }

    // ===== Mutations =====

    pub fn set_current(&mut self, number: ChapterNumber) {
        self.current = Some(number);
    }
}
