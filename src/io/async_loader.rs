//! Asynchronous series file loading.
//!
//! Series files are read in a background thread (brotli decoding of large
//! catalogs can take a moment), keeping the strip responsive.

use chapnav::{generate_series, read_series_file, SampleOptions, SeriesFile};
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::io::LoadingState;

/// Result of a completed series loading operation.
pub enum LoadResult {
    /// Loading completed successfully
    Success {
        series: SeriesFile,
        /// Path to the file that was loaded (None for generated samples)
        path: Option<PathBuf>,
    },
    /// Loading failed with an error
    Error(String),
    /// No loading operation finished
    None,
}

/// Manages asynchronous loading of series files.
pub struct AsyncLoader {
    loading_state: Arc<Mutex<LoadingState>>,
    loading_receiver: Option<Receiver<Result<SeriesFile, String>>>,
    pending_load_path: Option<PathBuf>,
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            loading_receiver: None,
            pending_load_path: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading_state
            .lock()
            .map(|state| state.in_progress)
            .unwrap_or(false)
    }

    /// Starts reading `path` in a background thread.
    ///
    /// Call `check_completion()` once per frame to pick up the result.
    pub fn start_file_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);
        set_in_progress(&self.loading_state, true);
        self.pending_load_path = Some(path.clone());

        let loading_state = Arc::clone(&self.loading_state);
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = read_series_file(&path).map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
            set_in_progress(&loading_state, false);
            ctx_handle.request_repaint();
        });
    }

    /// Generates a sample series in-memory.
    pub fn load_sample(&mut self, seed: u64, options: &SampleOptions) -> SeriesFile {
        log::info!("generating sample series with seed {}", seed);
        generate_series(seed, options)
    }

    /// Returns the finished load, if any.
    pub fn check_completion(&mut self) -> LoadResult {
        let Some(receiver) = &self.loading_receiver else {
            return LoadResult::None;
        };
        let Ok(result) = receiver.try_recv() else {
            return LoadResult::None;
        };

        self.loading_receiver = None;
        match result {
            Ok(series) => LoadResult::Success {
                series,
                path: self.pending_load_path.take(),
            },
            Err(error_msg) => {
                self.pending_load_path = None;
                LoadResult::Error(error_msg)
            }
        }
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn set_in_progress(state: &Mutex<LoadingState>, in_progress: bool) {
    if let Ok(mut state) = state.lock() {
        state.in_progress = in_progress;
    }
}
