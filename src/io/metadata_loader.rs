//! Background metadata fetching.
//!
//! A worker thread owns the `MetadataSource` and answers batch requests over
//! a channel. Each loaded series gets its own worker; dropping the loader
//! closes the request channel and lets the worker exit.

use chapnav::{ChapterNumber, MetadataSource, OrderedItem};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Answer to one batch request.
#[derive(Debug)]
pub enum MetadataResponse {
    Loaded {
        requested: Vec<ChapterNumber>,
        items: Vec<OrderedItem>,
    },
    Failed {
        requested: Vec<ChapterNumber>,
        error: String,
    },
}

/// Channel pair to a metadata worker thread.
pub struct MetadataLoader {
    requests: Sender<Vec<ChapterNumber>>,
    responses: Receiver<MetadataResponse>,
}

impl MetadataLoader {
    /// Spawns a worker over `source`. When `ctx` is given, every answer
    /// requests a repaint.
    pub fn spawn(source: Box<dyn MetadataSource>, ctx: Option<egui::Context>) -> Self {
        let (request_tx, request_rx) = channel::<Vec<ChapterNumber>>();
        let (response_tx, response_rx) = channel();

        thread::spawn(move || {
            for requested in request_rx {
                let response = match source.fetch_batch(&requested) {
                    Ok(items) => MetadataResponse::Loaded { requested, items },
                    Err(e) => {
                        log::warn!("metadata batch of {} failed: {:#}", requested.len(), e);
                        MetadataResponse::Failed {
                            requested,
                            error: e.to_string(),
                        }
                    }
                };
                if response_tx.send(response).is_err() {
                    break;
                }
                if let Some(ctx) = &ctx {
                    ctx.request_repaint();
                }
            }
            log::debug!("metadata worker exiting");
        });

        Self {
            requests: request_tx,
            responses: response_rx,
        }
    }

    /// Queues a batch. Returns false if the worker is gone.
    pub fn request(&self, batch: Vec<ChapterNumber>) -> bool {
        if batch.is_empty() {
            return true;
        }
        self.requests.send(batch).is_ok()
    }

    /// Drains every answer received so far.
    pub fn poll(&self) -> Vec<MetadataResponse> {
        self.responses.try_iter().collect()
    }
}
