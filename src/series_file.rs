use anyhow::{Context, Result};
use brotli::enc::BrotliEncoderParams;
use brotli::{CompressorWriter, Decompressor};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::index_space::{ChapterNumber, IndexSpace, VolumeMapping};
use crate::progress::LogRecord;

/// A series as loaded from disk: grouping data, the reader's position and
/// their log records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesFile {
    pub series_id: String,
    pub title: String,
    /// Upper bound on item numbers, when known
    #[serde(default)]
    pub total_items: Option<usize>,
    /// Volume or season label to member numbers
    #[serde(default)]
    pub volumes: Option<VolumeMapping>,
    /// Catalog items outside the mapping, e.g. decimal sub-chapters
    #[serde(default)]
    pub known_items: Vec<ChapterNumber>,
    /// The reader's current item, as the catalog spells it
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub logs: Vec<LogRecord>,
}

impl SeriesFile {
    /// Builds the navigable index space for this series.
    pub fn index_space(&self, chunk_size: usize) -> IndexSpace {
        IndexSpace::with_known_items(
            self.volumes.as_ref(),
            self.total_items,
            chunk_size,
            &self.known_items,
        )
    }

    /// Current item, if it parses as a chapter number.
    pub fn current_number(&self) -> Option<ChapterNumber> {
        self.current.as_deref().and_then(ChapterNumber::parse)
    }
}

fn is_brotli(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "br")
}

/// Reads a series file. Files ending in `.br` are brotli-decompressed.
///
/// # Example
///
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// let series = chapnav::read_series_file("one_piece.json.br")?;
/// println!("{} ({} logs)", series.title, series.logs.len());
/// # Ok(())
/// # }
/// ```
pub fn read_series_file(path: impl AsRef<Path>) -> Result<SeriesFile> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut reader: Box<dyn Read> = if is_brotli(path) {
        Box::new(Decompressor::new(file, 4096))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let series: SeriesFile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse series JSON: {}", path.display()))?;

    log::info!(
        "loaded series '{}' from {} ({} logs)",
        series.series_id,
        path.display(),
        series.logs.len()
    );
    Ok(series)
}

/// Writes a series file, brotli-compressing it when the path ends in `.br`.
pub fn write_series_file(path: impl AsRef<Path>, series: &SeriesFile) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;

    let mut writer: Box<dyn Write> = if is_brotli(path) {
        let params = BrotliEncoderParams {
            quality: 6,
            lgwin: 22,
            ..Default::default()
        };
        Box::new(CompressorWriter::with_params(
            BufWriter::new(file),
            4096,
            &params,
        ))
    } else {
        Box::new(BufWriter::new(file))
    };

    serde_json::to_writer_pretty(&mut writer, series)
        .with_context(|| format!("Failed to serialize series: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    Ok(())
}
