//! Deterministic sample series for demos and manual testing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use crate::index_space::{ChapterNumber, VolumeMapping, MAX_TOTAL_ITEMS};
use crate::progress::{LogRecord, LogStatus};
use crate::series_file::SeriesFile;

/// Shape of a generated series.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOptions {
    pub total_items: usize,
    /// Group items into volumes; otherwise the series only has a total count
    pub with_volumes: bool,
    /// Range of volume sizes, inclusive
    pub volume_size: (usize, usize),
    /// Probability that an item gets a `.1` sub-chapter
    pub decimal_rate: f64,
    /// Fraction of items the reader has completed, from the start
    pub read_fraction: f64,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            total_items: 240,
            with_volumes: true,
            volume_size: (8, 12),
            decimal_rate: 0.03,
            read_fraction: 0.4,
        }
    }
}

/// Generates a series. The same seed and options always give the same file.
pub fn generate_series(seed: u64, options: &SampleOptions) -> SeriesFile {
    let mut rng = StdRng::seed_from_u64(seed);
    let total = options.total_items.clamp(1, MAX_TOTAL_ITEMS);

    let volumes = options
        .with_volumes
        .then(|| generate_volumes(&mut rng, total, options.volume_size));

    let mut known_items = Vec::new();
    for i in 1..=total {
        if rng.gen_bool(options.decimal_rate.clamp(0.0, 1.0)) {
            if let Some(number) = ChapterNumber::new(i as f64 + 0.1) {
                known_items.push(number);
            }
        }
    }

    let read = ((total as f64) * options.read_fraction.clamp(0.0, 1.0)) as usize;
    let mut logs: Vec<LogRecord> = (1..=read)
        .filter_map(|i| ChapterNumber::whole(i as u32))
        .map(LogRecord::completed)
        .collect();
    if let Some(next) = ChapterNumber::whole(read as u32 + 1).filter(|_| read < total) {
        logs.push(LogRecord {
            number: next,
            status: LogStatus::InProgress,
        });
    }

    SeriesFile {
        series_id: format!("sample-{}", seed),
        title: format!("Sample Series {}", seed),
        total_items: Some(total),
        volumes,
        known_items,
        current: Some((read + 1).min(total).to_string()),
        logs,
    }
}

fn generate_volumes(rng: &mut StdRng, total: usize, size: (usize, usize)) -> VolumeMapping {
    let min = size.0.max(1);
    let max = size.1.max(min);

    let mut mapping = VolumeMapping::new();
    let mut next = 1;
    let mut volume = 1;
    while next <= total {
        let len = rng.gen_range(min..=max);
        let end = (next + len - 1).min(total);
        let members = (next..=end).map(|n| Value::String(n.to_string())).collect();
        mapping.insert(volume.to_string(), Value::Array(members));
        next = end + 1;
        volume += 1;
    }
    mapping
}
