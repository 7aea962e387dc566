//! Lazily fetched per-item metadata.
//!
//! Only items inside the virtualization window are ever requested, in
//! bounded batches. The cache tracks in-flight keys so a window that moves
//! while a request is outstanding does not ask for the same keys twice.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

use crate::index_space::{ChapterNumber, IndexSpace, OrderedItem};
use crate::traits::MetadataSource;
use crate::window::VirtualWindow;

/// Metadata known so far, plus the keys currently being fetched.
#[derive(Debug, Clone, Default)]
pub struct MetadataCache {
    entries: HashMap<ChapterNumber, OrderedItem>,
    in_flight: HashSet<ChapterNumber>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, number: ChapterNumber) -> Option<&OrderedItem> {
        self.entries.get(&number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Collects up to `max_batch` window items that are neither cached nor
    /// being fetched, in strip order, and marks them in flight.
    pub fn missing_in_window(
        &mut self,
        space: &IndexSpace,
        window: &VirtualWindow,
        max_batch: usize,
    ) -> Vec<ChapterNumber> {
        let mut batch = Vec::new();
        for index in window.indices() {
            if batch.len() >= max_batch {
                break;
            }
            let Some(number) = space.item(index) else {
                break;
            };
            if self.entries.contains_key(&number) || self.in_flight.contains(&number) {
                continue;
            }
            batch.push(number);
        }
        self.in_flight.extend(batch.iter().copied());
        batch
    }

    /// Stores fetched entries. Requested keys without an entry are cached
    /// as bare items so they are not requested again.
    pub fn insert_batch(&mut self, requested: &[ChapterNumber], fetched: Vec<OrderedItem>) {
        for meta in fetched {
            self.in_flight.remove(&meta.number);
            self.entries.insert(meta.number, meta);
        }
        for &number in requested {
            if self.in_flight.remove(&number) {
                self.entries
                    .entry(number)
                    .or_insert_with(|| OrderedItem::new(number));
            }
        }
    }

    /// Releases keys of a failed request so a later window may retry them.
    pub fn fail_batch(&mut self, requested: &[ChapterNumber]) {
        for number in requested {
            self.in_flight.remove(number);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.in_flight.clear();
    }
}

const TITLE_WORDS: &[&str] = &[
    "Ashes", "Tide", "Lantern", "Oath", "Harbor", "Rain", "Crown", "Echo", "Ember", "Glass",
    "Hollow", "Iron", "Mirror", "North", "Path", "River", "Storm", "Thorn", "Veil", "Winter",
];

/// Deterministic metadata for generated series.
#[derive(Debug, Clone)]
pub struct SampleMetadataSource {
    series_id: String,
    seed: u64,
}

impl SampleMetadataSource {
    pub fn new(series_id: impl Into<String>, seed: u64) -> Self {
        Self {
            series_id: series_id.into(),
            seed,
        }
    }

    fn meta_for(&self, number: ChapterNumber) -> OrderedItem {
        let mut rng = StdRng::seed_from_u64(self.seed ^ number.value().to_bits());
        let mut pick = || TITLE_WORDS.choose(&mut rng).copied().unwrap_or("Untitled");
        let first = pick();
        let second = pick();
        let title = format!("{} of the {}", first, second);

        OrderedItem {
            number,
            title: Some(title),
            cover_url: Some(format!(
                "https://covers.invalid/{}/{}.jpg",
                self.series_id, number
            )),
        }
    }
}

impl MetadataSource for SampleMetadataSource {
    fn fetch_batch(&self, numbers: &[ChapterNumber]) -> anyhow::Result<Vec<OrderedItem>> {
        Ok(numbers.iter().map(|&number| self.meta_for(number)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::compute_window;

    fn space(total: usize) -> IndexSpace {
        IndexSpace::build(None, Some(total), 25)
    }

    #[test]
    fn test_missing_keys_are_capped_and_marked_in_flight() {
        let space = space(500);
        let window = compute_window(space.len(), 132.0, 12_000.0, 0.0, 12).unwrap();
        let mut cache = MetadataCache::new();

        let first = cache.missing_in_window(&space, &window, 80);
        assert_eq!(first.len(), 80);
        assert_eq!(first[0], ChapterNumber::whole(1).unwrap());
        assert_eq!(cache.in_flight_count(), 80);

        let second = cache.missing_in_window(&space, &window, 80);
        assert_eq!(second[0], ChapterNumber::whole(81).unwrap());
    }

    #[test]
    fn test_insert_batch_fills_cache() {
        let space = space(30);
        let window = compute_window(space.len(), 132.0, 400.0, 0.0, 2).unwrap();
        let mut cache = MetadataCache::new();
        let source = SampleMetadataSource::new("demo", 7);

        let batch = cache.missing_in_window(&space, &window, 80);
        let fetched = source.fetch_batch(&batch[..2]).unwrap();
        cache.insert_batch(&batch, fetched);

        assert_eq!(cache.in_flight_count(), 0);
        assert_eq!(cache.len(), batch.len());
        assert!(cache.get(batch[0]).and_then(|m| m.title.clone()).is_some());
        assert_eq!(cache.get(batch[3]), Some(&OrderedItem::new(batch[3])));
        assert!(cache.missing_in_window(&space, &window, 80).is_empty());
    }

    #[test]
    fn test_failed_batch_can_be_retried() {
        let space = space(10);
        let window = compute_window(space.len(), 132.0, 400.0, 0.0, 2).unwrap();
        let mut cache = MetadataCache::new();

        let batch = cache.missing_in_window(&space, &window, 80);
        cache.fail_batch(&batch);
        assert_eq!(cache.missing_in_window(&space, &window, 80), batch);
    }

    #[test]
    fn test_sample_source_is_deterministic() {
        let source = SampleMetadataSource::new("demo", 42);
        let n = ChapterNumber::new(169.1).unwrap();
        let a = source.fetch_batch(&[n]).unwrap();
        let b = source.fetch_batch(&[n]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].cover_url.as_deref(), Some("https://covers.invalid/demo/169.1.jpg"));
    }
}
