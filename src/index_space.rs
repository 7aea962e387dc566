//! Index space construction for chapter and episode strips.
//!
//! Turns the upstream grouping data into the flat, ordered list of item keys
//! the navigator scrolls over, plus the sections used for jump navigation and
//! progress display:
//! - Volume/season mappings become one `Volume` section per label
//! - Without a mapping, a known total count is chunked into `Range` sections
//! - Without either, the space is empty and the caller shows a skeleton
//!
//! Everything here is a pure transform over already-fetched data.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Default number of items per `Range` section.
pub const DEFAULT_CHUNK_SIZE: usize = 25;

/// Hard ceiling on the number of items a series may contribute.
/// Anything beyond it is dropped silently.
pub const MAX_TOTAL_ITEMS: usize = 5000;

/// Mapping from a group label (volume, season) to its member identifiers.
///
/// Members are usually string-encoded numbers (`"12"`, `"169.1"`); plain JSON
/// numbers are accepted too. Anything else is ignored.
pub type VolumeMapping = serde_json::Map<String, Value>;

/// A chapter or episode number.
///
/// Numbers are positive and finite. Decimal sub-entries (`169.1`) are valid
/// and group with their integer parent (`169`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ChapterNumber(f64);

impl ChapterNumber {
    /// Creates a number, rejecting non-finite and non-positive values.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    /// Parses a string-encoded identifier. Malformed input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<f64>().ok().and_then(Self::new)
    }

    /// Creates a whole number. Zero is rejected like any non-positive value.
    pub fn whole(value: u32) -> Option<Self> {
        Self::new(f64::from(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Integer-truncated parent, used for section membership.
    pub fn parent(self) -> u64 {
        self.0.trunc() as u64
    }

    pub fn is_whole(self) -> bool {
        self.0.fract() == 0.0
    }
}

impl TryFrom<f64> for ChapterNumber {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("invalid chapter number: {}", value))
    }
}

impl From<ChapterNumber> for f64 {
    fn from(number: ChapterNumber) -> Self {
        number.0
    }
}

impl PartialEq for ChapterNumber {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for ChapterNumber {}

impl PartialOrd for ChapterNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChapterNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for ChapterNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for ChapterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.parent())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// An item in the strip: its number plus whatever metadata is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedItem {
    pub number: ChapterNumber,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

impl OrderedItem {
    pub fn new(number: ChapterNumber) -> Self {
        Self {
            number,
            title: None,
            cover_url: None,
        }
    }
}

/// How a section was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// From an explicit label to members mapping
    Volume,
    /// A fixed-size chunk of `1..=N`
    Range,
}

/// A named subgroup of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    /// Mapping key for volumes, `"start-end"` for ranges
    pub label: String,
    /// Sorted ascending, deduplicated
    pub members: Vec<ChapterNumber>,
}

impl Section {
    pub fn first(&self) -> Option<ChapterNumber> {
        self.members.first().copied()
    }

    pub fn last(&self) -> Option<ChapterNumber> {
        self.members.last().copied()
    }

    /// Human-readable heading for navigation controls.
    pub fn title(&self) -> String {
        match self.kind {
            SectionKind::Volume => format!("Volume {}", self.label),
            SectionKind::Range => format!("Chapters {}", self.label),
        }
    }

    /// Returns true if some member shares the integer parent of `number`.
    pub fn contains_parent(&self, number: ChapterNumber) -> bool {
        let parent = number.parent();
        self.members.iter().any(|m| m.parent() == parent)
    }
}

/// Builds the navigable sections for a series.
///
/// # Arguments
/// * `mapping` - Optional label to members mapping (volumes or seasons)
/// * `total` - Optional total item count; also caps mapped members
/// * `chunk_size` - Items per section for the range fallback
///
/// # Returns
/// Sections ordered by their first member, or an empty list when neither a
/// usable mapping nor a total count is available.
pub fn build_chapter_nav_groups(
    mapping: Option<&VolumeMapping>,
    total: Option<usize>,
    chunk_size: usize,
) -> Vec<Section> {
    let total = total.filter(|&n| n > 0).map(|n| n.min(MAX_TOTAL_ITEMS));

    if let Some(mapping) = mapping.filter(|m| !m.is_empty()) {
        let sections = volume_sections(mapping, total.unwrap_or(MAX_TOTAL_ITEMS));
        if !sections.is_empty() {
            return sections;
        }
        log::debug!("volume mapping had no usable members, falling back to ranges");
    }

    match total {
        Some(n) => range_sections(n, chunk_size),
        None => Vec::new(),
    }
}

fn volume_sections(mapping: &VolumeMapping, cap: usize) -> Vec<Section> {
    let mut seen: HashSet<ChapterNumber> = HashSet::new();
    let mut sections = Vec::with_capacity(mapping.len());

    for (label, raw) in mapping {
        let mut members: Vec<ChapterNumber> = parse_members(raw)
            .into_iter()
            .filter(|n| n.parent() <= cap as u64)
            .filter(|n| seen.insert(*n))
            .collect();

        if members.is_empty() {
            continue;
        }
        members.sort();

        sections.push(Section {
            kind: SectionKind::Volume,
            label: label.clone(),
            members,
        });
    }

    // Stable: equal first members keep mapping order
    sections.sort_by(|a, b| a.first().cmp(&b.first()));
    sections
}

fn parse_members(raw: &Value) -> Vec<ChapterNumber> {
    match raw {
        Value::Array(values) => values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => ChapterNumber::parse(s),
                Value::Number(n) => n.as_f64().and_then(ChapterNumber::new),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn range_sections(total: usize, chunk_size: usize) -> Vec<Section> {
    let chunk_size = chunk_size.clamp(1, MAX_TOTAL_ITEMS);

    (1..=total)
        .step_by(chunk_size)
        .map(|start| {
            let end = start.saturating_add(chunk_size - 1).min(total);
            Section {
                kind: SectionKind::Range,
                label: format!("{}-{}", start, end),
                members: (start..=end).map(|i| ChapterNumber(i as f64)).collect(),
            }
        })
        .collect()
}

/// The flat item list the navigator scrolls over, with its sections.
#[derive(Debug, Clone, Default)]
pub struct IndexSpace {
    items: Vec<ChapterNumber>,
    sections: Vec<Section>,
    /// Section index for each item index
    section_of: Vec<usize>,
}

impl IndexSpace {
    /// Builds the space from grouping data. See [`build_chapter_nav_groups`].
    pub fn build(mapping: Option<&VolumeMapping>, total: Option<usize>, chunk_size: usize) -> Self {
        Self::from_sections(build_chapter_nav_groups(mapping, total, chunk_size))
    }

    /// Builds the space and merges extra catalog items into it.
    ///
    /// Each known item joins the first section holding its integer-truncated
    /// parent. Items whose parent belongs to no section are ignored.
    pub fn with_known_items(
        mapping: Option<&VolumeMapping>,
        total: Option<usize>,
        chunk_size: usize,
        known: &[ChapterNumber],
    ) -> Self {
        let mut sections = build_chapter_nav_groups(mapping, total, chunk_size);
        let mut present: HashSet<ChapterNumber> =
            sections.iter().flat_map(|s| s.members.iter().copied()).collect();

        for &number in known {
            if present.contains(&number) {
                continue;
            }
            if let Some(section) = sections.iter_mut().find(|s| s.contains_parent(number)) {
                section.members.push(number);
                present.insert(number);
            }
        }

        for section in &mut sections {
            section.members.sort();
        }

        Self::from_sections(sections)
    }

    /// Flattens sections into the sorted, deduplicated item list.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let mut owner: HashMap<ChapterNumber, usize> = HashMap::new();
        for (section_index, section) in sections.iter().enumerate() {
            for &member in &section.members {
                owner.entry(member).or_insert(section_index);
            }
        }

        let mut items: Vec<ChapterNumber> = owner.keys().copied().collect();
        items.sort();

        let section_of = items.iter().map(|n| owner[n]).collect();

        Self {
            items,
            sections,
            section_of,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ChapterNumber] {
        &self.items
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn item(&self, index: usize) -> Option<ChapterNumber> {
        self.items.get(index).copied()
    }

    /// Exact lookup of an item's index.
    pub fn index_of(&self, number: ChapterNumber) -> Option<usize> {
        self.items.binary_search(&number).ok()
    }

    /// Index of `number`, or of the first item after it when absent.
    /// Clamped to the last item. `None` only for an empty space.
    pub fn nearest_index_of(&self, number: ChapterNumber) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let index = match self.items.binary_search(&number) {
            Ok(i) | Err(i) => i,
        };
        Some(index.min(self.items.len() - 1))
    }

    pub fn section_of_index(&self, index: usize) -> Option<usize> {
        self.section_of.get(index).copied()
    }

    pub fn first_index_of_section(&self, section: usize) -> Option<usize> {
        self.sections
            .get(section)
            .and_then(Section::first)
            .and_then(|n| self.index_of(n))
    }
}
