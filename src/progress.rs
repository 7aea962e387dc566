//! Per-section completion from a reader's log records.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::index_space::{ChapterNumber, Section};

/// Status of one logged item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    Completed,
    InProgress,
    Planned,
}

/// A reader's log entry for one chapter or episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub number: ChapterNumber,
    pub status: LogStatus,
}

impl LogRecord {
    pub fn completed(number: ChapterNumber) -> Self {
        Self {
            number,
            status: LogStatus::Completed,
        }
    }
}

/// Completion of one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionProgress {
    /// Distinct completed members
    pub completed: usize,
    /// Section size
    pub total: usize,
}

impl SectionProgress {
    /// Completed fraction in `[0, 1]`; empty sections report 0.
    pub fn ratio(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            (self.completed as f32 / self.total as f32).min(1.0)
        }
    }

    /// Arc of the progress ring in degrees.
    pub fn sweep_degrees(&self) -> f32 {
        self.ratio() * 360.0
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}

/// Computes completion for every section, in section order.
///
/// Repeated logs of the same item count once, and logs for items outside
/// a section are ignored.
pub fn aggregate_progress(sections: &[Section], logs: &[LogRecord]) -> Vec<SectionProgress> {
    let completed: HashSet<ChapterNumber> = logs
        .iter()
        .filter(|log| log.status == LogStatus::Completed)
        .map(|log| log.number)
        .collect();

    sections
        .iter()
        .map(|section| SectionProgress {
            completed: section
                .members
                .iter()
                .filter(|number| completed.contains(number))
                .count(),
            total: section.members.len(),
        })
        .collect()
}
