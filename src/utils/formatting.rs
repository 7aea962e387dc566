//! Text formatting utilities for the strip viewer.

use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessRefreshKind, RefreshKind, System};

/// Memory is sampled at most this often.
const MEMORY_REFRESH: Duration = Duration::from_secs(1);

/// Process memory reader that keeps one `System` around and refreshes it
/// at most once per second, since the status bar asks every frame.
pub struct MemoryProbe {
    system: System,
    pid: Pid,
    last_refresh: Option<Instant>,
    memory_mb: f64,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self {
            system: System::new_with_specifics(
                RefreshKind::new().with_processes(ProcessRefreshKind::new().with_memory()),
            ),
            pid: Pid::from_u32(std::process::id()),
            last_refresh: None,
            memory_mb: 0.0,
        }
    }

    /// Current process memory in megabytes; 0.0 if unavailable.
    pub fn current_mb(&mut self) -> f64 {
        let stale = self
            .last_refresh
            .is_none_or(|at| at.elapsed() >= MEMORY_REFRESH);
        if stale {
            self.system
                .refresh_processes_specifics(ProcessRefreshKind::new().with_memory());
            self.memory_mb = self
                .system
                .process(self.pid)
                .map(|process| process.memory() as f64 / (1024.0 * 1024.0))
                .unwrap_or(0.0);
            self.last_refresh = Some(Instant::now());
        }
        self.memory_mb
    }
}

impl Default for MemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats memory usage in MB as a human-readable string.
///
/// # Examples
/// ```ignore
/// assert_eq!(format_memory_mb(512.5), "Memory: 512.5 MB");
/// assert_eq!(format_memory_mb(2048.0), "Memory: 2.00 GB");
/// ```
pub fn format_memory_mb(memory_mb: f64) -> String {
    if memory_mb > 1024.0 {
        format!("Memory: {:.2} GB", memory_mb / 1024.0)
    } else {
        format!("Memory: {:.1} MB", memory_mb)
    }
}

/// Formats reading progress as `completed/total (pct%)`.
pub fn format_progress(completed: usize, total: usize) -> String {
    if total == 0 {
        return "0/0".to_string();
    }
    let percent = completed as f64 * 100.0 / total as f64;
    format!("{}/{} ({:.0}%)", completed, total, percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_memory() {
        assert_eq!(format_memory_mb(512.5), "Memory: 512.5 MB");
        assert_eq!(format_memory_mb(2048.0), "Memory: 2.00 GB");
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress(0, 0), "0/0");
        assert_eq!(format_progress(96, 240), "96/240 (40%)");
    }

    #[test]
    fn test_memory_probe_reads_own_process() {
        let mut probe = MemoryProbe::new();
        assert!(probe.current_mb() >= 0.0);
    }
}
