//! Viewport and scroll tracking.
//!
//! This module encapsulates the committed viewport state and the pacing
//! around it:
//! - Width commits happen immediately on resize
//! - Scroll commits are coalesced to at most one per frame
//! - A settle debounce fires once scrolling has been quiet long enough

use std::time::{Duration, Instant};

/// Committed view of the scroll container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportState {
    /// Visible width in pixels
    pub width: f32,
    /// Horizontal scroll offset in pixels
    pub scroll_offset: f32,
}

/// A pending frame commit. Only the newest request is ever honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameRequest {
    generation: u64,
}

/// Tracks viewport state with frame-paced scroll commits.
///
/// Responsibilities:
/// - Holding the committed `ViewportState`
/// - Coalescing scroll events into one commit per frame
/// - Running the settle debounce, ignoring animation echoes
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    state: ViewportState,
    pending: Option<FrameRequest>,
    generation: u64,
    settle_delay: Duration,
    settle_deadline: Option<Instant>,
    commits: u64,
}

impl ScrollTracker {
    /// Creates a tracker with the given settle debounce.
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            state: ViewportState::default(),
            pending: None,
            generation: 0,
            settle_delay,
            settle_deadline: None,
            commits: 0,
        }
    }

    // ===== Queries =====

    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Returns true if a frame commit is scheduled.
    pub fn has_pending_commit(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns true while the settle debounce is armed.
    pub fn settle_armed(&self) -> bool {
        self.settle_deadline.is_some()
    }

    /// Number of scroll commits so far (one per frame at most).
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    // ===== Mutations =====

    /// Commits a new width. Resizes are infrequent, so there is no pacing.
    pub fn on_resize(&mut self, width: f32) {
        self.state.width = width.max(0.0);
    }

    /// Records a scroll event.
    ///
    /// Schedules a frame commit, replacing any stale request. Unless the
    /// event is an echo of the snap animator, the settle debounce restarts.
    pub fn on_scroll_event(&mut self, now: Instant, echo: bool) {
        self.generation += 1;
        self.pending = Some(FrameRequest {
            generation: self.generation,
        });

        if !echo {
            self.settle_deadline = Some(now + self.settle_delay);
        }
    }

    /// Runs the scheduled commit, if any, with the container's current offset.
    ///
    /// Returns true if state was committed.
    pub fn take_pending_commit(&mut self, offset: f32) -> bool {
        match self.pending.take() {
            Some(request) if request.generation == self.generation => {
                self.commit(offset);
                true
            }
            _ => false,
        }
    }

    /// Commits an offset immediately, dropping any scheduled commit.
    pub fn commit_now(&mut self, offset: f32) {
        self.pending = None;
        self.commit(offset);
    }

    fn commit(&mut self, offset: f32) {
        self.state.scroll_offset = offset.max(0.0);
        self.commits += 1;
    }

    /// Checks whether the settle debounce should fire.
    ///
    /// Fires at most once per armed debounce. While a drag, a snap or the
    /// fast-wheel window is active the deadline is kept and re-checked on
    /// later frames.
    pub fn poll_settle(
        &mut self,
        now: Instant,
        drag_active: bool,
        snap_active: bool,
        wheel_fast: bool,
    ) -> bool {
        let Some(deadline) = self.settle_deadline else {
            return false;
        };
        if now < deadline || drag_active || snap_active || wheel_fast {
            return false;
        }
        self.settle_deadline = None;
        true
    }

    /// Arms the settle debounce without scheduling a commit.
    pub fn arm_settle(&mut self, now: Instant) {
        self.settle_deadline = Some(now + self.settle_delay);
    }

    /// Disarms the settle debounce.
    pub fn cancel_settle(&mut self) {
        self.settle_deadline = None;
    }

    /// Drops scheduled work and resets the committed offset.
    pub fn reset(&mut self) {
        self.pending = None;
        self.settle_deadline = None;
        self.state.scroll_offset = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ScrollTracker {
        ScrollTracker::new(Duration::from_millis(130))
    }

    #[test]
    fn test_resize_commits_immediately() {
        let mut t = tracker();
        t.on_resize(640.0);
        assert_eq!(t.state().width, 640.0);
        t.on_resize(-5.0);
        assert_eq!(t.state().width, 0.0);
    }

    #[test]
    fn test_burst_of_scroll_events_commits_once() {
        let mut t = tracker();
        let now = Instant::now();
        for i in 0..20 {
            t.on_scroll_event(now + Duration::from_millis(i), false);
        }
        assert!(t.take_pending_commit(300.0));
        assert!(!t.take_pending_commit(310.0));
        assert_eq!(t.commit_count(), 1);
        assert_eq!(t.state().scroll_offset, 300.0);
    }

    #[test]
    fn test_settle_fires_once_after_quiet_period() {
        let mut t = tracker();
        let now = Instant::now();
        t.on_scroll_event(now, false);

        assert!(!t.poll_settle(now + Duration::from_millis(100), false, false, false));
        assert!(t.poll_settle(now + Duration::from_millis(131), false, false, false));
        assert!(!t.poll_settle(now + Duration::from_millis(200), false, false, false));
    }

    #[test]
    fn test_settle_restarts_on_new_events() {
        let mut t = tracker();
        let now = Instant::now();
        t.on_scroll_event(now, false);
        t.on_scroll_event(now + Duration::from_millis(100), false);
        assert!(!t.poll_settle(now + Duration::from_millis(150), false, false, false));
        assert!(t.poll_settle(now + Duration::from_millis(231), false, false, false));
    }

    #[test]
    fn test_echo_events_do_not_arm_settle() {
        let mut t = tracker();
        let now = Instant::now();
        t.on_scroll_event(now, true);
        assert!(t.has_pending_commit());
        assert!(!t.settle_armed());
        assert!(!t.poll_settle(now + Duration::from_secs(1), false, false, false));
    }

    #[test]
    fn test_settle_waits_for_blockers() {
        let mut t = tracker();
        let now = Instant::now();
        t.on_scroll_event(now, false);
        let later = now + Duration::from_millis(500);
        assert!(!t.poll_settle(later, true, false, false));
        assert!(!t.poll_settle(later, false, true, false));
        assert!(!t.poll_settle(later, false, false, true));
        assert!(t.poll_settle(later, false, false, false));
    }
}
