//! Snap animation.
//!
//! Eases the strip offset towards the centered offset of a target item. Each
//! frame is driven by the caller with the current time, so the animation is
//! deterministic and can be stepped in tests.

use std::time::{Duration, Instant};

/// Cubic ease-out: fast start, gentle arrival.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// A running snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    pub from: f32,
    pub to: f32,
    pub started_at: Instant,
    pub duration: Duration,
}

impl SnapAnimation {
    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased offset at `now`.
    pub fn offset_at(&self, now: Instant) -> f32 {
        let eased = ease_out_cubic(self.progress(now));
        self.from + (self.to - self.from) * eased
    }
}

/// Offset produced by one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapFrame {
    pub offset: f32,
    /// True on the last frame; the animator is idle afterwards
    pub finished: bool,
}

/// Runs at most one snap at a time.
#[derive(Debug, Clone, Default)]
pub struct SnapAnimator {
    current: Option<SnapAnimation>,
}

impl SnapAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a snap, replacing any running one.
    pub fn start(&mut self, from: f32, to: f32, now: Instant, duration: Duration) {
        self.cancel();
        self.current = Some(SnapAnimation {
            from,
            to,
            started_at: now,
            duration,
        });
    }

    /// Advances the running snap to `now`.
    ///
    /// Returns `None` when idle. The finishing frame lands exactly on the
    /// target and clears the snapping flag.
    pub fn step(&mut self, now: Instant) -> Option<SnapFrame> {
        let animation = self.current?;
        if animation.progress(now) >= 1.0 {
            self.current = None;
            return Some(SnapFrame {
                offset: animation.to,
                finished: true,
            });
        }
        Some(SnapFrame {
            offset: animation.offset_at(now),
            finished: false,
        })
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }

    pub fn is_snapping(&self) -> bool {
        self.current.is_some()
    }

    /// Target offset of the running snap.
    pub fn target(&self) -> Option<f32> {
        self.current.map(|animation| animation.to)
    }

    pub fn current(&self) -> Option<&SnapAnimation> {
        self.current.as_ref()
    }
}
