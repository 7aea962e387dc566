//! Pointer drag and flick classification.
//!
//! A `DragSession` lives from pointer-down to pointer-up. While the pointer
//! moves it produces 1:1 scroll deltas; on release it decides where the strip
//! should settle.

use std::collections::VecDeque;
use std::time::Instant;

use crate::config::GestureConfig;
use crate::window::nearest_index;

/// Kind of pointing device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// Button that started a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A pointer-down event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDown {
    pub kind: PointerKind,
    pub button: PointerButton,
    /// Horizontal position in pixels
    pub x: f32,
}

impl PointerDown {
    pub fn mouse(x: f32) -> Self {
        Self {
            kind: PointerKind::Mouse,
            button: PointerButton::Primary,
            x,
        }
    }

    pub fn touch(x: f32) -> Self {
        Self {
            kind: PointerKind::Touch,
            button: PointerButton::Primary,
            x,
        }
    }
}

/// Strip geometry needed to resolve a release target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripMetrics {
    pub step: f32,
    pub card_width: f32,
    pub viewport_width: f32,
    pub item_count: usize,
}

/// How a drag release was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    /// Fast release, advance by one item
    Flick,
    /// Very short fast release, at most one item from the start
    TinyFlick,
    /// Slow drag that covered enough distance to move on
    MovedFar,
    /// Slow short drag, return to the start item
    Bounce,
}

/// Outcome of a pointer release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The press never became a drag; the card click goes through.
    Click,
    /// Snap to `target_index`.
    Snap {
        target_index: usize,
        kind: ReleaseKind,
        /// Swallow the click synthesized on the released card
        suppress_click: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    at: Instant,
    x: f32,
}

/// State of one pointer gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    started_at: Instant,
    start_x: f32,
    start_offset: f32,
    start_index: usize,
    last_x: f32,
    travelled: f32,
    samples: VecDeque<Sample>,
    dragging: bool,
    suppress_click: bool,
    config: GestureConfig,
}

impl DragSession {
    /// Starts a session. Mouse presses other than the primary button are ignored.
    pub fn begin(
        pointer: PointerDown,
        now: Instant,
        start_offset: f32,
        start_index: usize,
        config: &GestureConfig,
    ) -> Option<Self> {
        if pointer.kind == PointerKind::Mouse && pointer.button != PointerButton::Primary {
            return None;
        }

        let mut samples = VecDeque::new();
        samples.push_back(Sample { at: now, x: pointer.x });

        Some(Self {
            started_at: now,
            start_x: pointer.x,
            start_offset,
            start_index,
            last_x: pointer.x,
            travelled: 0.0,
            samples,
            dragging: false,
            suppress_click: false,
            config: config.clone(),
        })
    }

    // ===== Queries =====

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn start_offset(&self) -> f32 {
        self.start_offset
    }

    /// Returns true once movement exceeded the drag threshold.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn suppresses_click(&self) -> bool {
        self.suppress_click
    }

    /// Velocity in px/ms over the retained sample window.
    pub fn velocity(&self) -> f32 {
        match self.samples.back() {
            Some(last) => self.velocity_at(last.at),
            None => 0.0,
        }
    }

    /// Velocity in px/ms over the samples no older than the velocity window
    /// at `now`. A pointer held still for the whole window reads as zero.
    pub fn velocity_at(&self, now: Instant) -> f32 {
        let window = self.config.velocity_window();
        let mut recent = self
            .samples
            .iter()
            .filter(|sample| now.saturating_duration_since(sample.at) <= window);
        let Some(first) = recent.next() else {
            return 0.0;
        };
        let Some(last) = recent.last() else {
            return 0.0;
        };
        let dt = last.at.saturating_duration_since(first.at).as_secs_f32() * 1000.0;
        if dt <= f32::EPSILON {
            return 0.0;
        }
        (last.x - first.x) / dt
    }

    // ===== Input =====

    /// Records a pointer move.
    ///
    /// Returns the scroll delta to apply once the gesture is a drag. The move
    /// that crosses the threshold catches up with everything since the press.
    pub fn on_move(&mut self, x: f32, now: Instant) -> Option<f32> {
        self.travelled += (x - self.last_x).abs();
        let previous = self.last_x;
        self.last_x = x;

        self.samples.push_back(Sample { at: now, x });
        let window = self.config.velocity_window();
        while let Some(front) = self.samples.front() {
            if now.saturating_duration_since(front.at) > window && self.samples.len() > 1 {
                self.samples.pop_front();
            } else {
                break;
            }
        }

        if self.travelled > self.config.click_suppress_px {
            self.suppress_click = true;
        }

        if self.dragging {
            return Some(previous - x);
        }
        if self.travelled > self.config.drag_threshold_px {
            self.dragging = true;
            return Some(self.start_x - x);
        }
        None
    }

    /// Classifies the gesture and resolves the snap target.
    ///
    /// `final_offset` is the container offset after the last applied delta.
    pub fn release(&self, now: Instant, final_offset: f32, metrics: StripMetrics) -> Release {
        if !self.dragging || metrics.item_count == 0 {
            return Release::Click;
        }

        let config = &self.config;
        let velocity = self.velocity_at(now);
        let dragged_scroll = (final_offset - self.start_offset).abs();
        let duration = now.saturating_duration_since(self.started_at);
        let displacement = (self.last_x - self.start_x).abs();
        let max_index = metrics.item_count - 1;
        let start = self.start_index.min(max_index);

        let is_flick = velocity.abs() >= config.flick_velocity
            && dragged_scroll <= metrics.step * config.far_drag_steps;

        let (kind, target) = if is_flick {
            let target = if velocity > 0.0 {
                start.saturating_sub(1)
            } else {
                start + 1
            };
            if duration <= config.tiny_flick_max() && displacement <= config.tiny_flick_max_px {
                (
                    ReleaseKind::TinyFlick,
                    target.clamp(start.saturating_sub(1), start + 1),
                )
            } else {
                (ReleaseKind::Flick, target)
            }
        } else if dragged_scroll >= metrics.step * config.moved_far_fraction {
            let nearest = nearest_index(
                final_offset,
                metrics.step,
                metrics.card_width,
                metrics.viewport_width,
                metrics.item_count,
            )
            .unwrap_or(start);
            (ReleaseKind::MovedFar, nearest)
        } else {
            (ReleaseKind::Bounce, start)
        };

        let target_index = target.min(max_index);
        log::debug!(
            "drag release: {:?} v={:.2}px/ms scroll={:.1}px {} -> {}",
            kind,
            velocity,
            dragged_scroll,
            start,
            target_index
        );

        Release::Snap {
            target_index,
            kind,
            suppress_click: self.suppress_click,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn metrics() -> StripMetrics {
        StripMetrics {
            step: 132.0,
            card_width: 120.0,
            viewport_width: 400.0,
            item_count: 100,
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Runs a gesture of evenly spaced moves and returns the release.
    fn run(start_index: usize, from: f32, to: f32, over_ms: u64, moves: u64) -> Release {
        let config = GestureConfig::default();
        let t0 = Instant::now();
        let start_offset = start_index as f32 * 132.0 + 60.0 - 200.0;
        let mut session =
            DragSession::begin(PointerDown::mouse(from), t0, start_offset, start_index, &config)
                .unwrap();

        let mut offset = start_offset;
        for i in 1..=moves {
            let x = from + (to - from) * i as f32 / moves as f32;
            if let Some(delta) = session.on_move(x, t0 + ms(over_ms * i / moves)) {
                offset += delta;
            }
        }
        session.release(t0 + ms(over_ms), offset, metrics())
    }

    fn target(release: Release) -> usize {
        match release {
            Release::Snap { target_index, .. } => target_index,
            Release::Click => panic!("expected a snap"),
        }
    }

    #[test]
    fn test_secondary_mouse_button_is_ignored() {
        let down = PointerDown {
            kind: PointerKind::Mouse,
            button: PointerButton::Secondary,
            x: 10.0,
        };
        assert!(DragSession::begin(down, Instant::now(), 0.0, 0, &GestureConfig::default()).is_none());
    }

    #[test]
    fn test_small_movement_is_a_click() {
        assert_eq!(run(5, 500.0, 504.0, 40, 2), Release::Click);
    }

    #[test]
    fn test_drag_deltas_track_pointer() {
        let config = GestureConfig::default();
        let t0 = Instant::now();
        let mut session = DragSession::begin(PointerDown::touch(100.0), t0, 0.0, 0, &config).unwrap();
        assert_eq!(session.on_move(97.0, t0 + ms(5)), None);
        assert_eq!(session.on_move(90.0, t0 + ms(10)), Some(10.0));
        assert_eq!(session.on_move(80.0, t0 + ms(15)), Some(10.0));
        assert_eq!(session.on_move(85.0, t0 + ms(20)), Some(-5.0));
        assert!(session.is_dragging());
        assert!(session.suppresses_click());
    }

    #[test]
    fn test_fast_left_drag_advances_one_item() {
        let release = run(5, 500.0, 440.0, 30, 1);
        assert_eq!(
            release,
            Release::Snap {
                target_index: 6,
                kind: ReleaseKind::Flick,
                suppress_click: true,
            }
        );
    }

    #[test]
    fn test_flick_direction_follows_velocity() {
        assert_eq!(target(run(5, 500.0, 550.0, 50, 5)), 4);
        assert_eq!(target(run(5, 500.0, 450.0, 50, 5)), 6);
    }

    #[test]
    fn test_tiny_flick_stays_within_one_item() {
        let release = run(5, 500.0, 475.0, 20, 2);
        match release {
            Release::Snap { target_index, kind, .. } => {
                assert_eq!(kind, ReleaseKind::TinyFlick);
                assert!((4..=6).contains(&target_index));
            }
            Release::Click => panic!("expected a snap"),
        }

        let short = target(run(5, 500.0, 490.0, 40, 4));
        assert!((4..=6).contains(&short));
    }

    #[test]
    fn test_slow_far_drag_snaps_to_nearest() {
        // 400 px over 2 s is well below flick speed.
        let release = run(10, 800.0, 400.0, 2000, 40);
        match release {
            Release::Snap { target_index, kind, .. } => {
                assert_eq!(kind, ReleaseKind::MovedFar);
                assert_eq!(target_index, 13);
            }
            Release::Click => panic!("expected a snap"),
        }
    }

    #[test]
    fn test_slow_short_drag_bounces_back() {
        let release = run(10, 500.0, 480.0, 1000, 10);
        match release {
            Release::Snap { target_index, kind, suppress_click } => {
                assert_eq!(kind, ReleaseKind::Bounce);
                assert_eq!(target_index, 10);
                assert!(suppress_click);
            }
            Release::Click => panic!("expected a snap"),
        }
    }

    #[test]
    fn test_targets_are_clamped_to_strip() {
        assert_eq!(target(run(0, 500.0, 560.0, 40, 4)), 0);
        assert_eq!(target(run(99, 500.0, 440.0, 40, 4)), 99);
    }

    #[test]
    fn test_old_samples_leave_velocity_window() {
        let config = GestureConfig::default();
        let t0 = Instant::now();
        let mut session = DragSession::begin(PointerDown::touch(0.0), t0, 0.0, 0, &config).unwrap();
        session.on_move(100.0, t0 + ms(10));
        session.on_move(100.0, t0 + ms(400));
        session.on_move(100.0, t0 + ms(500));
        assert_eq!(session.velocity(), 0.0);
    }

    #[test]
    fn test_hold_before_release_is_not_a_flick() {
        let config = GestureConfig::default();
        let t0 = Instant::now();
        let start_offset = 5.0 * 132.0 + 60.0 - 200.0;
        let mut session =
            DragSession::begin(PointerDown::touch(500.0), t0, start_offset, 5, &config).unwrap();
        let delta = session.on_move(440.0, t0 + ms(30)).unwrap();
        assert!(session.velocity_at(t0 + ms(30)).abs() >= config.flick_velocity);

        // Held still for half a second after the fast move.
        let release_at = t0 + ms(530);
        assert_eq!(session.velocity_at(release_at), 0.0);
        assert_eq!(
            session.release(release_at, start_offset + delta, metrics()),
            Release::Snap {
                target_index: 5,
                kind: ReleaseKind::MovedFar,
                suppress_click: true,
            }
        );
    }
}
