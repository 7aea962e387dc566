//! The horizontal strip navigator.
//!
//! `Navigator` composes the scroll tracker, virtualization window, drag
//! controller, snap animator and wheel redirection over any `Scrollable`
//! container. The host forwards input events and calls `frame` once per
//! rendered frame; everything else is derived.
//!
//! While no container is attached every handler is a silent no-op.

use std::time::Instant;

use crate::animator::SnapAnimator;
use crate::config::NavigatorConfig;
use crate::gesture::{DragSession, PointerDown, Release, ReleaseKind, StripMetrics};
use crate::index_space::{ChapterNumber, IndexSpace};
use crate::observable::Observable;
use crate::traits::Scrollable;
use crate::viewport::{ScrollTracker, ViewportState};
use crate::wheel::{redirect_wheel, WheelInput};
use crate::window::{self, VirtualWindow};

/// Notifications published by a navigator.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigatorEvent {
    /// A snap towards `index` began
    SnapStarted { index: usize, number: ChapterNumber },
    /// A snap finished with `index` centered
    Settled { index: usize, number: ChapterNumber },
    /// A card was clicked without dragging
    ItemActivated { index: usize, number: ChapterNumber },
}

/// Result of a pointer release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRelease {
    /// No gesture was in progress
    Ignored,
    /// The press never became a drag; let the click through
    Click,
    /// A snap towards `target_index` started
    Snap {
        target_index: usize,
        kind: ReleaseKind,
    },
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Viewport state was committed this frame
    pub committed: bool,
    /// A snap finished this frame
    pub settled: bool,
    /// The settle debounce fired and started a snap
    pub settle_started: bool,
    /// Another frame is needed to finish pending work
    pub needs_frame: bool,
}

/// One strip of cards over a `Scrollable` container.
pub struct Navigator<S: Scrollable> {
    config: NavigatorConfig,
    space: IndexSpace,
    container: Option<S>,
    tracker: ScrollTracker,
    animator: SnapAnimator,
    drag: Option<DragSession>,
    suppress_click: bool,
    wheel_fast_until: Option<Instant>,
    active_index: Option<usize>,
    snap_index: Option<usize>,
    events: Option<Observable<NavigatorEvent>>,
}

impl<S: Scrollable> Navigator<S> {
    pub fn new(config: NavigatorConfig, space: IndexSpace) -> Self {
        let tracker = ScrollTracker::new(config.snap.settle_delay());
        Self {
            config,
            space,
            container: None,
            tracker,
            animator: SnapAnimator::new(),
            drag: None,
            suppress_click: false,
            wheel_fast_until: None,
            active_index: None,
            snap_index: None,
            events: None,
        }
    }

    /// Publishes events to `events` from now on.
    pub fn with_events(mut self, events: Observable<NavigatorEvent>) -> Self {
        self.events = Some(events);
        self
    }

    // ===== Lifecycle =====

    /// Replaces the item space and drops all transient gesture state.
    pub fn set_space(&mut self, space: IndexSpace) {
        self.space = space;
        self.reset_transient();
        self.active_index = None;
        if let Some(container) = self.container.as_mut() {
            container.set_offset(0.0);
        }
    }

    /// Replaces the configuration, keeping the item space.
    pub fn set_config(&mut self, config: NavigatorConfig) {
        let width = self.tracker.state().width;
        self.tracker = ScrollTracker::new(config.snap.settle_delay());
        self.tracker.on_resize(width);
        self.config = config;
        self.reset_transient();
    }

    fn reset_transient(&mut self) {
        self.animator.cancel();
        self.drag = None;
        self.suppress_click = false;
        self.wheel_fast_until = None;
        self.snap_index = None;
        self.tracker.reset();
    }

    pub fn attach(&mut self, container: S) {
        self.tracker.on_resize(container.viewport_size());
        self.tracker.commit_now(container.offset());
        self.container = Some(container);
    }

    /// Detaches the container. A running snap stops on the next frame.
    pub fn detach(&mut self) -> Option<S> {
        self.drag = None;
        self.container.take()
    }

    pub fn container(&self) -> Option<&S> {
        self.container.as_ref()
    }

    /// Mutable access for hosts that keep container geometry in sync.
    pub fn container_mut(&mut self) -> Option<&mut S> {
        self.container.as_mut()
    }

    // ===== Queries =====

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn space(&self) -> &IndexSpace {
        &self.space
    }

    pub fn viewport(&self) -> ViewportState {
        self.tracker.state()
    }

    /// Width of all cards laid end to end.
    pub fn content_size(&self) -> f32 {
        window::total_content_size(self.space.len(), self.config.step())
    }

    /// Rendered slice for the committed viewport.
    pub fn window(&self) -> Option<VirtualWindow> {
        let state = self.tracker.state();
        window::compute_window(
            self.space.len(),
            self.config.step(),
            state.width,
            state.scroll_offset,
            self.config.buffer_items,
        )
    }

    pub fn metrics(&self) -> StripMetrics {
        StripMetrics {
            step: self.config.step(),
            card_width: self.config.card_width,
            viewport_width: self.tracker.state().width,
            item_count: self.space.len(),
        }
    }

    /// Index of the card centered by the last settle or `center_on`.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_item(&self) -> Option<ChapterNumber> {
        self.active_index.and_then(|i| self.space.item(i))
    }

    /// Index the running snap is heading for.
    pub fn snap_target(&self) -> Option<usize> {
        self.snap_index.filter(|_| self.animator.is_snapping())
    }

    /// Index nearest the viewport center right now.
    pub fn nearest_index(&self) -> Option<usize> {
        let offset = self.container.as_ref()?.offset();
        self.nearest_index_at(offset)
    }

    fn nearest_index_at(&self, offset: f32) -> Option<usize> {
        window::nearest_index(
            offset,
            self.config.step(),
            self.config.card_width,
            self.viewport().width,
            self.space.len(),
        )
    }

    /// Returns true once a pointer press has turned into a drag.
    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(DragSession::is_dragging)
    }

    pub fn is_snapping(&self) -> bool {
        self.animator.is_snapping()
    }

    /// Consumes the pending click suppression.
    ///
    /// Hosts call this when a card click arrives; `true` means the click
    /// ended a drag and must be swallowed.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }

    // ===== Input =====

    pub fn resize(&mut self, width: f32) {
        self.tracker.on_resize(width);
    }

    /// The container scrolled on its own (scrollbar, keyboard, platform inertia).
    pub fn on_native_scroll(&mut self, now: Instant) {
        if self.container.is_none() {
            return;
        }
        let echo = self.animator.is_snapping();
        self.tracker.on_scroll_event(now, echo);
    }

    pub fn pointer_down(&mut self, pointer: PointerDown, now: Instant) {
        let Some(container) = self.container.as_ref() else {
            return;
        };
        let start_offset = container.offset();
        let start_index = self.nearest_index_at(start_offset).unwrap_or(0);

        let Some(session) =
            DragSession::begin(pointer, now, start_offset, start_index, &self.config.gesture)
        else {
            return;
        };

        // Interrupting a snap re-arms settle.
        if self.animator.is_snapping() {
            self.tracker.arm_settle(now);
        }
        self.animator.cancel();
        self.snap_index = None;
        self.suppress_click = false;
        self.drag = Some(session);
    }

    pub fn pointer_move(&mut self, x: f32, now: Instant) {
        let (Some(container), Some(drag)) = (self.container.as_mut(), self.drag.as_mut()) else {
            return;
        };
        if let Some(delta) = drag.on_move(x, now) {
            let offset = container.offset();
            container.set_offset(offset + delta);
            self.tracker.on_scroll_event(now, false);
        }
    }

    /// Ends the gesture and starts the release snap, if any.
    pub fn pointer_up(&mut self, now: Instant) -> PointerRelease {
        let Some(drag) = self.drag.take() else {
            return PointerRelease::Ignored;
        };
        let Some(container) = self.container.as_ref() else {
            return PointerRelease::Ignored;
        };

        match drag.release(now, container.offset(), self.metrics()) {
            Release::Click => PointerRelease::Click,
            Release::Snap {
                target_index,
                kind,
                suppress_click,
            } => {
                self.suppress_click = suppress_click;
                let duration = self.config.snap.release_duration();
                self.start_snap(target_index, now, duration);
                PointerRelease::Snap { target_index, kind }
            }
        }
    }

    /// Abandons the gesture. A real drag settles on the nearest card.
    pub fn pointer_cancel(&mut self, now: Instant) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if drag.is_dragging() {
            if let Some(index) = self.nearest_index() {
                let duration = self.config.snap.release_duration();
                self.start_snap(index, now, duration);
            }
        }
    }

    /// Handles a wheel event. Returns true when it was consumed.
    pub fn wheel(&mut self, input: WheelInput, now: Instant) -> bool {
        let viewport_width = self.viewport().width;
        let Some(container) = self.container.as_mut() else {
            return false;
        };
        let (dx, dy) = input.to_pixels(&self.config.wheel, viewport_width);
        let Some(delta) = redirect_wheel(dx, dy, input.modifiers) else {
            return false;
        };

        self.animator.cancel();
        self.snap_index = None;
        let offset = container.offset();
        container.set_offset(offset + delta);
        self.tracker.on_scroll_event(now, false);
        self.wheel_fast_until = Some(now + self.config.wheel.fast_window());
        true
    }

    /// Reports a card click. Returns the activated item unless the click
    /// ended a drag.
    pub fn activate(&mut self, index: usize) -> Option<ChapterNumber> {
        if self.take_click_suppression() {
            return None;
        }
        let number = self.space.item(index)?;
        self.publish(NavigatorEvent::ItemActivated { index, number });
        Some(number)
    }

    // ===== Commands =====

    /// Centers `number` (or the nearest following item) without animating.
    pub fn center_on(&mut self, number: ChapterNumber) -> Option<usize> {
        let index = self.space.nearest_index_of(number)?;
        let target = self.centered_offset(index)?;
        let container = self.container.as_mut()?;

        self.animator.cancel();
        self.snap_index = None;
        container.set_offset(target);
        let offset = container.offset();
        self.tracker.commit_now(offset);
        self.tracker.cancel_settle();
        self.active_index = Some(index);
        Some(index)
    }

    /// Animates to `index`, clamped into the strip.
    pub fn snap_to_index(&mut self, index: usize, now: Instant) {
        let duration = self.config.snap.settle_duration();
        self.start_snap(index, now, duration);
    }

    /// Animates to the first item of section `section`.
    pub fn jump_to_section(&mut self, section: usize, now: Instant) -> bool {
        match self.space.first_index_of_section(section) {
            Some(index) => {
                self.snap_to_index(index, now);
                true
            }
            None => false,
        }
    }

    fn centered_offset(&self, index: usize) -> Option<f32> {
        let container = self.container.as_ref()?;
        let raw = window::centered_offset(
            index,
            self.config.step(),
            self.config.card_width,
            container.viewport_size(),
        );
        Some(raw.clamp(0.0, container.max_offset()))
    }

    fn start_snap(&mut self, index: usize, now: Instant, duration: std::time::Duration) {
        if self.space.is_empty() {
            return;
        }
        let index = index.min(self.space.len() - 1);
        let (Some(to), Some(container)) = (self.centered_offset(index), self.container.as_ref())
        else {
            return;
        };
        let from = container.offset();

        self.animator.start(from, to, now, duration);
        self.tracker.cancel_settle();
        self.snap_index = Some(index);
        if let Some(number) = self.space.item(index) {
            self.publish(NavigatorEvent::SnapStarted { index, number });
        }
    }

    // ===== Frame =====

    /// Advances animation, commits and settle logic to `now`.
    pub fn frame(&mut self, now: Instant) -> FrameReport {
        let mut report = FrameReport::default();

        if self.animator.is_snapping() {
            self.step_animation(now, &mut report);
        }

        if let Some(container) = self.container.as_ref() {
            if self.tracker.take_pending_commit(container.offset()) {
                report.committed = true;
            }
        }

        if self.wheel_fast_until.is_some_and(|until| now >= until) {
            self.wheel_fast_until = None;
        }

        let drag_active = self.drag.is_some();
        let wheel_fast = self.wheel_fast_until.is_some();
        if self
            .tracker
            .poll_settle(now, drag_active, self.animator.is_snapping(), wheel_fast)
        {
            if let Some(index) = self.nearest_index() {
                log::debug!("scroll settled, snapping to {}", index);
                self.snap_to_index(index, now);
                report.settle_started = true;
            }
        }

        report.needs_frame = self.animator.is_snapping()
            || self.tracker.has_pending_commit()
            || self.tracker.settle_armed()
            || self.wheel_fast_until.is_some();
        report
    }

    fn step_animation(&mut self, now: Instant, report: &mut FrameReport) {
        let Some(container) = self.container.as_mut() else {
            log::debug!("container detached mid-snap, aborting animation");
            self.animator.cancel();
            self.snap_index = None;
            return;
        };
        let Some(frame) = self.animator.step(now) else {
            return;
        };

        container.set_offset(frame.offset);
        if !frame.finished {
            self.tracker.on_scroll_event(now, true);
            return;
        }

        let offset = container.offset();
        self.tracker.commit_now(offset);
        report.committed = true;
        report.settled = true;

        if let Some(index) = self.snap_index.take() {
            self.active_index = Some(index);
            if let Some(number) = self.space.item(index) {
                self.publish(NavigatorEvent::Settled { index, number });
            }
        }
    }

    fn publish(&self, event: NavigatorEvent) {
        if let Some(events) = &self.events {
            events.publish(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_pane::ScrollPane;
    use crate::wheel::Modifiers;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn navigator(count: usize) -> Navigator<ScrollPane> {
        let config = NavigatorConfig::chapters();
        let space = IndexSpace::build(None, Some(count), config.chunk_size);
        let mut nav = Navigator::new(config, space);
        let content = nav.content_size();
        nav.attach(ScrollPane::new(400.0, content));
        nav
    }

    fn offset(nav: &Navigator<ScrollPane>) -> f32 {
        nav.container().map(|c| c.offset()).unwrap_or_default()
    }

    /// Runs frames at 16 ms intervals until idle; returns the final time.
    fn settle(nav: &mut Navigator<ScrollPane>, mut now: Instant) -> Instant {
        for _ in 0..200 {
            now += ms(16);
            if !nav.frame(now).needs_frame {
                break;
            }
        }
        now
    }

    #[test]
    fn test_handlers_without_container_are_noops() {
        let config = NavigatorConfig::chapters();
        let mut nav: Navigator<ScrollPane> =
            Navigator::new(config, IndexSpace::build(None, Some(50), 25));
        let now = Instant::now();
        nav.pointer_down(PointerDown::mouse(100.0), now);
        nav.pointer_move(20.0, now + ms(10));
        assert_eq!(nav.pointer_up(now + ms(20)), PointerRelease::Ignored);
        assert!(!nav.wheel(WheelInput::pixels(0.0, 100.0), now));
        assert!(nav.center_on(ChapterNumber::whole(4).unwrap()).is_none());
        nav.snap_to_index(3, now);
        assert!(!nav.is_snapping());
        assert!(!nav.frame(now).committed);
    }

    #[test]
    fn test_center_on_commits_without_animation() {
        let mut nav = navigator(100);
        let index = nav.center_on(ChapterNumber::whole(11).unwrap());
        assert_eq!(index, Some(10));
        assert_eq!(offset(&nav), 10.0 * 132.0 + 60.0 - 200.0);
        assert_eq!(nav.viewport().scroll_offset, offset(&nav));
        assert_eq!(nav.active_item(), ChapterNumber::whole(11));
        assert!(!nav.is_snapping());
    }

    #[test]
    fn test_flick_releases_to_next_item_and_settles() {
        let mut nav = navigator(100);
        nav.center_on(ChapterNumber::whole(6).unwrap());
        let t0 = Instant::now();

        nav.pointer_down(PointerDown::mouse(500.0), t0);
        nav.pointer_move(440.0, t0 + ms(30));
        assert!(nav.is_dragging());
        let release = nav.pointer_up(t0 + ms(30));
        assert_eq!(
            release,
            PointerRelease::Snap {
                target_index: 6,
                kind: ReleaseKind::Flick,
            }
        );
        assert!(nav.is_snapping());
        assert_eq!(nav.snap_target(), Some(6));

        settle(&mut nav, t0 + ms(30));
        assert_eq!(offset(&nav), 6.0 * 132.0 + 60.0 - 200.0);
        assert_eq!(nav.active_index(), Some(6));
        assert!(nav.take_click_suppression());
        assert!(!nav.take_click_suppression());
    }

    #[test]
    fn test_pointer_down_cancels_snap() {
        let mut nav = navigator(100);
        let t0 = Instant::now();
        nav.snap_to_index(20, t0);
        nav.frame(t0 + ms(16));
        assert!(nav.is_snapping());

        nav.pointer_down(PointerDown::touch(200.0), t0 + ms(32));
        assert!(!nav.is_snapping());
        assert_eq!(nav.snap_target(), None);
    }

    #[test]
    fn test_tap_during_snap_still_settles_on_a_card() {
        let mut nav = navigator(100);
        let t0 = Instant::now();
        nav.snap_to_index(20, t0);
        nav.frame(t0 + ms(16));
        nav.frame(t0 + ms(32));

        nav.pointer_down(PointerDown::touch(200.0), t0 + ms(40));
        assert_eq!(nav.pointer_up(t0 + ms(60)), PointerRelease::Click);
        assert!(nav.frame(t0 + ms(70)).needs_frame);

        settle(&mut nav, t0 + ms(70));
        assert!(!nav.is_snapping());
        let index = nav.nearest_index().unwrap();
        let centered = index as f32 * 132.0 + 60.0 - 200.0;
        assert!((offset(&nav) - centered).abs() < 0.5);
        assert_eq!(nav.active_index(), Some(index));
    }

    #[test]
    fn test_click_passes_through() {
        let mut nav = navigator(100);
        let t0 = Instant::now();
        nav.pointer_down(PointerDown::mouse(100.0), t0);
        nav.pointer_move(103.0, t0 + ms(10));
        assert_eq!(nav.pointer_up(t0 + ms(20)), PointerRelease::Click);
        assert!(!nav.is_snapping());
        assert_eq!(nav.activate(2), ChapterNumber::whole(3));
    }

    #[test]
    fn test_wheel_scrolls_then_settles_after_fast_window() {
        let mut nav = navigator(100);
        let t0 = Instant::now();
        assert!(nav.wheel(WheelInput::pixels(0.0, 300.0), t0));
        assert_eq!(offset(&nav), 300.0);

        // Settle delay has passed but the fast-wheel window has not.
        let report = nav.frame(t0 + ms(150));
        assert!(report.committed);
        assert!(!report.settle_started);

        let report = nav.frame(t0 + ms(171));
        assert!(report.settle_started);
        assert!(nav.is_snapping());

        settle(&mut nav, t0 + ms(171));
        // (300 + 200 - 60) / 132 = 3.33
        assert_eq!(nav.active_index(), Some(3));
    }

    #[test]
    fn test_wheel_with_modifier_is_left_alone() {
        let mut nav = navigator(100);
        let input = WheelInput {
            delta_y: 120.0,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
            ..WheelInput::default()
        };
        assert!(!nav.wheel(input, Instant::now()));
        assert_eq!(offset(&nav), 0.0);
    }

    #[test]
    fn test_wheel_cancels_running_snap() {
        let mut nav = navigator(100);
        let t0 = Instant::now();
        nav.snap_to_index(30, t0);
        assert!(nav.is_snapping());
        nav.wheel(WheelInput::pixels(0.0, 40.0), t0 + ms(10));
        assert!(!nav.is_snapping());
    }

    #[test]
    fn test_settle_never_fires_during_drag() {
        let mut nav = navigator(100);
        let t0 = Instant::now();
        nav.pointer_down(PointerDown::mouse(500.0), t0);
        nav.pointer_move(400.0, t0 + ms(20));
        let report = nav.frame(t0 + ms(500));
        assert!(!report.settle_started);
        assert!(!nav.is_snapping());
    }

    #[test]
    fn test_snap_echoes_do_not_retrigger_settle() {
        let mut nav = navigator(100);
        let t0 = Instant::now();
        nav.snap_to_index(10, t0);
        let mut now = t0;
        let mut settles = 0;
        for _ in 0..60 {
            now += ms(16);
            if nav.is_snapping() {
                nav.on_native_scroll(now);
            }
            let report = nav.frame(now);
            if report.settle_started {
                settles += 1;
            }
        }
        assert_eq!(settles, 0);
        assert_eq!(nav.active_index(), Some(10));
    }

    #[test]
    fn test_detach_mid_snap_aborts() {
        let mut nav = navigator(100);
        let t0 = Instant::now();
        nav.snap_to_index(10, t0);
        let pane = nav.detach();
        assert!(pane.is_some());
        nav.frame(t0 + ms(16));
        assert!(!nav.is_snapping());
    }

    #[test]
    fn test_jump_to_section_and_events() {
        let events = Observable::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = events.subscribe(move |event: &NavigatorEvent| {
            sink.lock().unwrap().push(event.clone());
        });

        let config = NavigatorConfig::chapters();
        let space = IndexSpace::build(None, Some(100), 25);
        let mut nav = Navigator::new(config, space).with_events(events);
        let content = nav.content_size();
        nav.attach(ScrollPane::new(400.0, content));

        let t0 = Instant::now();
        assert!(nav.jump_to_section(2, t0));
        assert!(!nav.jump_to_section(9, t0));
        settle(&mut nav, t0);

        let seen = seen.lock().unwrap();
        let fifty_one = ChapterNumber::whole(51).unwrap();
        assert_eq!(
            seen.as_slice(),
            &[
                NavigatorEvent::SnapStarted { index: 50, number: fifty_one },
                NavigatorEvent::Settled { index: 50, number: fifty_one },
            ]
        );
    }

    #[test]
    fn test_set_space_resets_state() {
        let mut nav = navigator(100);
        let t0 = Instant::now();
        nav.center_on(ChapterNumber::whole(40).unwrap());
        nav.snap_to_index(50, t0);
        nav.set_space(IndexSpace::build(None, Some(10), 25));
        assert!(!nav.is_snapping());
        assert_eq!(nav.active_index(), None);
        assert_eq!(offset(&nav), 0.0);
        assert_eq!(nav.space().len(), 10);
    }

    #[test]
    fn test_window_tracks_committed_offset() {
        let mut nav = navigator(100);
        let t0 = Instant::now();
        nav.frame(t0);
        assert_eq!(nav.window().map(|w| (w.start_index, w.leading_spacer)), Some((0, 0.0)));

        nav.wheel(WheelInput::pixels(0.0, 50.0 * 132.0), t0);
        // Not committed until the next frame.
        assert_eq!(nav.window().map(|w| w.start_index), Some(0));
        nav.frame(t0 + ms(16));
        assert_eq!(nav.window().map(|w| w.start_index), Some(38));
    }
}
