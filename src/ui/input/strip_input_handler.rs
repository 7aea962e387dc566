//! Strip input handling for drags, flicks, wheel scrolling and clicks.
//!
//! Raw egui pointer and wheel input is translated into navigator calls:
//! - Pointer press inside the cards starts a drag session
//! - Pointer motion scrolls 1:1 while the button is held, even outside the strip
//! - Release classifies the gesture; a release over a card reports a click,
//!   which the navigator swallows if it ended a drag
//! - Wheel events are redirected onto the horizontal axis
//! - Left/Right arrows step one card while the strip is hovered

use chapnav::{
    Modifiers, Navigator, PointerButton, PointerDown, PointerKind, PointerRelease, ScrollPane,
    Scrollable, WheelInput, WheelUnit,
};
use eframe::egui;
use std::time::Instant;

/// Result of strip input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripInputResult {
    /// No interaction occurred
    None,
    /// The strip scrolled (drag, wheel or keyboard)
    Scrolled,
    /// A press was released over card `index`
    CardClicked(usize),
}

/// Snapshot of the input this frame needs; taken in one `ctx.input` call.
struct FrameInput {
    press: Option<(PointerButton, egui::Pos2)>,
    released: bool,
    any_down: bool,
    latest_pos: Option<egui::Pos2>,
    hover_pos: Option<egui::Pos2>,
    touching: bool,
    wheel: Vec<WheelInput>,
    step_left: bool,
    step_right: bool,
}

fn read_input(i: &egui::InputState) -> FrameInput {
    let button = if i.pointer.button_pressed(egui::PointerButton::Primary) {
        Some(PointerButton::Primary)
    } else if i.pointer.button_pressed(egui::PointerButton::Secondary) {
        Some(PointerButton::Secondary)
    } else if i.pointer.button_pressed(egui::PointerButton::Middle) {
        Some(PointerButton::Middle)
    } else {
        None
    };

    let wheel = i
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::MouseWheel {
                unit,
                delta,
                modifiers,
                ..
            } => Some(wheel_input(*unit, *delta, *modifiers)),
            _ => None,
        })
        .collect();

    FrameInput {
        press: button.zip(i.pointer.press_origin()),
        released: i.pointer.any_released(),
        any_down: i.pointer.any_down(),
        latest_pos: i.pointer.latest_pos(),
        hover_pos: i.pointer.hover_pos(),
        touching: i.any_touches(),
        wheel,
        step_left: i.key_pressed(egui::Key::ArrowLeft),
        step_right: i.key_pressed(egui::Key::ArrowRight),
    }
}

/// Converts an egui wheel event to the navigator's convention, where a
/// positive delta scrolls towards later items. egui reports the opposite.
fn wheel_input(unit: egui::MouseWheelUnit, delta: egui::Vec2, modifiers: egui::Modifiers) -> WheelInput {
    let unit = match unit {
        egui::MouseWheelUnit::Point => WheelUnit::Pixel,
        egui::MouseWheelUnit::Line => WheelUnit::Line,
        egui::MouseWheelUnit::Page => WheelUnit::Page,
    };
    WheelInput {
        delta_x: -delta.x,
        delta_y: -delta.y,
        unit,
        modifiers: Modifiers {
            shift: modifiers.shift,
            ctrl: modifiers.ctrl,
            alt: modifiers.alt,
            command: modifiers.mac_cmd,
        },
    }
}

/// Index of the card under `pos`, ignoring the gaps between cards.
pub fn card_at(navigator: &Navigator<ScrollPane>, cards_rect: egui::Rect, pos: egui::Pos2) -> Option<usize> {
    if !cards_rect.contains(pos) {
        return None;
    }
    let offset = navigator.container()?.offset();
    let config = navigator.config();
    let content_x = offset + (pos.x - cards_rect.left());
    if content_x < 0.0 {
        return None;
    }

    let index = (content_x / config.step()).floor() as usize;
    let within = content_x - index as f32 * config.step();
    (index < navigator.space().len() && within <= config.card_width).then_some(index)
}

/// Handles all strip input for this frame.
///
/// # Arguments
/// * `ctx` - The egui context for input access
/// * `cards_rect` - Area where cards are painted
/// * `navigator` - The strip navigator (mutable)
/// * `hovered_index` - Card under the pointer (mutable)
/// * `now` - Frame timestamp
pub fn handle_strip_input(
    ctx: &egui::Context,
    cards_rect: egui::Rect,
    navigator: &mut Navigator<ScrollPane>,
    hovered_index: &mut Option<usize>,
    now: Instant,
) -> StripInputResult {
    let input = ctx.input(read_input);
    let mut result = StripInputResult::None;

    if let Some((button, origin)) = input.press {
        if cards_rect.contains(origin) {
            let kind = if input.touching {
                PointerKind::Touch
            } else {
                PointerKind::Mouse
            };
            navigator.pointer_down(
                PointerDown {
                    kind,
                    button,
                    x: origin.x,
                },
                now,
            );
        }
    }

    if let Some(pos) = input.latest_pos {
        let was_dragging = navigator.is_dragging();
        navigator.pointer_move(pos.x, now);
        if was_dragging || navigator.is_dragging() {
            result = StripInputResult::Scrolled;
        }
    }

    if input.released {
        let release = navigator.pointer_up(now);
        if release != PointerRelease::Ignored {
            if let Some(index) = input.latest_pos.and_then(|pos| card_at(navigator, cards_rect, pos)) {
                result = StripInputResult::CardClicked(index);
            }
        }
    } else if !input.any_down && navigator.is_dragging() {
        // Button went up without a release event (focus loss)
        navigator.pointer_cancel(now);
    }

    let hovering = input.hover_pos.is_some_and(|pos| cards_rect.contains(pos));
    if hovering {
        for wheel in &input.wheel {
            if navigator.wheel(*wheel, now) {
                result = StripInputResult::Scrolled;
            }
        }

        let step = match (input.step_left, input.step_right) {
            (true, false) => Some(-1),
            (false, true) => Some(1),
            _ => None,
        };
        if let (Some(step), Some(from)) = (step, navigator.snap_target().or(navigator.nearest_index())) {
            navigator.snap_to_index(from.saturating_add_signed(step), now);
            result = StripInputResult::Scrolled;
        }
    }

    *hovered_index = if navigator.is_dragging() {
        None
    } else {
        input.hover_pos.and_then(|pos| card_at(navigator, cards_rect, pos))
    };

    result
}
