//! Mouse wheel redirection for horizontal strips.

use crate::config::WheelConfig;

/// Unit of a wheel delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelUnit {
    #[default]
    Pixel,
    Line,
    /// One unit is a full viewport width
    Page,
}

/// Modifier keys held during a wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub command: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        command: false,
    };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.command
    }
}

/// A raw wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelInput {
    pub delta_x: f32,
    pub delta_y: f32,
    pub unit: WheelUnit,
    pub modifiers: Modifiers,
}

impl WheelInput {
    /// Pixel wheel event without modifiers.
    pub fn pixels(delta_x: f32, delta_y: f32) -> Self {
        Self {
            delta_x,
            delta_y,
            ..Self::default()
        }
    }

    /// Converts the deltas to pixels.
    pub fn to_pixels(&self, config: &WheelConfig, viewport_width: f32) -> (f32, f32) {
        let scale = match self.unit {
            WheelUnit::Pixel => 1.0,
            WheelUnit::Line => config.line_height_px,
            WheelUnit::Page => viewport_width.max(1.0),
        };
        (self.delta_x * scale, self.delta_y * scale)
    }
}

/// Maps a wheel delta onto the horizontal axis.
///
/// Predominantly vertical deltas without a modifier become horizontal
/// scroll; horizontal deltas pass through. Returns `None` when the event
/// should be left to the page (vertical with a modifier, or no movement).
pub fn redirect_wheel(delta_x: f32, delta_y: f32, modifiers: Modifiers) -> Option<f32> {
    if delta_x.abs() >= delta_y.abs() {
        return (delta_x != 0.0).then_some(delta_x);
    }
    if modifiers.any() {
        return None;
    }
    Some(delta_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_wheel_becomes_horizontal() {
        assert_eq!(redirect_wheel(0.0, 120.0, Modifiers::NONE), Some(120.0));
        assert_eq!(redirect_wheel(5.0, -80.0, Modifiers::NONE), Some(-80.0));
    }

    #[test]
    fn test_horizontal_wheel_passes_through() {
        assert_eq!(redirect_wheel(-40.0, 10.0, Modifiers::NONE), Some(-40.0));
        let shift = Modifiers {
            shift: true,
            ..Modifiers::NONE
        };
        assert_eq!(redirect_wheel(30.0, 0.0, shift), Some(30.0));
    }

    #[test]
    fn test_vertical_with_modifier_is_not_consumed() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(redirect_wheel(0.0, 120.0, ctrl), None);
        assert_eq!(redirect_wheel(0.0, 0.0, Modifiers::NONE), None);
    }

    #[test]
    fn test_line_deltas_scale_to_pixels() {
        let input = WheelInput {
            delta_y: 3.0,
            unit: WheelUnit::Line,
            ..WheelInput::default()
        };
        assert_eq!(input.to_pixels(&WheelConfig::default(), 400.0), (0.0, 120.0));

        let page = WheelInput {
            delta_x: 1.0,
            unit: WheelUnit::Page,
            ..WheelInput::default()
        };
        assert_eq!(page.to_pixels(&WheelConfig::default(), 400.0), (400.0, 0.0));
    }
}
