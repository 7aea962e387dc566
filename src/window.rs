//! Virtualization window for fixed-step horizontal strips.
//!
//! Maps a scroll offset and viewport width to the contiguous range of item
//! indices worth materializing, plus the spacer sizes that stand in for the
//! unrendered items so the total scrollable width stays constant.
//!
//! These functions are stateless and can be tested independently.

use std::ops::RangeInclusive;

/// Default number of items rendered past each viewport edge.
pub const DEFAULT_BUFFER_ITEMS: usize = 12;

/// The rendered slice of a strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualWindow {
    /// First rendered index (inclusive)
    pub start_index: usize,
    /// Last rendered index (inclusive)
    pub end_index: usize,
    /// Width standing in for items before `start_index`
    pub leading_spacer: f32,
    /// Width standing in for items after `end_index`
    pub trailing_spacer: f32,
}

impl VirtualWindow {
    /// Number of rendered items.
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }

    /// Width occupied by the rendered items.
    pub fn rendered_width(&self, step: f32) -> f32 {
        self.len() as f32 * step
    }
}

/// Computes the window for the given strip geometry.
///
/// # Arguments
/// * `item_count` - Total number of items in the strip
/// * `step` - Card width plus gap, in pixels
/// * `viewport_width` - Visible width of the strip
/// * `scroll_offset` - Current horizontal scroll offset
/// * `buffer` - Items to render past each edge of the viewport
///
/// # Returns
/// `None` for an empty strip, otherwise a window with
/// `start_index <= end_index <= item_count - 1`.
pub fn compute_window(
    item_count: usize,
    step: f32,
    viewport_width: f32,
    scroll_offset: f32,
    buffer: usize,
) -> Option<VirtualWindow> {
    if item_count == 0 {
        return None;
    }

    let step = sanitize_step(step);
    let offset = scroll_offset.max(0.0);
    let width = viewport_width.max(0.0);
    let max_index = (item_count - 1) as f64;
    let buffer = buffer as f64;

    let approx_start = (f64::from(offset) / f64::from(step)).floor() - buffer;
    let approx_end = (f64::from(offset + width) / f64::from(step)).ceil() + buffer;

    let start_index = approx_start.clamp(0.0, max_index) as usize;
    let end_index = (approx_end.clamp(0.0, max_index) as usize).max(start_index);

    Some(VirtualWindow {
        start_index,
        end_index,
        leading_spacer: start_index as f32 * step,
        trailing_spacer: (item_count - 1 - end_index) as f32 * step,
    })
}

/// Total width of the strip content.
pub fn total_content_size(item_count: usize, step: f32) -> f32 {
    item_count as f32 * sanitize_step(step)
}

/// Offset that centers `index` under the viewport. Not clamped; the
/// scroll container applies its own bounds.
pub fn centered_offset(index: usize, step: f32, card_width: f32, viewport_width: f32) -> f32 {
    index as f32 * sanitize_step(step) + card_width / 2.0 - viewport_width / 2.0
}

/// Index whose card center is closest to the viewport center.
///
/// Inverse of [`centered_offset`]; returns `None` for an empty strip.
pub fn nearest_index(
    scroll_offset: f32,
    step: f32,
    card_width: f32,
    viewport_width: f32,
    item_count: usize,
) -> Option<usize> {
    if item_count == 0 {
        return None;
    }
    let raw = (scroll_offset + viewport_width / 2.0 - card_width / 2.0) / sanitize_step(step);
    Some(raw.round().clamp(0.0, (item_count - 1) as f32) as usize)
}

/// Guards the divisions above against zero or negative steps.
fn sanitize_step(step: f32) -> f32 {
    if step.is_finite() && step >= 1.0 {
        step
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strip_has_no_window() {
        assert!(compute_window(0, 132.0, 400.0, 0.0, 10).is_none());
        assert!(nearest_index(0.0, 132.0, 120.0, 400.0, 0).is_none());
    }

    #[test]
    fn test_window_at_origin() {
        let w = compute_window(100, 132.0, 400.0, 0.0, 10).unwrap();
        assert_eq!(w.start_index, 0);
        assert_eq!(w.end_index, 14);
        assert_eq!(w.leading_spacer, 0.0);
        assert!(w.contains(13));
    }

    #[test]
    fn test_window_mid_strip_keeps_buffer() {
        let w = compute_window(100, 132.0, 400.0, 50.0 * 132.0, 10).unwrap();
        assert_eq!(w.start_index, 40);
        assert_eq!(w.end_index, 64);
        assert_eq!(w.leading_spacer, 40.0 * 132.0);
        assert_eq!(w.trailing_spacer, 35.0 * 132.0);
    }

    #[test]
    fn test_spacers_conserve_content_size() {
        let step = 132.0;
        for offset in [0.0, 10.0, 1000.0, 12_000.0, 1.0e6] {
            let w = compute_window(100, step, 400.0, offset, 12).unwrap();
            let total = w.leading_spacer + w.rendered_width(step) + w.trailing_spacer;
            assert_eq!(total, total_content_size(100, step));
        }
    }

    #[test]
    fn test_single_item_and_wide_viewport() {
        let w = compute_window(1, 132.0, 5000.0, 0.0, 10).unwrap();
        assert_eq!((w.start_index, w.end_index), (0, 0));
        assert_eq!(w.trailing_spacer, 0.0);

        let w = compute_window(5, 132.0, 5000.0, 0.0, 0).unwrap();
        assert_eq!((w.start_index, w.end_index), (0, 4));
    }

    #[test]
    fn test_offset_past_content_clamps() {
        let w = compute_window(10, 100.0, 300.0, 99_999.0, 2).unwrap();
        assert_eq!((w.start_index, w.end_index), (9, 9));
    }

    #[test]
    fn test_centered_offset_round_trips_nearest_index() {
        for index in [0usize, 1, 7, 49] {
            let offset = centered_offset(index, 132.0, 120.0, 400.0);
            assert_eq!(nearest_index(offset, 132.0, 120.0, 400.0, 50), Some(index));
        }
    }

    #[test]
    fn test_nearest_index_is_stable() {
        let first = nearest_index(777.0, 132.0, 120.0, 400.0, 100);
        for _ in 0..10 {
            assert_eq!(nearest_index(777.0, 132.0, 120.0, 400.0, 100), first);
        }
    }

    #[test]
    fn test_degenerate_step_does_not_divide_by_zero() {
        let w = compute_window(10, 0.0, 5.0, 3.0, 0).unwrap();
        assert!(w.end_index <= 9);
    }
}
