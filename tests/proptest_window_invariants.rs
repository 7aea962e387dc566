use chapnav::window::{centered_offset, nearest_index};
use chapnav::compute_window;
use proptest::prelude::*;

proptest! {
    #[test]
    fn window_stays_inside_the_strip(
        item_count in 0usize..5000,
        step in 1u32..400,
        viewport in 0.0f32..4000.0,
        offset in 0.0f32..1_000_000.0,
        buffer in 0usize..32,
    ) {
        let window = compute_window(item_count, step as f32, viewport, offset, buffer);
        if item_count == 0 {
            prop_assert!(window.is_none());
        } else {
            let window = window.unwrap();
            prop_assert!(window.start_index <= window.end_index);
            prop_assert!(window.end_index <= item_count - 1);
        }
    }

    #[test]
    fn spacers_and_cards_fill_the_content(
        item_count in 1usize..5000,
        step in 1u32..400,
        viewport in 0.0f32..4000.0,
        offset in 0.0f32..1_000_000.0,
        buffer in 0usize..32,
    ) {
        let step = step as f32;
        let window = compute_window(item_count, step, viewport, offset, buffer).unwrap();
        let total = window.leading_spacer + window.rendered_width(step) + window.trailing_spacer;
        prop_assert_eq!(total, item_count as f32 * step);
    }

    #[test]
    fn nearest_index_is_idempotent(
        item_count in 1usize..5000,
        step in 1u32..400,
        viewport in 0.0f32..4000.0,
        offset in 0.0f32..1_000_000.0,
    ) {
        let step = step as f32;
        let card = step * 0.9;
        let first = nearest_index(offset, step, card, viewport, item_count);
        for _ in 0..5 {
            prop_assert_eq!(nearest_index(offset, step, card, viewport, item_count), first);
        }
    }

    #[test]
    fn centered_card_is_its_own_nearest(
        item_count in 1usize..5000,
        step in 8u32..400,
        viewport in 0.0f32..4000.0,
        pick in any::<prop::sample::Index>(),
    ) {
        let step = step as f32;
        let card = step - 4.0;
        let index = pick.index(item_count);
        let offset = centered_offset(index, step, card, viewport);
        prop_assert_eq!(nearest_index(offset, step, card, viewport, item_count), Some(index));
    }
}
