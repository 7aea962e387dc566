//! Color mapping for cards and progress rings.
//!
//! Card colors depend on the reader's log status for the item and on its
//! interaction state; ring colors on section completion.

use chapnav::{mix, LogStatus, SectionProgress, StripPalette};
use egui::Color32;

/// Interaction state of a card this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardState {
    pub active: bool,
    pub hovered: bool,
    /// The running snap is heading for this card
    pub snap_target: bool,
}

/// Fill color for a card.
pub fn card_fill(status: Option<LogStatus>, state: CardState, palette: &StripPalette) -> Color32 {
    let base = match status {
        Some(LogStatus::Completed) => palette.card_read,
        Some(LogStatus::InProgress) => palette.card_in_progress,
        Some(LogStatus::Planned) | None => palette.card,
    };

    if state.active {
        mix(base, palette.card_active, 0.6)
    } else if state.hovered {
        mix(base, palette.card_hover, 0.5)
    } else {
        base
    }
}

/// Border color for a card, if it gets one.
pub fn card_border(state: CardState, palette: &StripPalette) -> Option<Color32> {
    if state.active {
        Some(palette.accent)
    } else if state.snap_target {
        Some(mix(palette.accent, palette.border, 0.5))
    } else if state.hovered {
        Some(palette.border)
    } else {
        None
    }
}

/// Text color on a card; completed items are dimmed.
pub fn card_text(status: Option<LogStatus>, palette: &StripPalette) -> Color32 {
    match status {
        Some(LogStatus::Completed) => palette.text_dim,
        _ => palette.text,
    }
}

/// Fill color for a section ring.
pub fn ring_fill(progress: &SectionProgress, palette: &StripPalette) -> Color32 {
    if progress.is_complete() {
        palette.ring_complete
    } else {
        palette.ring_fill
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chapnav::ThemeManager;

    fn palette() -> StripPalette {
        ThemeManager::new().theme_or_default("Dark").palette.clone()
    }

    #[test]
    fn test_status_picks_base_color() {
        let p = palette();
        let idle = CardState::default();
        assert_eq!(card_fill(None, idle, &p), p.card);
        assert_eq!(card_fill(Some(LogStatus::Completed), idle, &p), p.card_read);
        assert_eq!(card_fill(Some(LogStatus::InProgress), idle, &p), p.card_in_progress);
    }

    #[test]
    fn test_active_card_gets_accent_border() {
        let p = palette();
        let active = CardState {
            active: true,
            ..CardState::default()
        };
        assert_eq!(card_border(active, &p), Some(p.accent));
        assert_eq!(card_border(CardState::default(), &p), None);
    }

    #[test]
    fn test_complete_ring_color() {
        let p = palette();
        let done = SectionProgress { completed: 4, total: 4 };
        let partial = SectionProgress { completed: 1, total: 4 };
        assert_eq!(ring_fill(&done, &p), p.ring_complete);
        assert_eq!(ring_fill(&partial, &p), p.ring_fill);
    }
}
