//! Text measurement helpers for card labels.

use eframe::egui;

const ELLIPSIS: &str = "…";

fn text_width(painter: &egui::Painter, text: &str, font_id: &egui::FontId) -> f32 {
    painter
        .layout_no_wrap(text.to_string(), font_id.clone(), egui::Color32::WHITE)
        .size()
        .x
}

/// Shortens `text` with a trailing ellipsis until it fits `max_width`.
///
/// Returns an empty string when not even the ellipsis fits.
pub fn fit_text(text: &str, max_width: f32, font_id: &egui::FontId, painter: &egui::Painter) -> String {
    if max_width <= 0.0 {
        return String::new();
    }
    if text_width(painter, text, font_id) <= max_width {
        return text.to_string();
    }
    if text_width(painter, ELLIPSIS, font_id) > max_width {
        return String::new();
    }

    // Longest prefix (in chars) that fits together with the ellipsis
    let chars: Vec<char> = text.chars().collect();
    let (mut fits, mut too_long) = (0, chars.len());
    while too_long - fits > 1 {
        let mid = (fits + too_long) / 2;
        let mut candidate: String = chars[..mid].iter().collect();
        candidate.push_str(ELLIPSIS);
        if text_width(painter, &candidate, font_id) <= max_width {
            fits = mid;
        } else {
            too_long = mid;
        }
    }

    let prefix: String = chars[..fits].iter().collect();
    let mut result = prefix.trim_end().to_string();
    result.push_str(ELLIPSIS);
    result
}
