//! Color themes for the strip viewer.
//!
//! Every theme carries one `StripPalette` covering the panels, the cards in
//! their reading states, and the section progress rings.
//!
//! # Examples
//!
//! ```
//! use chapnav::theme::ThemeManager;
//!
//! let manager = ThemeManager::new();
//! let paper = manager.get_theme("Paper").unwrap();
//! println!("Paper cards: {:?}", paper.palette.card);
//! ```

use egui::Color32;

/// Colors used by the strip viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct StripPalette {
    // Surfaces
    pub background: Color32,
    pub panel: Color32,
    pub border: Color32,

    // Text
    pub text: Color32,
    pub text_dim: Color32,

    // Cards
    pub card: Color32,
    pub card_hover: Color32,
    pub card_read: Color32,
    pub card_in_progress: Color32,
    pub card_active: Color32,

    // Progress rings
    pub ring_track: Color32,
    pub ring_fill: Color32,
    pub ring_complete: Color32,

    pub accent: Color32,
    pub error: Color32,
}

/// A named palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub dark: bool,
    pub palette: StripPalette,
}

/// Built-in themes, in menu order.
pub struct ThemeManager {
    themes: Vec<Theme>,
}

impl ThemeManager {
    pub fn new() -> Self {
        Self {
            themes: vec![dark_theme(), light_theme(), paper_theme(), midnight_theme()],
        }
    }

    /// Looks up a theme by name.
    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    /// Looks up a theme, falling back to the first built-in one.
    pub fn theme_or_default(&self, name: &str) -> &Theme {
        self.get_theme(name).unwrap_or(&self.themes[0])
    }

    pub fn list_themes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.themes.iter().map(|t| t.name)
    }

    /// Copies a theme's palette into egui visuals.
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let p = &theme.palette;

        visuals.panel_fill = p.panel;
        visuals.window_fill = p.panel;
        visuals.extreme_bg_color = p.background;
        visuals.faint_bg_color = p.card_hover;
        visuals.override_text_color = Some(p.text);

        visuals.selection.bg_fill = with_alpha(p.accent, 90);
        visuals.selection.stroke.color = p.accent;

        visuals.widgets.noninteractive.bg_fill = p.panel;
        visuals.widgets.inactive.bg_fill = p.card;
        visuals.widgets.hovered.bg_fill = p.card_hover;
        visuals.widgets.active.bg_fill = p.card_active;

        visuals.hyperlink_color = p.accent;
        visuals.error_fg_color = p.error;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn dark_theme() -> Theme {
    Theme {
        name: "Dark",
        dark: true,
        palette: StripPalette {
            background: Color32::from_rgb(22, 22, 24),
            panel: Color32::from_rgb(34, 34, 38),
            border: Color32::from_rgb(70, 70, 78),
            text: Color32::from_rgb(235, 235, 240),
            text_dim: Color32::from_rgb(150, 150, 160),
            card: Color32::from_rgb(48, 48, 56),
            card_hover: Color32::from_rgb(62, 62, 72),
            card_read: Color32::from_rgb(40, 72, 58),
            card_in_progress: Color32::from_rgb(84, 70, 36),
            card_active: Color32::from_rgb(52, 92, 150),
            ring_track: Color32::from_rgb(60, 60, 68),
            ring_fill: Color32::from_rgb(88, 166, 255),
            ring_complete: Color32::from_rgb(46, 204, 113),
            accent: Color32::from_rgb(88, 166, 255),
            error: Color32::from_rgb(231, 76, 60),
        },
    }
}

fn light_theme() -> Theme {
    Theme {
        name: "Light",
        dark: false,
        palette: StripPalette {
            background: Color32::from_rgb(255, 255, 255),
            panel: Color32::from_rgb(246, 246, 248),
            border: Color32::from_rgb(196, 196, 204),
            text: Color32::from_rgb(20, 20, 24),
            text_dim: Color32::from_rgb(110, 110, 120),
            card: Color32::from_rgb(228, 228, 234),
            card_hover: Color32::from_rgb(214, 214, 222),
            card_read: Color32::from_rgb(198, 232, 210),
            card_in_progress: Color32::from_rgb(246, 226, 176),
            card_active: Color32::from_rgb(160, 196, 250),
            ring_track: Color32::from_rgb(214, 214, 222),
            ring_fill: Color32::from_rgb(40, 100, 200),
            ring_complete: Color32::from_rgb(40, 160, 40),
            accent: Color32::from_rgb(40, 100, 200),
            error: Color32::from_rgb(200, 40, 40),
        },
    }
}

fn paper_theme() -> Theme {
    Theme {
        name: "Paper",
        dark: false,
        palette: StripPalette {
            background: hex_to_color32("#fbf6ec"),
            panel: hex_to_color32("#f3ebdc"),
            border: hex_to_color32("#c9b99a"),
            text: hex_to_color32("#3b3024"),
            text_dim: hex_to_color32("#8a7a62"),
            card: hex_to_color32("#e8dcc6"),
            card_hover: hex_to_color32("#dfd0b4"),
            card_read: hex_to_color32("#cfdcb4"),
            card_in_progress: hex_to_color32("#ecd29a"),
            card_active: hex_to_color32("#c89f6a"),
            ring_track: hex_to_color32("#dfd0b4"),
            ring_fill: hex_to_color32("#a0643c"),
            ring_complete: hex_to_color32("#6d8a3c"),
            accent: hex_to_color32("#a0643c"),
            error: hex_to_color32("#b03a2e"),
        },
    }
}

fn midnight_theme() -> Theme {
    Theme {
        name: "Midnight",
        dark: true,
        palette: StripPalette {
            background: hex_to_color32("#0d1117"),
            panel: hex_to_color32("#161b22"),
            border: hex_to_color32("#30363d"),
            text: hex_to_color32("#e6edf3"),
            text_dim: hex_to_color32("#7d8590"),
            card: hex_to_color32("#21262d"),
            card_hover: hex_to_color32("#2d333b"),
            card_read: hex_to_color32("#1b3a2a"),
            card_in_progress: hex_to_color32("#3d2f12"),
            card_active: hex_to_color32("#1f4f8f"),
            ring_track: hex_to_color32("#30363d"),
            ring_fill: hex_to_color32("#bd93f9"),
            ring_complete: hex_to_color32("#50fa7b"),
            accent: hex_to_color32("#bd93f9"),
            error: hex_to_color32("#ff5555"),
        },
    }
}

/// Parses `#rrggbb`. Anything else yields black.
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color32::BLACK;
    }
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    Color32::from_rgb(channel(0..2), channel(2..4), channel(4..6))
}

/// Linear blend between two colors; `t = 0` gives `a`.
pub fn mix(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(hex_to_color32("#0d1117"), Color32::from_rgb(13, 17, 23));
        assert_eq!(hex_to_color32("fff"), Color32::BLACK);
        assert_eq!(hex_to_color32("#zz0000"), Color32::from_rgb(0, 0, 0));
    }

    #[test]
    fn test_theme_lookup_and_fallback() {
        let manager = ThemeManager::new();
        assert_eq!(manager.list_themes().count(), 4);
        assert!(manager.get_theme("Midnight").is_some());
        assert_eq!(manager.theme_or_default("Nope").name, "Dark");
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
        assert_eq!(mix(a, b, 0.5), Color32::from_rgb(100, 50, 25));
    }
}
