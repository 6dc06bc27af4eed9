use ratatui::style::Color;

use crate::model::{ThemeMode, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color,
    pub card_bg: Color,
    pub border: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub drop_indicator: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Theme {
    /// Dark palette
    pub fn dark() -> Self {
        Theme {
            mode: ThemeMode::Dark,
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            card_bg: Color::Rgb(0x16, 0x0A, 0x2B),
            border: Color::Rgb(0x4A, 0x40, 0x7A),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
            drop_indicator: Color::Rgb(0x44, 0xDD, 0xFF),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
        }
    }

    /// Light palette
    pub fn light() -> Self {
        Theme {
            mode: ThemeMode::Light,
            background: Color::Rgb(0xF7, 0xF5, 0xFB),
            card_bg: Color::Rgb(0xFF, 0xFF, 0xFF),
            border: Color::Rgb(0xC9, 0xC2, 0xDD),
            text: Color::Rgb(0x2E, 0x27, 0x4A),
            text_bright: Color::Rgb(0x0C, 0x00, 0x1B),
            highlight: Color::Rgb(0xC2, 0x18, 0x6B),
            dim: Color::Rgb(0x8A, 0x84, 0xA8),
            red: Color::Rgb(0xC6, 0x28, 0x28),
            green: Color::Rgb(0x1B, 0x80, 0x4A),
            selection_bg: Color::Rgb(0xF3, 0xD9, 0xE8),
            selection_border: Color::Rgb(0xC2, 0x18, 0x6B),
            drop_indicator: Color::Rgb(0x00, 0x7A, 0xA3),
            search_match_bg: Color::Rgb(0xFF, 0xE0, 0x82),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
        }
    }

    /// Palette for `mode`, with `[ui.colors]` overrides applied
    pub fn for_mode(mode: ThemeMode, ui: &UiConfig) -> Self {
        let mut theme = match mode {
            ThemeMode::Light => Theme::light(),
            ThemeMode::Dark => Theme::dark(),
        };

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "card_bg" => theme.card_bg = color,
                    "border" => theme.border = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "green" => theme.green = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_border" => theme.selection_border = color,
                    "drop_indicator" => theme.drop_indicator = color,
                    "search_match_bg" => theme.search_match_bg = color,
                    "search_match_fg" => theme.search_match_fg = color,
                    _ => {}
                }
            }
        }

        theme
    }
}

/// Parse a hex color string like "#FB4196" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
