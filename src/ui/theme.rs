//! Colour palette and text styles used across the UI.
//!
//! A [`Palette`] is derived from the current [`ThemeState`]; widgets take a
//! `&Palette` instead of reading the theme themselves.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::ThemeState;

/// Six-step grayscale ramp for the language chart, darkest first on light
/// backgrounds and lightest first on dark ones.
const LIGHT_RAMP: [Color; 6] = [
    Color::Rgb(0x26, 0x26, 0x26),
    Color::Rgb(0x40, 0x40, 0x40),
    Color::Rgb(0x59, 0x59, 0x59),
    Color::Rgb(0x73, 0x73, 0x73),
    Color::Rgb(0x8c, 0x8c, 0x8c),
    Color::Rgb(0xa6, 0xa6, 0xa6),
];
const DARK_RAMP: [Color; 6] = [
    Color::Rgb(0xff, 0xff, 0xff),
    Color::Rgb(0xd6, 0xd6, 0xd6),
    Color::Rgb(0xbd, 0xbd, 0xbd),
    Color::Rgb(0xa3, 0xa3, 0xa3),
    Color::Rgb(0x8a, 0x8a, 0x8a),
    Color::Rgb(0x75, 0x75, 0x75),
];

/// Central palette.  Change colours here and they propagate everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub theme: ThemeState,
    pub background: Color,
    pub text: Color,
    pub border: Color,
    pub accent: Color,
    pub muted: Color,
    pub bar: Color,
    pub ramp: [Color; 6],
}

impl Palette {
    pub fn for_theme(theme: ThemeState) -> Self {
        match theme {
            ThemeState::Light => Self {
                theme,
                background: Color::Rgb(0xff, 0xff, 0xff),
                text: Color::Rgb(0x33, 0x33, 0x33),
                border: Color::Rgb(0xcb, 0xd5, 0xe0),
                accent: Color::Rgb(0x4a, 0x55, 0x68),
                muted: Color::Rgb(0x8c, 0x8c, 0x8c),
                bar: Color::Rgb(0x80, 0x80, 0x80),
                ramp: LIGHT_RAMP,
            },
            ThemeState::Dark => Self {
                theme,
                background: Color::Rgb(0x00, 0x00, 0x00),
                text: Color::Rgb(0xe2, 0xe8, 0xf0),
                border: Color::Rgb(0xff, 0xff, 0xff),
                accent: Color::Rgb(0xff, 0xff, 0xff),
                muted: Color::Rgb(0x66, 0x66, 0x66),
                bar: Color::Rgb(0x80, 0x80, 0x80),
                ramp: DARK_RAMP,
            },
        }
    }

    /// Colour for the `i`-th series entry, cycling through the ramp.
    pub fn ramp_color(&self, i: usize) -> Color {
        self.ramp[i % self.ramp.len()]
    }

    // ── surfaces ───────────────────────────────────────────────
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.background).bg(self.muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_differ_by_theme() {
        let light = Palette::for_theme(ThemeState::Light);
        let dark = Palette::for_theme(ThemeState::Dark);
        assert_ne!(light.background, dark.background);
        assert_eq!(light.ramp_color(0), LIGHT_RAMP[0]);
        assert_eq!(dark.ramp_color(7), DARK_RAMP[1]);
    }
}
