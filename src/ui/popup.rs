//! Popup overlay widgets for the settings menu and controls submenu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::layout::centered_fixed;
use super::theme::Palette;
use crate::app::settings::SETTINGS_ITEMS;
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};

fn popup_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(palette.title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style())
        .style(palette.base_style())
}

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = &self.state.palette;
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(44, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Settings ", palette);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let (prefix, style) = if i == self.state.settings_selected {
                (" ▸ ", palette.selected_style())
            } else {
                ("   ", palette.base_style())
            };

            let mut spans = vec![Span::styled(format!("{prefix}{}", item.label()), style)];
            match item.display_value(self.state) {
                Some(value) => {
                    let value_style = if value == "[OFF]" {
                        palette.muted_style()
                    } else {
                        palette.accent_style().add_modifier(Modifier::BOLD)
                    };
                    spans.push(Span::styled(format!("  {value}"), value_style));
                }
                None => spans.push(Span::styled("  ›", palette.muted_style())),
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            palette.muted_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Interactive controls / keybinding popup overlay.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
    pub palette: &'a Palette,
}

impl Widget for ControlsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + blanks + reset + hint + borders
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Controls ", self.palette);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_color = Style::default().fg(self.palette.accent);
        let mut lines = Vec::new();
        lines.push(Line::raw(""));

        // ── Action rows ─────────────────────────────────────────
        for (i, &action) in Action::ALL.iter().enumerate() {
            let is_selected = i == self.selected;
            let prefix = if is_selected { " ▸ " } else { "   " };

            let keys_display = if is_selected && self.awaiting_rebind {
                "Press a key…".to_string()
            } else {
                self.config.display_bindings(action)
            };

            let (base_style, key_style) = if is_selected {
                let selected = self.palette.selected_style();
                (selected, selected)
            } else {
                (self.palette.base_style(), key_color)
            };

            // Fixed-width columns: label left-aligned, keys right-aligned.
            let label_col = format!("{prefix}{:<22}", action.label());
            let keys_width = (inner.width as usize)
                .saturating_sub(label_col.chars().count() + 1)
                .max(1);
            let keys_col = format!("{keys_display:>keys_width$}");

            lines.push(Line::from(vec![
                Span::styled(label_col, base_style),
                Span::styled(keys_col, key_style),
            ]));
        }

        // ── Reset option ────────────────────────────────────────
        let is_reset_selected = self.selected == Action::ALL.len();
        lines.push(Line::raw(""));
        let (reset_prefix, reset_style) = if is_reset_selected {
            (" ▸ ", self.palette.selected_style())
        } else {
            ("   ", self.palette.base_style())
        };
        lines.push(Line::from(Span::styled(
            format!("{reset_prefix}⟳ Reset to defaults"),
            reset_style,
        )));

        // ── Hint bar ────────────────────────────────────────────
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  Esc: back",
            self.palette.muted_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::SiteContent;
    use crate::core::theme::{FilePreferenceStore, TerminalAppearance, ThemeController};

    fn text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn settings_popup_shows_current_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("preferences"));
        let theme =
            ThemeController::initialize(Box::new(store), &TerminalAppearance::from_value(None));
        let state = AppState::new(SiteContent::builtin().unwrap(), theme, AppConfig::default());

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        SettingsPopup { state: &state }.render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("Settings"));
        assert!(out.contains("Theme  light"));
        assert!(out.contains("Typewriter Speed"));
        assert!(out.contains("Fetch Stats on Launch  [ON]"));
    }

    #[test]
    fn controls_popup_prompts_while_rebinding() {
        let config = AppConfig::default();
        let palette = Palette::for_theme(crate::core::theme::ThemeState::Dark);
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        ControlsPopup { config: &config, selected: 0, awaiting_rebind: true, palette: &palette }
            .render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("Press a key…"));
        assert!(out.contains("Reset to defaults"));
    }
}
