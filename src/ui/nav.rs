//! Navigation bar: owner name, page tabs, and the theme toggle icon.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};

use super::theme::Palette;
use crate::app::state::Page;

/// Where each clickable element of the nav bar lands.
#[derive(Debug, Clone, PartialEq)]
pub struct NavGeometry {
    pub tabs: Vec<(Page, Rect)>,
    pub theme_toggle: Rect,
}

const TOGGLE_WIDTH: u16 = 3;

/// Lay tabs out right-aligned, left of the toggle, never overlapping the
/// owner name.
pub fn nav_geometry(area: Rect, owner: &str) -> NavGeometry {
    let theme_toggle = Rect::new(
        area.right().saturating_sub(TOGGLE_WIDTH),
        area.y,
        TOGGLE_WIDTH.min(area.width),
        area.height.min(1),
    );

    let widths: Vec<u16> = Page::ALL
        .iter()
        .map(|p| p.title().len() as u16 + 2)
        .collect();
    let total: u16 = widths.iter().sum::<u16>() + widths.len() as u16 - 1;
    let owner_end = area.x + owner.chars().count() as u16 + 3;
    let mut x = theme_toggle
        .x
        .saturating_sub(total + 1)
        .max(owner_end);

    let mut tabs = Vec::with_capacity(Page::ALL.len());
    for (page, w) in Page::ALL.into_iter().zip(widths) {
        let w = w.min(theme_toggle.x.saturating_sub(x));
        tabs.push((page, Rect::new(x, area.y, w, area.height.min(1))));
        x += w + 1;
    }
    NavGeometry { tabs, theme_toggle }
}

/// Glyph for the toggle: the theme a click would switch *to*.
pub fn theme_icon(palette: &Palette) -> &'static str {
    if palette.theme.is_dark() {
        "☀"
    } else {
        "☾"
    }
}

pub struct NavBar<'a> {
    pub owner: &'a str,
    pub page: Page,
    pub palette: &'a Palette,
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, self.palette.base_style());
        buf.set_stringn(
            area.x + 1,
            area.y,
            self.owner,
            area.width.saturating_sub(1) as usize,
            self.palette.title_style(),
        );

        let geometry = nav_geometry(area, self.owner);
        for (page, rect) in &geometry.tabs {
            if rect.width == 0 {
                continue;
            }
            let style = if *page == self.page {
                self.palette.selected_style()
            } else {
                self.palette.base_style()
            };
            buf.set_stringn(
                rect.x,
                rect.y,
                format!(" {} ", page.title()),
                rect.width as usize,
                style,
            );
        }

        let toggle = geometry.theme_toggle;
        buf.set_string(toggle.x + 1, toggle.y, theme_icon(self.palette), self.palette.accent_style());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::ThemeState;

    #[test]
    fn tabs_do_not_overlap() {
        let geo = nav_geometry(Rect::new(0, 0, 80, 1), "Owner");
        assert_eq!(geo.tabs.len(), 4);
        for pair in geo.tabs.windows(2) {
            assert!(pair[0].1.right() < pair[1].1.x);
        }
        let last = geo.tabs[3].1;
        assert!(last.right() <= geo.theme_toggle.x);
        assert_eq!(geo.theme_toggle.right(), 80);
        assert!(geo.tabs[0].1.x >= "Owner".len() as u16 + 3);
    }

    #[test]
    fn icon_offers_the_other_theme() {
        assert_eq!(theme_icon(&Palette::for_theme(ThemeState::Dark)), "☀");
        assert_eq!(theme_icon(&Palette::for_theme(ThemeState::Light)), "☾");
    }

    #[test]
    fn renders_owner_and_tabs() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        let palette = Palette::for_theme(ThemeState::Light);
        NavBar { owner: "Owner", page: Page::About, palette: &palette }.render(area, &mut buf);
        let row: String = (0..60).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(row.contains("Owner"));
        assert!(row.contains("Home"));
        assert!(row.contains("Uses"));
        assert!(row.contains('☾'));
    }
}
