//! Footer line: external links and the copyright notice.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use url::Url;

use super::theme::Palette;
use crate::core::content::FooterLink;

pub struct Footer<'a> {
    pub links: &'a [FooterLink],
    pub owner: &'a str,
    pub year: i32,
    pub palette: &'a Palette,
}

impl<'a> Footer<'a> {
    /// The footer line, plus the span index of each link title.
    fn spans(&self) -> (Vec<Span<'a>>, Vec<usize>) {
        let mut spans = Vec::new();
        let mut link_spans = Vec::with_capacity(self.links.len());
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", self.palette.muted_style()));
            }
            link_spans.push(spans.len());
            spans.push(Span::styled(link.title.as_str(), self.palette.accent_style()));
        }
        if !spans.is_empty() {
            spans.push(Span::styled("   ", self.palette.muted_style()));
        }
        spans.push(Span::styled(
            format!("© {} {}. All rights reserved.", self.year, self.owner),
            self.palette.muted_style(),
        ));
        (spans, link_spans)
    }

    fn start_x(area: Rect, spans: &[Span]) -> u16 {
        let total: usize = spans.iter().map(Span::width).sum();
        let total = u16::try_from(total).unwrap_or(u16::MAX);
        area.x + area.width.saturating_sub(total) / 2
    }

    /// Where each link title lands when rendered into `area`, clipped to it.
    pub fn link_areas(&self, area: Rect) -> Vec<(Url, Rect)> {
        if area.height == 0 {
            return Vec::new();
        }
        let (spans, link_spans) = self.spans();
        let mut x = Self::start_x(area, &spans);
        let mut areas = Vec::with_capacity(link_spans.len());
        let mut links = self.links.iter();
        for (i, span) in spans.iter().enumerate() {
            let w = u16::try_from(span.width()).unwrap_or(u16::MAX);
            if link_spans.contains(&i) {
                let link = links.next();
                let w = w.min(area.right().saturating_sub(x));
                if let Some(link) = link.filter(|_| w > 0) {
                    areas.push((link.url.clone(), Rect::new(x, area.y, w, 1)));
                }
            }
            x = x.saturating_add(w);
        }
        areas
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, self.palette.base_style());
        let (spans, _) = self.spans();
        let x = Self::start_x(area, &spans);
        buf.set_line(x, area.y, &Line::from(spans), area.right().saturating_sub(x));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::ThemeState;

    #[test]
    fn shows_links_and_copyright() {
        let links = vec![FooterLink {
            title: "GitHub".into(),
            url: Url::parse("https://github.com/someone").unwrap(),
        }];
        let palette = Palette::for_theme(ThemeState::Light);
        let area = Rect::new(0, 0, 70, 1);
        let mut buf = Buffer::empty(area);
        Footer { links: &links, owner: "Owner", year: 2026, palette: &palette }
            .render(area, &mut buf);
        let row: String = (0..70).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(row.contains("GitHub"));
        assert!(row.contains("© 2026 Owner. All rights reserved."));
    }

    #[test]
    fn link_areas_match_rendered_titles() {
        let links = vec![
            FooterLink {
                title: "GitHub".into(),
                url: Url::parse("https://github.com/someone").unwrap(),
            },
            FooterLink {
                title: "LinkedIn".into(),
                url: Url::parse("https://linkedin.com/in/someone").unwrap(),
            },
        ];
        let palette = Palette::for_theme(ThemeState::Dark);
        let area = Rect::new(0, 3, 80, 1);
        let footer = Footer { links: &links, owner: "Owner", year: 2026, palette: &palette };
        let areas = footer.link_areas(area);
        let mut buf = Buffer::empty(area);
        footer.render(area, &mut buf);

        assert_eq!(areas.len(), 2);
        for ((url, rect), link) in areas.iter().zip(&links) {
            assert_eq!(url, &link.url);
            let text: String = (rect.x..rect.right())
                .map(|x| buf[(x, 3)].symbol().to_string())
                .collect();
            assert_eq!(text, link.title);
        }
    }

    #[test]
    fn links_off_screen_have_no_area() {
        let links = vec![FooterLink {
            title: "GitHub".into(),
            url: Url::parse("https://github.com/someone").unwrap(),
        }];
        let palette = Palette::for_theme(ThemeState::Light);
        let footer = Footer { links: &links, owner: "Owner", year: 2026, palette: &palette };
        assert!(footer.link_areas(Rect::new(0, 0, 0, 1)).is_empty());
        assert!(footer.link_areas(Rect::new(0, 0, 80, 0)).is_empty());
    }
}
