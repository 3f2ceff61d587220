//! Carousel widget: one slide at a time, with arrow edges and position dots.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::theme::Palette;
use crate::core::carousel::{Carousel, CarouselItem};

/// Renders the current slide of any carousel whose items expose a
/// [`CarouselItem`].  The left and right border columns carry `‹` / `›`;
/// clicks there step the carousel.
pub struct CarouselView<'a, T> {
    carousel: &'a Carousel<T>,
    palette: &'a Palette,
    heading: Option<&'a str>,
    focused: bool,
    detail: Option<&'a str>,
}

impl<'a, T: AsRef<CarouselItem>> CarouselView<'a, T> {
    pub const HEIGHT: u16 = 10;

    pub fn new(carousel: &'a Carousel<T>, palette: &'a Palette) -> Self {
        Self {
            carousel,
            palette,
            heading: None,
            focused: false,
            detail: None,
        }
    }

    /// Block title shown on the top border.
    pub fn heading(mut self, heading: &'a str) -> Self {
        self.heading = Some(heading);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Extra muted line under the description (e.g. a project's tech stack).
    pub fn detail(mut self, detail: Option<&'a str>) -> Self {
        self.detail = detail;
        self
    }
}

impl<T: AsRef<CarouselItem>> Widget for CarouselView<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.palette.focused_border_style()
        } else {
            self.palette.border_style()
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        if let Some(heading) = self.heading {
            block = block
                .title(format!(" {heading} "))
                .title_style(self.palette.title_style());
        }
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width < 2 {
            return;
        }

        // Arrow edges sit on the border, mid-height.
        let mid = area.y + area.height / 2;
        let arrow_style = if self.focused {
            self.palette.focused_border_style()
        } else {
            self.palette.accent_style()
        };
        buf.set_string(area.x, mid, "‹", arrow_style);
        buf.set_string(area.right() - 1, mid, "›", arrow_style);

        let item = self.carousel.current().as_ref();
        let mut lines = vec![
            Line::from(Span::styled(item.title.clone(), self.palette.title_style())),
            Line::raw(""),
            Line::from(Span::styled(item.description.clone(), self.palette.base_style())),
        ];
        if let Some(detail) = self.detail {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(detail.to_string(), self.palette.muted_style())));
        }
        let text_area = Rect::new(inner.x + 1, inner.y, inner.width - 2, inner.height - 1);
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        // Bottom row: link on the left, position dots on the right.
        let bottom = text_area.bottom();
        let dots: String = (0..self.carousel.len())
            .map(|i| if i == self.carousel.active_index() { '●' } else { '○' })
            .collect();
        let dots_width = dots.chars().count() as u16;
        let link_width = text_area.width.saturating_sub(dots_width + 1) as usize;
        buf.set_stringn(
            text_area.x,
            bottom,
            item.link.as_str(),
            link_width,
            self.palette.muted_style(),
        );
        buf.set_string(
            text_area.right().saturating_sub(dots_width),
            bottom,
            dots,
            self.palette.accent_style(),
        );
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::core::theme::ThemeState;

    fn carousel() -> Carousel {
        let items = ["Alpha", "Beta", "Gamma"]
            .into_iter()
            .map(|t| CarouselItem {
                title: t.into(),
                description: format!("{t} description"),
                link: Url::parse(&format!("https://example.com/{}", t.to_lowercase())).unwrap(),
            })
            .collect();
        Carousel::new(items).unwrap()
    }

    fn render(c: &Carousel) -> Buffer {
        let palette = Palette::for_theme(ThemeState::Dark);
        let area = Rect::new(0, 0, 50, CarouselView::<CarouselItem>::HEIGHT);
        let mut buf = Buffer::empty(area);
        CarouselView::new(c, &palette)
            .heading("Coursework")
            .focused(true)
            .render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn shows_current_slide_and_edges() {
        let mut c = carousel();
        c.next();
        let buf = render(&c);
        let all: String = (0..buf.area.height).map(|y| row(&buf, y)).collect();
        assert!(all.contains("Beta"));
        assert!(!all.contains("Alpha"));
        assert!(all.contains("example.com/beta"));
        assert!(all.contains("○●○"));

        let mid = row(&buf, CarouselView::<CarouselItem>::HEIGHT / 2);
        assert!(mid.starts_with('‹'));
        assert!(mid.ends_with('›'));
    }
}
