//! Layout helpers: split the terminal area into regions and stack page
//! sections under a scroll offset.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: nav bar, page body, footer, status bar.
pub struct AppLayout {
    pub nav_area: Rect,
    pub body_area: Rect,
    pub footer_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // nav bar
                Constraint::Min(3),    // page body (takes all remaining space)
                Constraint::Length(1), // footer
                Constraint::Length(1), // status / hint bar
            ])
            .split(area);

        Self {
            nav_area: chunks[0],
            body_area: chunks[1],
            footer_area: chunks[2],
            status_area: chunks[3],
        }
    }
}

/// Place sections of the given heights top to bottom inside `area`, shifted
/// up by `scroll` rows.
///
/// A section is shown only if its top row is visible; a section running
/// past the bottom edge is cut short.  Hidden sections map to `None`.
pub fn stack(area: Rect, heights: &[u16], scroll: u16) -> Vec<Option<Rect>> {
    let mut y = area.y as i32 - scroll as i32;
    let bottom = area.bottom() as i32;
    heights
        .iter()
        .map(|&h| {
            let top = y;
            y += h as i32;
            if h == 0 || top < area.y as i32 || top >= bottom {
                return None;
            }
            let height = (h as i32).min(bottom - top) as u16;
            Some(Rect::new(area.x, top as u16, area.width, height))
        })
        .collect()
}

/// Rows needed to show `text` greedily word-wrapped at `width` columns.
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let mut rows = 0u16;
    for paragraph in text.lines() {
        let mut line_len = 0usize;
        let mut lines = 1u16;
        for word in paragraph.split_whitespace() {
            let w = word.chars().count();
            if line_len == 0 {
                line_len = w;
            } else if line_len + 1 + w <= width {
                line_len += 1 + w;
            } else {
                lines += 1;
                line_len = w;
            }
            // Words longer than the line spill over.
            while line_len > width {
                lines += 1;
                line_len -= width;
            }
        }
        rows = rows.saturating_add(lines);
    }
    rows.max(1)
}

/// Centre a `width` × `height` box inside `area`, clamped to it.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_places_sections_in_order() {
        let area = Rect::new(0, 2, 20, 10);
        let rects = stack(area, &[3, 4, 5], 0);
        assert_eq!(rects[0], Some(Rect::new(0, 2, 20, 3)));
        assert_eq!(rects[1], Some(Rect::new(0, 5, 20, 4)));
        // Starts at row 9, only 3 rows left.
        assert_eq!(rects[2], Some(Rect::new(0, 9, 20, 3)));
    }

    #[test]
    fn stack_hides_sections_scrolled_past() {
        let area = Rect::new(0, 0, 20, 6);
        let rects = stack(area, &[3, 4, 5], 3);
        assert_eq!(rects[0], None);
        assert_eq!(rects[1], Some(Rect::new(0, 0, 20, 4)));
        assert_eq!(rects[2], Some(Rect::new(0, 4, 20, 2)));

        let rects = stack(area, &[3, 4, 5], 4);
        assert_eq!(rects[1], None);
    }

    #[test]
    fn wrapped_height_counts_lines() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("aaa bbb", 7), 1);
        assert_eq!(wrapped_height("aaa bbb", 6), 2);
        assert_eq!(wrapped_height("one\ntwo", 10), 2);
        assert_eq!(wrapped_height("abcdefghij", 4), 3);
    }
}
