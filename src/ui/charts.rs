//! Statistics widgets: weekly hours, language breakdown, and proficiency.
//!
//! Each widget draws its own bordered block and shows a spinner while the
//! feed is pending or "No data" once it has failed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::spinner::LoadingIndicator;
use super::theme::Palette;
use crate::core::stats::{DailyHours, Feed, LanguageShare, Proficiency, PROFICIENCY_TARGET_HOURS};

const NAME_WIDTH: usize = 12;

fn chart_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(palette.title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style())
}

/// Render the pending/failed placeholder, or hand back the data.
fn ready_or_placeholder<'f, T>(
    feed: &'f Feed<T>,
    area: Rect,
    buf: &mut Buffer,
    palette: &Palette,
    tick: u64,
) -> Option<&'f T> {
    match feed {
        Feed::Ready(data) => Some(data),
        Feed::Pending => {
            LoadingIndicator { tick, style: palette.accent_style() }.render(area, buf);
            None
        }
        Feed::Unavailable => {
            no_data(area, buf, palette);
            None
        }
    }
}

fn no_data(area: Rect, buf: &mut Buffer, palette: &Palette) {
    if area.height == 0 {
        return;
    }
    let label = "No data";
    let x = area.x + area.width.saturating_sub(label.len() as u16) / 2;
    buf.set_string(x, area.y + area.height / 2, label, palette.muted_style());
}

/// Horizontal bar `fraction` (0–1) of `width` cells.
fn bar_cells(fraction: f64, width: u16) -> u16 {
    (fraction.clamp(0.0, 1.0) * width as f64).round() as u16
}

fn pad_name(name: &str) -> String {
    let mut s: String = name.chars().take(NAME_WIDTH).collect();
    let len = s.chars().count();
    s.extend(std::iter::repeat_n(' ', NAME_WIDTH + 1 - len));
    s
}

// ───────────────────────────────────────── weekly hours ──────

/// Vertical bars, one per day, with the hour count above each bar.
pub struct WeeklyChart<'a> {
    pub feed: &'a Feed<Vec<DailyHours>>,
    pub palette: &'a Palette,
    pub tick: u64,
}

impl WeeklyChart<'_> {
    pub const HEIGHT: u16 = 14;
}

impl Widget for WeeklyChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block("Week in Code: Hourly Breakdown", self.palette);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(days) = ready_or_placeholder(self.feed, inner, buf, self.palette, self.tick)
        else {
            return;
        };
        if days.is_empty() || inner.height < 5 || inner.width == 0 {
            no_data(inner, buf, self.palette);
            return;
        }

        // Subtitle row, bars, weekday row, date row.
        let mut subtitle = String::from("Last 7 Days");
        if let Some(peak) = days
            .iter()
            .filter(|d| d.hours > 0.0)
            .max_by(|a, b| a.hours.total_cmp(&b.hours))
        {
            subtitle.push_str(&format!("  ·  busiest: {}", peak.label()));
        }
        buf.set_stringn(
            inner.x + 1,
            inner.y,
            subtitle,
            inner.width.saturating_sub(1) as usize,
            self.palette.muted_style(),
        );
        let label_y = inner.bottom() - 2;
        let bar_top = inner.y + 2;
        let bar_rows = label_y.saturating_sub(bar_top);

        let count = u16::try_from(days.len()).unwrap_or(u16::MAX);
        let slot = (inner.width / count).max(1);
        let bar_width = slot.saturating_sub(1).clamp(1, 7);
        let max = days.iter().map(|d| d.hours).fold(0.0_f64, f64::max);
        let max = if max > 0.0 { max } else { 1.0 };
        let bar_style = Style::default().fg(self.palette.bar);

        for (i, day) in days.iter().enumerate() {
            let slot_x = inner.x + i as u16 * slot;
            if slot_x >= inner.right() {
                break;
            }
            let x = slot_x + (slot - bar_width) / 2;
            let height = bar_cells(day.hours / max, bar_rows.saturating_sub(1));

            for dy in 0..height {
                buf.set_string(x, label_y - 1 - dy, "█".repeat(bar_width as usize), bar_style);
            }

            let value = format!("{:.1}", day.hours);
            let value_y = (label_y - 1).saturating_sub(height).max(bar_top);
            let value_x = slot_x + slot.saturating_sub(value.len() as u16) / 2;
            buf.set_string(value_x, value_y, &value, self.palette.accent_style());

            // "Mon, Jan 8" is too wide for a slot, so it is split over two rows.
            let weekday = day.date.format("%a").to_string();
            let date = day.date.format("%b %-d").to_string();
            for (row, text) in [(label_y, &weekday), (label_y + 1, &date)] {
                let x = slot_x + slot.saturating_sub(text.len() as u16) / 2;
                buf.set_stringn(x, row, text, slot as usize, self.palette.base_style());
            }
        }
    }
}

// ───────────────────────────────────────── languages ─────────

/// Stacked share strip plus a legend row per language.
pub struct LanguageBreakdown<'a> {
    pub feed: &'a Feed<Vec<LanguageShare>>,
    pub palette: &'a Palette,
    pub tick: u64,
}

impl LanguageBreakdown<'_> {
    pub fn height(&self) -> u16 {
        let rows = self.feed.ready().map_or(1, |l| l.len().max(1)) as u16;
        // strip + gap + legend + borders
        rows + 4
    }
}

impl Widget for LanguageBreakdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block("Dev Spectrum", self.palette);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(langs) = ready_or_placeholder(self.feed, inner, buf, self.palette, self.tick)
        else {
            return;
        };
        if langs.is_empty() || inner.height == 0 {
            no_data(inner, buf, self.palette);
            return;
        }

        let total: f64 = langs.iter().map(|l| l.percent.max(0.0)).sum();
        let total = if total > 0.0 { total } else { 100.0 };
        let mut x = inner.x;
        for (i, lang) in langs.iter().enumerate() {
            let w = bar_cells(lang.percent.max(0.0) / total, inner.width).min(inner.right() - x);
            let style = Style::default().fg(self.palette.ramp_color(i));
            buf.set_string(x, inner.y, "█".repeat(w as usize), style);
            x += w;
        }

        for (i, lang) in langs.iter().enumerate() {
            let y = inner.y + 2 + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let line = Line::from(vec![
                Span::styled("■ ", Style::default().fg(self.palette.ramp_color(i))),
                Span::styled(pad_name(&lang.name), self.palette.base_style()),
                Span::styled(format!("{:.2}%", lang.percent), self.palette.accent_style()),
            ]);
            buf.set_line(inner.x + 1, y, &line, inner.width.saturating_sub(1));
        }
    }
}

// ───────────────────────────────────────── proficiency ───────

/// One gauge per language, measured against the practice target.
pub struct SkillsChart<'a> {
    pub feed: &'a Feed<Vec<Proficiency>>,
    pub palette: &'a Palette,
    pub tick: u64,
}

impl SkillsChart<'_> {
    pub fn height(&self) -> u16 {
        let rows = self.feed.ready().map_or(1, |s| s.len().max(1)) as u16;
        // caption + gap + rows + borders
        rows + 4
    }
}

impl Widget for SkillsChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block("Coding Language Proficiency", self.palette);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(skills) = ready_or_placeholder(self.feed, inner, buf, self.palette, self.tick)
        else {
            return;
        };
        if skills.is_empty() || inner.height == 0 {
            no_data(inner, buf, self.palette);
            return;
        }

        buf.set_stringn(
            inner.x + 1,
            inner.y,
            format!("(based on {PROFICIENCY_TARGET_HOURS} hours of practice)"),
            inner.width.saturating_sub(1) as usize,
            self.palette.muted_style(),
        );

        let gauge_width = inner.width.saturating_sub(NAME_WIDTH as u16 + 10);
        for (i, skill) in skills.iter().enumerate() {
            let y = inner.y + 2 + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let filled = bar_cells(skill.percent / 100.0, gauge_width);
            let line = Line::from(vec![
                Span::styled(pad_name(&skill.name), self.palette.base_style()),
                Span::styled("█".repeat(filled as usize), Style::default().fg(self.palette.bar)),
                Span::styled(
                    "░".repeat((gauge_width - filled) as usize),
                    self.palette.muted_style(),
                ),
                Span::styled(format!(" {:>6.2}%", skill.percent), self.palette.accent_style()),
            ]);
            buf.set_line(inner.x + 1, y, &line, inner.width.saturating_sub(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::core::theme::ThemeState;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn palette() -> Palette {
        Palette::for_theme(ThemeState::Light)
    }

    #[test]
    fn pending_feed_shows_spinner() {
        let area = Rect::new(0, 0, 40, WeeklyChart::HEIGHT);
        let mut buf = Buffer::empty(area);
        let feed = Feed::Pending;
        WeeklyChart { feed: &feed, palette: &palette(), tick: 0 }.render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("Week in Code: Hourly Breakdown"));
        assert!(out.contains("Loading..."));
    }

    #[test]
    fn failed_feed_shows_no_data() {
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        let feed = Feed::Unavailable;
        LanguageBreakdown { feed: &feed, palette: &palette(), tick: 0 }.render(area, &mut buf);
        assert!(text(&buf).contains("No data"));
    }

    #[test]
    fn weekly_chart_labels_days_and_hours() {
        let feed = Feed::Ready(vec![
            DailyHours {
                date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                hours: 1.5,
            },
            DailyHours {
                date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
                hours: 3.0,
            },
        ]);
        let area = Rect::new(0, 0, 50, WeeklyChart::HEIGHT);
        let mut buf = Buffer::empty(area);
        WeeklyChart { feed: &feed, palette: &palette(), tick: 0 }.render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("Mon"));
        assert!(out.contains("Tue"));
        assert!(out.contains("1.5"));
        assert!(out.contains("3.0"));
        assert!(out.contains("busiest: Tue, Jan 9"));
        assert!(out.contains("Jan 8"));
        assert!(out.contains('█'));
    }

    #[test]
    fn oversized_feed_renders_without_panicking() {
        let day = DailyHours {
            date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            hours: 2.0,
        };
        let feed = Feed::Ready(vec![day; usize::from(u16::MAX) + 1]);
        let area = Rect::new(0, 0, 50, WeeklyChart::HEIGHT);
        let mut buf = Buffer::empty(area);
        WeeklyChart { feed: &feed, palette: &palette(), tick: 0 }.render(area, &mut buf);
        assert!(text(&buf).contains("Mon"));
    }

    #[test]
    fn language_percentages_use_two_decimals() {
        let feed = Feed::Ready(vec![
            LanguageShare { name: "Java".into(), percent: 41.5 },
            LanguageShare { name: "Python".into(), percent: 58.5 },
        ]);
        let widget = LanguageBreakdown { feed: &feed, palette: &palette(), tick: 0 };
        let area = Rect::new(0, 0, 40, widget.height());
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("Dev Spectrum"));
        assert!(out.contains("41.50%"));
        assert!(out.contains("58.50%"));
    }

    #[test]
    fn skills_chart_mentions_target_hours() {
        let feed = Feed::Ready(vec![Proficiency { name: "Rust".into(), percent: 25.0 }]);
        let widget = SkillsChart { feed: &feed, palette: &palette(), tick: 0 };
        let area = Rect::new(0, 0, 50, widget.height());
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("Coding Language Proficiency"));
        assert!(out.contains("540 hours"));
        assert!(out.contains("25.00%"));
    }
}
