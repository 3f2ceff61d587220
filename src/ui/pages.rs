//! Page bodies.  Each page is a vertical stack of sections scrolled as a
//! whole; see [`stack`].

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use super::carousel::CarouselView;
use super::charts::{LanguageBreakdown, SkillsChart, WeeklyChart};
use super::layout::{centered_fixed, stack, wrapped_height};
use super::theme::Palette;
use crate::app::state::{AppState, Focus, Page};
use crate::core::carousel::CarouselItem;

/// What the event loop needs back from drawing a page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageFrame {
    /// Where the carousel landed, if it is visible.
    pub carousel: Option<Rect>,
    /// Total height of all sections, for clamping the scroll offset.
    pub content_height: u16,
}

impl PageFrame {
    /// Largest useful scroll offset for a body of `visible` rows.
    pub fn max_scroll(&self, visible: u16) -> u16 {
        self.content_height.saturating_sub(visible)
    }
}

pub fn draw_page(frame: &mut Frame, area: Rect, state: &AppState) -> PageFrame {
    match state.page {
        Page::Home => draw_home(frame, area, state),
        Page::About => draw_about(frame, area, state),
        Page::Projects => draw_projects(frame, area, state),
        Page::Uses => draw_uses(frame, area, state),
    }
}

fn card<'a>(title: &str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(palette.title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style())
        .padding(Padding::horizontal(1))
}

/// Lines of `(text, style)` paragraphs separated by blank lines.
fn paragraphs<'a>(texts: &[&str], palette: &Palette) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for (i, text) in texts.iter().enumerate() {
        if i > 0 {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(text.to_string(), palette.base_style())));
    }
    lines
}

fn paragraphs_height(texts: &[&str], width: u16) -> u16 {
    let body: u16 = texts.iter().map(|t| wrapped_height(t, width)).sum();
    body + texts.len().saturating_sub(1) as u16
}

// ───────────────────────────────────────── home ──────────────

fn draw_home(frame: &mut Frame, area: Rect, state: &AppState) -> PageFrame {
    let palette = &state.palette;
    let weekly = WeeklyChart { feed: &state.daily, palette, tick: state.tick };
    let languages = LanguageBreakdown { feed: &state.languages, palette, tick: state.tick };
    let heights = [5, 3, WeeklyChart::HEIGHT, languages.height()];
    let rects = stack(area, &heights, state.scroll[Page::Home.index()]);

    if let Some(hero) = rects[0] {
        // Cursor blinks roughly twice a second at the default tick rate.
        let cursor = if (state.tick / 5) % 2 == 0 { "|" } else { " " };
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("Hi, I'm {}", state.content.owner),
                palette.title_style(),
            )),
            Line::raw(""),
            Line::from(vec![
                Span::styled(state.typewriter.text().to_string(), palette.base_style()),
                Span::styled(cursor, palette.accent_style()),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            hero,
        );
    }
    if let Some(portal) = rects[1] {
        let button = centered_fixed(30, 3, portal);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Projects Portal", palette.title_style()),
                Span::styled("  ⏎", palette.muted_style()),
            ]))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(palette.border_style()),
            ),
            button,
        );
    }
    if let Some(r) = rects[2] {
        frame.render_widget(weekly, r);
    }
    if let Some(r) = rects[3] {
        frame.render_widget(languages, r);
    }

    PageFrame {
        carousel: None,
        content_height: heights.iter().sum(),
    }
}

// ───────────────────────────────────────── about ─────────────

fn draw_about(frame: &mut Frame, area: Rect, state: &AppState) -> PageFrame {
    let palette = &state.palette;
    let about = &state.content.about;
    let texts: Vec<&str> = about.paragraphs.iter().map(String::as_str).collect();
    let card_height = paragraphs_height(&texts, area.width.saturating_sub(4)) + 2;
    let skills = SkillsChart { feed: &state.skills, palette, tick: state.tick };
    let carousel_height = if state.coursework.is_some() {
        CarouselView::<CarouselItem>::HEIGHT
    } else {
        0
    };
    let heights = [card_height, skills.height(), carousel_height];
    let rects = stack(area, &heights, state.scroll[Page::About.index()]);

    if let Some(r) = rects[0] {
        frame.render_widget(
            Paragraph::new(paragraphs(&texts, palette))
                .wrap(Wrap { trim: true })
                .block(card(&about.title, palette)),
            r,
        );
    }
    if let Some(r) = rects[1] {
        frame.render_widget(skills, r);
    }
    let mut carousel = None;
    if let (Some(r), Some(coursework)) = (rects[2], state.coursework.as_ref()) {
        frame.render_widget(
            CarouselView::new(coursework, palette)
                .heading("Check Out My Coursework")
                .focused(state.focus == Focus::Carousel),
            r,
        );
        carousel = Some(r);
    }

    PageFrame {
        carousel,
        content_height: heights.iter().sum(),
    }
}

// ───────────────────────────────────────── projects ──────────

fn draw_projects(frame: &mut Frame, area: Rect, state: &AppState) -> PageFrame {
    let palette = &state.palette;
    let text_width = area.width.saturating_sub(4);
    let projects = &state.content.projects;

    let carousel_height = if state.projects.is_some() {
        CarouselView::<CarouselItem>::HEIGHT
    } else {
        0
    };
    let mut heights = vec![carousel_height];
    let mut bodies = Vec::with_capacity(projects.len());
    for p in projects {
        let mut texts = vec![p.item.description.as_str()];
        if let Some(content) = p.content.as_deref() {
            texts.push(content);
        }
        heights.push(paragraphs_height(&texts, text_width) + 2 + p.footer.is_some() as u16);
        bodies.push(texts);
    }
    let rects = stack(area, &heights, state.scroll[Page::Projects.index()]);

    let mut carousel = None;
    if let (Some(r), Some(c)) = (rects[0], state.projects.as_ref()) {
        frame.render_widget(
            CarouselView::new(c, palette)
                .heading("My Projects")
                .focused(state.focus == Focus::Carousel)
                .detail(c.current().footer.as_deref()),
            r,
        );
        carousel = Some(r);
    }

    for ((project, texts), rect) in projects.iter().zip(&bodies).zip(&rects[1..]) {
        let Some(r) = *rect else { continue };
        let mut lines = paragraphs(texts, palette);
        if let Some(footer) = project.footer.as_deref() {
            lines.push(Line::from(Span::styled(footer.to_string(), palette.muted_style())));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(card(&project.item.title, palette)),
            r,
        );
    }

    PageFrame {
        carousel,
        content_height: heights.iter().sum(),
    }
}

// ───────────────────────────────────────── uses ──────────────

fn draw_uses(frame: &mut Frame, area: Rect, state: &AppState) -> PageFrame {
    let palette = &state.palette;
    let text_width = area.width.saturating_sub(4);
    let sections = &state.content.uses;

    let heights: Vec<u16> = sections
        .iter()
        .map(|s| {
            s.items
                .iter()
                .map(|i| wrapped_height(&format!("{}: {}", i.label, i.detail), text_width))
                .sum::<u16>()
                + 2
        })
        .collect();
    let rects = stack(area, &heights, state.scroll[Page::Uses.index()]);

    for (section, rect) in sections.iter().zip(&rects) {
        let Some(r) = *rect else { continue };
        let lines: Vec<Line> = section
            .items
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(format!("{}: ", item.label), palette.accent_style()),
                    Span::styled(item.detail.clone(), palette.base_style()),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(card(&section.title, palette)),
            r,
        );
    }

    PageFrame {
        carousel: None,
        content_height: heights.iter().sum(),
    }
}
