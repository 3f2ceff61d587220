//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use url::Url;

use crate::config::{Action, KeyBind};

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState, Focus, Page};

/// Rows moved by PageUp/PageDown.
const PAGE_SCROLL: u16 = 10;

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }
    state.status_message = None;

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
}

// ── Page view (configurable bindings) ───────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    // A focused carousel owns the horizontal arrows; they never reach
    // page navigation.
    if state.focus == Focus::Carousel {
        match key.code {
            KeyCode::Left => {
                carousel_previous(state);
                return;
            }
            KeyCode::Right => {
                carousel_next(state);
                return;
            }
            KeyCode::Home => {
                carousel_jump(state, false);
                return;
            }
            KeyCode::End => {
                carousel_jump(state, true);
                return;
            }
            KeyCode::Esc => {
                state.focus = Focus::Body;
                return;
            }
            _ => {}
        }
    }

    // Navigation keys that should always work in page view.
    match key.code {
        KeyCode::Char(c @ '1'..='4') if key.modifiers.is_empty() => {
            let idx = (c as usize) - ('1' as usize);
            state.set_page(Page::ALL[idx]);
            return;
        }
        KeyCode::Home => {
            *state.scroll_mut() = 0;
            return;
        }
        KeyCode::PageUp => {
            scroll_by(state, -(PAGE_SCROLL as i32));
            return;
        }
        KeyCode::PageDown => {
            scroll_by(state, PAGE_SCROLL as i32);
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::NextPage => state.set_page(state.page.next()),
        Action::PrevPage => state.set_page(state.page.prev()),
        Action::ScrollUp => scroll_by(state, -1),
        Action::ScrollDown => scroll_by(state, 1),
        Action::CycleFocus => cycle_focus(state),
        Action::OpenLink => activate(state),
        Action::ToggleTheme => {
            state.theme.toggle();
        }
    }
}

fn scroll_by(state: &mut AppState, delta: i32) {
    let scroll = state.scroll_mut();
    *scroll = (*scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
}

fn cycle_focus(state: &mut AppState) {
    if !state.page_has_carousel() {
        state.status_message = Some(format!("Nothing to focus on {}", state.page.title()));
        return;
    }
    state.focus = match state.focus {
        Focus::Body => Focus::Carousel,
        Focus::Carousel => Focus::Body,
    };
}

/// Enter: open the focused slide's link, or follow the home page's
/// "Projects Portal".
fn activate(state: &mut AppState) {
    if state.focus == Focus::Carousel {
        open_current_slide(state);
    } else if state.page == Page::Home {
        state.set_page(Page::Projects);
    }
}

fn carousel_next(state: &mut AppState) {
    match state.page {
        Page::About => {
            if let Some(c) = state.coursework.as_mut() {
                c.next();
            }
        }
        Page::Projects => {
            if let Some(c) = state.projects.as_mut() {
                c.next();
            }
        }
        Page::Home | Page::Uses => {}
    }
}

fn carousel_previous(state: &mut AppState) {
    match state.page {
        Page::About => {
            if let Some(c) = state.coursework.as_mut() {
                c.previous();
            }
        }
        Page::Projects => {
            if let Some(c) = state.projects.as_mut() {
                c.previous();
            }
        }
        Page::Home | Page::Uses => {}
    }
}

/// Jump to the first or last slide.
fn carousel_jump(state: &mut AppState, last: bool) {
    let result = match state.page {
        Page::About => state.coursework.as_mut().map(|c| {
            let index = if last { c.len() - 1 } else { 0 };
            c.go_to(index)
        }),
        Page::Projects => state.projects.as_mut().map(|c| {
            let index = if last { c.len() - 1 } else { 0 };
            c.go_to(index)
        }),
        Page::Home | Page::Uses => None,
    };
    if let Some(Err(e)) = result {
        tracing::debug!("carousel jump ignored: {e}");
    }
}

/// Launch the current slide's link.  Carousel position is not touched.
fn open_current_slide(state: &mut AppState) {
    let Some(url) = state.current_slide_link().cloned() else {
        return;
    };
    open_url(state, &url);
}

fn open_url(state: &mut AppState, url: &Url) {
    if (state.opener)(url) {
        state.status_message = Some(format!("Opened {url}"));
    } else {
        tracing::warn!(%url, "failed to open link");
        state.status_message = Some(format!("Could not open {url}"));
    }
}

// ── Settings / controls popups ──────────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                state.awaiting_rebind = true;
            } else {
                state.config.reset_defaults();
                state.save_config();
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            if let Some(&action) = Action::ALL.get(state.controls_selected) {
                state.config.clear_bindings(action);
                state.save_config();
            }
        }
        _ => {}
    }
}

fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    let Some(&action) = Action::ALL.get(state.controls_selected) else {
        state.awaiting_rebind = false;
        return;
    };
    state.config.add_binding(action, KeyBind::from_key_event(key));
    state.save_config();
    state.awaiting_rebind = false;
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Page {
        return;
    }
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(page) = state
                .hits
                .tabs
                .iter()
                .find(|(_, area)| point_in_rect(*area, col, row))
                .map(|(page, _)| *page)
            {
                state.set_page(page);
                return;
            }
            if state.hits.theme_toggle.is_some_and(|a| point_in_rect(a, col, row)) {
                state.theme.toggle();
                return;
            }
            if let Some(url) = state
                .hits
                .footer_links
                .iter()
                .find(|(_, area)| point_in_rect(*area, col, row))
                .map(|(url, _)| url.clone())
            {
                open_url(state, &url);
                return;
            }
            if let Some(area) = state.hits.carousel.filter(|a| point_in_rect(*a, col, row)) {
                state.focus = Focus::Carousel;
                if col == area.x {
                    carousel_previous(state);
                } else if col == area.right().saturating_sub(1) {
                    carousel_next(state);
                } else {
                    open_current_slide(state);
                }
                return;
            }
            if state.hits.body.is_some_and(|a| point_in_rect(a, col, row)) {
                state.focus = Focus::Body;
            }
        }
        MouseEventKind::ScrollUp => scroll_by(state, -3),
        MouseEventKind::ScrollDown => scroll_by(state, 3),
        _ => {}
    }
}

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}
