//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::path::PathBuf;
use std::time::Duration;

use ratatui::layout::Rect;
use url::Url;

use crate::config::AppConfig;
use crate::core::{
    carousel::{Carousel, CarouselItem},
    content::{Project, SiteContent},
    stats::{DailyHours, Feed, LanguageShare, Proficiency},
    theme::{ThemeController, ThemeState},
    typewriter::Typewriter,
};
use crate::ui::theme::Palette;

/// Top-level pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    About,
    Projects,
    Uses,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::About, Page::Projects, Page::Uses];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Projects => "Projects",
            Page::Uses => "Uses",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.title().eq_ignore_ascii_case(s.trim()))
    }
}

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    SettingsMenu,
    ControlsSubmenu,
}

/// Which region of the page receives directional keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Body,
    Carousel,
}

/// Screen regions recorded during the last draw, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub tabs: Vec<(Page, Rect)>,
    pub theme_toggle: Option<Rect>,
    pub carousel: Option<Rect>,
    pub footer_links: Vec<(Url, Rect)>,
    pub body: Option<Rect>,
}

/// Opens a link outside the app; returns whether the launch succeeded.
pub type LinkOpener = Box<dyn FnMut(&Url) -> bool>;

/// Top-level application state.
pub struct AppState {
    pub content: SiteContent,
    /// Single source of truth for light/dark.
    pub theme: ThemeController,
    /// Styles for the current theme.  Only updated through the theme
    /// subscription, never set directly by input handling.
    pub palette: Palette,
    pub page: Page,
    pub focus: Focus,
    /// Vertical scroll offset per page, indexed by [`Page::index`].
    pub scroll: [u16; 4],
    pub coursework: Option<Carousel<CarouselItem>>,
    pub projects: Option<Carousel<Project>>,
    pub typewriter: Typewriter,
    pub daily: Feed<Vec<DailyHours>>,
    pub languages: Feed<Vec<LanguageShare>>,
    pub skills: Feed<Vec<Proficiency>>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    pub config: AppConfig,
    /// Where config changes are written; `None` keeps them in memory.
    pub config_path: Option<PathBuf>,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    /// Monotonic tick counter (drives spinners).
    pub tick: u64,
    pub hits: HitMap,
    pub opener: LinkOpener,
}

impl AppState {
    pub fn new(content: SiteContent, theme: ThemeController, config: AppConfig) -> Self {
        let typewriter = Typewriter::new(
            content.hero.phrases.clone(),
            Duration::from_millis(config.typewriter_speed_ms),
        );
        Self {
            coursework: content.coursework_carousel(),
            projects: content.projects_carousel(),
            palette: Palette::for_theme(theme.state()),
            content,
            theme,
            page: Page::default(),
            focus: Focus::default(),
            scroll: [0; 4],
            typewriter,
            daily: Feed::Pending,
            languages: Feed::Pending,
            skills: Feed::Pending,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            config,
            config_path: None,
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            tick: 0,
            hits: HitMap::default(),
            opener: Box::new(crate::shell::open::open_link),
        }
    }

    /// Called from the theme subscription whenever the theme changes.
    pub fn apply_theme(&mut self, theme: ThemeState) {
        self.palette = Palette::for_theme(theme);
        self.status_message = Some(format!("Theme: {theme}"));
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = page;
        self.focus = Focus::Body;
    }

    /// Whether the current page has a carousel that can take focus.
    pub fn page_has_carousel(&self) -> bool {
        match self.page {
            Page::About => self.coursework.is_some(),
            Page::Projects => self.projects.is_some(),
            Page::Home | Page::Uses => false,
        }
    }

    /// Link of the slide currently shown on this page's carousel.
    pub fn current_slide_link(&self) -> Option<&Url> {
        match self.page {
            Page::About => self.coursework.as_ref().map(|c| &c.current().link),
            Page::Projects => self.projects.as_ref().map(|c| &c.current().item.link),
            Page::Home | Page::Uses => None,
        }
    }

    pub fn scroll_mut(&mut self) -> &mut u16 {
        &mut self.scroll[self.page.index()]
    }

    /// Persist config if a path is set; failures go to the status bar.
    pub fn save_config(&mut self) {
        let Some(path) = self.config_path.as_deref() else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            tracing::warn!("could not save config: {e:#}");
            self.status_message = Some(format!("Config not saved: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_navigation_wraps() {
        assert_eq!(Page::Uses.next(), Page::Home);
        assert_eq!(Page::Home.prev(), Page::Uses);
        assert_eq!(Page::About.next(), Page::Projects);
    }

    #[test]
    fn page_parse_is_case_insensitive() {
        assert_eq!(Page::parse("projects"), Some(Page::Projects));
        assert_eq!(Page::parse(" USES "), Some(Page::Uses));
        assert_eq!(Page::parse("blog"), None);
    }
}
