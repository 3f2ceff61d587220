//! A terminal portfolio: profile pages, project showcase, and live
//! coding statistics.
//!
//! Run the binary to launch the TUI.  Run with `--print-config-path` to see
//! where settings are stored.

mod app;
mod config;
mod core;
mod shell;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tokio::sync::mpsc;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState, Page},
    stats_runtime::{self, StatsUpdate},
};
use crate::core::content::SiteContent;
use crate::core::theme::{FilePreferenceStore, TerminalAppearance, ThemeController, ThemeState};
use crate::ui::{
    footer::Footer,
    layout::AppLayout,
    nav::{nav_geometry, NavBar},
    pages, popup,
};

const TICK_RATE: Duration = Duration::from_millis(100);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = "Terminal portfolio")]
struct Cli {
    /// Site content file (TOML); the built-in profile is used otherwise.
    #[arg(long)]
    content: Option<PathBuf>,

    /// Page to open on: home, about, projects or uses.
    #[arg(long, value_parser = parse_page, default_value = "home")]
    page: Page,

    /// Do not fetch coding statistics.
    #[arg(long)]
    offline: bool,

    /// Use this theme for this session without saving it.
    #[arg(long, value_parser = parse_theme)]
    theme: Option<ThemeState>,

    /// Print the config file path and exit.
    #[arg(long = "print-config-path")]
    print_config_path: bool,
}

fn parse_page(s: &str) -> Result<Page, String> {
    Page::parse(s).ok_or_else(|| format!("unknown page `{s}`"))
}

fn parse_theme(s: &str) -> Result<ThemeState, String> {
    ThemeState::parse(s).ok_or_else(|| format!("unknown theme `{s}` (expected light or dark)"))
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (silent unless RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute the TUI
        .init();

    let cli = Cli::parse();

    if cli.print_config_path {
        println!("{}", config::config_path().display());
        return Ok(());
    }

    // ── content, config, theme ───────────────────────────────
    let content = match &cli.content {
        Some(path) => SiteContent::load(path)?,
        None => SiteContent::builtin().context("built-in site content is invalid")?,
    };
    let user_config = config::AppConfig::load();

    let store = FilePreferenceStore::new(config::preferences_path());
    tracing::debug!(path = %store.path().display(), "theme preference store");
    let mut theme = ThemeController::initialize(Box::new(store), &TerminalAppearance::from_env());
    if let Some(session_theme) = cli.theme {
        theme.set_session(session_theme);
    }

    // Theme changes reach the palette only through this subscription.
    let (theme_tx, mut theme_rx) = mpsc::unbounded_channel::<ThemeState>();
    let _theme_subscription = theme.subscribe(move |t| {
        let _ = theme_tx.send(t);
    });

    let mut state = AppState::new(content, theme, user_config);
    state.config_path = Some(config::config_path());
    state.set_page(cli.page);

    // ── background stats fetch ───────────────────────────────
    let (stats_tx, mut stats_rx) = mpsc::unbounded_channel::<StatsUpdate>();
    let mut fetching = state.config.fetch_stats && !cli.offline;
    if fetching {
        match stats_runtime::build_client() {
            Ok(client) => stats_runtime::spawn_stats_fetch(&stats_tx, &client, &state.config),
            Err(e) => {
                tracing::warn!("http client unavailable: {e}");
                fetching = false;
            }
        }
    }
    stats_runtime::mark_unfetched(&mut state, fetching);
    drop(stats_tx);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout_handle = stdout();
    execute!(stdout_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, &mut theme_rx, &mut stats_rx).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    theme_rx: &mut mpsc::UnboundedReceiver<ThemeState>,
    stats_rx: &mut mpsc::UnboundedReceiver<StatsUpdate>,
) -> Result<()> {
    let mut events = spawn_event_reader(TICK_RATE);

    loop {
        draw(terminal, state)?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Tick(elapsed) => {
                        state.tick = state.tick.wrapping_add(1);
                        state.typewriter.advance(elapsed);
                        state.theme.sync_external();
                    }
                }
            }

            Some(theme) = theme_rx.recv() => {
                state.apply_theme(theme);
            }

            Some(update) = stats_rx.recv() => {
                stats_runtime::apply_stats_update(state, update);
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

fn draw(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, state: &mut AppState) -> Result<()> {
    let year = chrono::Local::now().year();
    let mut drawn = None;

    let view: &AppState = state;
    terminal.draw(|frame| {
        let area = frame.area();
        let layout = AppLayout::from_area(area);
        let palette = &view.palette;

        frame.render_widget(Paragraph::new("").style(palette.base_style()), area);
        frame.render_widget(
            NavBar {
                owner: &view.content.owner,
                page: view.page,
                palette,
            },
            layout.nav_area,
        );
        let page_frame = pages::draw_page(frame, layout.body_area, view);
        frame.render_widget(
            Footer {
                links: &view.content.footer_links,
                owner: &view.content.owner,
                year,
                palette,
            },
            layout.footer_area,
        );

        let hint = view.config.status_bar_hint();
        let status_text = match view.active_view {
            ActiveView::Page => view.status_message.as_deref().unwrap_or(&hint),
            ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => "",
        };
        frame.render_widget(
            Paragraph::new(status_text).style(palette.status_bar_style()),
            layout.status_area,
        );

        match view.active_view {
            ActiveView::SettingsMenu => {
                frame.render_widget(popup::SettingsPopup { state: view }, area);
            }
            ActiveView::ControlsSubmenu => {
                frame.render_widget(
                    popup::ControlsPopup {
                        config: &view.config,
                        selected: view.controls_selected,
                        awaiting_rebind: view.awaiting_rebind,
                        palette,
                    },
                    area,
                );
            }
            ActiveView::Page => {}
        }

        drawn = Some((layout, page_frame));
    })?;

    let Some((layout, page_frame)) = drawn else {
        return Ok(());
    };

    // Record what landed where for mouse hit-testing, and keep the scroll
    // offset within the page.
    let nav = nav_geometry(layout.nav_area, &state.content.owner);
    state.hits.tabs = nav.tabs;
    state.hits.theme_toggle = Some(nav.theme_toggle);
    state.hits.carousel = page_frame.carousel;
    state.hits.footer_links = Footer {
        links: &state.content.footer_links,
        owner: &state.content.owner,
        year,
        palette: &state.palette,
    }
    .link_areas(layout.footer_area);
    state.hits.body = Some(layout.body_area);
    let max_scroll = page_frame.max_scroll(layout.body_area.height);
    let scroll = state.scroll_mut();
    *scroll = (*scroll).min(max_scroll);

    Ok(())
}
