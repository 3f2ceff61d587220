//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use std::time::Duration;

use super::state::{ActiveView, AppState};
use crate::config::TYPEWRITER_SPEEDS_MS;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle; reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }

    /// Current value as shown next to the label (`None` for submenus).
    pub fn display_value(&self, state: &AppState) -> Option<String> {
        match self {
            Self::Submenu { .. } => None,
            Self::Toggle { get, .. } => Some(if get(state) { "[ON]" } else { "[OFF]" }.into()),
            Self::Cycle { value, .. } => Some(value(state)),
        }
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Cycle {
        label: "Theme",
        value: |s| s.theme.state().to_string(),
        cycle: |s| {
            s.theme.toggle();
        },
    },
    SettingsItem::Cycle {
        label: "Typewriter Speed",
        value: |s| format!("{}ms", s.config.typewriter_speed_ms),
        cycle: |s| {
            let idx = TYPEWRITER_SPEEDS_MS
                .iter()
                .position(|&v| v == s.config.typewriter_speed_ms)
                .unwrap_or(1);
            let next = TYPEWRITER_SPEEDS_MS[(idx + 1) % TYPEWRITER_SPEEDS_MS.len()];
            s.config.typewriter_speed_ms = next;
            s.typewriter.set_speed(Duration::from_millis(next));
            s.save_config();
            s.status_message = Some(format!("Typewriter speed: {next}ms"));
        },
    },
    SettingsItem::Toggle {
        label: "Fetch Stats on Launch",
        get: |s| s.config.fetch_stats,
        set: |s, v| {
            s.config.fetch_stats = v;
            s.save_config();
            s.status_message = Some("Takes effect on next launch".into());
        },
    },
];
