//! User configuration: keybindings and stats endpoints, persisted to disk.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/folio/config.toml` (default `~/.config/folio/config.toml`).
//! The theme choice lives next to it in `preferences`, owned by the theme
//! store rather than by this module.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use url::Url;

const DEFAULT_DAILY_ENDPOINT: &str = "https://wakatime.com/share/@d433fbcd-a22c-46e5-a337-915af96350af/de46c6b9-0541-461d-a875-34f320f676c0.json";
const DEFAULT_LANGUAGES_ENDPOINT: &str = "https://wakatime.com/share/@d433fbcd-a22c-46e5-a337-915af96350af/36dd175a-87f1-40d1-9f96-1597ea8bab62.json";
const DEFAULT_SKILLS_ENDPOINT: &str = "https://wakatime.com/share/@d433fbcd-a22c-46e5-a337-915af96350af/85f200f4-ca48-4103-af6c-05702458ffe1.json";

/// Typewriter speeds offered by the settings menu.
pub const TYPEWRITER_SPEEDS_MS: &[u64] = &[30, 50, 80, 120];

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NextPage,
    PrevPage,
    ScrollUp,
    ScrollDown,
    CycleFocus,
    OpenLink,
    ToggleTheme,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::NextPage,
        Action::PrevPage,
        Action::ScrollUp,
        Action::ScrollDown,
        Action::CycleFocus,
        Action::OpenLink,
        Action::ToggleTheme,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::NextPage => "Next Page",
            Action::PrevPage => "Previous Page",
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::CycleFocus => "Focus Carousel",
            Action::OpenLink => "Open Link",
            Action::ToggleTheme => "Toggle Theme",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::NextPage => "next_page",
            Action::PrevPage => "prev_page",
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::CycleFocus => "cycle_focus",
            Action::OpenLink => "open_link",
            Action::ToggleTheme => "toggle_theme",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
        .union(KeyModifiers::ALT)
        .union(KeyModifiers::SHIFT);

    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Modifiers that take part in matching.  SHIFT is already folded into
    /// the case of a character key (`?`, `Q`), so it is ignored there.
    fn mask_for(code: KeyCode) -> KeyModifiers {
        let mut mask = Self::MODIFIER_MASK;
        if let KeyCode::Char(_) = code {
            mask.remove(KeyModifiers::SHIFT);
        }
        mask
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = Self::mask_for(self.code);
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & Self::mask_for(event.code),
        }
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"Alt+←"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "Shift+Tab".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Left"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "BackTab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        // Single characters keep their case: `Q` and `q` are different keys.
        if key_part.chars().count() == 1 {
            let c = key_part.chars().next()?;
            return Some(KeyBind { code: KeyCode::Char(c), modifiers });
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') => KeyCode::F(s[1..].parse().ok()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration (keybindings, feed endpoints, animation speed).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Fetch coding stats on launch.
    pub fetch_stats: bool,
    /// Milliseconds per typed/deleted character in the home headline.
    pub typewriter_speed_ms: u64,
    pub daily_endpoint: Option<Url>,
    pub languages_endpoint: Option<Url>,
    pub skills_endpoint: Option<Url>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            fetch_stats: true,
            typewriter_speed_ms: 50,
            daily_endpoint: Url::parse(DEFAULT_DAILY_ENDPOINT).ok(),
            languages_endpoint: Url::parse(DEFAULT_LANGUAGES_ENDPOINT).ok(),
            skills_endpoint: Url::parse(DEFAULT_SKILLS_ENDPOINT).ok(),
        }
    }
}

impl AppConfig {
    /// Hard-coded default keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(NextPage, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(PrevPage, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(CycleFocus, vec![KeyBind::new(Tab, n)]);
        m.insert(OpenLink, vec![KeyBind::new(Enter, n)]);
        m.insert(ToggleTheme, vec![KeyBind::new(Char('t'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match (shouldn't happen after conflict resolution), the one with
    /// the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Add a binding for `action`.  Removes this key from any other action
    /// to prevent conflicts, then appends it to `action`'s bindings.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    /// Leave `action` unbound.  The empty entry is kept so it survives a
    /// save/load cycle instead of reverting to the default.
    pub fn clear_bindings(&mut self, action: Action) {
        self.bindings.insert(action, Vec::new());
    }

    /// Restore all bindings to the built-in defaults.
    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"→/l"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: page | {}: carousel | {}: open | {}: theme | {}: settings",
            self.short_binding(Action::PrevPage),
            self.short_binding(Action::NextPage),
            self.short_binding(Action::CycleFocus),
            self.short_binding(Action::OpenLink),
            self.short_binding(Action::ToggleTheme),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("could not read {}: {e}", path.display());
                }
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            let unquoted = value.trim_matches('"');

            match key {
                "fetch_stats" => {
                    config.fetch_stats = value == "true";
                    continue;
                }
                "typewriter_speed_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.typewriter_speed_ms = v.clamp(10, 500);
                    }
                    continue;
                }
                "daily_endpoint" | "languages_endpoint" | "skills_endpoint" => {
                    // An empty value disables that feed.
                    let parsed = if unquoted.is_empty() {
                        None
                    } else {
                        match Url::parse(unquoted) {
                            Ok(url) => Some(url),
                            Err(e) => {
                                tracing::warn!("ignoring {key}: {e}");
                                continue;
                            }
                        }
                    };
                    match key {
                        "daily_endpoint" => config.daily_endpoint = parsed,
                        "languages_endpoint" => config.languages_endpoint = parsed,
                        _ => config.skills_endpoint = parsed,
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            // An empty value means the action was deliberately unbound.
            let parsed: Vec<KeyBind> = value
                .split(',')
                .map(|part| part.trim().trim_matches('"'))
                .filter(|part| !part.is_empty())
                .filter_map(KeyBind::parse)
                .collect();
            if parsed.is_empty() && !value.trim_matches('"').trim().is_empty() {
                tracing::warn!("ignoring {key}: no valid keys in {value:?}");
                continue;
            }
            config.bindings.insert(action, parsed);
        }

        config
    }

    fn serialise(&self) -> String {
        let endpoint = |u: &Option<Url>| u.as_ref().map(Url::as_str).unwrap_or("").to_string();
        let mut lines = vec![
            "# folio configuration".to_string(),
            String::new(),
            "# Stats".to_string(),
            format!("fetch_stats = {}", self.fetch_stats),
            format!("daily_endpoint = \"{}\"", endpoint(&self.daily_endpoint)),
            format!("languages_endpoint = \"{}\"", endpoint(&self.languages_endpoint)),
            format!("skills_endpoint = \"{}\"", endpoint(&self.skills_endpoint)),
            String::new(),
            "# Home page".to_string(),
            format!("typewriter_speed_ms = {}", self.typewriter_speed_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            let keys: Vec<String> = self
                .bindings
                .get(&action)
                .map(|binds| binds.iter().map(|b| b.to_config_string()).collect())
                .unwrap_or_default();
            lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    base.join(env!("CARGO_PKG_NAME"))
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Return the persisted theme preference path.
pub fn preferences_path() -> PathBuf {
    config_dir().join("preferences")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings_resolve() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::Right)), Some(Action::NextPage));
        assert_eq!(config.match_key(key(KeyCode::Char('t'))), Some(Action::ToggleTheme));
        assert_eq!(config.match_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn rebinding_steals_key_from_other_action() {
        let mut config = AppConfig::default();
        config.add_binding(Action::Quit, KeyBind::new(KeyCode::Char('t'), KeyModifiers::NONE));
        assert_eq!(config.match_key(key(KeyCode::Char('t'))), Some(Action::Quit));
        assert_eq!(config.display_bindings(Action::ToggleTheme), "unbound");
    }

    #[test]
    fn key_strings_parse() {
        let bind = KeyBind::parse("Ctrl+Alt+Left").unwrap();
        assert_eq!(bind.code, KeyCode::Left);
        assert!(bind.modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT));
        assert_eq!(KeyBind::parse("Q").unwrap().code, KeyCode::Char('Q'));
        assert_eq!(KeyBind::parse("F5").unwrap().code, KeyCode::F(5));
        assert!(KeyBind::parse("Hyper+x").is_none());
    }

    #[test]
    fn settings_and_bindings_parse() {
        let config = AppConfig::parse_config(
            "fetch_stats = false\n\
             typewriter_speed_ms = 5\n\
             daily_endpoint = \"https://example.com/daily.json\"\n\
             skills_endpoint = \"not a url\"\n\
             next_page = n, Shift+Right\n",
        );
        assert!(!config.fetch_stats);
        assert_eq!(config.typewriter_speed_ms, 10);
        assert_eq!(
            config.daily_endpoint.as_ref().map(Url::as_str),
            Some("https://example.com/daily.json")
        );
        assert!(config.skills_endpoint.is_some());
        assert_eq!(config.match_key(key(KeyCode::Char('n'))), Some(Action::NextPage));
        assert_eq!(config.match_key(key(KeyCode::Right)), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio").join("config.toml");
        let mut config = AppConfig::default();
        config.fetch_stats = false;
        config.typewriter_speed_ms = 80;
        config.add_binding(Action::OpenLink, KeyBind::new(KeyCode::Char('o'), KeyModifiers::CONTROL));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert!(!loaded.fetch_stats);
        assert_eq!(loaded.typewriter_speed_ms, 80);
        assert_eq!(loaded.bindings, config.bindings);
        assert_eq!(loaded.daily_endpoint, config.daily_endpoint);
    }

    #[test]
    fn shifted_characters_match_unshifted_binding() {
        let config = AppConfig::default();
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(config.match_key(question), Some(Action::OpenSettings));
        let bind = KeyBind::from_key_event(question);
        assert_eq!(bind.display(), "?");
    }

    #[test]
    fn empty_endpoint_disables_feed() {
        let mut config = AppConfig::default();
        config.languages_endpoint = None;
        let reloaded = AppConfig::parse_config(&config.serialise());
        assert_eq!(reloaded.languages_endpoint, None);
        assert!(reloaded.daily_endpoint.is_some());
    }

    #[test]
    fn cleared_binding_stays_unbound_after_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = AppConfig::default();
        config.clear_bindings(Action::ToggleTheme);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.display_bindings(Action::ToggleTheme), "unbound");
        assert_eq!(loaded.match_key(key(KeyCode::Char('t'))), None);
    }

    #[test]
    fn stolen_binding_moves_for_good_after_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = AppConfig::default();
        config.add_binding(Action::Quit, KeyBind::new(KeyCode::Char('t'), KeyModifiers::NONE));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.display_bindings(Action::ToggleTheme), "unbound");
        assert_eq!(loaded.display_bindings(Action::Quit), "q/t");
        assert_eq!(loaded.match_key(key(KeyCode::Char('t'))), Some(Action::Quit));
    }

    #[test]
    fn unparseable_binding_keeps_default() {
        let config = AppConfig::parse_config("quit = Hyper+q\n");
        assert_eq!(config.display_bindings(Action::Quit), "q");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("nope.toml"));
        assert!(loaded.fetch_stats);
        assert_eq!(loaded.bindings, AppConfig::default_bindings());
    }
}
