//! Light/dark appearance: startup resolution, persistence and change propagation.
//!
//! [`ThemeController`] is the single source of truth for the session's
//! [`ThemeState`].  It is constructed once at startup and handed to the app
//! state; widgets never read a global flag, they subscribe or read
//! [`ThemeController::state`].
//!
//! Resolution order on startup:
//!
//! 1. the persisted `theme` key in the [`PreferenceStore`];
//! 2. the host's colour-scheme preference ([`SystemAppearance`]);
//! 3. if either lookup *fails*, the hardcoded default [`ThemeState::Light`].

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Weak};
use std::time::SystemTime;

use thiserror::Error;

/// The key written to the preferences file.
pub const THEME_KEY: &str = "theme";

// ───────────────────────────────────────── state ─────────────

/// Current appearance selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeState {
    #[default]
    Light,
    Dark,
}

impl ThemeState {
    pub fn toggled(self) -> Self {
        match self {
            ThemeState::Light => ThemeState::Dark,
            ThemeState::Dark => ThemeState::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeState::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeState::Light => "light",
            ThemeState::Dark => "dark",
        }
    }

    /// Parse a stored value.  Surrounding quotes and case are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "light" => Some(ThemeState::Light),
            "dark" => Some(ThemeState::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ThemeError {
    /// Storage or host preference could not be read.  Always recoverable.
    #[error("theme preference unavailable: {0}")]
    PreferenceUnavailable(String),
}

// ───────────────────────────────────────── sources ───────────

/// Where the user's explicit choice lives between sessions.
pub trait PreferenceStore: Send {
    /// `Ok(None)` means "no choice recorded yet".
    fn load(&self) -> Result<Option<ThemeState>, ThemeError>;

    fn save(&mut self, state: ThemeState) -> Result<(), ThemeError>;

    /// Opaque change marker (e.g. file mtime).  Stores that cannot be
    /// modified behind the controller's back return `None`.
    fn revision(&self) -> Option<SystemTime> {
        None
    }
}

/// Host-reported colour-scheme preference.
pub trait SystemAppearance {
    fn prefers_dark(&self) -> Result<bool, ThemeError>;
}

/// `theme = dark` stored in a small key-value file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Option<ThemeState>, ThemeError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ThemeError::PreferenceUnavailable(format!(
                    "{}: {e}",
                    self.path.display()
                )))
            }
        };

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if key.trim() != THEME_KEY {
                continue;
            }
            return match ThemeState::parse(value) {
                Some(state) => Ok(Some(state)),
                None => {
                    tracing::warn!(value = value.trim(), "ignoring unrecognised stored theme");
                    Ok(None)
                }
            };
        }
        Ok(None)
    }

    fn save(&mut self, state: ThemeState) -> Result<(), ThemeError> {
        let unavailable =
            |e: io::Error| ThemeError::PreferenceUnavailable(format!("{}: {e}", self.path.display()));
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(unavailable)?;
        }
        std::fs::write(&self.path, format!("# folio preferences\n{THEME_KEY} = \"{state}\"\n"))
            .map_err(unavailable)
    }

    fn revision(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }
}

/// Reads the terminal's `COLORFGBG` hint (`"fg;bg"` or `"fg;default;bg"`).
///
/// Background palette indices 0–6 and 8 are the dark half of the 16-colour
/// table; anything else is treated as a light background.
#[derive(Debug, Clone, Default)]
pub struct TerminalAppearance {
    colorfgbg: Option<String>,
}

impl TerminalAppearance {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var("COLORFGBG").ok())
    }

    pub fn from_value(colorfgbg: Option<String>) -> Self {
        Self { colorfgbg }
    }
}

impl SystemAppearance for TerminalAppearance {
    fn prefers_dark(&self) -> Result<bool, ThemeError> {
        let raw = self
            .colorfgbg
            .as_deref()
            .ok_or_else(|| ThemeError::PreferenceUnavailable("COLORFGBG not set".into()))?;
        let bg: u8 = raw
            .rsplit(';')
            .next()
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| {
                ThemeError::PreferenceUnavailable(format!("unparseable COLORFGBG {raw:?}"))
            })?;
        Ok(matches!(bg, 0..=6 | 8))
    }
}

// ───────────────────────────────────────── observers ─────────

type Observer = Box<dyn FnMut(ThemeState) + Send>;

#[derive(Default)]
struct Observers {
    next_id: u64,
    list: Vec<(u64, Observer)>,
}

/// Registration handle returned by [`ThemeController::subscribe`].
///
/// The observer stays registered until this handle is dropped.
#[must_use = "dropping a Subscription immediately unregisters the observer"]
pub struct Subscription {
    id: u64,
    observers: Weak<Mutex<Observers>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade() {
            let mut guard = observers.lock().unwrap_or_else(|e| e.into_inner());
            guard.list.retain(|(id, _)| *id != self.id);
        }
    }
}

// ───────────────────────────────────────── controller ────────

/// Owns the session's [`ThemeState`] and notifies observers on change.
pub struct ThemeController {
    state: ThemeState,
    store: Box<dyn PreferenceStore>,
    observers: Arc<Mutex<Observers>>,
    /// Store revision as of our last read or write.
    seen_revision: Option<SystemTime>,
}

impl ThemeController {
    /// Resolve the starting theme.  Never fails: any lookup error degrades
    /// to [`ThemeState::Light`] and is logged.
    pub fn initialize(store: Box<dyn PreferenceStore>, appearance: &dyn SystemAppearance) -> Self {
        let state = match resolve(store.as_ref(), appearance) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("{e}; falling back to {}", ThemeState::default());
                ThemeState::default()
            }
        };
        let seen_revision = store.revision();
        tracing::info!(theme = %state, "theme initialized");
        Self {
            state,
            store,
            observers: Arc::new(Mutex::new(Observers::default())),
            seen_revision,
        }
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    /// Flip the theme and persist the new value.  A failed write is logged;
    /// the in-session state still changes.
    pub fn toggle(&mut self) -> ThemeState {
        self.state = self.state.toggled();
        if let Err(e) = self.store.save(self.state) {
            tracing::warn!("could not persist theme: {e}");
        }
        self.seen_revision = self.store.revision();
        self.notify();
        self.state
    }

    /// Apply `state` for this session only, without persisting it.
    pub fn set_session(&mut self, state: ThemeState) {
        if state != self.state {
            self.state = state;
            self.notify();
        }
    }

    /// Pick up a change made to the store by someone else (another
    /// instance rewriting the preferences file).  Returns `true` when the
    /// theme changed.  The value is not written back.
    pub fn sync_external(&mut self) -> bool {
        let revision = self.store.revision();
        if revision.is_none() || revision == self.seen_revision {
            return false;
        }
        self.seen_revision = revision;
        match self.store.load() {
            Ok(Some(state)) if state != self.state => {
                tracing::debug!(theme = %state, "theme changed externally");
                self.state = state;
                self.notify();
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::debug!("external theme sync skipped: {e}");
                false
            }
        }
    }

    /// Register `observer` for every subsequent change.
    ///
    /// Observers run synchronously on the caller's thread and must not call
    /// back into this controller.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(ThemeState) + Send + 'static,
    {
        let mut guard = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        let id = guard.next_id;
        guard.next_id += 1;
        guard.list.push((id, Box::new(observer)));
        Subscription {
            id,
            observers: Arc::downgrade(&self.observers),
        }
    }

    fn notify(&self) {
        let mut guard = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        for (_, observer) in guard.list.iter_mut() {
            observer(self.state);
        }
    }
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn resolve(
    store: &dyn PreferenceStore,
    appearance: &dyn SystemAppearance,
) -> Result<ThemeState, ThemeError> {
    if let Some(state) = store.load()? {
        return Ok(state);
    }
    Ok(if appearance.prefers_dark()? {
        ThemeState::Dark
    } else {
        ThemeState::Light
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    /// Shared slot so a "next session" can reopen the same storage.
    #[derive(Clone, Default)]
    struct MemoryStore {
        slot: Arc<Mutex<Option<ThemeState>>>,
        broken: bool,
    }

    impl PreferenceStore for MemoryStore {
        fn load(&self) -> Result<Option<ThemeState>, ThemeError> {
            if self.broken {
                return Err(ThemeError::PreferenceUnavailable("sandboxed".into()));
            }
            Ok(*self.slot.lock().unwrap())
        }

        fn save(&mut self, state: ThemeState) -> Result<(), ThemeError> {
            if self.broken {
                return Err(ThemeError::PreferenceUnavailable("sandboxed".into()));
            }
            *self.slot.lock().unwrap() = Some(state);
            Ok(())
        }
    }

    struct FakeAppearance {
        dark: Option<bool>,
        calls: Cell<u32>,
    }

    impl FakeAppearance {
        fn new(dark: Option<bool>) -> Self {
            Self { dark, calls: Cell::new(0) }
        }
    }

    impl SystemAppearance for FakeAppearance {
        fn prefers_dark(&self) -> Result<bool, ThemeError> {
            self.calls.set(self.calls.get() + 1);
            self.dark
                .ok_or_else(|| ThemeError::PreferenceUnavailable("no signal".into()))
        }
    }

    #[test]
    fn no_stored_preference_follows_os_dark() {
        let os = FakeAppearance::new(Some(true));
        let theme = ThemeController::initialize(Box::new(MemoryStore::default()), &os);
        assert_eq!(theme.state(), ThemeState::Dark);
    }

    #[test]
    fn stored_preference_beats_os() {
        let store = MemoryStore::default();
        *store.slot.lock().unwrap() = Some(ThemeState::Light);
        let os = FakeAppearance::new(Some(true));
        let theme = ThemeController::initialize(Box::new(store), &os);
        assert_eq!(theme.state(), ThemeState::Light);
        assert_eq!(os.calls.get(), 0);
    }

    #[test]
    fn lookup_failures_fall_back_to_light() {
        let broken = MemoryStore { broken: true, ..Default::default() };
        let os = FakeAppearance::new(Some(true));
        assert_eq!(
            ThemeController::initialize(Box::new(broken), &os).state(),
            ThemeState::Light
        );

        let os = FakeAppearance::new(None);
        assert_eq!(
            ThemeController::initialize(Box::new(MemoryStore::default()), &os).state(),
            ThemeState::Light
        );
    }

    #[test]
    fn toggle_twice_restores_and_persists_across_sessions() {
        let store = MemoryStore::default();
        let os = FakeAppearance::new(Some(false));
        let mut theme = ThemeController::initialize(Box::new(store.clone()), &os);
        assert_eq!(theme.toggle(), ThemeState::Dark);
        assert_eq!(theme.toggle(), ThemeState::Light);
        theme.toggle();

        let os_next = FakeAppearance::new(Some(false));
        let next = ThemeController::initialize(Box::new(store), &os_next);
        assert_eq!(next.state(), ThemeState::Dark);
        assert_eq!(os_next.calls.get(), 0);
    }

    #[test]
    fn toggle_survives_broken_storage() {
        let broken = MemoryStore { broken: true, ..Default::default() };
        let mut theme =
            ThemeController::initialize(Box::new(broken), &FakeAppearance::new(None));
        assert_eq!(theme.toggle(), ThemeState::Dark);
    }

    #[test]
    fn observers_see_changes_until_dropped() {
        let mut theme = ThemeController::initialize(
            Box::new(MemoryStore::default()),
            &FakeAppearance::new(Some(false)),
        );
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = theme.subscribe(move |s| sink.lock().unwrap().push(s));

        theme.toggle();
        theme.set_session(ThemeState::Light);
        theme.set_session(ThemeState::Light);
        drop(sub);
        theme.toggle();

        assert_eq!(*seen.lock().unwrap(), vec![ThemeState::Dark, ThemeState::Light]);
    }

    #[test]
    fn file_store_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FilePreferenceStore::new(dir.path().join("nested").join("preferences"));
        assert_eq!(store.load().unwrap(), None);
        store.save(ThemeState::Dark).unwrap();
        assert_eq!(store.load().unwrap(), Some(ThemeState::Dark));
        let written = std::fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("theme = \"dark\""));
    }

    #[test]
    fn file_store_ignores_garbage_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences");
        std::fs::write(&path, "theme = sepia\n").unwrap();
        assert_eq!(FilePreferenceStore::new(&path).load().unwrap(), None);
    }

    #[test]
    fn external_file_change_is_observed_but_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences");
        let mut store = FilePreferenceStore::new(&path);
        store.save(ThemeState::Light).unwrap();

        let mut theme =
            ThemeController::initialize(Box::new(store), &FakeAppearance::new(None));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = theme.subscribe(move |s| sink.lock().unwrap().push(s));
        assert!(!theme.sync_external());

        std::fs::write(&path, "theme = dark\n").unwrap();
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(5)).unwrap();

        assert!(theme.sync_external());
        assert_eq!(theme.state(), ThemeState::Dark);
        assert_eq!(*seen.lock().unwrap(), vec![ThemeState::Dark]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "theme = dark\n");
        assert!(!theme.sync_external());
    }

    #[test]
    fn colorfgbg_classification() {
        let dark = |v: &str| TerminalAppearance::from_value(Some(v.into())).prefers_dark();
        assert!(dark("15;0").unwrap());
        assert!(!dark("0;15").unwrap());
        assert!(!dark("0;default;7").unwrap());
        assert!(dark("7;default;8").unwrap());
        assert!(dark("garbage").is_err());
        assert!(TerminalAppearance::from_value(None).prefers_dark().is_err());
    }
}
