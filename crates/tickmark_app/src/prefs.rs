//! Preference persistence
//!
//! Preferences are plain string key/value pairs:
//!
//! | key                  | value                         |
//! |----------------------|-------------------------------|
//! | `colorIndex-light`   | palette index for light mode  |
//! | `colorIndex-dark`    | palette index for dark mode   |
//! | `hourFormat`         | `"12"` or `"24"`              |
//!
//! Reads never fail upward: missing, malformed or out-of-range values are
//! treated as absent and the caller falls back to its default.

use crate::error::PrefsError;
use crate::state::{ClockAction, ClockState, StoredColors};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use tickmark_core::Change;
use tickmark_theme::ColorScheme;

pub type Result<T> = std::result::Result<T, PrefsError>;

pub const HOUR_FORMAT_KEY: &str = "hourFormat";

/// Flat keys from older releases, read at startup when the current keys are
/// absent. A legacy color is copied to the startup scheme's key.
pub const LEGACY_COLOR_INDEX_KEY: &str = "smallClockColorIndex";
pub const LEGACY_HOUR_FORMAT_KEY: &str = "smallClockHourFormat";

/// Key holding the color index chosen for `scheme`
pub fn color_index_key(scheme: ColorScheme) -> String {
    format!("colorIndex-{}", scheme.id())
}

/// String key/value backend
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process backend; contents are lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<FxHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat string table kept in a TOML file.
///
/// The file is loaded once on open; every `set` rewrites it through a
/// sibling temp file and a rename so a crash never leaves a torn file.
#[derive(Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl TomlFileStore {
    /// Open `path`, starting empty if the file is missing or unreadable as TOML
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => parse_table(&path, &text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no preference file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(source) => return Err(PrefsError::Io { path, source }),
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_out(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let text = toml::to_string(values)?;
        let io_err = |source: std::io::Error| PrefsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, text).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

fn parse_table(path: &Path, text: &str) -> BTreeMap<String, String> {
    let table: toml::Table = match toml::from_str(text) {
        Ok(table) => table,
        Err(err) => {
            tracing::warn!("ignoring corrupt preference file {}: {err}", path.display());
            return BTreeMap::new();
        }
    };

    table
        .into_iter()
        .filter_map(|(key, value)| match value {
            toml::Value::String(s) => Some((key, s)),
            toml::Value::Integer(i) => Some((key, i.to_string())),
            other => {
                tracing::debug!("skipping non-scalar preference {key} = {other}");
                None
            }
        })
        .collect()
}

impl KeyValueStore for TomlFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap();
        if values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        values.insert(key.to_string(), value.to_string());
        self.write_out(&values)
    }
}

/// Typed access to the clock's preferences over any [`KeyValueStore`]
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Raw read; backend errors are logged and read as absent
    pub fn get(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("preference read of {key} failed: {err}");
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        tracing::debug!(key, value, "persisting preference");
        self.backend.set(key, value)
    }

    /// Persisted color for `scheme`, if present, numeric and `< palette_len`
    pub fn color_index(&self, scheme: ColorScheme, palette_len: usize) -> Option<usize> {
        self.read_index(&color_index_key(scheme), palette_len)
    }

    pub fn set_color_index(&self, scheme: ColorScheme, index: usize) -> Result<()> {
        self.set(&color_index_key(scheme), &index.to_string())
    }

    pub fn hour12(&self) -> Option<bool> {
        self.get(HOUR_FORMAT_KEY)
            .as_deref()
            .and_then(parse_hour_format)
    }

    pub fn set_hour12(&self, hour12: bool) -> Result<()> {
        self.set(HOUR_FORMAT_KEY, if hour12 { "12" } else { "24" })
    }

    /// Color to start with: the scheme key, then the legacy flat key.
    ///
    /// A legacy value is written to the scheme key so later scheme switches
    /// find it there.
    pub fn startup_color_index(&self, scheme: ColorScheme, palette_len: usize) -> Option<usize> {
        if let Some(index) = self.color_index(scheme, palette_len) {
            return Some(index);
        }
        let legacy = self.read_index(LEGACY_COLOR_INDEX_KEY, palette_len)?;
        tracing::info!(
            "migrating {LEGACY_COLOR_INDEX_KEY}={legacy} to {}",
            color_index_key(scheme)
        );
        if let Err(err) = self.set_color_index(scheme, legacy) {
            tracing::warn!("could not migrate {LEGACY_COLOR_INDEX_KEY}: {err}");
        }
        Some(legacy)
    }

    /// Hour format to start with: `hourFormat`, then the legacy flat key
    pub fn startup_hour12(&self) -> Option<bool> {
        self.hour12().or_else(|| {
            self.get(LEGACY_HOUR_FORMAT_KEY)
                .as_deref()
                .and_then(parse_hour_format)
        })
    }

    fn read_index(&self, key: &str, palette_len: usize) -> Option<usize> {
        let raw = self.get(key)?;
        match raw.trim().parse::<usize>() {
            Ok(index) if index < palette_len => Some(index),
            Ok(index) => {
                tracing::debug!("{key} = {index} is outside a palette of {palette_len}");
                None
            }
            Err(_) => {
                tracing::debug!("{key} = {raw:?} is not an index");
                None
            }
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

impl StoredColors for PreferenceStore {
    fn stored_color(&self, scheme: ColorScheme) -> Option<usize> {
        // The reducer range-checks against its own palette.
        self.color_index(scheme, usize::MAX)
    }
}

fn parse_hour_format(value: &str) -> Option<bool> {
    match value.trim() {
        "12" => Some(true),
        "24" => Some(false),
        _ => None,
    }
}

/// Store subscriber that writes preference changes out after each dispatch.
///
/// A color change is only persisted when the scheme did not change in the
/// same transition; a scheme switch loads a color, it does not choose one.
pub fn persistence_observer(
    prefs: Arc<PreferenceStore>,
) -> impl Fn(&Change<'_, ClockState, ClockAction>) + Send + Sync + 'static {
    move |change| {
        if change.is_noop() {
            return;
        }
        let (previous, current) = (change.previous, change.current);

        if previous.scheme == current.scheme && previous.color_index != current.color_index {
            if let Err(err) = prefs.set_color_index(current.scheme, current.color_index) {
                tracing::warn!("could not persist color for {}: {err}", current.scheme);
            }
        }
        if previous.hour12 != current.hour12 {
            if let Err(err) = prefs.set_hour12(current.hour12) {
                tracing::warn!("could not persist hour format: {err}");
            }
        }
    }
}
