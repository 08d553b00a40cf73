//! Persisted UI preferences
//!
//! Values are stored as plain strings under fixed keys so the browser's
//! `localStorage` and the CLI's JSON file hold the same thing.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::error::DashboardError;
use super::filter::{CityFilter, ConditionFilter};

pub const DARK_MODE_KEY: &str = "weatherDashboardDarkMode";
pub const CITY_KEY: &str = "weatherDashboardCity";
pub const CONDITION_KEY: &str = "weatherDashboardCondition";

/// String key/value persistence
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError>;
}

/// In-process store, used by tests and as a fallback when nothing else is available
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
    values: BTreeMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open (or start) a store at `path`; an unreadable file starts empty
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable preferences file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        debug!(path = %path.display(), entries = values.len(), "Preferences loaded");
        Self { path, values }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        self.values.insert(key.to_string(), value.to_string());
        let text = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, text)
            .map_err(|e| DashboardError::Storage(format!("{}: {e}", self.path.display())))
    }
}

/// Preferences as read at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub city: CityFilter,
    pub condition: ConditionFilter,
}

impl Preferences {
    /// Read all three values; a missing city is written back as the default
    pub fn load(store: &mut dyn PreferenceStore) -> Self {
        let dark_mode = store.get(DARK_MODE_KEY).as_deref() == Some("true");
        let city = match store.get(CITY_KEY) {
            Some(saved) if !saved.is_empty() => CityFilter::parse(&saved),
            _ => {
                let city = CityFilter::default_city();
                persist(store, CITY_KEY, city.as_str());
                city
            }
        };
        let condition = store
            .get(CONDITION_KEY)
            .map_or(ConditionFilter::All, |c| ConditionFilter::parse(&c));

        debug!(dark_mode, city = %city, condition = condition.as_str(), "Preferences restored");
        Self { dark_mode, city, condition }
    }
}

/// Write one value, logging instead of failing
pub fn persist(store: &mut dyn PreferenceStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        warn!(key, error = %e, "Failed to persist preference");
    }
}
