//! `window.localStorage` as a preference store

use crate::core::{DashboardError, PreferenceStore};
use tracing::warn;

pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    /// Falls back to a no-op store (reads nothing, writes fail) when the
    /// browser denies storage access
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| DashboardError::Storage("localStorage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| DashboardError::Storage(format!("{e:?}")))
    }
}
