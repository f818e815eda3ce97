//! User preferences persisted across restarts.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::warn;
use ts_rs::TS;

use crate::storage::Storage;

const THEME_FILE: &str = "theme.json";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Process-wide preference state, rehydrated from storage at construction.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    storage: Storage,
    theme: Arc<RwLock<Theme>>,
}

impl PreferenceStore {
    pub fn new(storage: Storage) -> Self {
        let theme = storage.load(THEME_FILE).unwrap_or_default();
        Self {
            storage,
            theme: Arc::new(RwLock::new(theme)),
        }
    }

    pub fn theme(&self) -> Theme {
        *self.theme.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_theme(&self, theme: Theme) {
        *self.theme.write().unwrap_or_else(PoisonError::into_inner) = theme;
        if let Err(e) = self.storage.save(THEME_FILE, &theme) {
            warn!(error = %e, "failed to persist theme preference");
        }
    }

    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_persists_across_store_instances() {
        let tmp = tempfile::tempdir().unwrap();
        let prefs = PreferenceStore::new(Storage::at(tmp.path()));
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.toggle_theme(), Theme::Dark);

        let rehydrated = PreferenceStore::new(Storage::at(tmp.path()));
        assert_eq!(rehydrated.theme(), Theme::Dark);
    }
}
