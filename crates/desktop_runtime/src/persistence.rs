//! Desktop persistence for the window collection and theme.
//!
//! Each slice lives under its own key. Loads never fail: a missing or malformed slice is replaced
//! by its default with a warning. Saves report a [`PersistenceError`] that callers log and
//! otherwise ignore.

use std::collections::HashSet;

use leptos::logging;
use platform_host::{load_typed_with, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::model::{DesktopTheme, WindowRecord};

pub const WINDOWS_STATE_KEY: &str = "widgetdesk.windows";
pub const THEME_KEY: &str = "widgetdesk.theme";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("serializing `{key}` failed: {message}")]
    Serialize { key: &'static str, message: String },
    #[error("writing `{key}` failed: {message}")]
    Store { key: &'static str, message: String },
}

/// Loads the persisted window collection in stored order.
///
/// Records whose id repeats an earlier record are dropped.
pub fn load_windows(store: &dyn KeyValueStore) -> Vec<WindowRecord> {
    let windows: Vec<WindowRecord> = load_or_default(store, WINDOWS_STATE_KEY);
    let mut seen = HashSet::with_capacity(windows.len());
    let before = windows.len();
    let unique: Vec<WindowRecord> = windows
        .into_iter()
        .filter(|record| seen.insert(record.id))
        .collect();
    if unique.len() != before {
        logging::warn!(
            "dropped {} persisted window(s) with duplicate ids",
            before - unique.len()
        );
    }
    unique
}

/// Replaces the persisted window collection.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_windows(
    store: &dyn KeyValueStore,
    windows: &[WindowRecord],
) -> Result<(), PersistenceError> {
    save(store, WINDOWS_STATE_KEY, windows)
}

pub fn load_theme(store: &dyn KeyValueStore) -> DesktopTheme {
    load_or_default(store, THEME_KEY)
}

/// Replaces the persisted theme.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_theme(store: &dyn KeyValueStore, theme: DesktopTheme) -> Result<(), PersistenceError> {
    save(store, THEME_KEY, &theme)
}

fn load_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &'static str,
) -> T {
    match load_typed_with::<_, T>(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            logging::warn!("desktop slice `{key}` load failed, using defaults: {err}");
            T::default()
        }
    }
}

fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &'static str,
    value: &T,
) -> Result<(), PersistenceError> {
    let raw = serde_json::to_string(value).map_err(|err| PersistenceError::Serialize {
        key,
        message: err.to_string(),
    })?;
    store
        .save_raw(key, &raw)
        .map_err(|message| PersistenceError::Store { key, message })
}
