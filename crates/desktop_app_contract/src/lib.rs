//! Shared contract types between the desktop window manager runtime and widget modules.
//!
//! The runtime owns window geometry and lifecycle. A widget module only receives its window id
//! and the host service bundle, renders into the frame it is given, and persists its own state
//! slice under one of the keys declared here.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{cell::Cell, rc::Rc};

use leptos::{logging, on_cleanup, View};
use platform_host::{load_typed_with, save_typed_with, HostServices, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Storage key for the notes list.
pub const NOTES_STATE_KEY: &str = "widgetdesk.notes";
/// Storage key for the reminders list.
pub const REMINDERS_STATE_KEY: &str = "widgetdesk.reminders";
/// Storage key for the pomodoro settings object.
pub const POMODORO_SETTINGS_KEY: &str = "widgetdesk.pomodoro";

#[derive(Clone)]
/// Mount-time context passed to a widget module.
pub struct WidgetMountContext {
    /// Runtime window hosting this widget.
    pub window_id: WindowRuntimeId,
    /// Host services (store, notifications, data sources).
    pub services: HostServices,
}

/// Widget mount function signature.
pub type WidgetMountFn = fn(WidgetMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mounted widget module descriptor used by the runtime widget dispatch.
pub struct WidgetModule {
    mount_fn: WidgetMountFn,
}

impl WidgetModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: WidgetMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the widget into the window body.
    pub fn mount(self, context: WidgetMountContext) -> View {
        (self.mount_fn)(context)
    }
}

/// Loads a widget state slice, substituting the default when it is missing or unreadable.
///
/// Malformed JSON is discarded with a warning instead of failing the widget.
pub fn load_slice_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
) -> T {
    match load_typed_with::<_, T>(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            logging::warn!("widget slice `{key}` load failed, using defaults: {err}");
            T::default()
        }
    }
}

/// Persists a widget state slice best-effort.
///
/// Returns `false` and logs a warning when the store rejects the write; the caller keeps its
/// in-memory state either way.
pub fn persist_slice<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    match save_typed_with(store, key, value) {
        Ok(()) => true,
        Err(err) => {
            logging::warn!("widget slice `{key}` persist failed: {err}");
            false
        }
    }
}

#[derive(Debug, Clone)]
/// Liveness flag for a mounted widget.
///
/// Async work (fetches) checks the flag before writing results back, so responses that resolve
/// after the window closed are dropped.
pub struct AliveFlag(Rc<Cell<bool>>);

impl AliveFlag {
    /// Creates a flag that flips to torn-down when the current reactive owner is cleaned up.
    pub fn for_current_owner() -> Self {
        let flag = Self::detached();
        let inner = flag.0.clone();
        on_cleanup(move || inner.set(false));
        flag
    }

    /// Creates a live flag not tied to any reactive owner.
    pub fn detached() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    /// Returns `true` while the owning widget is mounted.
    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    /// Marks the owning widget as torn down.
    pub fn mark_torn_down(&self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryKeyValueStore;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Slice {
        items: Vec<String>,
    }

    struct RejectingStore;

    impl KeyValueStore for RejectingStore {
        fn load_raw(&self, _key: &str) -> Result<Option<String>, String> {
            Err("quota exceeded".to_string())
        }

        fn save_raw(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
            Err("quota exceeded".to_string())
        }

        fn delete_raw(&self, _key: &str) -> Result<(), String> {
            Err("quota exceeded".to_string())
        }
    }

    #[test]
    fn slice_round_trips_through_store() {
        let store = MemoryKeyValueStore::default();
        let slice = Slice {
            items: vec!["a".to_string(), "b".to_string()],
        };
        assert!(persist_slice(&store, NOTES_STATE_KEY, &slice));
        assert_eq!(load_slice_or_default::<Slice>(&store, NOTES_STATE_KEY), slice);
    }

    #[test]
    fn malformed_slice_falls_back_to_default() {
        let store = MemoryKeyValueStore::default();
        store
            .save_raw(REMINDERS_STATE_KEY, "[{broken")
            .expect("seed");
        assert_eq!(
            load_slice_or_default::<Slice>(&store, REMINDERS_STATE_KEY),
            Slice::default()
        );
    }

    #[test]
    fn unavailable_store_degrades_without_failing() {
        let store = RejectingStore;
        assert_eq!(
            load_slice_or_default::<Slice>(&store, POMODORO_SETTINGS_KEY),
            Slice::default()
        );
        assert!(!persist_slice(&store, POMODORO_SETTINGS_KEY, &Slice::default()));
    }

    #[test]
    fn alive_flag_tracks_teardown_across_clones() {
        let flag = AliveFlag::detached();
        let async_copy = flag.clone();
        assert!(async_copy.is_alive());
        flag.mark_torn_down();
        assert!(!async_copy.is_alive());
    }
}
