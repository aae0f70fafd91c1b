//! Window collection owner: creation, lifecycle, geometry clamping, and persistence.
//!
//! Every mutation edits the in-memory collection first and then writes the whole collection to
//! the store. A failed write never rolls the mutation back; it only raises the degraded flag until
//! the next successful write.

use std::{fmt, rc::Rc};

use leptos::logging;
use platform_host::{unix_time_ms_now, KeyValueStore};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    model::{
        Viewport, WidgetKind, WindowId, WindowPosition, WindowRecord, WindowSize,
        VIEWPORT_BOTTOM_RESERVE_PX,
    },
    persistence::{load_windows, save_windows},
    registry::{default_size, widget_title},
};

const SPAWN_X_RANGE: std::ops::RangeInclusive<i32> = 100..=250;
const SPAWN_Y_RANGE: std::ops::RangeInclusive<i32> = 80..=180;

/// Constrains `proposed` so a window of `size` stays inside `viewport`.
///
/// The horizontal range keeps the whole window visible; the vertical range keeps the origin above
/// the bottom reserve. An empty range saturates at `0`.
pub fn clamp_position(
    proposed: WindowPosition,
    size: WindowSize,
    viewport: Viewport,
) -> WindowPosition {
    let max_x = (viewport.width - size.width).max(0);
    let max_y = (viewport.height - VIEWPORT_BOTTOM_RESERVE_PX).max(0);
    WindowPosition {
        x: proposed.x.clamp(0, max_x),
        y: proposed.y.clamp(0, max_y),
    }
}

#[derive(Clone)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    viewport: Viewport,
    store: Rc<dyn KeyValueStore>,
    placement: SmallRng,
    last_issued_id: u64,
    persistence_degraded: bool,
}

impl WindowManager {
    /// Creates an empty manager writing through `store`.
    pub fn new(store: Rc<dyn KeyValueStore>, viewport: Viewport) -> Self {
        Self {
            windows: Vec::new(),
            viewport,
            store,
            placement: SmallRng::seed_from_u64(unix_time_ms_now()),
            last_issued_id: 0,
            persistence_degraded: false,
        }
    }

    /// Hydrates a manager from the persisted window collection.
    ///
    /// Restored geometry is kept verbatim; the viewport only constrains later moves.
    pub fn restore(store: Rc<dyn KeyValueStore>, viewport: Viewport) -> Self {
        let windows = load_windows(store.as_ref());
        let last_issued_id = windows.iter().map(|record| record.id.0).max().unwrap_or(0);
        Self {
            windows,
            last_issued_id,
            ..Self::new(store, viewport)
        }
    }

    /// Reseeds initial window placement so tests get repeatable positions.
    pub fn with_placement_seed(mut self, seed: u64) -> Self {
        self.placement = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|record| record.id == id)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Records the current viewport. Existing windows are not moved.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Returns `true` while the last collection write failed.
    pub fn is_persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }

    /// Opens a new window for `kind` and returns its id.
    pub fn create_window(&mut self, kind: WidgetKind) -> WindowId {
        let id = self.issue_id();
        let size = default_size(kind);
        let proposed = WindowPosition {
            x: self.placement.gen_range(SPAWN_X_RANGE),
            y: self.placement.gen_range(SPAWN_Y_RANGE),
        };
        self.windows.push(WindowRecord {
            id,
            kind,
            title: widget_title(kind),
            is_open: true,
            position: clamp_position(proposed, size, self.viewport),
            size,
        });
        self.persist();
        id
    }

    /// Removes the window with `id`. Returns `false` when no window matched.
    pub fn close_window(&mut self, id: WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|record| record.id != id);
        if self.windows.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Flips the minimized state of `id`. Returns `false` when no window matched.
    pub fn toggle_minimize(&mut self, id: WindowId) -> bool {
        let Some(record) = self.window_mut(id) else {
            return false;
        };
        record.is_open = !record.is_open;
        self.persist();
        true
    }

    /// Moves `id` to `proposed`, clamped to the current viewport.
    ///
    /// Returns `false` when no window matched.
    pub fn move_window(&mut self, id: WindowId, proposed: WindowPosition) -> bool {
        let viewport = self.viewport;
        let Some(record) = self.window_mut(id) else {
            return false;
        };
        record.position = clamp_position(proposed, record.size, viewport);
        self.persist();
        true
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|record| record.id == id)
    }

    fn issue_id(&mut self) -> WindowId {
        let next = unix_time_ms_now().max(self.last_issued_id.saturating_add(1));
        self.last_issued_id = next;
        WindowId(next)
    }

    fn persist(&mut self) {
        match save_windows(self.store.as_ref(), &self.windows) {
            Ok(()) => self.persistence_degraded = false,
            Err(err) => {
                logging::warn!("window collection persist failed: {err}");
                self.persistence_degraded = true;
            }
        }
    }
}

impl fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowManager")
            .field("windows", &self.windows)
            .field("viewport", &self.viewport)
            .field("last_issued_id", &self.last_issued_id)
            .field("persistence_degraded", &self.persistence_degraded)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use platform_host::MemoryKeyValueStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::persistence::WINDOWS_STATE_KEY;

    const VIEWPORT: Viewport = Viewport {
        width: 1000,
        height: 800,
    };

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn load_raw(&self, _key: &str) -> Result<Option<String>, String> {
            Ok(None)
        }

        fn save_raw(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
            Err("quota exceeded".to_string())
        }

        fn delete_raw(&self, _key: &str) -> Result<(), String> {
            Ok(())
        }
    }

    fn manager_with_store() -> (WindowManager, MemoryKeyValueStore) {
        let store = MemoryKeyValueStore::default();
        let manager = WindowManager::new(Rc::new(store.clone()), VIEWPORT).with_placement_seed(7);
        (manager, store)
    }

    #[test]
    fn rapid_creation_never_reuses_an_id() {
        let (mut manager, _) = manager_with_store();
        let ids: Vec<WindowId> = (0..200)
            .map(|_| manager.create_window(WidgetKind::Clock))
            .collect();

        let unique: HashSet<WindowId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn created_notes_window_uses_registry_geometry() {
        let (mut manager, _) = manager_with_store();
        let id = manager.create_window(WidgetKind::Notes);
        let record = manager.window(id).expect("created window");

        assert_eq!(record.kind, WidgetKind::Notes);
        assert_eq!(record.title, "Notas");
        assert!(record.is_open);
        assert_eq!(
            record.size,
            WindowSize {
                width: 450,
                height: 600
            }
        );
        assert!(SPAWN_X_RANGE.contains(&record.position.x));
        assert!(SPAWN_Y_RANGE.contains(&record.position.y));
    }

    #[test]
    fn initial_position_is_clamped_on_small_viewports() {
        let store = MemoryKeyValueStore::default();
        let mut manager = WindowManager::new(
            Rc::new(store),
            Viewport {
                width: 300,
                height: 150,
            },
        );
        let id = manager.create_window(WidgetKind::Currency);

        assert_eq!(
            manager.window(id).map(|record| record.position),
            Some(WindowPosition { x: 0, y: 50 })
        );
    }

    #[test]
    fn moves_are_clamped_to_viewport() {
        let (mut manager, _) = manager_with_store();
        let id = manager.create_window(WidgetKind::Currency);

        assert!(manager.move_window(id, WindowPosition { x: 2_000, y: 50 }));
        assert_eq!(
            manager.window(id).map(|record| record.position),
            Some(WindowPosition { x: 620, y: 50 })
        );

        assert!(manager.move_window(id, WindowPosition { x: -40, y: 9_999 }));
        assert_eq!(
            manager.window(id).map(|record| record.position),
            Some(WindowPosition { x: 0, y: 700 })
        );
    }

    #[test]
    fn wide_window_clamps_to_right_edge() {
        let size = WindowSize {
            width: 420,
            height: 500,
        };
        assert_eq!(
            clamp_position(WindowPosition { x: 900, y: 100 }, size, VIEWPORT),
            WindowPosition { x: 580, y: 100 }
        );
    }

    #[test]
    fn clamp_saturates_when_window_exceeds_viewport() {
        let size = WindowSize {
            width: 450,
            height: 600,
        };
        let tiny = Viewport {
            width: 200,
            height: 60,
        };
        assert_eq!(
            clamp_position(WindowPosition { x: 30, y: 30 }, size, tiny),
            WindowPosition { x: 0, y: 0 }
        );
    }

    #[test]
    fn close_is_idempotent() {
        let (mut manager, _) = manager_with_store();
        let keep = manager.create_window(WidgetKind::Pomodoro);
        let drop = manager.create_window(WidgetKind::Weather);

        assert!(manager.close_window(drop));
        let after_first = manager.windows().to_vec();
        assert!(!manager.close_window(drop));

        assert_eq!(manager.windows(), after_first.as_slice());
        assert_eq!(manager.windows().len(), 1);
        assert_eq!(manager.windows()[0].id, keep);
    }

    #[test]
    fn toggle_minimize_twice_restores_record() {
        let (mut manager, _) = manager_with_store();
        let id = manager.create_window(WidgetKind::Reminders);
        let original = manager.window(id).cloned();

        assert!(manager.toggle_minimize(id));
        assert_eq!(manager.window(id).map(|record| record.is_open), Some(false));
        assert!(manager.toggle_minimize(id));
        assert_eq!(manager.window(id).cloned(), original);
    }

    #[test]
    fn unknown_ids_are_ignored_without_writing() {
        let (mut manager, store) = manager_with_store();
        assert!(!manager.close_window(WindowId(1)));
        assert!(!manager.toggle_minimize(WindowId(1)));
        assert!(!manager.move_window(WindowId(1), WindowPosition { x: 10, y: 10 }));
        assert!(manager.windows().is_empty());
        assert_eq!(store.load_raw(WINDOWS_STATE_KEY), Ok(None));
    }

    #[test]
    fn collection_survives_restore_in_order() {
        let (mut manager, store) = manager_with_store();
        let first = manager.create_window(WidgetKind::Calculator);
        let second = manager.create_window(WidgetKind::Clock);
        manager.toggle_minimize(first);
        manager.move_window(second, WindowPosition { x: 333, y: 222 });

        let restored = WindowManager::restore(Rc::new(store), VIEWPORT);
        assert_eq!(restored.windows(), manager.windows());
    }

    #[test]
    fn restored_manager_issues_ids_above_persisted_ones() {
        let (mut manager, store) = manager_with_store();
        manager.create_window(WidgetKind::Notes);
        let far_future = WindowId(unix_time_ms_now() + 60_000);
        let mut records = manager.windows().to_vec();
        records[0].id = far_future;
        save_windows(&store, &records).expect("seed");

        let mut restored = WindowManager::restore(Rc::new(store), VIEWPORT);
        let fresh = restored.create_window(WidgetKind::Notes);
        assert!(fresh > far_future);
    }

    #[test]
    fn failed_write_keeps_mutation_and_flags_degraded() {
        let mut manager = WindowManager::new(Rc::new(FailingStore), VIEWPORT);
        let id = manager.create_window(WidgetKind::Weather);

        assert!(manager.window(id).is_some());
        assert!(manager.is_persistence_degraded());
    }

    #[test]
    fn successful_write_clears_degraded_flag() {
        let store = MemoryKeyValueStore::default();
        let mut manager = WindowManager::new(Rc::new(FailingStore), VIEWPORT);
        let id = manager.create_window(WidgetKind::Weather);
        assert!(manager.is_persistence_degraded());

        manager.store = Rc::new(store.clone());
        manager.toggle_minimize(id);
        assert!(!manager.is_persistence_degraded());
        assert_eq!(load_windows(&store), manager.windows());
    }

    #[test]
    fn viewport_change_does_not_reflow_existing_windows() {
        let (mut manager, _) = manager_with_store();
        let id = manager.create_window(WidgetKind::Pomodoro);
        let before = manager.window(id).map(|record| record.position);

        manager.set_viewport(Viewport {
            width: 100,
            height: 100,
        });
        assert_eq!(manager.window(id).map(|record| record.position), before);
    }
}
