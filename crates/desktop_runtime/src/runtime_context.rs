//! Reactive handle over the window manager, drag state, and theme.
//!
//! [`DesktopRuntime`] is created once by the entry component and passed down as a prop. Every
//! window-manager mutation runs inside a single signal update.
#![allow(clippy::clone_on_copy)]

use leptos::*;
use platform_host::HostServices;

use crate::{
    interaction::{apply_pointer_move, DragState},
    model::{DesktopTheme, PointerPosition, Viewport, WidgetKind, WindowId},
    persistence::{load_theme, save_theme},
    window_manager::WindowManager,
};

#[derive(Clone, Copy)]
pub struct DesktopRuntime {
    /// Host bundle handed to widget modules at mount time.
    pub services: StoredValue<HostServices>,
    pub manager: RwSignal<WindowManager>,
    pub drag: RwSignal<DragState>,
    pub theme: RwSignal<DesktopTheme>,
}

impl DesktopRuntime {
    /// Hydrates windows and theme from the host store.
    pub fn boot(services: HostServices, viewport: Viewport) -> Self {
        let manager = WindowManager::restore(services.store.clone(), viewport);
        let theme = load_theme(services.store.as_ref());
        logging::log!(
            "desktop booted on {} host with {} window(s)",
            services.host_strategy.as_str(),
            manager.windows().len()
        );
        Self {
            services: store_value(services),
            manager: create_rw_signal(manager),
            drag: create_rw_signal(DragState::default()),
            theme: create_rw_signal(theme),
        }
    }

    pub fn add_widget(&self, kind: WidgetKind) -> Option<WindowId> {
        self.manager.try_update(|manager| manager.create_window(kind))
    }

    pub fn close_window(&self, window_id: WindowId) {
        if self.drag.get_untracked().dragging_window() == Some(window_id) {
            self.end_drag();
        }
        self.manager.update(|manager| {
            manager.close_window(window_id);
        });
    }

    pub fn toggle_minimize(&self, window_id: WindowId) {
        self.manager.update(|manager| {
            manager.toggle_minimize(window_id);
        });
    }

    /// Starts dragging `window_id` from `pointer`.
    ///
    /// Returns `false` when the window is unknown or another drag is active.
    pub fn begin_drag(&self, window_id: WindowId, pointer: PointerPosition) -> bool {
        let Some(origin) = self
            .manager
            .with_untracked(|manager| manager.window(window_id).map(|record| record.position))
        else {
            return false;
        };
        self.drag
            .try_update(|drag| drag.begin(window_id, origin, pointer))
            .unwrap_or(false)
    }

    pub fn drag_to(&self, pointer: PointerPosition) {
        let drag = self.drag.get_untracked();
        if !drag.is_dragging() {
            return;
        }
        self.manager.update(|manager| {
            apply_pointer_move(manager, &drag, pointer);
        });
    }

    pub fn end_drag(&self) {
        if self.drag.get_untracked().is_dragging() {
            self.drag.update(|drag| {
                drag.end();
            });
        }
    }

    /// Flips and persists the desktop theme.
    pub fn toggle_theme(&self) {
        let next = self.theme.get_untracked().toggled();
        self.theme.set(next);
        let store = self.services.with_value(|services| services.store.clone());
        if let Err(err) = save_theme(store.as_ref(), next) {
            logging::warn!("desktop theme persist failed: {err}");
        }
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        if self.manager.with_untracked(|manager| manager.viewport()) != viewport {
            self.manager.update(|manager| manager.set_viewport(viewport));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use platform_host::{KeyValueStore, MemoryKeyValueStore};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::{WindowPosition, DEFAULT_VIEWPORT},
        persistence::{load_windows, THEME_KEY},
    };

    fn runtime_with_store() -> (DesktopRuntime, MemoryKeyValueStore) {
        let _ = create_runtime();
        let store = MemoryKeyValueStore::default();
        let services = HostServices::headless().with_store(Rc::new(store.clone()));
        (DesktopRuntime::boot(services, DEFAULT_VIEWPORT), store)
    }

    #[test]
    fn header_drag_moves_window_and_persists() {
        let (runtime, store) = runtime_with_store();
        let id = runtime.add_widget(WidgetKind::Clock).expect("created");
        let origin = runtime
            .manager
            .with_untracked(|manager| manager.window(id).map(|record| record.position))
            .expect("window");

        assert!(runtime.begin_drag(
            id,
            PointerPosition {
                x: origin.x + 20,
                y: origin.y + 10
            }
        ));
        runtime.drag_to(PointerPosition { x: 420, y: 310 });
        runtime.end_drag();
        runtime.drag_to(PointerPosition { x: 900, y: 900 });

        let expected = WindowPosition { x: 400, y: 300 };
        assert_eq!(
            runtime
                .manager
                .with_untracked(|manager| manager.window(id).map(|record| record.position)),
            Some(expected)
        );
        assert_eq!(load_windows(&store)[0].position, expected);
    }

    #[test]
    fn closing_the_dragged_window_ends_the_drag() {
        let (runtime, _) = runtime_with_store();
        let id = runtime.add_widget(WidgetKind::Notes).expect("created");
        assert!(runtime.begin_drag(id, PointerPosition { x: 200, y: 200 }));

        runtime.close_window(id);
        assert_eq!(runtime.drag.get_untracked(), DragState::Idle);
        assert!(!runtime.begin_drag(id, PointerPosition { x: 200, y: 200 }));
    }

    #[test]
    fn theme_toggle_persists_and_reboots() {
        let (runtime, store) = runtime_with_store();
        runtime.toggle_theme();
        assert_eq!(runtime.theme.get_untracked(), DesktopTheme::Dark);
        assert_eq!(store.load_raw(THEME_KEY), Ok(Some("\"dark\"".to_string())));

        let services = HostServices::headless().with_store(Rc::new(store));
        let rebooted = DesktopRuntime::boot(services, DEFAULT_VIEWPORT);
        assert_eq!(rebooted.theme.get_untracked(), DesktopTheme::Dark);
    }
}
