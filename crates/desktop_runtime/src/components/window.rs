use leptos::*;
use leptos::leptos_dom::helpers::WindowListenerHandle;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::{pointer_from_pointer_event, stop_mouse_event};
use crate::{apps, model::WindowId, runtime_context::DesktopRuntime};

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Window-level listeners that live only for the duration of one drag.
struct DragListeners {
    moved: WindowListenerHandle,
    released: WindowListenerHandle,
    cancelled: WindowListenerHandle,
}

impl DragListeners {
    fn remove(self) {
        self.moved.remove();
        self.released.remove();
        self.cancelled.remove();
    }
}

fn detach_drag_listeners(runtime: DesktopRuntime, listeners: StoredValue<Option<DragListeners>>) {
    if let Some(active) = listeners.try_update_value(Option::take).flatten() {
        active.remove();
    }
    runtime.end_drag();
}

fn attach_drag_listeners(runtime: DesktopRuntime, listeners: StoredValue<Option<DragListeners>>) {
    let moved = window_event_listener(ev::pointermove, move |ev| {
        runtime.drag_to(pointer_from_pointer_event(&ev));
    });
    let released = window_event_listener(ev::pointerup, move |_| {
        detach_drag_listeners(runtime, listeners);
    });
    let cancelled = window_event_listener(ev::pointercancel, move |_| {
        detach_drag_listeners(runtime, listeners);
    });
    let replaced = listeners.try_update_value(|slot| {
        slot.replace(DragListeners {
            moved,
            released,
            cancelled,
        })
    });
    if let Some(Some(stale)) = replaced {
        stale.remove();
    }
}

#[component]
pub(super) fn DesktopWindow(runtime: DesktopRuntime, window_id: WindowId) -> impl IntoView {
    let geometry = create_memo(move |_| {
        runtime.manager.with(|manager| {
            manager
                .window(window_id)
                .map(|record| (record.position, record.size, record.is_open))
        })
    });
    let is_open = move || geometry.get().is_some_and(|(_, _, open)| open);
    let listeners = store_value(None::<DragListeners>);
    on_cleanup(move || {
        if let Some(active) = listeners.try_update_value(Option::take).flatten() {
            active.remove();
        }
    });

    let Some(record) = runtime
        .manager
        .with_untracked(|manager| manager.window(window_id).cloned())
    else {
        return ().into_view();
    };

    let begin_move = move |ev: web_sys::PointerEvent| {
        if ev.pointer_type() == "mouse" && ev.button() != 0 {
            return;
        }
        if ev.pointer_type() != "mouse" && !ev.is_primary() {
            return;
        }
        ev.prevent_default();
        if runtime.begin_drag(window_id, pointer_from_pointer_event(&ev)) {
            try_set_pointer_capture(&ev);
            attach_drag_listeners(runtime, listeners);
        }
    };
    let style = move || {
        geometry
            .get()
            .map(|(position, size, open)| {
                if open {
                    format!(
                        "left:{}px;top:{}px;width:{}px;height:{}px;",
                        position.x, position.y, size.width, size.height
                    )
                } else {
                    format!("left:{}px;top:{}px;width:{}px;", position.x, position.y, size.width)
                }
            })
            .unwrap_or_default()
    };
    let frame_class = move || {
        let dragging = runtime.drag.get().dragging_window() == Some(window_id);
        format!(
            "desktop-window{}{}",
            if is_open() { "" } else { " minimized" },
            if dragging { " dragging" } else { "" }
        )
    };
    let title = record.title.clone();
    let body = runtime
        .services
        .with_value(|services| apps::render_widget(&record, services.clone()));

    view! {
        <section
            class=frame_class
            style=style
            role="dialog"
            aria-label=title.clone()
            data-widget=record.kind.tag()
        >
            <header class="titlebar" on:pointerdown=begin_move>
                <span class="titlebar-title">{title}</span>
                <div class="titlebar-controls">
                    <button
                        aria-label=move || if is_open() { "Minimizar" } else { "Restaurar" }
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.toggle_minimize(window_id);
                        }
                    >
                        {move || if is_open() { "−" } else { "□" }}
                    </button>
                    <button
                        aria-label="Cerrar"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.close_window(window_id);
                        }
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body" hidden=move || !is_open()>
                {body}
            </div>
        </section>
    }
    .into_view()
}
