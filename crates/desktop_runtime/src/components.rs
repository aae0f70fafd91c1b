//! Desktop shell UI composition: root surface, launcher, and window frames.

mod launcher;
mod window;

use leptos::*;

use self::{launcher::Launcher, window::DesktopWindow};
use crate::{
    model::{PointerPosition, Viewport, DEFAULT_VIEWPORT},
    runtime_context::DesktopRuntime,
};

/// Reads the browser viewport, or [`DEFAULT_VIEWPORT`] off-browser.
pub fn current_viewport() -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return DEFAULT_VIEWPORT;
        };
        let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|value| value.as_f64()).map(|px| px as i32)
        };
        match (read(window.inner_width()), read(window.inner_height())) {
            (Some(width), Some(height)) => Viewport { width, height },
            _ => DEFAULT_VIEWPORT,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        DEFAULT_VIEWPORT
    }
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
/// Desktop root: launcher bar plus one frame per window record.
pub fn DesktopShell(runtime: DesktopRuntime) -> impl IntoView {
    let resize_listener = window_event_listener(ev::resize, move |_| {
        runtime.set_viewport(current_viewport());
    });
    on_cleanup(move || resize_listener.remove());

    let window_ids = move || {
        runtime
            .manager
            .with(|manager| manager.windows().iter().map(|record| record.id).collect::<Vec<_>>())
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            data-theme=move || runtime.theme.get().css_id()
            data-persistence-degraded=move || {
                runtime.manager.with(|manager| manager.is_persistence_degraded()).to_string()
            }
        >
            <Launcher runtime=runtime />
            <div class="desktop-window-layer">
                <For each=window_ids key=|id| id.0 let:window_id>
                    <DesktopWindow runtime=runtime window_id=window_id />
                </For>
            </div>
        </div>
    }
}
