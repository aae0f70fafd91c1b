//! Widget-kind dispatch into the widget crates.

use desktop_app_contract::{WidgetModule, WidgetMountContext};
use leptos::View;
use platform_host::HostServices;

use crate::model::{WidgetKind, WindowRecord};

/// Module that renders the body of a `kind` window.
pub fn widget_module(kind: WidgetKind) -> WidgetModule {
    match kind {
        WidgetKind::Pomodoro => desktop_app_pomodoro::widget_module(),
        WidgetKind::Weather => desktop_app_weather::widget_module(),
        WidgetKind::Notes => desktop_app_notes::widget_module(),
        WidgetKind::Reminders => desktop_app_reminders::widget_module(),
        WidgetKind::Calculator => desktop_app_calculator::widget_module(),
        WidgetKind::Currency => desktop_app_currency::widget_module(),
        WidgetKind::Clock => desktop_app_clock::widget_module(),
    }
}

/// Mounts the widget body for `window`.
pub fn render_widget(window: &WindowRecord, services: HostServices) -> View {
    widget_module(window.kind).mount(WidgetMountContext {
        window_id: window.id.0,
        services,
    })
}
