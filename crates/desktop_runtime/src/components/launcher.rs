use leptos::*;

use crate::{
    model::DesktopTheme,
    registry::{widget_registry, widget_title},
    runtime_context::DesktopRuntime,
};

#[component]
pub(super) fn Launcher(runtime: DesktopRuntime) -> impl IntoView {
    let theme_label = move || match runtime.theme.get() {
        DesktopTheme::Light => "🌙",
        DesktopTheme::Dark => "☀",
    };

    view! {
        <nav class="desktop-launcher" aria-label="Widgets">
            {widget_registry()
                .iter()
                .map(|entry| {
                    let kind = entry.kind;
                    let title = widget_title(kind);
                    view! {
                        <button
                            class="launcher-button"
                            data-widget=kind.tag()
                            title=title.clone()
                            aria-label=title
                            on:click=move |_| {
                                runtime.add_widget(kind);
                            }
                        >
                            <span aria-hidden="true">{entry.glyph}</span>
                        </button>
                    }
                })
                .collect_view()}
            <button
                class="launcher-button theme-toggle"
                aria-label="Cambiar tema"
                on:click=move |_| runtime.toggle_theme()
            >
                {theme_label}
            </button>
        </nav>
    }
}
