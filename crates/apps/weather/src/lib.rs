//! Weather widget: current conditions from the host weather source, refreshed periodically.

mod conditions;

use std::{rc::Rc, time::Duration};

use desktop_app_contract::{AliveFlag, WidgetModule, WidgetMountContext};
use leptos::*;
use platform_host::WeatherSource;

pub use conditions::{
    describe_weather_code, temperature_label, Condition, WeatherView, REFRESH_INTERVAL_SECS,
};

#[component]
pub fn WeatherWidget(source: Rc<dyn WeatherSource>) -> impl IntoView {
    let view_state = create_rw_signal(WeatherView::Loading);
    let alive = AliveFlag::for_current_owner();
    let source = store_value(source);

    let refresh = Callback::new(move |()| {
        if matches!(view_state.get_untracked(), WeatherView::Failed(_)) {
            view_state.set(WeatherView::Loading);
        }
        let alive = alive.clone();
        let source = source.get_value();
        spawn_local(async move {
            let result = source.current_weather().await;
            if !alive.is_alive() {
                return;
            }
            if let Err(err) = &result {
                logging::warn!("weather fetch failed: {err}");
            }
            view_state.set(WeatherView::from_result(result));
        });
    });

    refresh.call(());
    if let Ok(interval) = set_interval_with_handle(
        move || refresh.call(()),
        Duration::from_secs(REFRESH_INTERVAL_SECS),
    ) {
        on_cleanup(move || interval.clear());
    }

    view! {
        <div class="widget weather">
            {move || match view_state.get() {
                WeatherView::Loading => {
                    view! { <p class="weather-loading">"Cargando clima..."</p> }.into_view()
                }
                WeatherView::Ready(snapshot) => {
                    let condition = describe_weather_code(snapshot.weather_code);
                    view! {
                        <div class="weather-current">
                            <span class="weather-glyph" aria-hidden="true">{condition.glyph}</span>
                            <p class="weather-temperature">{temperature_label(snapshot.temperature_c)}</p>
                            <p class="weather-label">{condition.label}</p>
                            <p class="weather-location">"Madrid"</p>
                        </div>
                    }
                        .into_view()
                }
                WeatherView::Failed(message) => {
                    view! {
                        <div class="weather-error" role="alert">
                            <p>"No se pudo obtener el clima."</p>
                            <p class="weather-error-detail">{message}</p>
                            <button type="button" on:click=move |_| refresh.call(())>
                                "Reintentar"
                            </button>
                        </div>
                    }
                        .into_view()
                }
            }}
        </div>
    }
}

fn mount(context: WidgetMountContext) -> View {
    view! { <WeatherWidget source=context.services.weather /> }.into_view()
}

pub fn widget_module() -> WidgetModule {
    WidgetModule::new(mount)
}
