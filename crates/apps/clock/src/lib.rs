//! World clock widget: local time plus a fixed list of cities, refreshed every second.

mod zones;

use std::time::Duration;

use desktop_app_contract::{WidgetModule, WidgetMountContext};
use leptos::*;
use platform_host::{local_utc_offset_minutes, unix_time_ms_now};

pub use zones::{offset_label, read_clock, City, ClockReading, WORLD_CITIES};

#[component]
pub fn ClockWidget() -> impl IntoView {
    let now_ms = create_rw_signal(unix_time_ms_now());
    if let Ok(interval) = set_interval_with_handle(
        move || now_ms.set(unix_time_ms_now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }
    let local = move || read_clock(now_ms.get(), local_utc_offset_minutes());

    view! {
        <div class="widget clock">
            <div class="clock-local">
                <p class="clock-time" role="timer">{move || local().time}</p>
                <p class="clock-date">{move || local().date}</p>
            </div>
            <ul class="clock-cities">
                {WORLD_CITIES
                    .iter()
                    .map(|city| {
                        let offset = city.utc_offset_minutes;
                        view! {
                            <li class="clock-city">
                                <span class="clock-city-name">{city.name}</span>
                                <span class="clock-city-offset">{offset_label(offset)}</span>
                                <span class="clock-city-time">
                                    {move || read_clock(now_ms.get(), offset).time}
                                </span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

fn mount(_context: WidgetMountContext) -> View {
    view! { <ClockWidget /> }.into_view()
}

pub fn widget_module() -> WidgetModule {
    WidgetModule::new(mount)
}
