//! Currency widget: converts between curated currencies using rates fetched once on mount.

mod conversion;

use std::rc::Rc;

use desktop_app_contract::{AliveFlag, WidgetModule, WidgetMountContext};
use leptos::*;
use platform_host::RatesSource;

pub use conversion::{
    available_currencies, convert, format_amount, parse_amount, ConversionError, RatesView,
    CURATED_CURRENCIES,
};

#[component]
pub fn CurrencyWidget(source: Rc<dyn RatesSource>) -> impl IntoView {
    let rates = create_rw_signal(RatesView::Loading);
    let amount = create_rw_signal("1".to_string());
    let from = create_rw_signal("USD".to_string());
    let to = create_rw_signal("EUR".to_string());
    let alive = AliveFlag::for_current_owner();

    spawn_local(async move {
        let result = source.latest_rates().await;
        if !alive.is_alive() {
            return;
        }
        match result {
            Ok(table) => rates.set(RatesView::Ready(table)),
            Err(err) => {
                logging::warn!("currency rates fetch failed: {err}");
                rates.set(RatesView::Failed(err));
            }
        }
    });

    let result = move || {
        rates.with(|view| match view {
            RatesView::Ready(table) => {
                let amount = amount.with(|raw| parse_amount(raw));
                Some(amount.and_then(|value| {
                    from.with(|from| to.with(|to| convert(value, from, to, table)))
                }))
            }
            RatesView::Loading | RatesView::Failed(_) => None,
        })
    };
    let swap = move |_| {
        let previous = from.get_untracked();
        from.set(to.get_untracked());
        to.set(previous);
    };
    let options = move |selected: RwSignal<String>| {
        rates.with(|view| match view {
            RatesView::Ready(table) => available_currencies(table),
            RatesView::Loading | RatesView::Failed(_) => Vec::new(),
        })
        .into_iter()
        .map(|(code, name)| {
            view! {
                <option value=code selected=move || selected.with(|current| current == code)>
                    {format!("{code} · {name}")}
                </option>
            }
        })
        .collect_view()
    };

    view! {
        <div class="widget currency">
            {move || match rates.get() {
                RatesView::Loading => view! { <p class="currency-loading">"Cargando tasas..."</p> }.into_view(),
                RatesView::Failed(message) => view! {
                    <div class="currency-error" role="alert">
                        <p>"No se pudieron obtener las tasas de cambio."</p>
                        <p class="currency-error-detail">{message}</p>
                    </div>
                }
                    .into_view(),
                RatesView::Ready(_) => ().into_view(),
            }}
            <label>
                "Cantidad"
                <input
                    type="text"
                    inputmode="decimal"
                    prop:value=move || amount.get()
                    on:input=move |ev| amount.set(event_target_value(&ev))
                />
            </label>
            <div class="currency-pair">
                <select on:change=move |ev| from.set(event_target_value(&ev))>
                    {move || options(from)}
                </select>
                <button type="button" aria-label="Intercambiar" on:click=swap>"⇄"</button>
                <select on:change=move |ev| to.set(event_target_value(&ev))>
                    {move || options(to)}
                </select>
            </div>
            {move || match result() {
                Some(Ok(value)) => view! {
                    <p class="currency-result">
                        {format!("{} {} = {} {}", amount.get().trim(), from.get(), format_amount(value), to.get())}
                    </p>
                }
                    .into_view(),
                Some(Err(err)) => view! { <p class="currency-error" role="alert">{err.to_string()}</p> }.into_view(),
                None => ().into_view(),
            }}
        </div>
    }
}

fn mount(context: WidgetMountContext) -> View {
    view! { <CurrencyWidget source=context.services.rates /> }.into_view()
}

pub fn widget_module() -> WidgetModule {
    WidgetModule::new(mount)
}
