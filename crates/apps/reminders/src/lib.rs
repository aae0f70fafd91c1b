//! Reminders widget: timed reminders with a once-per-second due check.

mod schedule;

use std::{cell::RefCell, rc::Rc, time::Duration};

use desktop_app_contract::{
    load_slice_or_default, persist_slice, WidgetModule, WidgetMountContext, REMINDERS_STATE_KEY,
};
use leptos::*;
use platform_host::{
    local_utc_offset_minutes, next_monotonic_timestamp_ms, unix_time_ms_now, KeyValueStore,
    NotificationService,
};

pub use schedule::{local_hhmm, parse_time, DueTracker, Reminder, ReminderError, ReminderList};

fn announce_due(notifications: &dyn NotificationService, due: &[Reminder]) {
    for reminder in due {
        if let Err(err) = notifications.notify("Recordatorio", &reminder.text) {
            logging::warn!("reminder notification failed: {err}");
        }
        if let Err(err) = notifications.play_chime() {
            logging::warn!("reminder chime failed: {err}");
        }
    }
}

#[component]
pub fn RemindersWidget(
    store: Rc<dyn KeyValueStore>,
    notifications: Rc<dyn NotificationService>,
) -> impl IntoView {
    let list = create_rw_signal(load_slice_or_default::<ReminderList>(
        store.as_ref(),
        REMINDERS_STATE_KEY,
    ));
    let store = store_value(store);
    let text = create_rw_signal(String::new());
    let time = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ReminderError>);
    let tracker = Rc::new(RefCell::new(DueTracker::default()));

    let persist = move || {
        list.with_untracked(|reminders| {
            store.with_value(|store| persist_slice(store.as_ref(), REMINDERS_STATE_KEY, reminders))
        });
    };

    if let Ok(interval) = set_interval_with_handle(
        move || {
            let now = unix_time_ms_now();
            let now_hhmm = local_hhmm(now, local_utc_offset_minutes());
            let due = list.with_untracked(|reminders| {
                tracker
                    .borrow_mut()
                    .take_due(reminders, &now_hhmm, now / 60_000)
            });
            announce_due(notifications.as_ref(), &due);
        },
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let add = move |_| {
        let result = list
            .try_update(|reminders| {
                let id = reminders.next_id(next_monotonic_timestamp_ms());
                reminders.add(id, &text.get_untracked(), &time.get_untracked())
            })
            .unwrap_or(Ok(()));
        match result {
            Ok(()) => {
                persist();
                text.set(String::new());
                time.set(String::new());
                error.set(None);
            }
            Err(err) => error.set(Some(err)),
        }
    };

    view! {
        <div class="widget reminders">
            <div class="reminders-form">
                <input
                    type="text"
                    placeholder="Nuevo recordatorio"
                    prop:value=move || text.get()
                    on:input=move |ev| text.set(event_target_value(&ev))
                />
                <input
                    type="time"
                    prop:value=move || time.get()
                    on:input=move |ev| time.set(event_target_value(&ev))
                />
                <button type="button" on:click=add>"Añadir"</button>
            </div>
            {move || error.get().map(|err| view! { <p class="reminders-error" role="alert">{err.to_string()}</p> })}
            <p class="reminders-pending">
                {move || format!("Pendientes: {}", list.with(ReminderList::pending_count))}
            </p>
            <Show
                when=move || list.with(|reminders| !reminders.is_empty())
                fallback=|| view! { <p class="reminders-empty">"Sin recordatorios."</p> }
            >
                <ul class="reminders-list">
                    <For
                        each=move || list.with(|reminders| reminders.reminders().to_vec())
                        key=|reminder| (reminder.id.clone(), reminder.completed)
                        let:reminder
                    >
                        {
                            let id = store_value(reminder.id.clone());
                            view! {
                                <li class="reminder" class:completed=reminder.completed>
                                    <label>
                                        <input
                                            type="checkbox"
                                            prop:checked=reminder.completed
                                            on:change=move |_| {
                                                let toggled = id.with_value(|id| list.try_update(|reminders| reminders.toggle(id)));
                                                if toggled.unwrap_or(false) {
                                                    persist();
                                                }
                                            }
                                        />
                                        <span class="reminder-time">{reminder.time.clone()}</span>
                                        <span class="reminder-text">{reminder.text.clone()}</span>
                                    </label>
                                    <button
                                        type="button"
                                        aria-label="Eliminar"
                                        on:click=move |_| {
                                            let deleted = id.with_value(|id| list.try_update(|reminders| reminders.delete(id)));
                                            if deleted.unwrap_or(false) {
                                                persist();
                                            }
                                        }
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        }
                    </For>
                </ul>
            </Show>
        </div>
    }
}

fn mount(context: WidgetMountContext) -> View {
    let WidgetMountContext { services, .. } = context;
    view! { <RemindersWidget store=services.store notifications=services.notifications /> }
        .into_view()
}

pub fn widget_module() -> WidgetModule {
    WidgetModule::new(mount)
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryNotificationService;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn due_reminders_notify_with_chime() {
        let mut list = ReminderList::default();
        list.add("1".to_string(), "llamar a mamá", "09:15")
            .expect("valid reminder");
        list.add("2".to_string(), "regar", "09:15").expect("valid reminder");
        let sink = MemoryNotificationService::default();

        let due = DueTracker::default().take_due(&list, "09:15", 10);
        announce_due(&sink, &due);

        assert_eq!(
            sink.delivered(),
            vec![
                ("Recordatorio".to_string(), "llamar a mamá".to_string()),
                ("Recordatorio".to_string(), "regar".to_string()),
            ]
        );
        assert_eq!(sink.chime_count(), 2);
    }
}
