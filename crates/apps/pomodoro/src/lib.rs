//! Pomodoro widget: work/break countdown with persisted durations.

mod timer;

use std::{rc::Rc, time::Duration};

use desktop_app_contract::{
    load_slice_or_default, persist_slice, WidgetModule, WidgetMountContext, POMODORO_SETTINGS_KEY,
};
use leptos::*;
use platform_host::{KeyValueStore, NotificationService};

pub use timer::{
    clamp_minutes, PhaseChange, PomodoroSession, PomodoroSettings, MAX_DURATION_MINUTES,
    MIN_DURATION_MINUTES,
};

fn announce(
    notifications: &dyn NotificationService,
    change: PhaseChange,
    settings: &PomodoroSettings,
) {
    let (title, body) = change.announcement(settings);
    if let Err(err) = notifications.notify(title, &body) {
        logging::warn!("pomodoro notification failed: {err}");
    }
    if settings.sound_enabled {
        if let Err(err) = notifications.play_chime() {
            logging::warn!("pomodoro chime failed: {err}");
        }
    }
}

#[component]
pub fn PomodoroWidget(
    store: Rc<dyn KeyValueStore>,
    notifications: Rc<dyn NotificationService>,
) -> impl IntoView {
    let initial: PomodoroSettings =
        load_slice_or_default::<PomodoroSettings>(store.as_ref(), POMODORO_SETTINGS_KEY).clamped();
    let settings = create_rw_signal(initial);
    let session = create_rw_signal(PomodoroSession::new(&initial));
    let show_settings = create_rw_signal(false);
    let store = store_value(store);
    let notifications = store_value(notifications);

    if let Ok(interval) = set_interval_with_handle(
        move || {
            if !session.with_untracked(|state| state.is_running) {
                return;
            }
            let current = settings.get_untracked();
            if let Some(change) = session.try_update(|state| state.tick(&current)).flatten() {
                notifications.with_value(|sink| announce(sink.as_ref(), change, &current));
            }
        },
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let update_settings = move |edit: &dyn Fn(&mut PomodoroSettings)| {
        let mut next = settings.get_untracked();
        edit(&mut next);
        let next = next.clamped();
        settings.set(next);
        session.update(|state| state.apply_settings(&next));
        store.with_value(|store| persist_slice(store.as_ref(), POMODORO_SETTINGS_KEY, &next));
    };
    let skip = move |_| {
        let current = settings.get_untracked();
        session.update(|state| {
            state.skip(&current);
        });
    };

    let phase_label = move || {
        if session.with(|state| state.is_break) {
            "Descanso"
        } else {
            "Trabajo"
        }
    };
    let progress = move || {
        let current = settings.get();
        format!("width:{:.1}%;", session.with(|state| state.progress(&current)) * 100.0)
    };

    view! {
        <div class="widget pomodoro" class:on-break=move || session.with(|state| state.is_break)>
            <p class="pomodoro-phase">{phase_label}</p>
            <p class="pomodoro-clock" role="timer">{move || session.with(PomodoroSession::clock_label)}</p>
            <div class="pomodoro-progress" aria-hidden="true">
                <div class="pomodoro-progress-fill" style=progress></div>
            </div>
            <div class="pomodoro-controls">
                <button type="button" on:click=move |_| session.update(PomodoroSession::toggle_running)>
                    {move || if session.with(|state| state.is_running) { "Pausar" } else { "Iniciar" }}
                </button>
                <button
                    type="button"
                    on:click=move |_| {
                        let current = settings.get_untracked();
                        session.update(|state| state.reset(&current));
                    }
                >
                    "Reiniciar"
                </button>
                <button type="button" on:click=skip>"Saltar"</button>
                <button type="button" on:click=move |_| show_settings.update(|open| *open = !*open)>
                    "Ajustes"
                </button>
            </div>
            <p class="pomodoro-count">
                {move || format!("Sesiones completadas: {}", session.with(|state| state.completed_sessions))}
            </p>
            <Show when=move || show_settings.get() fallback=|| ()>
                <div class="pomodoro-settings">
                    <label>
                        "Trabajo (min)"
                        <input
                            type="number"
                            min=MIN_DURATION_MINUTES
                            max=MAX_DURATION_MINUTES
                            prop:value=move || settings.with(|s| s.work_duration)
                            on:change=move |ev| {
                                if let Ok(minutes) = event_target_value(&ev).trim().parse::<u32>() {
                                    update_settings(&|s: &mut PomodoroSettings| s.work_duration = minutes);
                                }
                            }
                        />
                    </label>
                    <label>
                        "Descanso (min)"
                        <input
                            type="number"
                            min=MIN_DURATION_MINUTES
                            max=MAX_DURATION_MINUTES
                            prop:value=move || settings.with(|s| s.break_duration)
                            on:change=move |ev| {
                                if let Ok(minutes) = event_target_value(&ev).trim().parse::<u32>() {
                                    update_settings(&|s: &mut PomodoroSettings| s.break_duration = minutes);
                                }
                            }
                        />
                    </label>
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || settings.with(|s| s.sound_enabled)
                            on:change=move |ev| {
                                let enabled = event_target_checked(&ev);
                                update_settings(&|s: &mut PomodoroSettings| s.sound_enabled = enabled);
                            }
                        />
                        "Sonido"
                    </label>
                </div>
            </Show>
        </div>
    }
}

fn mount(context: WidgetMountContext) -> View {
    let WidgetMountContext { services, .. } = context;
    view! { <PomodoroWidget store=services.store notifications=services.notifications /> }
        .into_view()
}

pub fn widget_module() -> WidgetModule {
    WidgetModule::new(mount)
}
