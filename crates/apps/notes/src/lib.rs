//! Notes widget: free-text notes, newest first, saved on every change.

mod notebook;

use std::rc::Rc;

use desktop_app_contract::{
    load_slice_or_default, persist_slice, WidgetModule, WidgetMountContext, NOTES_STATE_KEY,
};
use leptos::*;
use platform_host::{
    local_utc_offset_minutes, next_monotonic_timestamp_ms, unix_time_ms_now, KeyValueStore,
};

pub use notebook::{format_timestamp, Note, Notebook};

#[component]
pub fn NotesWidget(store: Rc<dyn KeyValueStore>) -> impl IntoView {
    let book = create_rw_signal(load_slice_or_default::<Notebook>(store.as_ref(), NOTES_STATE_KEY));
    let store = store_value(store);
    let draft = create_rw_signal(String::new());
    let editing = create_rw_signal(None::<(String, String)>);

    let mutate = move |edit: &dyn Fn(&mut Notebook) -> bool| {
        let changed = book.try_update(|notes| edit(notes)).unwrap_or(false);
        if changed {
            book.with_untracked(|notes| {
                store.with_value(|store| persist_slice(store.as_ref(), NOTES_STATE_KEY, notes))
            });
        }
        changed
    };

    let add_note = move || {
        let text = draft.get_untracked();
        let now = unix_time_ms_now();
        let added = mutate(&|notes: &mut Notebook| {
            let id = notes.next_id(next_monotonic_timestamp_ms());
            notes.add(id, &text, now)
        });
        if added {
            draft.set(String::new());
        }
    };
    let save_edit = move || {
        if let Some((id, text)) = editing.get_untracked() {
            mutate(&|notes: &mut Notebook| notes.update(&id, &text));
            editing.set(None);
        }
    };

    view! {
        <div class="widget notes">
            <div class="notes-compose">
                <textarea
                    placeholder="Escribe una nota..."
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:keydown=move |ev: ev::KeyboardEvent| {
                        if ev.key() == "Enter" && (ev.ctrl_key() || ev.meta_key()) {
                            ev.prevent_default();
                            add_note();
                        }
                    }
                ></textarea>
                <button
                    type="button"
                    disabled=move || draft.with(|text| text.trim().is_empty())
                    on:click=move |_| add_note()
                >
                    "Añadir nota"
                </button>
            </div>
            <Show
                when=move || book.with(|notes| !notes.is_empty())
                fallback=|| view! { <p class="notes-empty">"No hay notas todavía."</p> }
            >
                <ul class="notes-list">
                    <For
                        each=move || book.with(|notes| notes.notes().to_vec())
                        key=|note| (note.id.clone(), note.content.clone())
                        let:note
                    >
                        {
                            let id = store_value(note.id.clone());
                            let is_editing = move || {
                                editing.with(|edit| {
                                    edit.as_ref().is_some_and(|(editing_id, _)| {
                                        id.with_value(|id| editing_id == id)
                                    })
                                })
                            };
                            let content = note.content.clone();
                            view! {
                                <li class="note">
                                    <Show
                                        when=is_editing
                                        fallback=move || view! { <p class="note-content">{content.clone()}</p> }
                                    >
                                        <textarea
                                            class="note-editor"
                                            prop:value=move || {
                                                editing
                                                    .with(|edit| edit.as_ref().map(|(_, text)| text.clone()))
                                                    .unwrap_or_default()
                                            }
                                            on:input=move |ev| {
                                                let text = event_target_value(&ev);
                                                editing.set(Some((id.get_value(), text)));
                                            }
                                        ></textarea>
                                    </Show>
                                    <div class="note-footer">
                                        <span class="note-date">
                                            {format_timestamp(note.timestamp, local_utc_offset_minutes())}
                                        </span>
                                        <Show
                                            when=is_editing
                                            fallback={
                                                let content = note.content.clone();
                                                move || {
                                                    let content = content.clone();
                                                    view! {
                                                        <button
                                                            type="button"
                                                            on:click=move |_| editing.set(Some((id.get_value(), content.clone())))
                                                        >
                                                            "Editar"
                                                        </button>
                                                    }
                                                }
                                            }
                                        >
                                            <button type="button" on:click=move |_| save_edit()>"Guardar"</button>
                                            <button type="button" on:click=move |_| editing.set(None)>"Cancelar"</button>
                                        </Show>
                                        <button
                                            type="button"
                                            class="note-delete"
                                            on:click=move |_| {
                                                id.with_value(|id| mutate(&|notes: &mut Notebook| notes.delete(id)));
                                            }
                                        >
                                            "Eliminar"
                                        </button>
                                    </div>
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
    view! { <NotesWidget store=context.services.store /> }.into_view()
}

pub fn widget_module() -> WidgetModule {
    WidgetModule::new(mount)
}
