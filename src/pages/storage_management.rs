use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::palette::glyph;
use crate::components::{DeleteConfirmButton, LocationDialog};
use crate::context::use_app_context;
use crate::models::StorageLocation;
use crate::route::Route;
use crate::store::{store_remove_location, store_upsert_location, use_pantry_store, PantryStateStoreFields};

#[derive(Debug, Clone, PartialEq)]
enum Editing {
    New,
    Existing(StorageLocation),
}

/// Add, rename, recolor and delete storage locations
#[component]
pub fn StorageManagementPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_pantry_store();
    let (editing, set_editing) = signal(None::<Editing>);

    let delete = move |location_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.delete_location(location_id).await {
                Ok(()) => {
                    store_remove_location(&store, location_id);
                    ctx.success("Место хранения удалено");
                }
                Err(e) => ctx.error("Не удалось удалить место хранения", &e),
            }
        });
    };

    let saved = move |location: StorageLocation| {
        store_upsert_location(&store, location);
        set_editing.set(None);
    };

    view! {
        <div class="page storage-management-page">
            <header class="page-header">
                <h1>"Места хранения"</h1>
                <button type="button" on:click=move |_| set_editing.set(Some(Editing::New))>"+ Новое место"</button>
            </header>

            <Show
                when=move || !store.locations().get().is_empty()
                fallback=|| view! { <p class="empty">"Мест хранения пока нет"</p> }
            >
                <div class="card-grid">
                    <For
                        each=move || store.locations().get()
                        key=|l| (l.id, l.name.clone(), l.icon.clone(), l.color.clone(), l.items_count)
                        children=move |location| {
                            let id = location.id;
                            let editable = location.clone();
                            view! {
                                <div class=format!("location-card {}", location.color)>
                                    <div class="location-icon">{glyph(&location.icon)}</div>
                                    <div
                                        class="location-name link"
                                        on:click=move |_| ctx.navigate(Route::StorageDetail(id))
                                    >
                                        {location.name.clone()}
                                    </div>
                                    <div class="location-count">{format!("{} продуктов", location.items_count)}</div>
                                    <div class="card-actions">
                                        <button
                                            type="button"
                                            class="icon-btn"
                                            title="Изменить"
                                            on:click=move |_| set_editing.set(Some(Editing::Existing(editable.clone())))
                                        >
                                            "✎"
                                        </button>
                                        <DeleteConfirmButton on_confirm=move |_| delete(id) />
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>

            {move || {
                editing
                    .get()
                    .map(|mode| {
                        let location = match mode {
                            Editing::New => None,
                            Editing::Existing(location) => Some(location),
                        };
                        view! { <LocationDialog location=location on_close=move |_| set_editing.set(None) on_saved=saved /> }
                    })
            }}
        </div>
    }
}
