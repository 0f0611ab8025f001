//! Product Catalog
//!
//! Reference list of products with their default unit and calorie content.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{CatalogDialog, DeleteConfirmButton};
use crate::context::use_app_context;
use crate::models::CatalogEntry;

/// Case-insensitive match over name and category
fn matches_search(entry: &CatalogEntry, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    entry.name.to_lowercase().contains(&query)
        || entry
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&query))
}

#[derive(Debug, Clone, PartialEq)]
enum Editing {
    New,
    Existing(CatalogEntry),
}

#[component]
pub fn ProductCatalogPage() -> impl IntoView {
    let ctx = use_app_context();
    let (entries, set_entries) = signal(Vec::<CatalogEntry>::new());
    let (loading, set_loading) = signal(true);
    let (editing, set_editing) = signal(None::<Editing>);
    let search = RwSignal::new(String::new());

    let load = move || {
        let api = ctx.api();
        spawn_local(async move {
            match api.list_catalog("").await {
                Ok(loaded) => set_entries.set(loaded),
                Err(e) => ctx.error("Не удалось загрузить каталог", &e),
            }
            set_loading.set(false);
        });
    };
    load();

    let visible = move || {
        let query = search.get();
        entries
            .get()
            .into_iter()
            .filter(|entry| matches_search(entry, &query))
            .collect::<Vec<_>>()
    };

    let delete = move |entry_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.delete_catalog_entry(entry_id).await {
                Ok(()) => {
                    set_entries.update(|list| list.retain(|e| e.id != entry_id));
                    ctx.success("Продукт удалён из каталога");
                }
                Err(e) => ctx.error("Не удалось удалить продукт", &e),
            }
        });
    };

    view! {
        <div class="page product-catalog-page">
            <header class="page-header">
                <h1>"Каталог продуктов"</h1>
                <button type="button" on:click=move |_| set_editing.set(Some(Editing::New))>"+ Добавить"</button>
            </header>

            <input
                class="search"
                type="search"
                placeholder="Поиск по названию или категории"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />

            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка..."</p> }>
                <Show when=move || !visible().is_empty() fallback=|| view! { <p class="empty">"Ничего не найдено"</p> }>
                    <For
                        each=visible
                        key=|entry| (entry.id, entry.name.clone(), entry.default_unit.clone())
                        children=move |entry| {
                            let id = entry.id;
                            let editable = entry.clone();
                            view! {
                                <div class="list-row">
                                    <div class="list-main">
                                        <div class="list-title">{entry.name.clone()}</div>
                                        <div class="list-sub">
                                            {entry.category.clone().map(|c| format!("{c} · "))}
                                            {entry.default_unit.clone()}
                                            {entry.calories_per_100g.map(|c| format!(" · {c:.0} ккал/100 г"))}
                                        </div>
                                    </div>
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
                            }
                        }
                    />
                </Show>
            </Show>

            {move || {
                editing
                    .get()
                    .map(|mode| {
                        let entry = match mode {
                            Editing::New => None,
                            Editing::Existing(entry) => Some(entry),
                        };
                        view! {
                            <CatalogDialog
                                entry=entry
                                on_close=move |_| set_editing.set(None)
                                on_saved=move |_: CatalogEntry| {
                                    set_editing.set(None);
                                    load();
                                }
                            />
                        }
                    })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, category: Option<&str>) -> CatalogEntry {
        CatalogEntry {
            id: 1,
            name: name.to_string(),
            category: category.map(str::to_string),
            calories_per_100g: None,
            default_unit: "г".to_string(),
        }
    }

    #[test]
    fn test_search_matches_name_and_category() {
        let rice = entry("Рис басмати", Some("Крупы"));
        assert!(matches_search(&rice, ""));
        assert!(matches_search(&rice, "рис"));
        assert!(matches_search(&rice, "КРУП"));
        assert!(!matches_search(&rice, "молоко"));
        assert!(!matches_search(&entry("Соль", None), "крупы"));
    }
}
