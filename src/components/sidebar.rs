//! Sidebar Component
//!
//! Page navigation plus the cached list of storage locations.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::palette::glyph;
use crate::context::use_app_context;
use crate::route::Route;
use crate::store::{store_set_locations, use_pantry_store, PantryStateStoreFields};

const NAV: &[(&str, &str)] = &[
    ("🏠", "Запасы"),
    ("🛒", "Список покупок"),
    ("📷", "Сканировать чек"),
    ("💰", "Бюджет"),
    ("🍽", "Меню"),
    ("📒", "Дневник питания"),
    ("📚", "Каталог продуктов"),
    ("🗄", "Места хранения"),
];

fn nav_route(index: usize) -> Route {
    match index {
        0 => Route::Home,
        1 => Route::ShoppingList,
        2 => Route::ScanReceipt,
        3 => Route::Budget,
        4 => Route::Menu,
        5 => Route::FoodDiary,
        6 => Route::ProductCatalog,
        _ => Route::StorageManagement,
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_pantry_store();

    // Reload locations on mount and whenever a page reports a change
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            match api.list_locations().await {
                Ok(locations) => store_set_locations(&store, locations),
                Err(e) => ctx.error("Не удалось загрузить места хранения", &e),
            }
        });
    });

    view! {
        <nav class="sidebar">
            <div class="sidebar-title">"Кладовая"</div>
            <ul class="sidebar-nav">
                {NAV
                    .iter()
                    .enumerate()
                    .map(|(index, (icon, label))| {
                        let route = nav_route(index);
                        let target = route.clone();
                        view! {
                            <li
                                class=move || if ctx.route.get() == route { "nav-item active" } else { "nav-item" }
                                on:click=move |_| ctx.navigate(target.clone())
                            >
                                <span class="nav-icon">{*icon}</span>
                                {*label}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <div class="sidebar-section">"Места хранения"</div>
            <Show when=move || !store.locations_loaded().get()>
                <div class="muted">"Загрузка..."</div>
            </Show>
            <ul class="sidebar-locations">
                <For
                    each=move || store.locations().get()
                    key=|location| (location.id, location.items_count, location.name.clone())
                    children=move |location| {
                        let id = location.id;
                        view! {
                            <li
                                class=move || {
                                    if ctx.route.get() == Route::StorageDetail(id) { "nav-item active" } else { "nav-item" }
                                }
                                on:click=move |_| ctx.navigate(Route::StorageDetail(id))
                            >
                                <span class=format!("location-dot {}", location.color)>{glyph(&location.icon)}</span>
                                {location.name.clone()}
                                <span class="badge">{location.items_count}</span>
                            </li>
                        }
                    }
                />
            </ul>
        </nav>
    }
}
