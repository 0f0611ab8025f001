//! Inventory Home
//!
//! What is in stock, what still has to be bought, and the storage locations.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::components::palette::glyph;
use crate::context::use_app_context;
use crate::models::{Product, ShoppingDraft, ShoppingItem};
use crate::route::Route;
use crate::store::{store_find_location, use_pantry_store, PantryStateStoreFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Have,
    Need,
    Locations,
}

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_pantry_store();
    let (tab, set_tab) = signal(Tab::Have);
    let (products, set_products) = signal(Vec::<Product>::new());
    let (shopping, set_shopping) = signal(Vec::<ShoppingItem>::new());
    let (loading, set_loading) = signal(true);

    let api = ctx.api();
    spawn_local(async move {
        let (loaded_products, loaded_shopping) = futures::join!(api.list_products(), api.list_shopping());
        match loaded_products {
            Ok(loaded) => set_products.set(loaded),
            Err(e) => ctx.error("Не удалось загрузить продукты", &e),
        }
        match loaded_shopping {
            Ok(loaded) => set_shopping.set(loaded),
            Err(e) => ctx.error("Не удалось загрузить список покупок", &e),
        }
        set_loading.set(false);
    });

    let have = move || {
        products
            .get()
            .into_iter()
            .filter(|p| p.quantity > 0.0)
            .collect::<Vec<_>>()
    };
    let need = move || {
        shopping
            .get()
            .into_iter()
            .filter(|item| !item.is_purchased)
            .collect::<Vec<_>>()
    };
    let progress = move || actions::stock_progress(have().len(), need().len());

    let to_list = move |product: Product| {
        let draft = ShoppingDraft {
            name: product.name.clone(),
            quantity: 1.0,
            unit: product.unit.clone(),
            category: product.category.clone(),
            notes: None,
        };
        let api = ctx.api();
        spawn_local(async move {
            match api.add_shopping_item(&draft).await {
                Ok(item) => {
                    ctx.success(format!("«{}» в списке покупок", item.name));
                    set_shopping.update(|list| list.push(item));
                }
                Err(e) => ctx.error("Не удалось добавить покупку", &e),
            }
        });
    };

    let toggle = move |item_id: i64| {
        let wanted = match actions::flip_purchased(&set_shopping, item_id) {
            Ok(wanted) => wanted,
            Err(e) => return ctx.error("Не удалось обновить покупку", &e),
        };
        let api = ctx.api();
        spawn_local(async move {
            if let Err(e) = actions::save_purchased(&api, &set_shopping, item_id, wanted).await {
                ctx.error("Не удалось обновить покупку", &e);
            }
        });
    };

    let tab_button = move |value: Tab, label: &'static str| {
        view! {
            <button
                type="button"
                class=move || if tab.get() == value { "tab active" } else { "tab" }
                on:click=move |_| set_tab.set(value)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="page home-page">
            <header class="page-header">
                <h1>"Мои запасы"</h1>
                <div class="progress">
                    <div class="progress-label">{move || format!("Есть дома: {}%", progress())}</div>
                    <div class="progress-track">
                        <div class="progress-bar" style=move || format!("width: {}%", progress())></div>
                    </div>
                </div>
            </header>

            <div class="tabs">
                {tab_button(Tab::Have, "Есть дома")}
                {tab_button(Tab::Need, "Нужно купить")}
                {tab_button(Tab::Locations, "Места хранения")}
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка..."</p> }>
                {move || match tab.get() {
                    Tab::Have => {
                        let rows = have();
                        if rows.is_empty() {
                            return view! { <p class="empty">"Дома пока ничего нет"</p> }.into_any();
                        }
                        rows.into_iter()
                            .map(|product| {
                                let location = store_find_location(&store, product.storage_location_id)
                                    .map(|l| l.name)
                                    .unwrap_or_default();
                                let target = product.clone();
                                view! {
                                    <div class="list-row">
                                        <div class="list-main">
                                            <div class="list-title">{product.name.clone()}</div>
                                            <div class="list-sub">
                                                {format!("{} {} · {}", product.quantity, product.unit, location)}
                                            </div>
                                        </div>
                                        <button type="button" class="secondary" on:click=move |_| to_list(target.clone())>
                                            "В список"
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                    Tab::Need => {
                        let rows = need();
                        if rows.is_empty() {
                            return view! { <p class="empty">"Все покупки сделаны"</p> }.into_any();
                        }
                        rows.into_iter()
                            .map(|item| {
                                let id = item.id;
                                view! {
                                    <div class="list-row">
                                        <input type="checkbox" prop:checked=item.is_purchased on:change=move |_| toggle(id) />
                                        <div class="list-main">
                                            <div class="list-title">{item.name.clone()}</div>
                                            <div class="list-sub">{format!("{} {}", item.quantity, item.unit)}</div>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                    Tab::Locations => view! {
                        <div class="card-grid">
                            <For
                                each=move || store.locations().get()
                                key=|location| (location.id, location.items_count)
                                children=move |location| {
                                    let id = location.id;
                                    view! {
                                        <div
                                            class=format!("location-card {}", location.color)
                                            on:click=move |_| ctx.navigate(Route::StorageDetail(id))
                                        >
                                            <div class="location-icon">{glyph(&location.icon)}</div>
                                            <div class="location-name">{location.name.clone()}</div>
                                            <div class="location-count">{format!("{} продуктов", location.items_count)}</div>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    }
                    .into_any(),
                }}
            </Show>
        </div>
    }
}
