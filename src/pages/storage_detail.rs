//! Storage Detail
//!
//! Products kept in one storage location.

use std::collections::BTreeSet;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::palette::glyph;
use crate::components::{ProductCard, ProductDialog};
use crate::context::use_app_context;
use crate::models::{Product, StorageLocation};
use crate::route::Route;

/// Which product dialog is open
#[derive(Debug, Clone, PartialEq)]
enum Editing {
    New,
    Existing(Product),
}

#[component]
pub fn StorageDetailPage(location_id: i64) -> impl IntoView {
    let ctx = use_app_context();
    let (location, set_location) = signal(None::<StorageLocation>);
    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (editing, set_editing) = signal(None::<Editing>);

    let load = move || {
        let api = ctx.api();
        spawn_local(async move {
            match api.location_detail(location_id).await {
                Ok(detail) => {
                    set_location.set(Some(detail.location));
                    set_products.set(detail.products);
                }
                Err(e) => ctx.error("Не удалось загрузить место хранения", &e),
            }
            set_loading.set(false);
        });
    };
    load();

    let categories = move || {
        products
            .get()
            .into_iter()
            .filter_map(|p| p.category)
            .collect::<BTreeSet<_>>()
    };

    let delete = move |product_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.delete_product(product_id).await {
                Ok(()) => {
                    set_products.update(|list| list.retain(|p| p.id != product_id));
                    ctx.success("Продукт удалён");
                    ctx.reload();
                }
                Err(e) => ctx.error("Не удалось удалить продукт", &e),
            }
        });
    };

    let saved = move |_: Product| {
        set_editing.set(None);
        load();
        ctx.reload();
    };

    view! {
        <div class="page storage-detail-page">
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка..."</p> }>
                {move || match location.get() {
                    None => view! {
                        <div class="empty">
                            <p>"Место хранения не найдено"</p>
                            <button type="button" on:click=move |_| ctx.navigate(Route::Home)>"На главную"</button>
                        </div>
                    }
                    .into_any(),
                    Some(location) => view! {
                        <header class=format!("page-header location-header {}", location.color)>
                            <span class="location-icon">{glyph(&location.icon)}</span>
                            <h1>{location.name.clone()}</h1>
                            <span class="badge">{move || format!("{} продуктов", products.get().len())}</span>
                            <button type="button" on:click=move |_| set_editing.set(Some(Editing::New))>
                                "+ Добавить продукт"
                            </button>
                        </header>
                        <div class="chips">
                            {move || {
                                categories()
                                    .into_iter()
                                    .map(|category| view! { <span class="chip">{category}</span> })
                                    .collect_view()
                            }}
                        </div>
                        <Show
                            when=move || !products.get().is_empty()
                            fallback=|| view! { <p class="empty">"Здесь пока пусто"</p> }
                        >
                            <div class="card-grid">
                                <For
                                    each=move || products.get()
                                    key=|product| (product.id, product.quantity.to_bits(), product.name.clone())
                                    children=move |product| {
                                        view! {
                                            <ProductCard
                                                product=product
                                                on_edit=move |p: Product| set_editing.set(Some(Editing::Existing(p)))
                                                on_delete=delete
                                            />
                                        }
                                    }
                                />
                            </div>
                        </Show>
                    }
                    .into_any(),
                }}
            </Show>

            {move || {
                editing
                    .get()
                    .map(|mode| {
                        let product = match mode {
                            Editing::New => None,
                            Editing::Existing(product) => Some(product),
                        };
                        view! {
                            <ProductDialog
                                storage_location_id=location_id
                                product=product
                                on_close=move |_| set_editing.set(None)
                                on_saved=saved
                            />
                        }
                    })
            }}
        </div>
    }
}
