//! Shopping List
//!
//! Items still to buy and items already bought. Bought items can be put away
//! into a storage location.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::components::{DeleteConfirmButton, PutAwayDialog, ShoppingItemDialog};
use crate::context::use_app_context;
use crate::models::ShoppingItem;

#[component]
pub fn ShoppingListPage() -> impl IntoView {
    let ctx = use_app_context();
    let (items, set_items) = signal(Vec::<ShoppingItem>::new());
    let (loading, set_loading) = signal(true);
    let (adding, set_adding) = signal(false);
    let (putting_away, set_putting_away) = signal(None::<ShoppingItem>);

    let api = ctx.api();
    spawn_local(async move {
        match api.list_shopping().await {
            Ok(loaded) => set_items.set(loaded),
            Err(e) => ctx.error("Не удалось загрузить список покупок", &e),
        }
        set_loading.set(false);
    });

    let toggle = move |item_id: i64| {
        let wanted = match actions::flip_purchased(&set_items, item_id) {
            Ok(wanted) => wanted,
            Err(e) => return ctx.error("Не удалось обновить покупку", &e),
        };
        let api = ctx.api();
        spawn_local(async move {
            if let Err(e) = actions::save_purchased(&api, &set_items, item_id, wanted).await {
                ctx.error("Не удалось обновить покупку", &e);
            }
        });
    };

    let delete = move |item_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.delete_shopping_item(item_id).await {
                Ok(()) => set_items.update(|list| list.retain(|item| item.id != item_id)),
                Err(e) => ctx.error("Не удалось удалить покупку", &e),
            }
        });
    };

    let section = move |purchased: bool| {
        view! {
            <For
                each={move || items.get().into_iter().filter(move |item| item.is_purchased == purchased).collect::<Vec<_>>()}
                key=|item| (item.id, item.is_purchased)
                children=move |item| {
                    let id = item.id;
                    let stored = item.clone();
                    view! {
                        <div class={if item.is_purchased { "list-row purchased" } else { "list-row" }}>
                            <input type="checkbox" prop:checked=item.is_purchased on:change=move |_| toggle(id) />
                            <div class="list-main">
                                <div class="list-title">{item.name.clone()}</div>
                                <div class="list-sub">
                                    {format!("{} {}", item.quantity, item.unit)}
                                    {item.category.clone().map(|c| format!(" · {c}"))}
                                </div>
                                {item.notes.clone().map(|notes| view! { <div class="list-notes">{notes}</div> })}
                            </div>
                            {item
                                .is_purchased
                                .then(|| {
                                    view! {
                                        <button
                                            type="button"
                                            class="secondary"
                                            on:click=move |_| set_putting_away.set(Some(stored.clone()))
                                        >
                                            "Убрать"
                                        </button>
                                    }
                                })}
                            <DeleteConfirmButton on_confirm=move |_| delete(id) />
                        </div>
                    }
                }
            />
        }
    };

    let to_buy_count = move || items.get().iter().filter(|item| !item.is_purchased).count();
    let bought_count = move || items.get().iter().filter(|item| item.is_purchased).count();

    view! {
        <div class="page shopping-list-page">
            <header class="page-header">
                <h1>"Список покупок"</h1>
                <button type="button" on:click=move |_| set_adding.set(true)>"+ Добавить"</button>
            </header>

            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка..."</p> }>
                <section class="list-section">
                    <h2>{move || format!("Купить ({})", to_buy_count())}</h2>
                    <Show when=move || to_buy_count() == 0>
                        <p class="empty">"Список пуст"</p>
                    </Show>
                    {section(false)}
                </section>
                <section class="list-section">
                    <h2>{move || format!("Куплено ({})", bought_count())}</h2>
                    {section(true)}
                </section>
            </Show>

            <Show when=move || adding.get()>
                <ShoppingItemDialog
                    on_close=move |_| set_adding.set(false)
                    on_added=move |item: ShoppingItem| {
                        set_items.update(|list| list.push(item));
                        set_adding.set(false);
                    }
                />
            </Show>

            {move || {
                putting_away
                    .get()
                    .map(|item| {
                        view! {
                            <PutAwayDialog
                                item=item
                                on_close=move |_| set_putting_away.set(None)
                                on_done=move |item_id: i64| {
                                    set_items.update(|list| list.retain(|item| item.id != item_id));
                                    set_putting_away.set(None);
                                }
                            />
                        }
                    })
            }}
        </div>
    }
}
