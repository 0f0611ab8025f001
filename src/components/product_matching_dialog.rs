//! Product Matching Dialog
//!
//! Pairs every recipe ingredient with an on-hand product before cooking.
//! Automatic matches can be overridden; confirming is blocked until every
//! ingredient has a product and leaves stock untouched.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::components::Modal;
use crate::context::use_app_context;
use crate::matching;
use crate::models::{Product, RecipeIngredient};

#[component]
pub fn ProductMatchingDialog(
    recipe_name: String,
    ingredients: Vec<RecipeIngredient>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_confirmed: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let ingredients = StoredValue::new(ingredients);
    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let matches = RwSignal::new(HashMap::<String, i64>::new());

    let api = ctx.api();
    spawn_local(async move {
        match actions::load_matches(&api, &ingredients.get_value()).await {
            Ok((available, auto)) => {
                matches.set(auto);
                set_products.set(available);
            }
            Err(e) => ctx.error("Не удалось загрузить продукты", &e),
        }
        set_loading.set(false);
    });

    let can_confirm = move || matching::can_confirm(&ingredients.get_value(), &matches.get());

    let confirm = move |_| match actions::confirm_matches(&ingredients.get_value(), &matches.get_untracked()) {
        Ok(()) => {
            ctx.success(format!("«{recipe_name}»: продукты сопоставлены"));
            on_confirmed.run(());
        }
        Err(e) => ctx.error("Не удалось подтвердить", &e),
    };

    let rows = move || {
        ingredients
            .get_value()
            .into_iter()
            .map(|ingredient| {
                let key = ingredient.product_name.clone();
                let select_key = key.clone();
                let current = move || {
                    matches
                        .get()
                        .get(&key)
                        .map(|id| id.to_string())
                        .unwrap_or_default()
                };
                let options = matching::override_options(&ingredient, &products.get())
                    .into_iter()
                    .map(|p| (p.id, format!("{} ({} {})", p.name, p.quantity, p.unit)))
                    .collect::<Vec<_>>();
                let unmatched_key = select_key.clone();
                view! {
                    <div class="match-row">
                        <div class="match-ingredient">
                            {format!("{}: {} {}", ingredient.product_name, ingredient.quantity, ingredient.unit)}
                        </div>
                        <select
                            prop:value=current
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                let key = select_key.clone();
                                matches.update(|m| match value.parse::<i64>() {
                                    Ok(id) => {
                                        m.insert(key, id);
                                    }
                                    Err(_) => {
                                        m.remove(&key);
                                    }
                                });
                            }
                        >
                            <option value="">"Не выбрано"</option>
                            {options
                                .into_iter()
                                .map(|(id, text)| view! { <option value=id.to_string()>{text}</option> })
                                .collect_view()}
                        </select>
                        <Show when=move || !matches.get().contains_key(&unmatched_key)>
                            <span class="match-missing">"Нет подходящего продукта"</span>
                        </Show>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <Modal title="Сопоставление продуктов" on_close=on_close>
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка..."</p> }>
                <div class="match-list">{rows}</div>
            </Show>
            <div class="dialog-actions">
                <button type="button" class="secondary" on:click=move |_| on_close.run(())>"Отмена"</button>
                <button
                    type="button"
                    disabled=move || loading.get() || !can_confirm()
                    on:click=confirm
                >
                    "Подтвердить"
                </button>
            </div>
        </Modal>
    }
}
