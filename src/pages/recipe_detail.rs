//! Recipe Detail
//!
//! View or edit one recipe and its ingredient list. Preparing a recipe first
//! pairs its ingredients with on-hand products.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{IngredientDialog, ProductMatchingDialog, TextAreaField, TextField};
use crate::context::use_app_context;
use crate::forms::RecipeForm;
use crate::models::{IngredientDraft, RecipeDetail};
use crate::route::Route;

fn drafts_of(detail: &RecipeDetail) -> Vec<IngredientDraft> {
    detail
        .ingredients
        .iter()
        .map(|i| IngredientDraft {
            product_name: i.product_name.clone(),
            quantity: i.quantity,
            unit: i.unit.clone(),
        })
        .collect()
}

#[component]
pub fn RecipeDetailPage(recipe_id: Option<i64>) -> impl IntoView {
    let ctx = use_app_context();
    let (detail, set_detail) = signal(None::<RecipeDetail>);
    let (loading, set_loading) = signal(recipe_id.is_some());
    let (editing, set_editing) = signal(recipe_id.is_none());
    let (adding_ingredient, set_adding_ingredient) = signal(false);
    let (matching, set_matching) = signal(false);
    let (saving, set_saving) = signal(false);

    let initial = RecipeForm::default();
    let name = RwSignal::new(initial.name);
    let description = RwSignal::new(initial.description);
    let cooking_time = RwSignal::new(initial.cooking_time);
    let servings = RwSignal::new(initial.servings);
    let calories = RwSignal::new(initial.calories);
    let image_url = RwSignal::new(initial.image_url);
    let ingredients = RwSignal::new(Vec::<IngredientDraft>::new());

    let fill_form = move |detail: &RecipeDetail| {
        let form = RecipeForm::from_recipe(&detail.recipe);
        name.set(form.name);
        description.set(form.description);
        cooking_time.set(form.cooking_time);
        servings.set(form.servings);
        calories.set(form.calories);
        image_url.set(form.image_url);
        ingredients.set(drafts_of(detail));
    };

    if let Some(id) = recipe_id {
        let api = ctx.api();
        spawn_local(async move {
            match api.recipe_detail(id).await {
                Ok(loaded) => {
                    fill_form(&loaded);
                    set_detail.set(Some(loaded));
                }
                Err(e) => ctx.error("Не удалось загрузить рецепт", &e),
            }
            set_loading.set(false);
        });
    }

    let save = move |_| {
        let form = RecipeForm {
            name: name.get(),
            description: description.get(),
            cooking_time: cooking_time.get(),
            servings: servings.get(),
            calories: calories.get(),
            image_url: image_url.get(),
        };
        let draft = match form.validate(&ingredients.get()) {
            Ok(draft) => draft,
            Err(e) => return ctx.invalid(&e),
        };
        let api = ctx.api();
        set_saving.set(true);
        spawn_local(async move {
            let result = match recipe_id {
                Some(id) => api.update_recipe(id, &draft).await,
                None => api.create_recipe(&draft).await,
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    ctx.success(format!("Рецепт «{}» сохранён", saved.recipe.name));
                    if recipe_id.is_none() {
                        ctx.navigate(Route::Recipe(Some(saved.recipe.id)));
                    } else {
                        fill_form(&saved);
                        set_detail.set(Some(saved));
                        set_editing.set(false);
                    }
                }
                Err(e) => ctx.error("Не удалось сохранить рецепт", &e),
            }
        });
    };

    let cancel_edit = move |_| match detail.get_untracked() {
        Some(loaded) => {
            fill_form(&loaded);
            set_editing.set(false);
        }
        None => ctx.navigate(Route::Menu),
    };

    let matched = move |_| {
        set_matching.set(false);
        ctx.navigate(Route::Menu);
    };

    let ingredient_rows = move || {
        ingredients
            .get()
            .into_iter()
            .enumerate()
            .map(|(index, ingredient)| {
                view! {
                    <li class="ingredient-row">
                        <span class="ingredient-name">{ingredient.product_name.clone()}</span>
                        <span class="ingredient-quantity">{format!("{} {}", ingredient.quantity, ingredient.unit)}</span>
                        <Show when=move || editing.get()>
                            <button
                                type="button"
                                class="icon-btn"
                                title="Убрать"
                                on:click=move |_| {
                                    ingredients.update(|list| {
                                        if index < list.len() {
                                            list.remove(index);
                                        }
                                    })
                                }
                            >
                                "✗"
                            </button>
                        </Show>
                    </li>
                }
            })
            .collect_view()
    };

    let stats = move || {
        detail.get().map(|d| {
            let recipe = d.recipe;
            view! {
                <div class="recipe-stats">
                    {recipe.cooking_time.map(|t| view! { <span class="stat">{format!("⏱ {t} мин")}</span> })}
                    <span class="stat">{format!("🍽 {} порц.", recipe.servings)}</span>
                    {recipe.total_calories.map(|c| view! { <span class="stat">{format!("🔥 {c:.0} ккал/100 г")}</span> })}
                </div>
                {recipe.description.map(|text| view! { <p class="recipe-description">{text}</p> })}
                {recipe.image_url.map(|src| view! { <img class="recipe-image" src=src alt=recipe.name.clone() /> })}
            }
        })
    };

    view! {
        <div class="page recipe-detail-page">
            <header class="page-header">
                <button type="button" class="secondary" on:click=move |_| ctx.navigate(Route::Menu)>"← Меню"</button>
                <h1>
                    {move || {
                        if recipe_id.is_none() {
                            "Новый рецепт".to_string()
                        } else {
                            detail.get().map(|d| d.recipe.name).unwrap_or_default()
                        }
                    }}
                </h1>
                <Show when=move || !editing.get() && detail.get().is_some()>
                    <button type="button" class="secondary" on:click=move |_| set_editing.set(true)>"Изменить"</button>
                    <button type="button" on:click=move |_| set_matching.set(true)>"Приготовить"</button>
                </Show>
            </header>

            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка..."</p> }>
                <Show when=move || editing.get() fallback=stats>
                    <div class="dialog-form">
                        <TextField label="Название" value=name />
                        <TextAreaField label="Описание" value=description />
                        <div class="field-row">
                            <TextField label="Время, мин" value=cooking_time input_type="number" />
                            <TextField label="Порции" value=servings input_type="number" />
                            <TextField label="Ккал на 100 г" value=calories input_type="number" />
                        </div>
                        <TextField label="Изображение (URL)" value=image_url />
                    </div>
                </Show>

                <section class="list-section">
                    <h2>"Ингредиенты"</h2>
                    <Show when=move || !ingredients.get().is_empty() fallback=|| view! { <p class="empty">"Ингредиентов пока нет"</p> }>
                        <ul class="ingredient-list">{ingredient_rows}</ul>
                    </Show>
                    <Show when=move || editing.get()>
                        <button type="button" class="secondary" on:click=move |_| set_adding_ingredient.set(true)>
                            "+ Ингредиент"
                        </button>
                    </Show>
                </section>

                <Show when=move || editing.get()>
                    <div class="dialog-actions">
                        <button type="button" class="secondary" on:click=cancel_edit>"Отмена"</button>
                        <button type="button" disabled=move || saving.get() on:click=save>"Сохранить"</button>
                    </div>
                </Show>
            </Show>

            <Show when=move || adding_ingredient.get()>
                <IngredientDialog
                    on_close=move |_| set_adding_ingredient.set(false)
                    on_add=move |draft: IngredientDraft| {
                        ingredients.update(|list| list.push(draft));
                        set_adding_ingredient.set(false);
                    }
                />
            </Show>

            {move || {
                let loaded = detail.get()?;
                matching
                    .get()
                    .then(|| {
                        view! {
                            <ProductMatchingDialog
                                recipe_name=loaded.recipe.name.clone()
                                ingredients=loaded.ingredients.clone()
                                on_close=move |_| set_matching.set(false)
                                on_confirmed=matched
                            />
                        }
                    })
            }}
        </div>
    }
}
