//! Menu
//!
//! Prepared meals, planned recipes and the recipes still available to plan.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::{PlanStatus, PlannedRecipe, PreparedMeal, Recipe};
use crate::route::Route;

#[component]
pub fn MenuPage() -> impl IntoView {
    let ctx = use_app_context();
    let (recipes, set_recipes) = signal(Vec::<Recipe>::new());
    let (planned, set_planned) = signal(Vec::<PlannedRecipe>::new());
    let (meals, set_meals) = signal(Vec::<PreparedMeal>::new());
    let (loading, set_loading) = signal(true);

    let load = move || {
        let api = ctx.api();
        spawn_local(async move {
            let (loaded_recipes, loaded_planned, loaded_meals) =
                futures::join!(api.list_recipes(), api.list_planned(), api.list_prepared_meals());
            match loaded_recipes {
                Ok(loaded) => set_recipes.set(loaded),
                Err(e) => ctx.error("Не удалось загрузить рецепты", &e),
            }
            match loaded_planned {
                Ok(loaded) => set_planned.set(loaded),
                Err(e) => ctx.error("Не удалось загрузить план", &e),
            }
            match loaded_meals {
                Ok(loaded) => set_meals.set(loaded),
                Err(e) => ctx.error("Не удалось загрузить готовые блюда", &e),
            }
            set_loading.set(false);
        });
    };
    load();

    let active_plans = move || {
        planned
            .get()
            .into_iter()
            .filter(|p| p.status == PlanStatus::Planned)
            .collect::<Vec<_>>()
    };
    let available = move || {
        let plans = active_plans();
        recipes
            .get()
            .into_iter()
            .filter(|r| !plans.iter().any(|p| p.recipe_id == r.id))
            .collect::<Vec<_>>()
    };

    let plan = move |recipe_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.plan_recipe(recipe_id).await {
                Ok(outcome) if outcome.missing_products.is_empty() => {
                    ctx.success(format!("«{}» запланирован", outcome.planned.recipe_name));
                    load();
                }
                Ok(outcome) => {
                    ctx.success(format!(
                        "«{}» запланирован, в список покупок добавлено: {}",
                        outcome.planned.recipe_name,
                        outcome.missing_products.len()
                    ));
                    load();
                }
                Err(e) => ctx.error("Не удалось запланировать рецепт", &e),
            }
        });
    };

    let prepare = move |planned_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.prepare_planned(planned_id).await {
                Ok(meal) => {
                    ctx.success(format!("«{}» приготовлено", meal.recipe_name));
                    ctx.reload();
                    load();
                }
                Err(e) => ctx.error("Не удалось приготовить блюдо", &e),
            }
        });
    };

    let cancel = move |planned_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.cancel_plan(planned_id).await {
                Ok(()) => load(),
                Err(e) => ctx.error("Не удалось отменить план", &e),
            }
        });
    };

    let delete_recipe = move |recipe_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.delete_recipe(recipe_id).await {
                Ok(()) => {
                    ctx.success("Рецепт удалён");
                    load();
                }
                Err(e) => ctx.error("Не удалось удалить рецепт", &e),
            }
        });
    };

    let delete_meal = move |meal_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.delete_meal(meal_id).await {
                Ok(()) => set_meals.update(|list| list.retain(|m| m.id != meal_id)),
                Err(e) => ctx.error("Не удалось удалить блюдо", &e),
            }
        });
    };

    view! {
        <div class="page menu-page">
            <header class="page-header">
                <h1>"Меню"</h1>
                <button type="button" on:click=move |_| ctx.navigate(Route::Recipe(None))>"+ Новый рецепт"</button>
            </header>

            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка..."</p> }>
                <section class="list-section">
                    <h2>"Готовые блюда"</h2>
                    <Show when=move || !meals.get().is_empty() fallback=|| view! { <p class="empty">"Пока ничего не приготовлено"</p> }>
                        <For
                            each=move || meals.get()
                            key=|meal| (meal.id, meal.servings_left)
                            children=move |meal| {
                                let id = meal.id;
                                view! {
                                    <div class="list-row">
                                        <div class="list-main">
                                            <div class="list-title">{meal.recipe_name.clone()}</div>
                                            <div class="list-sub">
                                                {format!(
                                                    "{} · порций: {}",
                                                    meal.prepared_date.format("%d.%m.%Y"),
                                                    meal.servings_left,
                                                )}
                                            </div>
                                        </div>
                                        <DeleteConfirmButton on_confirm=move |_| delete_meal(id) />
                                    </div>
                                }
                            }
                        />
                    </Show>
                </section>

                <section class="list-section">
                    <h2>"Запланировано"</h2>
                    <Show when=move || !active_plans().is_empty() fallback=|| view! { <p class="empty">"Нет запланированных рецептов"</p> }>
                        <For
                            each=active_plans
                            key=|plan| plan.id
                            children=move |plan| {
                                let id = plan.id;
                                let missing = plan
                                    .missing_products
                                    .iter()
                                    .map(|m| format!("{} {} {}", m.name, m.quantity, m.unit))
                                    .collect::<Vec<_>>();
                                view! {
                                    <div class="list-row">
                                        <div class="list-main">
                                            <div class="list-title">{plan.recipe_name.clone()}</div>
                                            {(!missing.is_empty())
                                                .then(|| {
                                                    view! { <div class="list-sub warning">{format!("Не хватает: {}", missing.join(", "))}</div> }
                                                })}
                                        </div>
                                        <button type="button" on:click=move |_| prepare(id)>"Приготовить"</button>
                                        <button type="button" class="secondary" on:click=move |_| cancel(id)>"Отменить"</button>
                                    </div>
                                }
                            }
                        />
                    </Show>
                </section>

                <section class="list-section">
                    <h2>"Рецепты"</h2>
                    <Show when=move || !available().is_empty() fallback=|| view! { <p class="empty">"Нет доступных рецептов"</p> }>
                        <div class="card-grid">
                            <For
                                each=available
                                key=|recipe| (recipe.id, recipe.name.clone())
                                children=move |recipe| {
                                    let id = recipe.id;
                                    view! {
                                        <div class="recipe-card">
                                            <div class="recipe-name link" on:click=move |_| ctx.navigate(Route::Recipe(Some(id)))>
                                                {recipe.name.clone()}
                                            </div>
                                            <div class="recipe-stats">
                                                {recipe.cooking_time.map(|t| format!("{t} мин · "))}
                                                {format!("{} порц.", recipe.servings)}
                                                {recipe.total_calories.map(|c| format!(" · {c:.0} ккал/100 г"))}
                                            </div>
                                            <div class="card-actions">
                                                <button type="button" on:click=move |_| plan(id)>"Запланировать"</button>
                                                <DeleteConfirmButton on_confirm=move |_| delete_recipe(id) />
                                            </div>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    </Show>
                </section>
            </Show>
        </div>
    }
}
