//! Food Diary
//!
//! Today's meals against the daily calorie goal, with quick-add from
//! prepared meals.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::components::{DeleteConfirmButton, Modal, SelectField, TextField};
use crate::context::use_app_context;
use crate::forms::{self, DiaryForm};
use crate::models::{DiaryDraft, FoodDiaryEntry, PreparedMeal};

const MEAL_TYPES: &[(&str, &str)] = &[
    ("breakfast", "Завтрак"),
    ("lunch", "Обед"),
    ("dinner", "Ужин"),
    ("snack", "Перекус"),
];

fn meal_type_label(value: &str) -> &str {
    MEAL_TYPES
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

#[component]
pub fn FoodDiaryPage() -> impl IntoView {
    let ctx = use_app_context();
    let today = chrono::Local::now().date_naive();
    let (entries, set_entries) = signal(Vec::<FoodDiaryEntry>::new());
    let (total, set_total) = signal(0.0f64);
    let (goal, set_goal) = signal(0i64);
    let (meals, set_meals) = signal(Vec::<PreparedMeal>::new());
    let (loading, set_loading) = signal(true);
    let (adding, set_adding) = signal(false);
    let (editing_goal, set_editing_goal) = signal(false);
    let goal_input = RwSignal::new(String::new());

    let meal_name = RwSignal::new(String::new());
    let portion = RwSignal::new(String::new());
    let calories = RwSignal::new(String::new());
    let meal_type = RwSignal::new(MEAL_TYPES[0].0.to_string());

    let load_day = move || {
        let api = ctx.api();
        spawn_local(async move {
            match api.diary_day(Some(today)).await {
                Ok(day) => {
                    set_entries.set(day.entries);
                    set_total.set(day.total_calories);
                }
                Err(e) => ctx.error("Не удалось загрузить дневник", &e),
            }
        });
    };

    let api = ctx.api();
    spawn_local(async move {
        let (day, settings, prepared) =
            futures::join!(api.diary_day(Some(today)), api.settings(), api.list_prepared_meals());
        match day {
            Ok(day) => {
                set_entries.set(day.entries);
                set_total.set(day.total_calories);
            }
            Err(e) => ctx.error("Не удалось загрузить дневник", &e),
        }
        match settings {
            Ok(settings) => set_goal.set(settings.daily_calorie_goal),
            Err(e) => ctx.error("Не удалось загрузить цель", &e),
        }
        match prepared {
            Ok(loaded) => set_meals.set(loaded),
            Err(e) => ctx.error("Не удалось загрузить готовые блюда", &e),
        }
        set_loading.set(false);
    });

    let add_entry = move |draft: DiaryDraft| {
        let api = ctx.api();
        spawn_local(async move {
            match api.add_diary_entry(&draft).await {
                Ok(entry) => {
                    ctx.success(format!("«{}» добавлено в дневник", entry.meal_name));
                    set_adding.set(false);
                    load_day();
                }
                Err(e) => ctx.error("Не удалось добавить запись", &e),
            }
        });
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = DiaryForm {
            meal_name: meal_name.get(),
            portion_weight: portion.get(),
            calories: calories.get(),
            meal_type: meal_type.get(),
        };
        match form.validate(today) {
            Ok(draft) => {
                meal_name.set(String::new());
                portion.set(String::new());
                calories.set(String::new());
                add_entry(draft);
            }
            Err(e) => ctx.invalid(&e),
        }
    };

    let quick_add = move |meal: PreparedMeal| {
        let (portion_weight, meal_calories) = actions::serving_of(&meal);
        add_entry(DiaryDraft {
            meal_name: meal.recipe_name,
            portion_weight,
            calories: meal_calories,
            meal_type: Some(meal_type.get_untracked()),
            eaten_date: Some(today),
        });
    };

    let delete = move |entry_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.delete_diary_entry(entry_id).await {
                Ok(()) => load_day(),
                Err(e) => ctx.error("Не удалось удалить запись", &e),
            }
        });
    };

    let save_goal = move |_| {
        let value = match forms::calorie_goal(&goal_input.get()) {
            Ok(value) => value,
            Err(e) => return ctx.invalid(&e),
        };
        let api = ctx.api();
        spawn_local(async move {
            match api.update_calorie_goal(value).await {
                Ok(settings) => {
                    set_goal.set(settings.daily_calorie_goal);
                    set_editing_goal.set(false);
                    ctx.success("Цель обновлена");
                }
                Err(e) => ctx.error("Не удалось сохранить цель", &e),
            }
        });
    };

    let status = move || {
        let remaining = goal.get() as f64 - total.get();
        if remaining < 0.0 {
            format!("Превышение на {:.0} ккал", -remaining)
        } else {
            format!("Осталось {remaining:.0} ккал")
        }
    };
    let meal_type_options =
        Signal::derive(|| MEAL_TYPES.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect());

    view! {
        <div class="page food-diary-page">
            <header class="page-header">
                <h1>"Дневник питания"</h1>
                <span class="muted">{today.format("%d.%m.%Y").to_string()}</span>
                <button type="button" on:click=move |_| set_adding.set(true)>"+ Запись"</button>
            </header>

            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка..."</p> }>
                <section class="summary-card calories">
                    <div class="summary-value">{move || format!("{:.0} / {} ккал", total.get(), goal.get())}</div>
                    <div class="progress-track">
                        <div
                            class={move || if total.get() > goal.get() as f64 { "progress-bar over" } else { "progress-bar" }}
                            style=move || {
                                let share = if goal.get() > 0 { (total.get() / goal.get() as f64 * 100.0).min(100.0) } else { 0.0 };
                                format!("width: {share:.0}%")
                            }
                        ></div>
                    </div>
                    <div class="summary-label">{status}</div>
                    <Show
                        when=move || editing_goal.get()
                        fallback=move || {
                            view! {
                                <button
                                    type="button"
                                    class="secondary"
                                    on:click=move |_| {
                                        goal_input.set(goal.get_untracked().to_string());
                                        set_editing_goal.set(true);
                                    }
                                >
                                    "Изменить цель"
                                </button>
                            }
                        }
                    >
                        <div class="field-row">
                            <TextField label="Цель, ккал" value=goal_input input_type="number" />
                            <button type="button" on:click=save_goal>"Сохранить"</button>
                            <button type="button" class="secondary" on:click=move |_| set_editing_goal.set(false)>"Отмена"</button>
                        </div>
                    </Show>
                </section>

                <section class="list-section">
                    <h2>"Сегодня"</h2>
                    <Show when=move || !entries.get().is_empty() fallback=|| view! { <p class="empty">"Записей пока нет"</p> }>
                        <For
                            each=move || entries.get()
                            key=|entry| entry.id
                            children=move |entry| {
                                let id = entry.id;
                                view! {
                                    <div class="list-row">
                                        <div class="list-main">
                                            <div class="list-title">{entry.meal_name.clone()}</div>
                                            <div class="list-sub">
                                                {entry.meal_type.as_deref().map(|t| format!("{} · ", meal_type_label(t)))}
                                                {format!("{:.0} г", entry.portion_weight)}
                                            </div>
                                        </div>
                                        <span class="amount">{format!("{:.0} ккал", entry.calories)}</span>
                                        <DeleteConfirmButton on_confirm=move |_| delete(id) />
                                    </div>
                                }
                            }
                        />
                    </Show>
                </section>

                <section class="list-section">
                    <h2>"Быстрое добавление"</h2>
                    <Show when=move || !meals.get().is_empty() fallback=|| view! { <p class="empty">"Нет готовых блюд"</p> }>
                        <For
                            each=move || meals.get()
                            key=|meal| (meal.id, meal.servings_left)
                            children=move |meal| {
                                let (portion_weight, meal_calories) = actions::serving_of(&meal);
                                let chosen = meal.clone();
                                view! {
                                    <div class="list-row">
                                        <div class="list-main">
                                            <div class="list-title">{meal.recipe_name.clone()}</div>
                                            <div class="list-sub">{format!("{portion_weight:.0} г · {meal_calories:.0} ккал")}</div>
                                        </div>
                                        <button type="button" class="secondary" on:click=move |_| quick_add(chosen.clone())>
                                            "Съел"
                                        </button>
                                    </div>
                                }
                            }
                        />
                    </Show>
                </section>
            </Show>

            <Show when=move || adding.get()>
                <Modal title="Новая запись" on_close=move |_| set_adding.set(false)>
                    <form class="dialog-form" on:submit=submit>
                        <TextField label="Блюдо" value=meal_name />
                        <div class="field-row">
                            <TextField label="Порция, г" value=portion input_type="number" />
                            <TextField label="Калории" value=calories input_type="number" />
                        </div>
                        <SelectField label="Приём пищи" value=meal_type options=meal_type_options />
                        <div class="dialog-actions">
                            <button type="button" class="secondary" on:click=move |_| set_adding.set(false)>"Отмена"</button>
                            <button type="submit">"Добавить"</button>
                        </div>
                    </form>
                </Modal>
            </Show>
        </div>
    }
}
