//! Storage Location Dialog
//!
//! Name plus icon and color picked from fixed palettes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::palette::{COLORS, LOCATION_ICONS};
use crate::components::{Modal, TextField};
use crate::context::use_app_context;
use crate::forms;
use crate::models::StorageLocation;

#[component]
pub fn LocationDialog(
    /// `Some` edits this location
    location: Option<StorageLocation>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<StorageLocation>,
) -> impl IntoView {
    let ctx = use_app_context();
    let editing_id = location.as_ref().map(|l| l.id);
    let name = RwSignal::new(location.as_ref().map(|l| l.name.clone()).unwrap_or_default());
    let icon = RwSignal::new(
        location
            .as_ref()
            .map(|l| l.icon.clone())
            .unwrap_or_else(|| LOCATION_ICONS[0].0.to_string()),
    );
    let color = RwSignal::new(
        location
            .as_ref()
            .map(|l| l.color.clone())
            .unwrap_or_else(|| COLORS[0].to_string()),
    );

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = match forms::location(&name.get(), &icon.get(), &color.get()) {
            Ok(draft) => draft,
            Err(e) => return ctx.invalid(&e),
        };
        let api = ctx.api();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api.update_location(id, &draft).await,
                None => api.create_location(&draft).await,
            };
            match result {
                Ok(saved) => {
                    ctx.reload();
                    on_saved.run(saved);
                }
                Err(e) => ctx.error("Не удалось сохранить место хранения", &e),
            }
        });
    };

    let title = if editing_id.is_some() { "Изменить место" } else { "Новое место хранения" };

    view! {
        <Modal title=title on_close=on_close>
            <form class="dialog-form" on:submit=submit>
                <TextField label="Название" value=name placeholder="Например, Холодильник" />
                <div class="field-label">"Иконка"</div>
                <div class="picker">
                    {LOCATION_ICONS
                        .iter()
                        .map(|(key, glyph)| {
                            let key = key.to_string();
                            let selected = key.clone();
                            view! {
                                <button
                                    type="button"
                                    class=move || if icon.get() == selected { "picker-option selected" } else { "picker-option" }
                                    on:click=move |_| icon.set(key.clone())
                                >
                                    {*glyph}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="field-label">"Цвет"</div>
                <div class="picker">
                    {COLORS
                        .iter()
                        .map(|value| {
                            let value = value.to_string();
                            let class_value = value.clone();
                            view! {
                                <button
                                    type="button"
                                    class=move || {
                                        if color.get() == class_value {
                                            format!("swatch {class_value} selected")
                                        } else {
                                            format!("swatch {class_value}")
                                        }
                                    }
                                    on:click=move |_| color.set(value.clone())
                                ></button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="dialog-actions">
                    <button type="button" class="secondary" on:click=move |_| on_close.run(())>"Отмена"</button>
                    <button type="submit">"Сохранить"</button>
                </div>
            </form>
        </Modal>
    }
}
