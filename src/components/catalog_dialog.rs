use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{Modal, TextField, UnitField};
use crate::context::use_app_context;
use crate::forms::CatalogForm;
use crate::models::CatalogEntry;

/// Create or edit a product catalog entry
#[component]
pub fn CatalogDialog(
    entry: Option<CatalogEntry>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<CatalogEntry>,
) -> impl IntoView {
    let ctx = use_app_context();
    let editing_id = entry.as_ref().map(|e| e.id);
    let initial = entry.as_ref().map(CatalogForm::from_entry).unwrap_or_default();
    let name = RwSignal::new(initial.name);
    let category = RwSignal::new(initial.category);
    let calories = RwSignal::new(initial.calories);
    let unit = RwSignal::new(initial.default_unit);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = CatalogForm {
            name: name.get(),
            category: category.get(),
            calories: calories.get(),
            default_unit: unit.get(),
        };
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(e) => return ctx.invalid(&e),
        };
        let api = ctx.api();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api.update_catalog_entry(id, &draft).await,
                None => api.create_catalog_entry(&draft).await,
            };
            match result {
                Ok(saved) => {
                    ctx.success(format!("«{}» сохранён в каталоге", saved.name));
                    on_saved.run(saved);
                }
                Err(e) => ctx.error("Не удалось сохранить продукт каталога", &e),
            }
        });
    };

    let title = if editing_id.is_some() { "Изменить продукт" } else { "Новый продукт каталога" };

    view! {
        <Modal title=title on_close=on_close>
            <form class="dialog-form" on:submit=submit>
                <TextField label="Название" value=name />
                <TextField label="Категория" value=category />
                <div class="field-row">
                    <TextField label="Ккал на 100 г" value=calories input_type="number" />
                    <UnitField value=unit />
                </div>
                <div class="dialog-actions">
                    <button type="button" class="secondary" on:click=move |_| on_close.run(())>"Отмена"</button>
                    <button type="submit">"Сохранить"</button>
                </div>
            </form>
        </Modal>
    }
}
