//! Product Dialog
//!
//! Adds a product to a storage location, or edits an existing one.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{Modal, TextAreaField, TextField, UnitField};
use crate::context::use_app_context;
use crate::forms::ProductForm;
use crate::models::Product;

#[component]
pub fn ProductDialog(
    storage_location_id: i64,
    /// `Some` edits this product
    product: Option<Product>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<Product>,
) -> impl IntoView {
    let ctx = use_app_context();
    let editing_id = product.as_ref().map(|p| p.id);
    let initial = product.as_ref().map(ProductForm::from_product).unwrap_or_default();

    let name = RwSignal::new(initial.name);
    let quantity = RwSignal::new(initial.quantity);
    let unit = RwSignal::new(initial.unit);
    let category = RwSignal::new(initial.category);
    let expiry_date = RwSignal::new(initial.expiry_date);
    let notes = RwSignal::new(initial.notes);
    let calories = RwSignal::new(initial.calories);
    let (saving, set_saving) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = ProductForm {
            name: name.get(),
            quantity: quantity.get(),
            unit: unit.get(),
            category: category.get(),
            expiry_date: expiry_date.get(),
            notes: notes.get(),
            calories: calories.get(),
        };
        let draft = match form.validate(storage_location_id, editing_id.is_some()) {
            Ok(draft) => draft,
            Err(e) => return ctx.invalid(&e),
        };
        let api = ctx.api();
        set_saving.set(true);
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api.update_product(id, &draft).await,
                None => api.create_product(&draft).await,
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    ctx.success(if editing_id.is_some() { "Продукт обновлён" } else { "Продукт добавлен" });
                    on_saved.run(saved);
                }
                Err(e) => ctx.error("Не удалось сохранить продукт", &e),
            }
        });
    };

    let title = if editing_id.is_some() { "Изменить продукт" } else { "Добавить продукт" };

    view! {
        <Modal title=title on_close=on_close>
            <form class="dialog-form" on:submit=submit>
                <TextField label="Название" value=name />
                <div class="field-row">
                    <TextField label="Количество" value=quantity input_type="number" />
                    <UnitField value=unit />
                </div>
                <TextField label="Категория" value=category />
                <TextField label="Срок годности" value=expiry_date input_type="date" />
                <TextField label="Калорийность, ккал/100 г" value=calories input_type="number" />
                <TextAreaField label="Заметки" value=notes />
                <div class="dialog-actions">
                    <button type="button" class="secondary" on:click=move |_| on_close.run(())>"Отмена"</button>
                    <button type="submit" disabled=move || saving.get()>"Сохранить"</button>
                </div>
            </form>
        </Modal>
    }
}
