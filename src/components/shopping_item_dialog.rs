use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{self, ActionError};
use crate::components::{Modal, TextAreaField, TextField, UnitField};
use crate::context::use_app_context;
use crate::forms::ShoppingForm;
use crate::models::ShoppingItem;

/// Add an entry to the shopping list
#[component]
pub fn ShoppingItemDialog(
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_added: Callback<ShoppingItem>,
) -> impl IntoView {
    let ctx = use_app_context();
    let initial = ShoppingForm::default();
    let name = RwSignal::new(initial.name);
    let quantity = RwSignal::new(initial.quantity);
    let unit = RwSignal::new(initial.unit);
    let category = RwSignal::new(initial.category);
    let notes = RwSignal::new(initial.notes);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = ShoppingForm {
            name: name.get(),
            quantity: quantity.get(),
            unit: unit.get(),
            category: category.get(),
            notes: notes.get(),
        };
        let api = ctx.api();
        spawn_local(async move {
            match actions::add_shopping_item(&api, &form).await {
                Ok(item) => {
                    ctx.success(format!("«{}» в списке покупок", item.name));
                    on_added.run(item);
                }
                Err(ActionError::Invalid(e)) => ctx.invalid(&e),
                Err(e) => ctx.error("Не удалось добавить покупку", &e),
            }
        });
    };

    view! {
        <Modal title="Добавить в список" on_close=on_close>
            <form class="dialog-form" on:submit=submit>
                <TextField label="Название" value=name />
                <div class="field-row">
                    <TextField label="Количество" value=quantity input_type="number" />
                    <UnitField value=unit />
                </div>
                <TextField label="Категория" value=category />
                <TextAreaField label="Заметки" value=notes />
                <div class="dialog-actions">
                    <button type="button" class="secondary" on:click=move |_| on_close.run(())>"Отмена"</button>
                    <button type="submit">"Добавить"</button>
                </div>
            </form>
        </Modal>
    }
}
