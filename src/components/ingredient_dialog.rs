use leptos::prelude::*;

use crate::components::{Modal, TextField, UnitField};
use crate::context::use_app_context;
use crate::forms::IngredientForm;
use crate::models::IngredientDraft;

/// Collects one ingredient line for the recipe being edited
#[component]
pub fn IngredientDialog(
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_add: Callback<IngredientDraft>,
) -> impl IntoView {
    let ctx = use_app_context();
    let initial = IngredientForm::default();
    let name = RwSignal::new(initial.name);
    let quantity = RwSignal::new(initial.quantity);
    let unit = RwSignal::new(initial.unit);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = IngredientForm {
            name: name.get(),
            quantity: quantity.get(),
            unit: unit.get(),
        };
        match form.validate() {
            Ok(draft) => on_add.run(draft),
            Err(e) => ctx.invalid(&e),
        }
    };

    view! {
        <Modal title="Добавить ингредиент" on_close=on_close>
            <form class="dialog-form" on:submit=submit>
                <TextField label="Продукт" value=name />
                <div class="field-row">
                    <TextField label="Количество" value=quantity input_type="number" />
                    <UnitField value=unit />
                </div>
                <div class="dialog-actions">
                    <button type="button" class="secondary" on:click=move |_| on_close.run(())>"Отмена"</button>
                    <button type="submit">"Добавить"</button>
                </div>
            </form>
        </Modal>
    }
}
