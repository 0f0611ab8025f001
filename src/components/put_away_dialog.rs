use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::components::{Modal, SelectField};
use crate::context::use_app_context;
use crate::forms::ValidationError;
use crate::models::ShoppingItem;
use crate::store::{store_locations, use_pantry_store};

/// Move a bought item into a storage location
#[component]
pub fn PutAwayDialog(
    item: ShoppingItem,
    #[prop(into)] on_close: Callback<()>,
    /// Receives the ID of the shopping entry that was put away
    #[prop(into)] on_done: Callback<i64>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_pantry_store();
    let location = RwSignal::new(
        store_locations(&store)
            .first()
            .map(|l| l.id.to_string())
            .unwrap_or_default(),
    );
    let options = Signal::derive(move || {
        store_locations(&store)
            .into_iter()
            .map(|l| (l.id.to_string(), l.name))
            .collect()
    });
    let description = format!("{}: {} {}", item.name, item.quantity, item.unit);
    let item = StoredValue::new(item);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Ok(location_id) = location.get().parse::<i64>() else {
            return ctx.invalid(&ValidationError::Required("Место хранения"));
        };
        let api = ctx.api();
        let item = item.get_value();
        spawn_local(async move {
            match actions::put_away(&api, &item, location_id).await {
                Ok(_) => {
                    ctx.success(format!("«{}» убран на хранение", item.name));
                    ctx.reload();
                    on_done.run(item.id);
                }
                Err(e) => ctx.error("Не удалось убрать продукт", &e),
            }
        });
    };

    view! {
        <Modal title="Убрать на хранение" on_close=on_close>
            <form class="dialog-form" on:submit=submit>
                <p class="dialog-subtitle">{description}</p>
                <SelectField label="Место хранения" value=location options=options />
                <div class="dialog-actions">
                    <button type="button" class="secondary" on:click=move |_| on_close.run(())>"Отмена"</button>
                    <button type="submit">"Убрать"</button>
                </div>
            </form>
        </Modal>
    }
}
