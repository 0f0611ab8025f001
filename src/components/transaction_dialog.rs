//! Transaction Dialog
//!
//! Income or expense entry. The category list follows the chosen type.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{Modal, SelectField, TextAreaField, TextField};
use crate::context::use_app_context;
use crate::forms::TransactionForm;
use crate::models::{BudgetCategory, Transaction, TransactionKind};

fn kind_from(value: &str) -> TransactionKind {
    if value == "income" {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    }
}

#[component]
pub fn TransactionDialog(
    categories: Vec<BudgetCategory>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_added: Callback<Transaction>,
) -> impl IntoView {
    let ctx = use_app_context();
    let initial = TransactionForm::new(chrono::Local::now().date_naive());
    let kind = RwSignal::new("expense".to_string());
    let amount = RwSignal::new(initial.amount);
    let category = RwSignal::new(String::new());
    let description = RwSignal::new(initial.description);
    let date = RwSignal::new(initial.date);
    let categories = StoredValue::new(categories);

    let kind_options = Signal::derive(|| {
        [TransactionKind::Expense, TransactionKind::Income]
            .into_iter()
            .map(|k| {
                let value = if k == TransactionKind::Income { "income" } else { "expense" };
                (value.to_string(), k.label().to_string())
            })
            .collect()
    });

    let category_options = Signal::derive(move || {
        let wanted = kind_from(&kind.get());
        std::iter::once((String::new(), "Без категории".to_string()))
            .chain(
                categories
                    .get_value()
                    .into_iter()
                    .filter(|c| c.kind == wanted)
                    .map(|c| (c.id.to_string(), c.name)),
            )
            .collect()
    });

    // A category of the other type must not survive a type switch
    Effect::new(move |_| {
        kind.track();
        category.set(String::new());
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = TransactionForm {
            kind: kind_from(&kind.get()),
            amount: amount.get(),
            category_id: category.get().parse().ok(),
            description: description.get(),
            date: date.get(),
        };
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(e) => return ctx.invalid(&e),
        };
        let api = ctx.api();
        spawn_local(async move {
            match api.add_transaction(&draft).await {
                Ok(transaction) => {
                    ctx.success("Операция добавлена");
                    on_added.run(transaction);
                }
                Err(e) => ctx.error("Не удалось добавить операцию", &e),
            }
        });
    };

    view! {
        <Modal title="Новая операция" on_close=on_close>
            <form class="dialog-form" on:submit=submit>
                <SelectField label="Тип" value=kind options=kind_options />
                <TextField label="Сумма, ₽" value=amount input_type="number" />
                <SelectField label="Категория" value=category options=category_options />
                <TextField label="Дата" value=date input_type="date" />
                <TextAreaField label="Описание" value=description />
                <div class="dialog-actions">
                    <button type="button" class="secondary" on:click=move |_| on_close.run(())>"Отмена"</button>
                    <button type="submit">"Добавить"</button>
                </div>
            </form>
        </Modal>
    }
}
