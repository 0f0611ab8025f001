use leptos::prelude::*;

use crate::actions::{expiry_status, ExpiryStatus};
use crate::components::DeleteConfirmButton;
use crate::models::Product;

/// Product with quantity, expiry badge, and edit/delete actions
#[component]
pub fn ProductCard(
    product: Product,
    #[prop(into)] on_edit: Callback<Product>,
    #[prop(into)] on_delete: Callback<i64>,
) -> impl IntoView {
    let today = chrono::Local::now().date_naive();
    let (badge_class, badge_text) = match expiry_status(product.expiry_date, today) {
        ExpiryStatus::Expired => ("expiry expired", "Просрочен"),
        ExpiryStatus::ExpiringSoon => ("expiry soon", "Скоро истекает"),
        ExpiryStatus::Fresh => ("expiry fresh", ""),
    };
    let id = product.id;
    let editable = product.clone();

    view! {
        <div class="product-card">
            <div class="product-main">
                <div class="product-name">{product.name.clone()}</div>
                <div class="product-quantity">{format!("{} {}", product.quantity, product.unit)}</div>
                {product.category.clone().map(|category| view! { <span class="chip">{category}</span> })}
            </div>
            <div class="product-meta">
                {product
                    .expiry_date
                    .map(|date| view! { <span class="product-expiry">{format!("до {}", date.format("%d.%m.%Y"))}</span> })}
                {(!badge_text.is_empty()).then(|| view! { <span class=badge_class>{badge_text}</span> })}
                {product
                    .calories_per_100g
                    .map(|kcal| view! { <span class="product-kcal">{format!("{kcal:.0} ккал/100 г")}</span> })}
            </div>
            <div class="product-actions">
                <button type="button" class="icon-btn" title="Изменить" on:click=move |_| on_edit.run(editable.clone())>
                    "✎"
                </button>
                <DeleteConfirmButton on_confirm=move |_| on_delete.run(id) />
            </div>
        </div>
    }
}
