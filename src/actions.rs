//! Page Actions
//!
//! Steps shared by several pages that pair local state with a resource call.

use std::collections::HashMap;

use chrono::NaiveDate;
use leptos::prelude::{Update, WriteSignal};

use crate::api::{ApiClient, ApiError};
use crate::forms::{ShoppingForm, ValidationError};
use crate::matching;
use crate::models::{
    PreparedMeal, Product, ProductDraft, RecipeIngredient, ShoppingItem, ReceiptSubmission, ProcessedReceipt,
};
use crate::qr::{FiscalQr, ScanError};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Выберите продукт для каждого ингредиента")]
    Unmatched,
    #[error("Покупка {0} не загружена")]
    NotLoaded(i64),
}

/// Shopping list state a page renders from
pub trait ShoppingItems {
    fn edit(&self, f: impl FnOnce(&mut Vec<ShoppingItem>));
}

impl ShoppingItems for WriteSignal<Vec<ShoppingItem>> {
    fn edit(&self, f: impl FnOnce(&mut Vec<ShoppingItem>)) {
        self.update(f);
    }
}

/// Flip `is_purchased` of one loaded item and return the new value.
/// Runs before any request so the change shows up on click.
pub fn flip_purchased(items: &impl ShoppingItems, item_id: i64) -> Result<bool, ActionError> {
    let mut wanted = None;
    items.edit(|list| {
        if let Some(item) = list.iter_mut().find(|item| item.id == item_id) {
            item.is_purchased = !item.is_purchased;
            wanted = Some(item.is_purchased);
        }
    });
    wanted.ok_or(ActionError::NotLoaded(item_id))
}

/// Persist a flip made by [`flip_purchased`] with a single PUT.
/// On failure only this item is set back; other items keep their state.
pub async fn save_purchased(
    api: &ApiClient,
    items: &impl ShoppingItems,
    item_id: i64,
    wanted: bool,
) -> Result<(), ApiError> {
    if let Err(e) = api.set_purchased(item_id, wanted).await {
        items.edit(|list| {
            if let Some(item) = list.iter_mut().find(|item| item.id == item_id) {
                item.is_purchased = !wanted;
            }
        });
        return Err(e);
    }
    Ok(())
}

pub async fn add_shopping_item(api: &ApiClient, form: &ShoppingForm) -> Result<ShoppingItem, ActionError> {
    let draft = form.validate()?;
    Ok(api.add_shopping_item(&draft).await?)
}

/// Move a bought item into storage: create the product, then drop the list entry
pub async fn put_away(api: &ApiClient, item: &ShoppingItem, storage_location_id: i64) -> Result<Product, ApiError> {
    let draft = ProductDraft {
        name: item.name.clone(),
        quantity: item.quantity,
        unit: item.unit.clone(),
        category: item.category.clone(),
        expiry_date: None,
        storage_location_id,
        notes: item.notes.clone(),
        calories_per_100g: None,
    };
    let product = api.create_product(&draft).await?;
    api.delete_shopping_item(item.id).await?;
    Ok(product)
}

/// Every ingredient has a product. Confirming changes no stock; amounts are
/// only deducted when a planned recipe is prepared.
pub fn confirm_matches(ingredients: &[RecipeIngredient], matches: &HashMap<String, i64>) -> Result<(), ActionError> {
    if matching::can_confirm(ingredients, matches) {
        Ok(())
    } else {
        Err(ActionError::Unmatched)
    }
}

/// Load on-hand products and pick the first candidate for each ingredient
pub async fn load_matches(
    api: &ApiClient,
    ingredients: &[RecipeIngredient],
) -> Result<(Vec<Product>, HashMap<String, i64>), ApiError> {
    let products = api.list_products().await?;
    let matches = matching::auto_match(ingredients, &products);
    Ok((products, matches))
}

/// Decode a fiscal QR code, fetch its lines and hand the receipt to the receipts resource
pub async fn process_scanned_code(api: &ApiClient, code: &str) -> Result<ProcessedReceipt, ScanError> {
    let qr = FiscalQr::parse(code)?;
    let items = api.lookup_receipt(&qr).await?;
    let submission = ReceiptSubmission {
        qr_code: qr.raw.clone(),
        total_amount: Some(qr.sum),
        items,
    };
    Ok(api.submit_receipt(&submission).await?)
}

// ========================
// Derived values
// ========================

/// Portion weight (g) and calories of one serving of a prepared meal
pub fn serving_of(meal: &PreparedMeal) -> (f64, f64) {
    let servings = meal.servings_left.max(1) as f64;
    let portion = (meal.total_weight.unwrap_or(0.0) / servings).round();
    let calories = (meal.total_calories.unwrap_or(0.0) * portion / 100.0).round();
    (portion, calories)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    Fresh,
    ExpiringSoon,
    Expired,
}

pub const EXPIRY_WARNING_DAYS: i64 = 7;

pub fn expiry_status(expiry_date: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
    match expiry_date {
        Some(date) if date < today => ExpiryStatus::Expired,
        Some(date) if (date - today).num_days() <= EXPIRY_WARNING_DAYS => ExpiryStatus::ExpiringSoon,
        _ => ExpiryStatus::Fresh,
    }
}

/// Share of "have" in have + need, 0..=100
pub fn stock_progress(have: usize, need: usize) -> u32 {
    if have + need == 0 {
        return 0;
    }
    ((have as f64 / (have + need) as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(total_calories: f64, total_weight: f64, servings_left: i64) -> PreparedMeal {
        PreparedMeal {
            id: 1,
            recipe_id: 1,
            recipe_name: "Плов".into(),
            total_calories: Some(total_calories),
            total_weight: Some(total_weight),
            image_url: None,
            prepared_date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(12, 0, 0).unwrap(),
            servings_left,
            status: "available".into(),
        }
    }

    #[test]
    fn test_serving_of_meal() {
        // 1000 g over 3 servings -> 333 g at 150 kcal/100 g
        assert_eq!(serving_of(&meal(150.0, 1000.0, 3)), (333.0, 500.0));
        assert_eq!(serving_of(&meal(120.0, 400.0, 0)), (400.0, 480.0));
    }

    #[test]
    fn test_expiry_status() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(expiry_status(None, today), ExpiryStatus::Fresh);
        assert_eq!(expiry_status(NaiveDate::from_ymd_opt(2026, 10, 15), today), ExpiryStatus::Expired);
        assert_eq!(expiry_status(Some(today), today), ExpiryStatus::ExpiringSoon);
        assert_eq!(expiry_status(NaiveDate::from_ymd_opt(2026, 10, 23), today), ExpiryStatus::ExpiringSoon);
        assert_eq!(expiry_status(NaiveDate::from_ymd_opt(2026, 10, 24), today), ExpiryStatus::Fresh);
    }

    #[test]
    fn test_stock_progress() {
        assert_eq!(stock_progress(0, 0), 0);
        assert_eq!(stock_progress(3, 1), 75);
        assert_eq!(stock_progress(1, 2), 33);
    }
}
