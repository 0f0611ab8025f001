//! Frontend Models
//!
//! Records returned by the resources, and the request bodies sent to them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ========================
// Storage
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageLocation {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub items_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub storage_location_id: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub calories_per_100g: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationDetail {
    pub location: StorageLocation,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDraft {
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// Create/update product body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub storage_location_id: i64,
    pub notes: Option<String>,
    #[serde(rename = "caloriesPer100g")]
    pub calories_per_100g: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub calories_per_100g: Option<f64>,
    pub default_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogDraft {
    pub name: String,
    pub category: Option<String>,
    pub calories_per_100g: Option<f64>,
    pub default_unit: String,
}

// ========================
// Shopping
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Option<String>,
    pub is_purchased: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingDraft {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Option<String>,
    pub notes: Option<String>,
}

// ========================
// Budget
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Доход",
            TransactionKind::Expense => "Расход",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub receipt_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
}

impl Summary {
    pub fn balance(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionsPage {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryTotal {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub icon: String,
    pub color: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub id: i64,
    pub daily_calorie_goal: i64,
}

// ========================
// Menu
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub total_calories: Option<f64>,
    pub cooking_time: Option<i64>,
    pub servings: i64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub recipe_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientDraft {
    pub product_name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDraft {
    pub name: String,
    pub description: Option<String>,
    pub total_calories: Option<f64>,
    pub cooking_time: Option<i64>,
    pub servings: i64,
    pub image_url: Option<String>,
    pub ingredients: Vec<IngredientDraft>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Planned,
    Prepared,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingProduct {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub available: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRecipe {
    pub id: i64,
    pub recipe_id: i64,
    pub recipe_name: String,
    #[serde(default)]
    pub total_calories: Option<f64>,
    #[serde(default)]
    pub cooking_time: Option<i64>,
    pub status: PlanStatus,
    #[serde(default)]
    pub missing_products: Vec<MissingProduct>,
    pub planned_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanOutcome {
    pub planned: PlannedRecipe,
    pub missing_products: Vec<MissingProduct>,
}

/// `total_calories` is per 100 g, `total_weight` in grams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedMeal {
    pub id: i64,
    pub recipe_id: i64,
    pub recipe_name: String,
    pub total_calories: Option<f64>,
    pub total_weight: Option<f64>,
    pub image_url: Option<String>,
    pub prepared_date: NaiveDateTime,
    pub servings_left: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDiaryEntry {
    pub id: i64,
    pub meal_name: String,
    pub portion_weight: f64,
    pub calories: f64,
    pub meal_type: Option<String>,
    pub eaten_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiaryDay {
    pub entries: Vec<FoodDiaryEntry>,
    pub total_calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiaryDraft {
    pub meal_name: String,
    pub portion_weight: f64,
    pub calories: f64,
    pub meal_type: Option<String>,
    pub eaten_date: Option<NaiveDate>,
}

// ========================
// Receipts
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: i64,
    pub qr_code: String,
    pub total_amount: Option<f64>,
    pub scan_date: NaiveDateTime,
    pub status: String,
}

/// One purchased line, amounts in rubles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub name: String,
    pub price: f64,
    pub quantity: f64,
    pub total: Option<f64>,
    pub budget_category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptSubmission {
    pub qr_code: String,
    pub total_amount: Option<f64>,
    pub items: Vec<ReceiptLine>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessedReceipt {
    pub receipt: Receipt,
    pub total_amount: f64,
    pub items_count: usize,
}
