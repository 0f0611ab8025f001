//! Domain Layer
//!
//! Contains all stored records, request bodies and the matching rule.
//! This layer only depends on serde, chrono and rusqlite's value traits.

mod entity;
mod storage;
mod shopping;
mod budget;
mod menu;
mod catalog;
mod receipt;
pub mod matching;

pub use entity::{Entity, DomainError, DomainResult};
pub use storage::{StorageLocation, LocationInput, Product, ProductInput, Consumption, ConsumeInput, LocationDetail};
pub use shopping::{ShoppingItem, ShoppingInput, PurchasedInput};
pub use budget::{
    BudgetCategory, CategoryInput, CategoryTotal, Settings, SettingsInput, Summary, Transaction,
    TransactionInput, TransactionKind, TransactionsPage, GROCERIES_CATEGORY,
};
pub use menu::{
    DiaryDay, DiaryInput, DishNutrition, FoodDiaryEntry, IngredientInput, MissingProduct,
    PlanInput, PlanOutcome, PlanStatus, PlannedRecipe, PrepareInput, PreparedMeal, Recipe, RecipeDetail,
    RecipeIngredient, RecipeInput, MEAL_AVAILABLE,
};
pub use catalog::{CatalogEntry, CatalogInput, DEFAULT_UNIT};
pub use receipt::{ProcessedReceipt, Receipt, ReceiptInput, ReceiptItemInput, RECEIPT_PENDING, RECEIPT_PROCESSED};
