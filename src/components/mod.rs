//! UI Components
//!
//! Reusable Leptos components.

pub mod palette;

mod modal;
mod field;
mod delete_confirm_button;
mod toaster;
mod sidebar;
mod product_card;
mod product_dialog;
mod shopping_item_dialog;
mod location_dialog;
mod put_away_dialog;
mod ingredient_dialog;
mod product_matching_dialog;
mod transaction_dialog;
mod catalog_dialog;

pub use modal::Modal;
pub use field::{SelectField, TextAreaField, TextField, UnitField};
pub use delete_confirm_button::DeleteConfirmButton;
pub use toaster::Toaster;
pub use sidebar::Sidebar;
pub use product_card::ProductCard;
pub use product_dialog::ProductDialog;
pub use shopping_item_dialog::ShoppingItemDialog;
pub use location_dialog::LocationDialog;
pub use put_away_dialog::PutAwayDialog;
pub use ingredient_dialog::IngredientDialog;
pub use product_matching_dialog::ProductMatchingDialog;
pub use transaction_dialog::TransactionDialog;
pub use catalog_dialog::CatalogDialog;
