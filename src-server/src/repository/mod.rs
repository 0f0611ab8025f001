//! Repository Layer
//!
//! Data access abstractions and SQLite implementations.

mod traits;
mod db;
mod location_repo;
mod product_repo;
mod shopping_repo;
mod budget_repo;
mod catalog_repo;
mod menu_repo;
mod diary_repo;
mod receipt_repo;

#[cfg(test)]
mod tests;

pub use traits::{Repository, SearchableRepository};
pub use db::{init_db, DbConn, DbState};
pub use location_repo::LocationRepository;
pub use product_repo::ProductRepository;
pub use shopping_repo::ShoppingRepository;
pub use budget_repo::{CategoryRepository, SettingsRepository, TransactionRepository};
pub use catalog_repo::CatalogRepository;
pub use menu_repo::MenuRepository;
pub use diary_repo::DiaryRepository;
pub use receipt_repo::ReceiptRepository;
