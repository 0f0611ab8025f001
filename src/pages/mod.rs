//! Pages
//!
//! One component per route. Each page fetches its own data on mount.

mod home;
mod storage_detail;
mod storage_management;
mod shopping_list;
mod scan_receipt;
mod budget;
mod menu;
mod recipe_detail;
mod food_diary;
mod product_catalog;
mod not_found;

pub use home::HomePage;
pub use storage_detail::StorageDetailPage;
pub use storage_management::StorageManagementPage;
pub use shopping_list::ShoppingListPage;
pub use scan_receipt::ScanReceiptPage;
pub use budget::BudgetPage;
pub use menu::MenuPage;
pub use recipe_detail::RecipeDetailPage;
pub use food_diary::FoodDiaryPage;
pub use product_catalog::ProductCatalogPage;
pub use not_found::NotFoundPage;
