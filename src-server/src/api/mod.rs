//! HTTP Layer
//!
//! One path per resource; `action`, `id` and friends in the query string
//! select the operation.

mod params;
mod storage;
mod shopping;
mod budget;
mod menu;
mod receipts;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::repository::{
    CatalogRepository, CategoryRepository, DbConn, DiaryRepository, LocationRepository, MenuRepository,
    ProductRepository, ReceiptRepository, SettingsRepository, ShoppingRepository, TransactionRepository,
};

/// Every repository, sharing one connection
pub struct Repositories {
    pub locations: LocationRepository,
    pub products: ProductRepository,
    pub catalog: CatalogRepository,
    pub shopping: ShoppingRepository,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
    pub settings: SettingsRepository,
    pub menu: MenuRepository,
    pub diary: DiaryRepository,
    pub receipts: ReceiptRepository,
}

impl Repositories {
    pub fn new(conn: DbConn, default_calorie_goal: i64) -> Self {
        Self {
            locations: LocationRepository::new(conn.clone()),
            products: ProductRepository::new(conn.clone()),
            catalog: CatalogRepository::new(conn.clone()),
            shopping: ShoppingRepository::new(conn.clone()),
            categories: CategoryRepository::new(conn.clone()),
            transactions: TransactionRepository::new(conn.clone()),
            settings: SettingsRepository::new(conn.clone(), default_calorie_goal),
            menu: MenuRepository::new(conn.clone()),
            diary: DiaryRepository::new(conn.clone()),
            receipts: ReceiptRepository::new(conn),
        }
    }
}

pub type AppState = Arc<Repositories>;

/// Routes of the five resources
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/storage",
            get(storage::get).post(storage::post).put(storage::put).delete(storage::delete),
        )
        .route(
            "/shopping",
            get(shopping::get).post(shopping::post).put(shopping::put).delete(shopping::delete),
        )
        .route(
            "/budget",
            get(budget::get).post(budget::post).put(budget::put).delete(budget::delete),
        )
        .route("/menu", get(menu::get).post(menu::post).put(menu::put).delete(menu::delete))
        .route("/receipts", get(receipts::get).post(receipts::post))
        .with_state(state)
}
