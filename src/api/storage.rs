use reqwest::Method;

use super::{action, id, ApiClient, ApiError};
use crate::models::{CatalogDraft, CatalogEntry, LocationDetail, LocationDraft, Product, ProductDraft, StorageLocation};

impl ApiClient {
    // ========================
    // Locations
    // ========================

    pub async fn list_locations(&self) -> Result<Vec<StorageLocation>, ApiError> {
        self.get_json(&self.endpoints.storage, &[]).await
    }

    pub async fn location_detail(&self, location_id: i64) -> Result<LocationDetail, ApiError> {
        self.get_json(&self.endpoints.storage, &[id("id", location_id)]).await
    }

    pub async fn create_location(&self, draft: &LocationDraft) -> Result<StorageLocation, ApiError> {
        self.send_json(Method::POST, &self.endpoints.storage, &[action("createLocation")], draft)
            .await
    }

    pub async fn update_location(&self, location_id: i64, draft: &LocationDraft) -> Result<StorageLocation, ApiError> {
        self.send_json(
            Method::PUT,
            &self.endpoints.storage,
            &[action("updateLocation"), id("id", location_id)],
            draft,
        )
        .await
    }

    pub async fn delete_location(&self, location_id: i64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.storage, &[action("deleteLocation"), id("id", location_id)])
            .await
    }

    // ========================
    // Products
    // ========================

    /// Products with a positive quantity across all locations
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json(&self.endpoints.storage, &[action("products")]).await
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        self.send_json(Method::POST, &self.endpoints.storage, &[], draft).await
    }

    pub async fn update_product(&self, product_id: i64, draft: &ProductDraft) -> Result<Product, ApiError> {
        self.send_json(
            Method::PUT,
            &self.endpoints.storage,
            &[action("updateProduct"), id("id", product_id)],
            draft,
        )
        .await
    }

    /// Marks a product used up
    pub async fn delete_product(&self, product_id: i64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.storage, &[id("productId", product_id)]).await
    }

    // ========================
    // Catalog
    // ========================

    pub async fn list_catalog(&self, search: &str) -> Result<Vec<CatalogEntry>, ApiError> {
        let mut query = vec![action("catalog")];
        if !search.trim().is_empty() {
            query.push(("q", search.trim().to_string()));
        }
        self.get_json(&self.endpoints.storage, &query).await
    }

    pub async fn create_catalog_entry(&self, draft: &CatalogDraft) -> Result<CatalogEntry, ApiError> {
        self.send_json(Method::POST, &self.endpoints.storage, &[action("catalog")], draft)
            .await
    }

    pub async fn update_catalog_entry(&self, entry_id: i64, draft: &CatalogDraft) -> Result<CatalogEntry, ApiError> {
        self.send_json(
            Method::PUT,
            &self.endpoints.storage,
            &[action("catalog"), id("id", entry_id)],
            draft,
        )
        .await
    }

    pub async fn delete_catalog_entry(&self, entry_id: i64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.storage, &[action("catalog"), id("id", entry_id)])
            .await
    }
}
