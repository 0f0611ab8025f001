use reqwest::Method;
use serde::Serialize;

use super::{id, ApiClient, ApiError};
use crate::models::{ShoppingDraft, ShoppingItem};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchasedBody {
    is_purchased: bool,
}

impl ApiClient {
    pub async fn list_shopping(&self) -> Result<Vec<ShoppingItem>, ApiError> {
        self.get_json(&self.endpoints.shopping, &[]).await
    }

    pub async fn add_shopping_item(&self, draft: &ShoppingDraft) -> Result<ShoppingItem, ApiError> {
        self.send_json(Method::POST, &self.endpoints.shopping, &[], draft).await
    }

    pub async fn set_purchased(&self, item_id: i64, is_purchased: bool) -> Result<ShoppingItem, ApiError> {
        self.send_json(
            Method::PUT,
            &self.endpoints.shopping,
            &[id("id", item_id)],
            &PurchasedBody { is_purchased },
        )
        .await
    }

    pub async fn delete_shopping_item(&self, item_id: i64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.shopping, &[id("id", item_id)]).await
    }
}
