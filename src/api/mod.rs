//! Resource Client
//!
//! Typed wrappers over the five HTTP resources and the receipt lookup
//! service. Every wrapper maps a non-2xx answer to [`ApiError::Status`].

mod error;
mod storage;
mod shopping;
mod budget;
mod menu;
mod receipts;
mod fiscal;

#[cfg(test)]
mod tests;

pub use error::{ApiError, ResponseExt};

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Endpoints;

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let response = self.client.get(url).query(query).send().await.map_api_error().await?;
        decode(response, url).await
    }

    async fn send_json<B, T>(&self, method: Method, url: &str, query: &[(&str, String)], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .request(method, url)
            .query(query)
            .json(body)
            .send()
            .await
            .map_api_error()
            .await?;
        decode(response, url).await
    }

    /// DELETE whose `{"success": true}` answer carries nothing
    async fn delete(&self, url: &str, query: &[(&str, String)]) -> Result<(), ApiError> {
        self.client.delete(url).query(query).send().await.map_api_error().await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(format!("{url}: {e}")))
}

fn action(name: &str) -> (&'static str, String) {
    ("action", name.to_string())
}

fn id(key: &'static str, value: i64) -> (&'static str, String) {
    (key, value.to_string())
}
