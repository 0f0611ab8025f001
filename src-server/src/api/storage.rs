//! `/storage`: locations, products and the product catalog.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;

use super::params::{parse_body, ActionQuery};
use super::AppState;
use crate::domain::{CatalogInput, ConsumeInput, DomainError, LocationDetail, LocationInput, ProductInput, StorageLocation};
use crate::error::ApiError;
use crate::repository::{Repository, SearchableRepository};

pub async fn get(State(state): State<AppState>, Query(query): Query<HashMap<String, String>>) -> Result<Response, ApiError> {
    let query = ActionQuery(query);
    match query.action() {
        Some("products") => Ok(Json(state.products.list_in_stock().await?).into_response()),
        Some("catalog") => {
            let entries = state.catalog.search(query.get("q").unwrap_or_default()).await?;
            Ok(Json(entries).into_response())
        }
        Some(_) => Err(ApiError::MethodNotAllowed),
        None => match query.id("id")? {
            Some(id) => {
                let location = state
                    .locations
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound(format!("storage location {id}")))?;
                let products = state.products.list_by_location(id).await?;
                Ok(Json(LocationDetail { location, products }).into_response())
            }
            None => Ok(Json(state.locations.list().await?).into_response()),
        },
    }
}

pub async fn post(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let query = ActionQuery(query);
    match query.action() {
        Some("createLocation") => {
            let input: LocationInput = parse_body(&body)?;
            input.validate()?;
            let location = state
                .locations
                .create(&StorageLocation::new(input.name, input.icon, input.color))
                .await?;
            tracing::info!(id = location.id, name = %location.name, "storage location created");
            Ok((StatusCode::CREATED, Json(location)).into_response())
        }
        Some("catalog") => {
            let input: CatalogInput = parse_body(&body)?;
            input.validate()?;
            let entry = state.catalog.create(&input.into_entry(0)).await?;
            Ok((StatusCode::CREATED, Json(entry)).into_response())
        }
        Some("consume") => {
            let input: ConsumeInput = parse_body(&body)?;
            Ok(Json(state.products.consume(&input.items).await?).into_response())
        }
        Some(_) => Err(ApiError::MethodNotAllowed),
        None => {
            let input: ProductInput = parse_body(&body)?;
            input.validate()?;
            let product = state.products.create(&input).await?;
            Ok((StatusCode::CREATED, Json(product)).into_response())
        }
    }
}

pub async fn put(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let query = ActionQuery(query);
    match query.action() {
        Some("updateLocation") => {
            let id = query.require_id("id")?;
            let input: LocationInput = parse_body(&body)?;
            input.validate()?;
            let mut location = StorageLocation::new(input.name, input.icon, input.color);
            location.id = id;
            Ok(Json(state.locations.update(&location).await?).into_response())
        }
        Some("updateProduct") => {
            let id = query.require_id("id")?;
            let input: ProductInput = parse_body(&body)?;
            input.validate()?;
            Ok(Json(state.products.update(id, &input).await?).into_response())
        }
        Some("catalog") => {
            let id = query.require_id("id")?;
            let input: CatalogInput = parse_body(&body)?;
            input.validate()?;
            Ok(Json(state.catalog.update(&input.into_entry(id)).await?).into_response())
        }
        _ => Err(ApiError::MethodNotAllowed),
    }
}

pub async fn delete(State(state): State<AppState>, Query(query): Query<HashMap<String, String>>) -> Result<Response, ApiError> {
    let query = ActionQuery(query);
    match query.action() {
        Some("deleteLocation") => {
            let id = query.require_id("id")?;
            state.locations.delete(id).await?;
            tracing::info!(id, "storage location deleted");
        }
        Some("catalog") => state.catalog.delete(query.require_id("id")?).await?,
        Some(_) => return Err(ApiError::MethodNotAllowed),
        // Deleting a product marks it used up
        None => state.products.mark_used_up(query.require_id("productId")?).await?,
    }
    Ok(Json(json!({ "success": true })).into_response())
}
