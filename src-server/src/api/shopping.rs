//! `/shopping`: the to-buy list.

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
use crate::domain::{PurchasedInput, ShoppingInput};
use crate::error::ApiError;
use crate::repository::Repository;

pub async fn get(State(state): State<AppState>) -> Result<Response, ApiError> {
    Ok(Json(state.shopping.list().await?).into_response())
}

pub async fn post(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let input: ShoppingInput = parse_body(&body)?;
    input.validate()?;
    let item = state.shopping.create(&input.into_item()).await?;
    Ok((StatusCode::CREATED, Json(item)).into_response())
}

pub async fn put(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = ActionQuery(query).require_id("id")?;
    let input: PurchasedInput = parse_body(&body)?;
    Ok(Json(state.shopping.set_purchased(id, input.is_purchased).await?).into_response())
}

pub async fn delete(State(state): State<AppState>, Query(query): Query<HashMap<String, String>>) -> Result<Response, ApiError> {
    let id = ActionQuery(query).require_id("id")?;
    state.shopping.delete(id).await?;
    Ok(Json(json!({ "success": true })).into_response())
}
