//! `/budget`: categories, transactions, analytics and settings.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;

use super::params::{parse_body, ActionQuery};
use super::AppState;
use crate::domain::{CategoryInput, SettingsInput, TransactionInput};
use crate::error::ApiError;
use crate::repository::Repository;

const DEFAULT_ANALYTICS_PERIOD: i64 = 30;

/// `?action=settings` answers GET and PUT
async fn settings(state: &AppState, method: Method, body: &Bytes) -> Result<Response, ApiError> {
    match method {
        Method::GET => Ok(Json(state.settings.get().await?).into_response()),
        Method::PUT => {
            let input: SettingsInput = parse_body(body)?;
            input.validate()?;
            Ok(Json(state.settings.update_goal(input.daily_calorie_goal).await?).into_response())
        }
        _ => Err(ApiError::MethodNotAllowed),
    }
}

pub async fn get(State(state): State<AppState>, Query(query): Query<HashMap<String, String>>) -> Result<Response, ApiError> {
    let query = ActionQuery(query);
    match query.action() {
        Some("settings") => settings(&state, Method::GET, &Bytes::new()).await,
        Some("categories") => Ok(Json(state.categories.list().await?).into_response()),
        Some("analytics") => {
            let period = match query.get("period") {
                Some(raw) => raw
                    .parse::<i64>()
                    .map_err(|_| ApiError::BadRequest(format!("period must be a number of days, got '{raw}'")))?,
                None => DEFAULT_ANALYTICS_PERIOD,
            };
            Ok(Json(state.transactions.analytics(period).await?).into_response())
        }
        Some(_) => Err(ApiError::MethodNotAllowed),
        None => {
            let page = state
                .transactions
                .list(query.date("start_date")?, query.date("end_date")?)
                .await?;
            Ok(Json(page).into_response())
        }
    }
}

pub async fn post(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let query = ActionQuery(query);
    match query.action() {
        Some("category") => {
            let input: CategoryInput = parse_body(&body)?;
            input.validate()?;
            let category = state.categories.create(&input.into_category(0)).await?;
            Ok((StatusCode::CREATED, Json(category)).into_response())
        }
        Some(_) => Err(ApiError::MethodNotAllowed),
        None => {
            let input: TransactionInput = parse_body(&body)?;
            input.validate()?;
            let transaction = state.transactions.create(&input).await?;
            tracing::info!(id = transaction.id, amount = transaction.amount, kind = transaction.kind.as_str(), "transaction recorded");
            Ok((StatusCode::CREATED, Json(transaction)).into_response())
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
        Some("settings") => settings(&state, Method::PUT, &body).await,
        Some("category") => {
            let id = query.require_id("id")?;
            let input: CategoryInput = parse_body(&body)?;
            input.validate()?;
            Ok(Json(state.categories.update(&input.into_category(id)).await?).into_response())
        }
        _ => Err(ApiError::MethodNotAllowed),
    }
}

pub async fn delete(State(state): State<AppState>, Query(query): Query<HashMap<String, String>>) -> Result<Response, ApiError> {
    let query = ActionQuery(query);
    match query.action() {
        Some("delete_transaction") => state.transactions.delete(query.require_id("id")?).await?,
        Some("category") => state.categories.delete(query.require_id("id")?).await?,
        _ => return Err(ApiError::MethodNotAllowed),
    }
    Ok(Json(json!({ "success": true })).into_response())
}
