//! `/receipts`: scanned purchase receipts.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::params::parse_body;
use super::AppState;
use crate::domain::ReceiptInput;
use crate::error::ApiError;

pub async fn get(State(state): State<AppState>) -> Result<Response, ApiError> {
    Ok(Json(state.receipts.list().await?).into_response())
}

pub async fn post(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let input: ReceiptInput = parse_body(&body)?;
    input.validate()?;
    let processed = state.receipts.process(&input).await?;
    tracing::info!(
        receipt_id = processed.receipt.id,
        items = processed.items_count,
        total = processed.total_amount,
        "receipt processed"
    );
    Ok((StatusCode::CREATED, Json(processed)).into_response())
}
