//! `/menu`: recipes, planning, preparation and the food diary.

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
use crate::domain::{DiaryInput, PlanInput, PrepareInput, RecipeInput};
use crate::error::ApiError;

pub async fn get(State(state): State<AppState>, Query(query): Query<HashMap<String, String>>) -> Result<Response, ApiError> {
    let query = ActionQuery(query);
    match query.action() {
        Some("prepared_meals") => Ok(Json(state.menu.list_prepared_meals().await?).into_response()),
        Some("planned") => Ok(Json(state.menu.list_planned().await?).into_response()),
        Some("diary") => {
            let day = query.date("date")?.unwrap_or_else(|| chrono::Local::now().date_naive());
            Ok(Json(state.diary.day(day).await?).into_response())
        }
        Some(_) => Err(ApiError::MethodNotAllowed),
        None => match query.id("recipe_id")? {
            Some(id) => Ok(Json(state.menu.recipe_detail(id).await?).into_response()),
            None => Ok(Json(state.menu.list_recipes().await?).into_response()),
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
        Some("plan_recipe") => {
            let input: PlanInput = parse_body(&body)?;
            let outcome = state.menu.plan_recipe(input.recipe_id).await?;
            tracing::info!(
                recipe_id = input.recipe_id,
                missing = outcome.missing_products.len(),
                "recipe planned"
            );
            Ok((StatusCode::CREATED, Json(outcome)).into_response())
        }
        Some("prepare") => {
            let input: PrepareInput = parse_body(&body)?;
            let meal = state.menu.prepare(input.planned_id).await?;
            tracing::info!(planned_id = input.planned_id, meal_id = meal.id, "planned recipe prepared");
            Ok((StatusCode::CREATED, Json(meal)).into_response())
        }
        Some("create_recipe") => {
            let input: RecipeInput = parse_body(&body)?;
            input.validate()?;
            let detail = state.menu.create_recipe(&input).await?;
            Ok((StatusCode::CREATED, Json(detail)).into_response())
        }
        Some("diary") => {
            let input: DiaryInput = parse_body(&body)?;
            input.validate()?;
            let entry = state.diary.add(&input).await?;
            Ok((StatusCode::CREATED, Json(entry)).into_response())
        }
        _ => Err(ApiError::MethodNotAllowed),
    }
}

pub async fn put(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let query = ActionQuery(query);
    match query.action() {
        Some("cancel_plan") => {
            state.menu.cancel_plan(query.require_id("id")?).await?;
            Ok(Json(json!({ "success": true })).into_response())
        }
        Some("update_recipe") => {
            let id = query.require_id("id")?;
            let input: RecipeInput = parse_body(&body)?;
            input.validate()?;
            Ok(Json(state.menu.update_recipe(id, &input).await?).into_response())
        }
        _ => Err(ApiError::MethodNotAllowed),
    }
}

pub async fn delete(State(state): State<AppState>, Query(query): Query<HashMap<String, String>>) -> Result<Response, ApiError> {
    let query = ActionQuery(query);
    match query.action() {
        Some("delete_recipe") => state.menu.delete_recipe(query.require_id("id")?).await?,
        Some("delete_meal") => state.menu.delete_meal(query.require_id("id")?).await?,
        Some("delete_diary") => state.diary.delete(query.require_id("id")?).await?,
        _ => return Err(ApiError::MethodNotAllowed),
    }
    Ok(Json(json!({ "success": true })).into_response())
}
