use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;

use super::{action, id, ApiClient, ApiError};
use crate::models::{
    DiaryDay, DiaryDraft, FoodDiaryEntry, PlanOutcome, PlannedRecipe, PreparedMeal, Recipe, RecipeDetail,
    RecipeDraft,
};

#[derive(Serialize)]
struct PlanBody {
    recipe_id: i64,
}

#[derive(Serialize)]
struct PrepareBody {
    planned_id: i64,
}

impl ApiClient {
    // ========================
    // Recipes
    // ========================

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        self.get_json(&self.endpoints.menu, &[]).await
    }

    pub async fn recipe_detail(&self, recipe_id: i64) -> Result<RecipeDetail, ApiError> {
        self.get_json(&self.endpoints.menu, &[id("recipe_id", recipe_id)]).await
    }

    pub async fn create_recipe(&self, draft: &RecipeDraft) -> Result<RecipeDetail, ApiError> {
        self.send_json(Method::POST, &self.endpoints.menu, &[action("create_recipe")], draft)
            .await
    }

    pub async fn update_recipe(&self, recipe_id: i64, draft: &RecipeDraft) -> Result<RecipeDetail, ApiError> {
        self.send_json(
            Method::PUT,
            &self.endpoints.menu,
            &[action("update_recipe"), id("id", recipe_id)],
            draft,
        )
        .await
    }

    pub async fn delete_recipe(&self, recipe_id: i64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.menu, &[action("delete_recipe"), id("id", recipe_id)])
            .await
    }

    // ========================
    // Planning and preparation
    // ========================

    pub async fn list_planned(&self) -> Result<Vec<PlannedRecipe>, ApiError> {
        self.get_json(&self.endpoints.menu, &[action("planned")]).await
    }

    pub async fn plan_recipe(&self, recipe_id: i64) -> Result<PlanOutcome, ApiError> {
        self.send_json(
            Method::POST,
            &self.endpoints.menu,
            &[action("plan_recipe")],
            &PlanBody { recipe_id },
        )
        .await
    }

    pub async fn cancel_plan(&self, planned_id: i64) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .send_json(
                Method::PUT,
                &self.endpoints.menu,
                &[action("cancel_plan"), id("id", planned_id)],
                &serde_json::json!({}),
            )
            .await?;
        Ok(())
    }

    pub async fn prepare_planned(&self, planned_id: i64) -> Result<PreparedMeal, ApiError> {
        self.send_json(
            Method::POST,
            &self.endpoints.menu,
            &[action("prepare")],
            &PrepareBody { planned_id },
        )
        .await
    }

    pub async fn list_prepared_meals(&self) -> Result<Vec<PreparedMeal>, ApiError> {
        self.get_json(&self.endpoints.menu, &[action("prepared_meals")]).await
    }

    pub async fn delete_meal(&self, meal_id: i64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.menu, &[action("delete_meal"), id("id", meal_id)])
            .await
    }

    // ========================
    // Food diary
    // ========================

    pub async fn diary_day(&self, date: Option<NaiveDate>) -> Result<DiaryDay, ApiError> {
        let mut query = vec![action("diary")];
        if let Some(date) = date {
            query.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        self.get_json(&self.endpoints.menu, &query).await
    }

    pub async fn add_diary_entry(&self, draft: &DiaryDraft) -> Result<FoodDiaryEntry, ApiError> {
        self.send_json(Method::POST, &self.endpoints.menu, &[action("diary")], draft)
            .await
    }

    pub async fn delete_diary_entry(&self, entry_id: i64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.menu, &[action("delete_diary"), id("id", entry_id)])
            .await
    }
}
