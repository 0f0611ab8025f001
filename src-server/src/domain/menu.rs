//! Menu Entities
//!
//! Recipes and their ingredients, the planning/preparation lifecycle,
//! and the food diary.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

/// Status of a prepared meal that still has servings
pub const MEAL_AVAILABLE: &str = "available";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub total_calories: Option<f64>,
    /// Minutes
    pub cooking_time: Option<i64>,
    pub servings: i64,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Ingredient lines reference products by name only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: i64,
    pub recipe_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngredientInput {
    pub product_name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub total_calories: Option<f64>,
    #[serde(default)]
    pub cooking_time: Option<i64>,
    #[serde(default = "default_servings")]
    pub servings: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
}

fn default_servings() -> i64 {
    1
}

impl RecipeInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("recipe name is required".into()));
        }
        if self.ingredients.is_empty() {
            return Err(DomainError::InvalidInput("recipe needs at least one ingredient".into()));
        }
        if self.servings < 1 {
            return Err(DomainError::InvalidInput("servings must be at least 1".into()));
        }
        for ingredient in &self.ingredients {
            if ingredient.product_name.trim().is_empty() || ingredient.quantity <= 0.0 {
                return Err(DomainError::InvalidInput(format!(
                    "invalid ingredient '{}'",
                    ingredient.product_name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Planned,
    Prepared,
    Cancelled,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Planned => "planned",
            PlanStatus::Prepared => "prepared",
            PlanStatus::Cancelled => "cancelled",
        }
    }
}

impl ToSql for PlanStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PlanStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "planned" => Ok(PlanStatus::Planned),
            "prepared" => Ok(PlanStatus::Prepared),
            "cancelled" => Ok(PlanStatus::Cancelled),
            other => Err(FromSqlError::Other(format!("unknown plan status {other}").into())),
        }
    }
}

/// Shortfall recorded when a recipe is planned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingProduct {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Quantity of the best matching product on hand, 0 without a match
    pub available: f64,
}

impl MissingProduct {
    pub fn shortfall(&self) -> f64 {
        self.quantity - self.available
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRecipe {
    pub id: i64,
    pub recipe_id: i64,
    pub recipe_name: String,
    pub total_calories: Option<f64>,
    pub cooking_time: Option<i64>,
    pub status: PlanStatus,
    pub missing_products: Vec<MissingProduct>,
    pub planned_date: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    pub planned: PlannedRecipe,
    pub missing_products: Vec<MissingProduct>,
}

/// A cooked recipe. `total_calories` is per 100 g of the dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedMeal {
    pub id: i64,
    pub recipe_id: i64,
    pub recipe_name: String,
    pub total_calories: Option<f64>,
    /// Grams
    pub total_weight: Option<f64>,
    pub image_url: Option<String>,
    pub prepared_date: NaiveDateTime,
    pub servings_left: i64,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanInput {
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrepareInput {
    pub planned_id: i64,
}

/// Converts an ingredient amount to grams (millilitres count as grams)
pub fn weight_in_grams(quantity: f64, unit: &str) -> f64 {
    match unit {
        "кг" | "л" => quantity * 1000.0,
        _ => quantity,
    }
}

/// Running calorie/weight totals for a dish being prepared
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DishNutrition {
    pub calories: f64,
    pub weight: f64,
}

impl DishNutrition {
    /// Adds one ingredient whose matched product has known calories
    pub fn add(&mut self, quantity: f64, unit: &str, calories_per_100g: f64) {
        let grams = weight_in_grams(quantity, unit);
        self.calories += calories_per_100g * grams / 100.0;
        self.weight += grams;
    }

    pub fn calories_per_100g(&self) -> f64 {
        if self.weight > 0.0 {
            self.calories / self.weight * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDiaryEntry {
    pub id: i64,
    pub meal_name: String,
    pub portion_weight: f64,
    pub calories: f64,
    pub meal_type: Option<String>,
    pub eaten_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiaryInput {
    pub meal_name: String,
    pub portion_weight: f64,
    pub calories: f64,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub eaten_date: Option<NaiveDate>,
}

impl DiaryInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.meal_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("meal name is required".into()));
        }
        if self.portion_weight < 0.0 || self.calories < 0.0 {
            return Err(DomainError::InvalidInput("portion and calories must not be negative".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiaryDay {
    pub entries: Vec<FoodDiaryEntry>,
    pub total_calories: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_in_grams() {
        assert_eq!(weight_in_grams(1.5, "кг"), 1500.0);
        assert_eq!(weight_in_grams(0.5, "л"), 500.0);
        assert_eq!(weight_in_grams(200.0, "мл"), 200.0);
        assert_eq!(weight_in_grams(3.0, "шт"), 3.0);
    }

    #[test]
    fn test_dish_nutrition_per_100g() {
        let mut dish = DishNutrition::default();
        dish.add(200.0, "г", 130.0);
        dish.add(0.1, "кг", 900.0);
        // 260 + 900 kcal over 300 g
        assert!((dish.calories_per_100g() - 386.666).abs() < 0.01);
        assert_eq!(dish.weight, 300.0);
        assert_eq!(DishNutrition::default().calories_per_100g(), 0.0);
    }

    #[test]
    fn test_recipe_input_needs_ingredients() {
        let input: RecipeInput = serde_json::from_str(r#"{"name":"Плов"}"#).unwrap();
        assert_eq!(input.servings, 1);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_missing_product_shortfall() {
        let missing = MissingProduct { name: "рис".into(), quantity: 300.0, unit: "г".into(), available: 100.0 };
        assert_eq!(missing.shortfall(), 200.0);
    }
}
