//! Menu Repository
//!
//! Recipes, planning and preparation. Planning and preparation touch
//! products and the shopping list too, so they run in one SQLite transaction.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::DbConn;
use super::product_repo::{deduct, in_stock};
use super::shopping_repo::insert_item;
use crate::domain::matching::best_match;
use crate::domain::{
    DishNutrition, DomainError, DomainResult, MissingProduct, PlanOutcome, PlanStatus, PlannedRecipe,
    PreparedMeal, Product, Recipe, RecipeDetail, RecipeIngredient, RecipeInput, ShoppingItem, GROCERIES_CATEGORY,
    MEAL_AVAILABLE,
};

const SELECT_RECIPE: &str =
    "SELECT id, name, description, total_calories, cooking_time, servings, image_url, created_at FROM recipes";

const SELECT_PLANNED: &str = "SELECT pr.id, pr.recipe_id, r.name, r.total_calories, r.cooking_time,
        pr.status, pr.missing_products, pr.planned_date
    FROM planned_recipes pr
    JOIN recipes r ON pr.recipe_id = r.id";

const SELECT_MEAL: &str = "SELECT pm.id, pm.recipe_id, r.name, pm.total_calories, pm.total_weight, r.image_url,
        pm.prepared_date, pm.servings_left, pm.status
    FROM prepared_meals pm
    JOIN recipes r ON pm.recipe_id = r.id";

fn row_to_recipe(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    Ok(Recipe {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        total_calories: row.get(3)?,
        cooking_time: row.get(4)?,
        servings: row.get(5)?,
        image_url: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn row_to_planned(row: &Row<'_>) -> rusqlite::Result<PlannedRecipe> {
    let missing: String = row.get(6)?;
    let missing_products = serde_json::from_str(&missing)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e)))?;
    Ok(PlannedRecipe {
        id: row.get(0)?,
        recipe_id: row.get(1)?,
        recipe_name: row.get(2)?,
        total_calories: row.get(3)?,
        cooking_time: row.get(4)?,
        status: row.get(5)?,
        missing_products,
        planned_date: row.get(7)?,
    })
}

fn row_to_meal(row: &Row<'_>) -> rusqlite::Result<PreparedMeal> {
    Ok(PreparedMeal {
        id: row.get(0)?,
        recipe_id: row.get(1)?,
        recipe_name: row.get(2)?,
        total_calories: row.get(3)?,
        total_weight: row.get(4)?,
        image_url: row.get(5)?,
        prepared_date: row.get(6)?,
        servings_left: row.get(7)?,
        status: row.get(8)?,
    })
}

fn find_recipe(conn: &Connection, id: i64) -> rusqlite::Result<Option<Recipe>> {
    conn.query_row(&format!("{SELECT_RECIPE} WHERE id = ?"), params![id], row_to_recipe)
        .optional()
}

fn ingredients_of(conn: &Connection, recipe_id: i64) -> rusqlite::Result<Vec<RecipeIngredient>> {
    let mut stmt = conn.prepare(
        "SELECT id, recipe_id, product_name, quantity, unit FROM recipe_ingredients
         WHERE recipe_id = ? ORDER BY position, id",
    )?;
    let ingredients = stmt
        .query_map(params![recipe_id], |row| {
            Ok(RecipeIngredient {
                id: row.get(0)?,
                recipe_id: row.get(1)?,
                product_name: row.get(2)?,
                quantity: row.get(3)?,
                unit: row.get(4)?,
            })
        })?
        .collect();
    ingredients
}

fn insert_ingredients(conn: &Connection, recipe_id: i64, input: &RecipeInput) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO recipe_ingredients (recipe_id, product_name, quantity, unit, position) VALUES (?, ?, ?, ?, ?)",
    )?;
    for (position, ingredient) in input.ingredients.iter().enumerate() {
        stmt.execute(params![
            recipe_id,
            ingredient.product_name.trim(),
            ingredient.quantity,
            ingredient.unit,
            position as i64,
        ])?;
    }
    Ok(())
}

fn find_meal(conn: &Connection, id: i64) -> rusqlite::Result<Option<PreparedMeal>> {
    conn.query_row(&format!("{SELECT_MEAL} WHERE pm.id = ?"), params![id], row_to_meal)
        .optional()
}

fn insert_meal(conn: &Connection, recipe: &Recipe, nutrition: &DishNutrition) -> DomainResult<PreparedMeal> {
    conn.execute(
        "INSERT INTO prepared_meals (recipe_id, total_calories, total_weight, prepared_date, servings_left, status)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            recipe.id,
            nutrition.calories_per_100g(),
            nutrition.weight,
            chrono::Local::now().naive_local(),
            recipe.servings,
            MEAL_AVAILABLE,
        ],
    )?;
    let id = conn.last_insert_rowid();
    find_meal(conn, id)?.ok_or_else(|| DomainError::Internal(format!("meal {id} vanished after insert")))
}

/// Deduct the ingredient from the product (local copy included) and account its calories
fn use_product(
    conn: &Connection,
    ingredient: &RecipeIngredient,
    product: &mut Product,
    nutrition: &mut DishNutrition,
) -> rusqlite::Result<()> {
    deduct(conn, product.id, ingredient.quantity)?;
    product.quantity = (product.quantity - ingredient.quantity).max(0.0);
    if let Some(calories) = product.calories_per_100g {
        nutrition.add(ingredient.quantity, &ingredient.unit, calories);
    }
    Ok(())
}

pub struct MenuRepository {
    conn: DbConn,
}

impl MenuRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    // ========================
    // Recipes
    // ========================

    /// Newest first
    pub async fn list_recipes(&self) -> DomainResult<Vec<Recipe>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT_RECIPE} ORDER BY created_at DESC, id DESC"))?;
        let recipes = stmt.query_map([], row_to_recipe)?.collect::<Result<Vec<_>, _>>()?;
        Ok(recipes)
    }

    pub async fn recipe_detail(&self, id: i64) -> DomainResult<RecipeDetail> {
        let conn = self.conn.lock().await;
        let recipe = find_recipe(&conn, id)?.ok_or_else(|| DomainError::NotFound(format!("recipe {id}")))?;
        let ingredients = ingredients_of(&conn, id)?;
        Ok(RecipeDetail { recipe, ingredients })
    }

    pub async fn create_recipe(&self, input: &RecipeInput) -> DomainResult<RecipeDetail> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO recipes (name, description, total_calories, cooking_time, servings, image_url, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                input.name.trim(),
                input.description,
                input.total_calories,
                input.cooking_time,
                input.servings,
                input.image_url,
                chrono::Local::now().naive_local(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        insert_ingredients(&tx, id, input)?;
        let recipe = find_recipe(&tx, id)?.ok_or_else(|| DomainError::Internal(format!("recipe {id} vanished after insert")))?;
        let ingredients = ingredients_of(&tx, id)?;
        tx.commit()?;
        Ok(RecipeDetail { recipe, ingredients })
    }

    /// Replace the recipe fields and its whole ingredient list
    pub async fn update_recipe(&self, id: i64, input: &RecipeInput) -> DomainResult<RecipeDetail> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            "UPDATE recipes SET name = ?, description = ?, total_calories = ?, cooking_time = ?, servings = ?, image_url = ?
             WHERE id = ?",
            params![
                input.name.trim(),
                input.description,
                input.total_calories,
                input.cooking_time,
                input.servings,
                input.image_url,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("recipe {id}")));
        }
        tx.execute("DELETE FROM recipe_ingredients WHERE recipe_id = ?", params![id])?;
        insert_ingredients(&tx, id, input)?;
        let recipe = find_recipe(&tx, id)?.ok_or_else(|| DomainError::NotFound(format!("recipe {id}")))?;
        let ingredients = ingredients_of(&tx, id)?;
        tx.commit()?;
        Ok(RecipeDetail { recipe, ingredients })
    }

    /// Removes the recipe with its ingredients, plans and meals
    pub async fn delete_recipe(&self, id: i64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM recipes WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("recipe {id}")));
        }
        Ok(())
    }

    // ========================
    // Planning
    // ========================

    /// Plans still waiting to be cooked, newest first
    pub async fn list_planned(&self) -> DomainResult<Vec<PlannedRecipe>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_PLANNED} WHERE pr.status = ? ORDER BY pr.planned_date DESC, pr.id DESC"
        ))?;
        let planned = stmt
            .query_map(params![PlanStatus::Planned], row_to_planned)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(planned)
    }

    /// Plan a recipe: every ingredient without an on-hand product covering it
    /// is reported and its shortfall goes onto the shopping list.
    pub async fn plan_recipe(&self, recipe_id: i64) -> DomainResult<PlanOutcome> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        if find_recipe(&tx, recipe_id)?.is_none() {
            return Err(DomainError::NotFound(format!("recipe {recipe_id}")));
        }
        let ingredients = ingredients_of(&tx, recipe_id)?;
        let products = in_stock(&tx)?;

        let mut missing_products = Vec::new();
        for ingredient in &ingredients {
            let matched = best_match(&ingredient.product_name, &products);
            if matched.is_none_or(|product| product.quantity < ingredient.quantity) {
                missing_products.push(MissingProduct {
                    name: ingredient.product_name.clone(),
                    quantity: ingredient.quantity,
                    unit: ingredient.unit.clone(),
                    available: matched.map_or(0.0, |product| product.quantity),
                });
            }
        }

        for missing in &missing_products {
            let needed = missing.shortfall();
            if needed > 0.0 {
                let item = ShoppingItem::new(
                    missing.name.clone(),
                    needed,
                    missing.unit.clone(),
                    Some(GROCERIES_CATEGORY.to_string()),
                );
                insert_item(&tx, &item)?;
            }
        }

        tx.execute(
            "INSERT INTO planned_recipes (recipe_id, status, missing_products, planned_date) VALUES (?, ?, ?, ?)",
            params![
                recipe_id,
                PlanStatus::Planned,
                serde_json::to_string(&missing_products)?,
                chrono::Local::now().naive_local(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        let planned = tx.query_row(&format!("{SELECT_PLANNED} WHERE pr.id = ?"), params![id], row_to_planned)?;
        tx.commit()?;

        Ok(PlanOutcome { planned, missing_products })
    }

    pub async fn cancel_plan(&self, planned_id: i64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE planned_recipes SET status = ? WHERE id = ? AND status = ?",
            params![PlanStatus::Cancelled, planned_id, PlanStatus::Planned],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("planned recipe {planned_id}")));
        }
        Ok(())
    }

    // ========================
    // Preparation
    // ========================

    /// Cook a planned recipe, matching each ingredient to the best on-hand product
    pub async fn prepare(&self, planned_id: i64) -> DomainResult<PreparedMeal> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let plan = tx
            .query_row(&format!("{SELECT_PLANNED} WHERE pr.id = ?"), params![planned_id], row_to_planned)
            .optional()?
            .ok_or_else(|| DomainError::NotFound(format!("planned recipe {planned_id}")))?;
        if plan.status != PlanStatus::Planned {
            return Err(DomainError::Conflict(format!(
                "planned recipe {planned_id} is already {}",
                plan.status.as_str()
            )));
        }
        let recipe = find_recipe(&tx, plan.recipe_id)?
            .ok_or_else(|| DomainError::NotFound(format!("recipe {}", plan.recipe_id)))?;
        let ingredients = ingredients_of(&tx, recipe.id)?;
        let mut products = in_stock(&tx)?;

        let mut nutrition = DishNutrition::default();
        for ingredient in &ingredients {
            let matched_id = best_match(&ingredient.product_name, &products).map(|product| product.id);
            if let Some(product) = matched_id.and_then(|id| products.iter_mut().find(|p| p.id == id)) {
                use_product(&tx, ingredient, product, &mut nutrition)?;
            }
        }

        let meal = insert_meal(&tx, &recipe, &nutrition)?;
        tx.execute(
            "UPDATE planned_recipes SET status = ? WHERE id = ?",
            params![PlanStatus::Prepared, planned_id],
        )?;
        tx.commit()?;
        Ok(meal)
    }

    // ========================
    // Prepared meals
    // ========================

    /// Meals with servings left, newest first
    pub async fn list_prepared_meals(&self) -> DomainResult<Vec<PreparedMeal>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_MEAL} WHERE pm.status = ? ORDER BY pm.prepared_date DESC, pm.id DESC"
        ))?;
        let meals = stmt
            .query_map(params![MEAL_AVAILABLE], row_to_meal)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    pub async fn delete_meal(&self, id: i64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM prepared_meals WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("meal {id}")));
        }
        Ok(())
    }
}
