//! Ingredient-to-Product Matching
//!
//! Names are compared case-insensitively: equal names score 1.0, names where
//! one contains the other score 0.8, anything else 0.0.

use std::collections::HashMap;

use crate::models::{Product, RecipeIngredient};

pub const MATCH_THRESHOLD: f64 = 0.6;

pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a == b {
        1.0
    } else if a.contains(&b) || b.contains(&a) {
        0.8
    } else {
        0.0
    }
}

/// Whether `product` is similar enough and holds enough for `ingredient`
pub fn is_candidate(ingredient: &RecipeIngredient, product: &Product) -> bool {
    similarity(&ingredient.product_name, &product.name) >= MATCH_THRESHOLD && product.quantity >= ingredient.quantity
}

/// First candidate product per ingredient, keyed by ingredient name
pub fn auto_match(ingredients: &[RecipeIngredient], products: &[Product]) -> HashMap<String, i64> {
    ingredients
        .iter()
        .filter_map(|ingredient| {
            products
                .iter()
                .filter(|product| product.quantity > 0.0)
                .find(|product| is_candidate(ingredient, product))
                .map(|product| (ingredient.product_name.clone(), product.id))
        })
        .collect()
}

/// Products a user may pick manually for `ingredient`
pub fn override_options<'a>(ingredient: &RecipeIngredient, products: &'a [Product]) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| product.quantity > 0.0 && product.quantity >= ingredient.quantity)
        .collect()
}

/// Every ingredient has a chosen product
pub fn can_confirm(ingredients: &[RecipeIngredient], matches: &HashMap<String, i64>) -> bool {
    ingredients
        .iter()
        .all(|ingredient| matches.contains_key(&ingredient.product_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, quantity: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            quantity,
            unit: "г".to_string(),
            category: None,
            expiry_date: None,
            storage_location_id: 1,
            notes: None,
            calories_per_100g: None,
        }
    }

    fn ingredient(name: &str, quantity: f64) -> RecipeIngredient {
        RecipeIngredient {
            id: 0,
            recipe_id: 0,
            product_name: name.to_string(),
            quantity,
            unit: "г".to_string(),
        }
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("Рис", "рис"), 1.0);
        assert_eq!(similarity("рис", "Белый рис"), 0.8);
        assert_eq!(similarity("молоко", "кефир"), 0.0);
    }

    #[test]
    fn test_rice_matches_first_product_with_enough_stock() {
        let products = vec![product(1, "рис", 500.0), product(2, "белый рис", 100.0)];
        let rice = ingredient("рис", 200.0);

        assert!(is_candidate(&rice, &products[0]));
        assert!(!is_candidate(&rice, &products[1]));

        let matches = auto_match(&[rice], &products);
        assert_eq!(matches.get("рис"), Some(&1));
    }

    #[test]
    fn test_first_eligible_product_wins() {
        let products = vec![product(7, "белый рис", 300.0), product(8, "рис", 300.0)];
        let matches = auto_match(&[ingredient("рис", 200.0)], &products);
        assert_eq!(matches.get("рис"), Some(&7));
    }

    #[test]
    fn test_unmatched_ingredient_blocks_confirmation() {
        let ingredients = vec![ingredient("рис", 200.0), ingredient("шафран", 1.0)];
        let products = vec![product(1, "рис", 500.0)];

        let mut matches = auto_match(&ingredients, &products);
        assert!(!matches.contains_key("шафран"));
        assert!(!can_confirm(&ingredients, &matches));

        matches.insert("шафран".to_string(), 1);
        assert!(can_confirm(&ingredients, &matches));
    }

    #[test]
    fn test_override_options_cover_requirement() {
        let products = vec![product(1, "рис", 500.0), product(2, "гречка", 150.0), product(3, "пшено", 0.0)];
        let options = override_options(&ingredient("рис", 200.0), &products);
        assert_eq!(options.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
    }
}
