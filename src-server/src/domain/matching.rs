//! Ingredient Matching
//!
//! Resolves a recipe ingredient name to an on-hand product by name similarity.

use super::storage::Product;

/// Minimum similarity (inclusive) a product name needs to count as a match
pub const MATCH_THRESHOLD: f64 = 0.6;

pub fn meets_threshold(score: f64) -> bool {
    score >= MATCH_THRESHOLD
}

/// 1.0 for case-insensitive equality, 0.8 when one name contains the other, else 0.0
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

/// Highest scoring product for `ingredient`, ignoring quantity.
/// Ties keep the earlier product.
pub fn best_match<'a>(ingredient: &str, products: &'a [Product]) -> Option<&'a Product> {
    let mut best: Option<(&Product, f64)> = None;
    for product in products {
        let score = similarity(ingredient, &product.name);
        if meets_threshold(score) && best.is_none_or(|(_, top)| score > top) {
            best = Some((product, score));
        }
    }
    best.map(|(product, _)| product)
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
            added_date: chrono::Local::now().naive_local(),
            notes: None,
            calories_per_100g: None,
        }
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("Рис", "рис"), 1.0);
        assert_eq!(similarity("рис", "Белый рис"), 0.8);
        assert_eq!(similarity("белый рис", "рис"), 0.8);
        assert_eq!(similarity("рис", "гречка"), 0.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(meets_threshold(MATCH_THRESHOLD));
        assert!(meets_threshold(0.8));
        assert!(!meets_threshold(0.59));
    }

    #[test]
    fn test_best_match_prefers_exact() {
        let products = vec![product(1, "белый рис", 100.0), product(2, "рис", 500.0)];
        assert_eq!(best_match("рис", &products).map(|p| p.id), Some(2));
    }

    #[test]
    fn test_best_match_tie_keeps_first() {
        let products = vec![product(1, "рис басмати", 100.0), product(2, "рис жасмин", 500.0)];
        assert_eq!(best_match("рис", &products).map(|p| p.id), Some(1));
        assert!(best_match("мука", &products).is_none());
    }
}
