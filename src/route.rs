//! Hash Routes
//!
//! The current page lives in the URL fragment (`#/budget`, `#/storage/3`, ...)
//! so reloads and the back button keep working without a server router.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    StorageDetail(i64),
    StorageManagement,
    ShoppingList,
    ScanReceipt,
    Budget,
    Menu,
    /// `None` edits a new recipe
    Recipe(Option<i64>),
    FoodDiary,
    ProductCatalog,
    NotFound(String),
}

impl Route {
    /// Parse a location hash; leading `#` and `/` are optional
    pub fn parse(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["storage", id] => id
                .parse()
                .map(Route::StorageDetail)
                .unwrap_or_else(|_| Route::NotFound(path.to_string())),
            ["storage-management"] => Route::StorageManagement,
            ["shopping-list"] => Route::ShoppingList,
            ["scan"] => Route::ScanReceipt,
            ["budget"] => Route::Budget,
            ["menu"] => Route::Menu,
            ["recipe", "new"] => Route::Recipe(None),
            ["recipe", id] => id
                .parse()
                .map(|id| Route::Recipe(Some(id)))
                .unwrap_or_else(|_| Route::NotFound(path.to_string())),
            ["food-diary"] => Route::FoodDiary,
            ["product-catalog"] => Route::ProductCatalog,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::StorageDetail(id) => format!("#/storage/{id}"),
            Route::StorageManagement => "#/storage-management".to_string(),
            Route::ShoppingList => "#/shopping-list".to_string(),
            Route::ScanReceipt => "#/scan".to_string(),
            Route::Budget => "#/budget".to_string(),
            Route::Menu => "#/menu".to_string(),
            Route::Recipe(None) => "#/recipe/new".to_string(),
            Route::Recipe(Some(id)) => format!("#/recipe/{id}"),
            Route::FoodDiary => "#/food-diary".to_string(),
            Route::ProductCatalog => "#/product-catalog".to_string(),
            Route::NotFound(path) => format!("#/{path}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
        assert_eq!(Route::parse("#/storage/12"), Route::StorageDetail(12));
        assert_eq!(Route::parse("#/recipe/new"), Route::Recipe(None));
        assert_eq!(Route::parse("#/recipe/5/"), Route::Recipe(Some(5)));
        assert_eq!(Route::parse("#/food-diary"), Route::FoodDiary);
        assert_eq!(Route::parse("#/storage/abc"), Route::NotFound("storage/abc".into()));
        assert_eq!(Route::parse("#/settings"), Route::NotFound("settings".into()));
    }

    #[test]
    fn test_hash_round_trip() {
        for route in [
            Route::Home,
            Route::StorageDetail(3),
            Route::StorageManagement,
            Route::ShoppingList,
            Route::ScanReceipt,
            Route::Budget,
            Route::Menu,
            Route::Recipe(None),
            Route::Recipe(Some(8)),
            Route::FoodDiary,
            Route::ProductCatalog,
        ] {
            assert_eq!(Route::parse(&route.to_hash()), route);
        }
    }
}
