//! Repository Integration Tests
//!
//! Runs every repository against an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::{Duration, Local};

    use crate::domain::{
        CatalogEntry, DiaryInput, DomainError, IngredientInput, ProductInput, ReceiptInput,
        ReceiptItemInput, RecipeInput, ShoppingItem, StorageLocation, TransactionInput, TransactionKind,
    };
    use crate::repository::*;

    fn setup_test_db() -> DbConn {
        let db_state = init_db(Path::new(":memory:")).expect("Failed to init test DB");
        db_state.connection()
    }

    async fn fridge(conn: &DbConn) -> StorageLocation {
        LocationRepository::new(conn.clone())
            .create(&StorageLocation::new("Холодильник".into(), "Refrigerator".into(), "bg-blue-500".into()))
            .await
            .expect("Failed to create location")
    }

    fn product(name: &str, quantity: f64, unit: &str, location_id: i64, calories: Option<f64>) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            category: None,
            expiry_date: None,
            storage_location_id: location_id,
            notes: None,
            calories_per_100g: calories,
        }
    }

    fn recipe(name: &str, ingredients: &[(&str, f64, &str)]) -> RecipeInput {
        RecipeInput {
            name: name.to_string(),
            description: None,
            total_calories: None,
            cooking_time: Some(30),
            servings: 2,
            image_url: None,
            ingredients: ingredients
                .iter()
                .map(|(name, quantity, unit)| IngredientInput {
                    product_name: name.to_string(),
                    quantity: *quantity,
                    unit: unit.to_string(),
                })
                .collect(),
        }
    }

    // ========================
    // Storage
    // ========================

    #[tokio::test]
    async fn test_items_count_ignores_used_up_products() {
        let conn = setup_test_db();
        let location = fridge(&conn).await;
        let products = ProductRepository::new(conn.clone());

        let milk = products.create(&product("Молоко", 1.0, "л", location.id, None)).await.unwrap();
        products.create(&product("Сыр", 200.0, "г", location.id, None)).await.unwrap();
        products.mark_used_up(milk.id).await.unwrap();

        let locations = LocationRepository::new(conn.clone()).list().await.unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].items_count, 1);

        let listed = products.list_by_location(location.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Сыр");

        let kept = products.find_by_id(milk.id).await.unwrap().unwrap();
        assert_eq!(kept.quantity, 0.0);
    }

    #[tokio::test]
    async fn test_product_requires_existing_location() {
        let conn = setup_test_db();
        let products = ProductRepository::new(conn);
        let result = products.create(&product("Хлеб", 1.0, "шт", 42, None)).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_delete_location_removes_products() {
        let conn = setup_test_db();
        let location = fridge(&conn).await;
        let products = ProductRepository::new(conn.clone());
        let butter = products.create(&product("Масло", 180.0, "г", location.id, None)).await.unwrap();

        LocationRepository::new(conn.clone()).delete(location.id).await.expect("Delete failed");

        assert!(products.find_by_id(butter.id).await.unwrap().is_none());
        let again = LocationRepository::new(conn).delete(location.id).await;
        assert!(matches!(again, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_consume_floors_at_zero() {
        let conn = setup_test_db();
        let location = fridge(&conn).await;
        let products = ProductRepository::new(conn);
        let eggs = products.create(&product("Яйца", 3.0, "шт", location.id, None)).await.unwrap();

        let updated = products
            .consume(&[crate::domain::Consumption { product_id: eggs.id, quantity: 5.0 }])
            .await
            .unwrap();
        assert_eq!(updated[0].quantity, 0.0);
    }

    // ========================
    // Shopping
    // ========================

    #[tokio::test]
    async fn test_shopping_list_puts_purchased_last() {
        let conn = setup_test_db();
        let repo = ShoppingRepository::new(conn);

        let bread = repo.create(&ShoppingItem::new("Хлеб".into(), 1.0, "шт".into(), None)).await.unwrap();
        repo.create(&ShoppingItem::new("Молоко".into(), 2.0, "л".into(), None)).await.unwrap();

        let toggled = repo.set_purchased(bread.id, true).await.unwrap();
        assert!(toggled.is_purchased);

        let items = repo.list().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Молоко");
        assert!(items[1].is_purchased);

        assert!(matches!(repo.set_purchased(999, true).await, Err(DomainError::NotFound(_))));
    }

    // ========================
    // Budget
    // ========================

    #[tokio::test]
    async fn test_transactions_summary_respects_range() {
        let conn = setup_test_db();
        let repo = TransactionRepository::new(conn);
        let today = Local::now().date_naive();

        repo.create(&TransactionInput {
            kind: TransactionKind::Income,
            amount: 1000.0,
            category_id: None,
            description: Some("Зарплата".into()),
            date: Some(today),
        })
        .await
        .unwrap();
        repo.create(&TransactionInput {
            kind: TransactionKind::Expense,
            amount: 250.0,
            category_id: Some(1),
            description: None,
            date: Some(today - Duration::days(40)),
        })
        .await
        .unwrap();

        let all = repo.list(None, None).await.unwrap();
        assert_eq!(all.transactions.len(), 2);
        assert_eq!(all.summary.total_income, 1000.0);
        assert_eq!(all.summary.total_expense, 250.0);
        assert_eq!(all.transactions[1].category_name.as_deref(), Some("Продукты"));

        let recent = repo.list(Some(today - Duration::days(7)), Some(today)).await.unwrap();
        assert_eq!(recent.transactions.len(), 1);
        assert_eq!(recent.summary.total_expense, 0.0);

        let analytics = repo.analytics(30).await.unwrap();
        let groceries = analytics.iter().find(|t| t.name == "Продукты").unwrap();
        assert_eq!(groceries.total, 0.0);
        let analytics = repo.analytics(60).await.unwrap();
        assert_eq!(analytics[0].name, "Продукты");
        assert_eq!(analytics[0].total, 250.0);
    }

    #[tokio::test]
    async fn test_delete_category_keeps_transactions() {
        let conn = setup_test_db();
        let categories = CategoryRepository::new(conn.clone());
        let transactions = TransactionRepository::new(conn);

        let seeded = categories.list().await.unwrap();
        assert!(seeded.iter().any(|c| c.name == "Продукты" && c.kind == TransactionKind::Expense));
        let transport = seeded.iter().find(|c| c.name == "Транспорт").unwrap().clone();

        let created = transactions
            .create(&TransactionInput {
                kind: TransactionKind::Expense,
                amount: 60.0,
                category_id: Some(transport.id),
                description: None,
                date: None,
            })
            .await
            .unwrap();
        assert_eq!(created.date, Local::now().date_naive());

        categories.delete(transport.id).await.unwrap();
        let page = transactions.list(None, None).await.unwrap();
        assert_eq!(page.transactions.len(), 1);
        assert_eq!(page.transactions[0].category_id, None);
        assert_eq!(page.transactions[0].category_name, None);
    }

    #[tokio::test]
    async fn test_settings_created_with_default_goal() {
        let conn = setup_test_db();
        let repo = SettingsRepository::new(conn, 2000);

        let settings = repo.get().await.unwrap();
        assert_eq!(settings.daily_calorie_goal, 2000);

        let updated = repo.update_goal(1800).await.unwrap();
        assert_eq!(updated.id, settings.id);
        assert_eq!(repo.get().await.unwrap().daily_calorie_goal, 1800);
    }

    // ========================
    // Catalog
    // ========================

    #[tokio::test]
    async fn test_catalog_search_and_duplicates() {
        let conn = setup_test_db();
        let repo = CatalogRepository::new(conn);
        let entry = |name: &str, category: &str| CatalogEntry {
            id: 0,
            name: name.into(),
            category: Some(category.into()),
            calories_per_100g: Some(100.0),
            default_unit: "г".into(),
        };

        repo.create(&entry("Гречка", "Крупы")).await.unwrap();
        repo.create(&entry("Кефир", "Молочные")).await.unwrap();

        let duplicate = repo.create(&entry(" гречка ", "Крупы")).await;
        assert!(matches!(duplicate, Err(DomainError::Conflict(_))));

        assert_eq!(repo.search("ГРЕЧ").await.unwrap().len(), 1);
        assert_eq!(repo.search("молоч").await.unwrap()[0].name, "Кефир");
        assert_eq!(repo.search("").await.unwrap().len(), 2);
    }

    // ========================
    // Menu
    // ========================

    #[tokio::test]
    async fn test_plan_recipe_adds_shortfall_to_shopping_list() {
        let conn = setup_test_db();
        let location = fridge(&conn).await;
        let products = ProductRepository::new(conn.clone());
        products.create(&product("Рис", 100.0, "г", location.id, None)).await.unwrap();

        let menu = MenuRepository::new(conn.clone());
        let created = menu.create_recipe(&recipe("Плов", &[("рис", 300.0, "г"), ("морковь", 2.0, "шт")])).await.unwrap();

        let outcome = menu.plan_recipe(created.recipe.id).await.unwrap();
        assert_eq!(outcome.missing_products.len(), 2);
        assert_eq!(outcome.missing_products[0].available, 100.0);
        assert_eq!(outcome.planned.missing_products, outcome.missing_products);

        let shopping = ShoppingRepository::new(conn).list().await.unwrap();
        let rice = shopping.iter().find(|i| i.name == "рис").unwrap();
        assert_eq!(rice.quantity, 200.0);
        assert_eq!(rice.category.as_deref(), Some("Продукты"));
        assert!(shopping.iter().any(|i| i.name == "морковь" && i.quantity == 2.0));

        let planned = menu.list_planned().await.unwrap();
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].recipe_name, "Плов");
    }

    #[tokio::test]
    async fn test_prepare_deducts_stock_and_computes_calories() {
        let conn = setup_test_db();
        let location = fridge(&conn).await;
        let products = ProductRepository::new(conn.clone());
        let rice = products.create(&product("Рис", 500.0, "г", location.id, Some(130.0))).await.unwrap();
        let oil = products.create(&product("Масло", 1.0, "л", location.id, Some(900.0))).await.unwrap();

        let menu = MenuRepository::new(conn.clone());
        let created = menu.create_recipe(&recipe("Рис с маслом", &[("рис", 200.0, "г"), ("масло", 0.1, "л")])).await.unwrap();
        let outcome = menu.plan_recipe(created.recipe.id).await.unwrap();
        assert!(outcome.missing_products.is_empty());

        let meal = menu.prepare(outcome.planned.id).await.unwrap();
        assert_eq!(meal.servings_left, 2);
        assert_eq!(meal.total_weight, Some(300.0));
        assert!((meal.total_calories.unwrap() - 386.666).abs() < 0.01);

        assert_eq!(products.find_by_id(rice.id).await.unwrap().unwrap().quantity, 300.0);
        assert!((products.find_by_id(oil.id).await.unwrap().unwrap().quantity - 0.9).abs() < 1e-9);

        assert!(menu.list_planned().await.unwrap().is_empty());
        assert_eq!(menu.list_prepared_meals().await.unwrap().len(), 1);
        assert!(matches!(menu.prepare(outcome.planned.id).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete_recipe() {
        let conn = setup_test_db();
        let menu = MenuRepository::new(conn);
        let created = menu.create_recipe(&recipe("Омлет", &[("яйца", 3.0, "шт")])).await.unwrap();

        let updated = menu
            .update_recipe(created.recipe.id, &recipe("Омлет с молоком", &[("яйца", 3.0, "шт"), ("молоко", 50.0, "мл")]))
            .await
            .unwrap();
        assert_eq!(updated.recipe.name, "Омлет с молоком");
        assert_eq!(updated.ingredients.len(), 2);
        assert_eq!(updated.ingredients[1].product_name, "молоко");

        menu.plan_recipe(created.recipe.id).await.unwrap();
        menu.delete_recipe(created.recipe.id).await.unwrap();
        assert!(menu.list_recipes().await.unwrap().is_empty());
        assert!(menu.list_planned().await.unwrap().is_empty());
        assert!(matches!(menu.recipe_detail(created.recipe.id).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_diary_day_totals() {
        let conn = setup_test_db();
        let diary = DiaryRepository::new(conn);
        let today = Local::now().date_naive();

        let entry = diary
            .add(&DiaryInput {
                meal_name: "Плов".into(),
                portion_weight: 250.0,
                calories: 420.0,
                meal_type: Some("lunch".into()),
                eaten_date: None,
            })
            .await
            .unwrap();
        diary
            .add(&DiaryInput {
                meal_name: "Яблоко".into(),
                portion_weight: 150.0,
                calories: 70.0,
                meal_type: None,
                eaten_date: None,
            })
            .await
            .unwrap();

        let day = diary.day(today).await.unwrap();
        assert_eq!(day.entries.len(), 2);
        assert_eq!(day.total_calories, 490.0);

        diary.delete(entry.id).await.unwrap();
        assert_eq!(diary.day(today).await.unwrap().total_calories, 70.0);
    }

    // ========================
    // Receipts
    // ========================

    #[tokio::test]
    async fn test_process_receipt_fans_out() {
        let conn = setup_test_db();
        let shopping = ShoppingRepository::new(conn.clone());
        let milk = shopping.create(&ShoppingItem::new("Молоко".into(), 1.0, "л".into(), None)).await.unwrap();

        let receipts = ReceiptRepository::new(conn.clone());
        let processed = receipts
            .process(&ReceiptInput {
                qr_code: "t=20240501T1200&s=215.00&fn=1&i=2&fp=3&n=1".into(),
                total_amount: Some(215.0),
                items: vec![
                    ReceiptItemInput {
                        name: " молоко ".into(),
                        price: 90.0,
                        quantity: 1.0,
                        total: None,
                        budget_category_name: None,
                    },
                    ReceiptItemInput {
                        name: "Сыр".into(),
                        price: 62.5,
                        quantity: 2.0,
                        total: None,
                        budget_category_name: Some("продукты".into()),
                    },
                ],
            })
            .await
            .unwrap();

        assert_eq!(processed.items_count, 2);
        assert_eq!(processed.total_amount, 215.0);
        assert_eq!(processed.receipt.status, "processed");

        assert!(shopping.find_by_id(milk.id).await.unwrap().unwrap().is_purchased);

        let catalog = CatalogRepository::new(conn.clone()).list().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.iter().all(|e| e.default_unit == "г"));

        let page = TransactionRepository::new(conn.clone()).list(None, None).await.unwrap();
        assert_eq!(page.transactions.len(), 1);
        let expense = &page.transactions[0];
        assert_eq!(expense.amount, 215.0);
        assert_eq!(expense.receipt_id, Some(processed.receipt.id));
        assert_eq!(expense.category_name.as_deref(), Some("Продукты"));
        assert!(expense.description.as_deref().unwrap().starts_with("Чек от "));

        assert_eq!(receipts.list().await.unwrap().len(), 1);
    }
}
