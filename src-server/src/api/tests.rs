use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use super::{router, Repositories};
use crate::repository::init_db;

fn create_test_app() -> TestServer {
    let db = init_db(Path::new(":memory:")).expect("Failed to create in-memory database");
    let state = Arc::new(Repositories::new(db.connection(), 2000));
    TestServer::new(router(state)).expect("Failed to create test server")
}

async fn create_location(app: &TestServer, name: &str) -> i64 {
    let response = app
        .post("/storage")
        .add_query_param("action", "createLocation")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_shopping_create_and_toggle() {
    let app = create_test_app();

    let response = app
        .post("/shopping")
        .json(&json!({ "name": "Молоко", "quantity": 2, "unit": "л" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["is_purchased"], json!(false));

    let response = app
        .put("/shopping")
        .add_query_param("id", id)
        .json(&json!({ "isPurchased": true }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["is_purchased"], json!(true));

    let items: Vec<Value> = app.get("/shopping").await.json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["is_purchased"], json!(true));
}

#[tokio::test]
async fn test_shopping_rejects_empty_name() {
    let app = create_test_app();

    let response = app
        .post("/shopping")
        .json(&json!({ "name": "  ", "quantity": 1, "unit": "шт" }))
        .await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_unknown_action_is_not_allowed() {
    let app = create_test_app();

    let response = app.get("/menu").add_query_param("action", "explode").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

    let response = app.put("/shopping").json(&json!({ "isPurchased": true })).await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_storage_detail_and_products() {
    let app = create_test_app();
    let location_id = create_location(&app, "Холодильник").await;

    let response = app
        .post("/storage")
        .json(&json!({
            "name": "Сыр",
            "quantity": 0.3,
            "unit": "кг",
            "storageLocationId": location_id,
            "caloriesPer100g": 350
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let product_id = response.json::<Value>()["id"].as_i64().unwrap();

    let detail: Value = app.get("/storage").add_query_param("id", location_id).await.json();
    assert_eq!(detail["location"]["name"], json!("Холодильник"));
    assert_eq!(detail["products"].as_array().unwrap().len(), 1);

    let locations: Vec<Value> = app.get("/storage").await.json();
    assert_eq!(locations[0]["items_count"], json!(1));

    app.delete("/storage")
        .add_query_param("productId", product_id)
        .await
        .assert_status_ok();

    let products: Vec<Value> = app.get("/storage").add_query_param("action", "products").await.json();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_storage_detail_missing_location() {
    let app = create_test_app();

    let response = app.get("/storage").add_query_param("id", 404).await;
    response.assert_status_not_found();
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_budget_settings_default_and_update() {
    let app = create_test_app();

    let settings: Value = app.get("/budget").add_query_param("action", "settings").await.json();
    assert_eq!(settings["daily_calorie_goal"], json!(2000));

    let response = app
        .put("/budget")
        .add_query_param("action", "settings")
        .json(&json!({ "daily_calorie_goal": 1800 }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["daily_calorie_goal"], json!(1800));

    let response = app
        .put("/budget")
        .add_query_param("action", "settings")
        .json(&json!({ "daily_calorie_goal": 0 }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_budget_transactions_summary() {
    let app = create_test_app();

    for (kind, amount) in [("income", 50000.0), ("expense", 1200.5)] {
        app.post("/budget")
            .json(&json!({ "type": kind, "amount": amount, "date": "2026-10-01" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let page: Value = app
        .get("/budget")
        .add_query_param("start_date", "2026-10-01")
        .add_query_param("end_date", "2026-10-31")
        .await
        .json();
    assert_eq!(page["transactions"].as_array().unwrap().len(), 2);
    assert_eq!(page["summary"]["total_income"], json!(50000.0));
    assert_eq!(page["summary"]["total_expense"], json!(1200.5));

    let response = app.get("/budget").add_query_param("start_date", "01.10.2026").await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_receipt_processing() {
    let app = create_test_app();

    let response = app
        .post("/receipts")
        .json(&json!({
            "qr_code": "t=20261001T1200&s=145.50&fn=1&i=2&fp=3&n=1",
            "items": [
                { "name": "Хлеб", "price": 45.5 },
                { "name": "Сыр", "price": 50, "quantity": 2 }
            ]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let processed: Value = response.json();
    assert_eq!(processed["items_count"], json!(2));
    assert_eq!(processed["total_amount"], json!(145.5));

    let receipts: Vec<Value> = app.get("/receipts").await.json();
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0]["status"], json!("processed"));
}

#[tokio::test]
async fn test_menu_recipe_plan_and_cancel() {
    let app = create_test_app();

    let response = app
        .post("/menu")
        .add_query_param("action", "create_recipe")
        .json(&json!({
            "name": "Омлет",
            "servings": 1,
            "ingredients": [{ "product_name": "Яйца", "quantity": 3, "unit": "шт" }]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let recipe_id = response.json::<Value>()["recipe"]["id"].as_i64().unwrap();

    let response = app
        .post("/menu")
        .add_query_param("action", "plan_recipe")
        .json(&json!({ "recipe_id": recipe_id }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let outcome: Value = response.json();
    assert_eq!(outcome["missing_products"].as_array().unwrap().len(), 1);
    let planned_id = outcome["planned"]["id"].as_i64().unwrap();

    let shopping: Vec<Value> = app.get("/shopping").await.json();
    assert_eq!(shopping[0]["name"], json!("Яйца"));

    app.put("/menu")
        .add_query_param("action", "cancel_plan")
        .add_query_param("id", planned_id)
        .await
        .assert_status_ok();

    let response = app
        .post("/menu")
        .add_query_param("action", "prepare")
        .json(&json!({ "planned_id": planned_id }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}
