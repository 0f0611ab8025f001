use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{ApiClient, ApiError};
use crate::actions::{self, ShoppingItems};
use crate::config::Endpoints;
use crate::forms::{ShoppingForm, ValidationError};
use crate::models::{RecipeIngredient, ShoppingItem};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(Endpoints::with_base(&server.uri()))
}

fn shopping_item(id: i64, name: &str, is_purchased: bool) -> ShoppingItem {
    ShoppingItem {
        id,
        name: name.to_string(),
        quantity: 1.0,
        unit: "шт".to_string(),
        category: None,
        is_purchased,
        notes: None,
    }
}

fn item_json(id: i64, name: &str, is_purchased: bool) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "quantity": 1.0,
        "unit": "шт",
        "category": null,
        "is_purchased": is_purchased,
        "added_date": "2026-10-16T09:00:00",
        "notes": null
    })
}

impl ShoppingItems for RefCell<Vec<ShoppingItem>> {
    fn edit(&self, f: impl FnOnce(&mut Vec<ShoppingItem>)) {
        f(&mut self.borrow_mut());
    }
}

fn purchased(items: &RefCell<Vec<ShoppingItem>>) -> Vec<bool> {
    items.borrow().iter().map(|item| item.is_purchased).collect()
}

async fn mount_put(server: &MockServer, id: i64, is_purchased: bool, status: u16) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(item_json(id, "Товар", is_purchased))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({ "error": format!("Not found: shopping item {id}") }))
    };
    Mock::given(method("PUT"))
        .and(path("/shopping"))
        .and(query_param("id", id.to_string()))
        .and(body_json(json!({ "isPurchased": is_purchased })))
        .respond_with(response.set_delay(Duration::from_millis(150)))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_toggle_flips_one_item_with_one_put() {
    let server = MockServer::start().await;
    mount_put(&server, 2, true, 200).await;

    let api = client(&server);
    let items = RefCell::new(vec![
        shopping_item(1, "Молоко", false),
        shopping_item(2, "Хлеб", false),
        shopping_item(3, "Сыр", true),
    ]);

    let wanted = actions::flip_purchased(&items, 2).unwrap();
    assert!(wanted);
    // visible before the request completes
    assert_eq!(purchased(&items), vec![false, true, true]);

    actions::save_purchased(&api, &items, 2, wanted).await.unwrap();
    assert_eq!(purchased(&items), vec![false, true, true]);
}

#[tokio::test]
async fn test_interleaved_toggles_keep_both_flips() {
    let server = MockServer::start().await;
    mount_put(&server, 1, true, 200).await;
    mount_put(&server, 3, false, 200).await;

    let api = client(&server);
    let items = RefCell::new(vec![
        shopping_item(1, "Молоко", false),
        shopping_item(2, "Хлеб", false),
        shopping_item(3, "Сыр", true),
    ]);

    let first = actions::flip_purchased(&items, 1).unwrap();
    let second = actions::flip_purchased(&items, 3).unwrap();
    assert_eq!(purchased(&items), vec![true, false, false]);

    let (a, b) = tokio::join!(
        actions::save_purchased(&api, &items, 1, first),
        actions::save_purchased(&api, &items, 3, second),
    );
    a.unwrap();
    b.unwrap();
    assert_eq!(purchased(&items), vec![true, false, false]);
}

#[tokio::test]
async fn test_failed_toggle_reverts_only_its_item() {
    let server = MockServer::start().await;
    mount_put(&server, 1, true, 404).await;
    mount_put(&server, 2, true, 200).await;

    let api = client(&server);
    let items = RefCell::new(vec![shopping_item(1, "Молоко", false), shopping_item(2, "Хлеб", false)]);

    let first = actions::flip_purchased(&items, 1).unwrap();
    let second = actions::flip_purchased(&items, 2).unwrap();

    let (failed, saved) = tokio::join!(
        actions::save_purchased(&api, &items, 1, first),
        actions::save_purchased(&api, &items, 2, second),
    );
    let err = failed.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert_eq!(err.user_message(), "Not found: shopping item 1");
    saved.unwrap();
    assert_eq!(purchased(&items), vec![false, true]);
}

#[tokio::test]
async fn test_toggle_of_unloaded_item_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/shopping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json(9, "Хлеб", true)))
        .expect(0)
        .mount(&server)
        .await;

    let items = RefCell::new(vec![shopping_item(1, "Молоко", false)]);
    let err = actions::flip_purchased(&items, 9).unwrap_err();
    assert_eq!(err, actions::ActionError::NotLoaded(9));
    assert_eq!(purchased(&items), vec![false]);
}

#[tokio::test]
async fn test_invalid_shopping_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shopping"))
        .respond_with(ResponseTemplate::new(201).set_body_json(item_json(1, "Хлеб", false)))
        .expect(0)
        .mount(&server)
        .await;

    let api = client(&server);
    let empty_name = ShoppingForm {
        quantity: "1".into(),
        ..Default::default()
    };
    let empty_quantity = ShoppingForm {
        name: "Хлеб".into(),
        ..Default::default()
    };

    let err = actions::add_shopping_item(&api, &empty_name).await.unwrap_err();
    assert_eq!(err, actions::ActionError::Invalid(ValidationError::Required("Название")));
    let err = actions::add_shopping_item(&api, &empty_quantity).await.unwrap_err();
    assert_eq!(err, actions::ActionError::Invalid(ValidationError::Required("Количество")));
}

#[tokio::test]
async fn test_valid_shopping_form_posts_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shopping"))
        .and(body_json(json!({
            "name": "Хлеб",
            "quantity": 2.0,
            "unit": "шт",
            "category": null,
            "notes": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(item_json(9, "Хлеб", false)))
        .expect(1)
        .mount(&server)
        .await;

    let form = ShoppingForm {
        name: "Хлеб".into(),
        quantity: "2".into(),
        ..Default::default()
    };
    let item = actions::add_shopping_item(&client(&server), &form).await.unwrap();
    assert_eq!(item.id, 9);
}

fn product_json(id: i64, name: &str, quantity: f64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "quantity": quantity,
        "unit": "г",
        "category": null,
        "expiry_date": null,
        "storage_location_id": 1
    })
}

#[tokio::test]
async fn test_confirming_matches_leaves_stock_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage"))
        .and(query_param("action", "products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "Белый рис", 500.0),
            product_json(2, "Морковь", 50.0),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/menu"))
        .and(query_param("action", "cook"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/storage"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = client(&server);
    let ingredients: Vec<RecipeIngredient> = ["рис", "морковь"]
        .iter()
        .map(|name| RecipeIngredient {
            id: 0,
            recipe_id: 4,
            product_name: name.to_string(),
            quantity: 100.0,
            unit: "г".to_string(),
        })
        .collect();

    // 50 g of carrots cannot cover 100 g
    let (products, mut matches) = actions::load_matches(&api, &ingredients).await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(matches, HashMap::from([("рис".to_string(), 1)]));
    assert_eq!(
        actions::confirm_matches(&ingredients, &matches),
        Err(actions::ActionError::Unmatched)
    );

    matches.insert("морковь".to_string(), 2);
    assert_eq!(actions::confirm_matches(&ingredients, &matches), Ok(()));
}

#[tokio::test]
async fn test_scanned_code_is_looked_up_and_submitted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/receipt-lookup"))
        .and(query_param("fn", "9999078900004792"))
        .and(query_param("s", "145.50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "name": "Хлеб", "price": 4550, "quantity": 1, "sum": 4550 },
                { "name": "Сыр", "price": 5000, "quantity": 2, "sum": 10000 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/receipts"))
        .and(body_json(json!({
            "qr_code": "t=20261016T1200&s=145.50&fn=9999078900004792&i=1&fp=2&n=1",
            "total_amount": 145.5,
            "items": [
                { "name": "Хлеб", "price": 45.5, "quantity": 1.0, "total": 45.5, "budget_category_name": null },
                { "name": "Сыр", "price": 50.0, "quantity": 2.0, "total": 100.0, "budget_category_name": null }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "receipt": {
                "id": 1,
                "qr_code": "t=20261016T1200&s=145.50&fn=9999078900004792&i=1&fp=2&n=1",
                "total_amount": 145.5,
                "scan_date": "2026-10-16T12:01:00",
                "status": "processed"
            },
            "total_amount": 145.5,
            "items_count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let processed = actions::process_scanned_code(
        &client(&server),
        "t=20261016T1200&s=145.50&fn=9999078900004792&i=1&fp=2&n=1",
    )
    .await
    .unwrap();
    assert_eq!(processed.items_count, 2);
    assert_eq!(processed.receipt.status, "processed");
}

#[tokio::test]
async fn test_unreadable_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server).list_locations().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
