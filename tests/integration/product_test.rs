//! Product endpoint tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_product_crud() {
    let app = TestApp::new().await;
    let first = app.create_category("Phones", None).await;
    let second = app.create_category("Tablets", None).await;
    let id = app.create_product("Handset", first).await;

    let response = app
        .request("GET", &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["categoryId"], first);

    let response = app
        .request(
            "PUT",
            &format!("/api/v1/products/{id}"),
            Some(json!({ "name": "Slate", "categoryId": second })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Slate");
    assert_eq!(response.body["data"]["categoryId"], second);

    let response = app
        .request("DELETE", &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Product successfully deleted");

    let response = app
        .request("GET", &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Product not found");
}

#[tokio::test]
async fn test_product_requires_category() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/v1/products",
            Some(json!({ "name": "Stray", "categoryId": 7 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Category not found");

    let response = app
        .request(
            "POST",
            "/api/v1/products",
            Some(json!({ "name": "Stray", "categoryId": 0 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_pages() {
    let app = TestApp::new().await;
    let category = app.create_category("Games", None).await;
    for name in ["Chess", "Gomoku", "Shogi", "Xiangqi", "Othello"] {
        app.create_product(name, category).await;
    }

    let response = app
        .request("GET", "/api/v1/products?page=2&per_page=2", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(data["total"], 5);
    assert_eq!(data["page"], 2);
    assert_eq!(data["perPage"], 2);
    assert_eq!(data["totalPages"], 3);

    let names: Vec<&str> = data["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Shogi", "Xiangqi"]);
}
