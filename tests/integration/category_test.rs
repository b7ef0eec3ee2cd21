//! Category endpoint tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_tree_paths_and_rollup() {
    let app = TestApp::new().await;
    let root = app.create_category("Electronics", None).await;
    let mid = app.create_category("Computers", Some(root)).await;
    let leaf = app.create_category("Laptops", Some(mid)).await;

    app.create_product("Charger", root).await;
    app.create_product("Ultrabook", leaf).await;
    app.create_product("Workstation", leaf).await;

    let response = app.request("GET", "/api/v1/categories/tree", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let tree = response.body["data"].as_array().expect("tree is an array");
    let summary: Vec<(String, u64, u64)> = tree
        .iter()
        .map(|node| {
            (
                node["path"].as_str().unwrap().to_string(),
                node["count"].as_u64().unwrap(),
                node["recursiveCount"].as_u64().unwrap(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            (format!("{root}"), 1, 3),
            (format!("{root}.{mid}"), 0, 2),
            (format!("{root}.{mid}.{leaf}"), 2, 2),
        ]
    );
}

#[tokio::test]
async fn test_tree_of_empty_catalog() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/v1/categories/tree", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!([]));
}

#[tokio::test]
async fn test_tree_rejects_dangling_parent() {
    let app = TestApp::new().await;
    app.store.seed_category(1, "Root", None).await;
    app.store.seed_category(2, "Lost", Some(99)).await;

    let response = app.request("GET", "/api/v1/categories/tree", None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "MALFORMED_HIERARCHY");
}

#[tokio::test]
async fn test_tree_rejects_cycle() {
    let app = TestApp::new().await;
    app.store.seed_category(1, "Root", None).await;
    app.store.seed_category(2, "Ping", Some(3)).await;
    app.store.seed_category(3, "Pong", Some(2)).await;

    let response = app.request("GET", "/api/v1/categories/tree", None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "MALFORMED_HIERARCHY");
}

#[tokio::test]
async fn test_create_and_get_category() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/v1/categories",
            Some(json!({ "name": "Phones", "picture": "/public/images/1-abc.webp" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    let id = response.body["data"]["id"].as_i64().unwrap();

    let response = app
        .request("GET", &format!("/api/v1/categories/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Phones");
    assert_eq!(response.body["data"]["parentId"], json!(null));
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/api/v1/categories", Some(json!({ "name": "ab" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
    assert!(response.body["details"]["name"].is_array());

    let response = app
        .request("POST", "/api/v1/categories", Some(json!({ "picture": "x" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_missing_parent_and_duplicate() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/v1/categories",
            Some(json!({ "name": "Orphan", "parentId": 42 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Parent category not found");

    app.create_category("Audio", None).await;
    let response = app
        .request("POST", "/api/v1/categories", Some(json!({ "name": "Audio" })))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_guards_hierarchy() {
    let app = TestApp::new().await;
    let root = app.create_category("Home", None).await;
    let child = app.create_category("Kitchen", Some(root)).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/v1/categories/{root}"),
            Some(json!({ "name": "Home", "parentId": root })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "PUT",
            &format!("/api/v1/categories/{root}"),
            Some(json!({ "name": "Home", "parentId": child })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "PUT",
            &format!("/api/v1/categories/{child}"),
            Some(json!({ "name": "Cookware", "parentId": null })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Cookware");
    assert_eq!(response.body["data"]["parentId"], json!(null));
}

#[tokio::test]
async fn test_delete_guards_links() {
    let app = TestApp::new().await;
    let root = app.create_category("Garden", None).await;
    let child = app.create_category("Tools", Some(root)).await;
    let product = app.create_product("Shovel", child).await;

    let response = app
        .request("DELETE", &format!("/api/v1/categories/{child}"), None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "Remove linked products first");

    let response = app
        .request("DELETE", &format!("/api/v1/categories/{root}"), None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "Remove linked children first");

    app.request("DELETE", &format!("/api/v1/products/{product}"), None)
        .await;
    let response = app
        .request("DELETE", &format!("/api/v1/categories/{child}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Category successfully deleted");

    let response = app
        .request("GET", &format!("/api/v1/categories/{child}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_with_counts_and_bad_id() {
    let app = TestApp::new().await;
    let toys = app.create_category("Toys", None).await;
    app.create_category("Books", None).await;
    app.create_product("Kite", toys).await;

    let response = app.request("GET", "/api/v1/categories", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let list = response.body["data"].as_array().unwrap();
    assert_eq!(list[0]["name"], "Books");
    assert_eq!(list[0]["productsCount"], 0);
    assert_eq!(list[1]["name"], "Toys");
    assert_eq!(list[1]["productsCount"], 1);

    let response = app.request("GET", "/api/v1/categories/abc", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
