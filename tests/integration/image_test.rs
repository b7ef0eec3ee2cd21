//! Image upload tests.

use axum::http::StatusCode;

use crate::helpers::{TestApp, png};

#[tokio::test]
async fn test_upload_publishes_square_jpeg() {
    let app = TestApp::new().await;
    let response = app.upload("image/png", &png(40, 20)).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let path = response.body["data"].as_str().unwrap().to_string();
    assert!(path.starts_with("/public/images/"));
    assert!(path.ends_with(".jpg"));

    let (status, content_type, bytes) = app.get_raw(&path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/jpeg"));

    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (40, 40));
}

#[tokio::test]
async fn test_upload_rejects_other_types() {
    let app = TestApp::new().await;
    let response = app.upload("image/gif", b"GIF89a").await;
    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        response.body["message"],
        "Only png, jpeg, jpg images are allowed"
    );
}

#[tokio::test]
async fn test_upload_rejects_undecodable_image() {
    let app = TestApp::new().await;
    let response = app.upload("image/jpeg", b"definitely not a jpeg").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "PROCESSING");
}

#[tokio::test]
async fn test_upload_requires_file() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/api/v1/image/upload", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
