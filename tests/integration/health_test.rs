//! Health endpoint tests.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/v1/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["backend"], "memory");
    assert_eq!(response.body["data"]["database"], true);
}
