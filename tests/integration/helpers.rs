//! Shared test helpers for integration tests.

use std::io::Cursor;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use catalog_api::{AppState, build_app};
use catalog_core::config::{AppConfig, ImageConfig};
use catalog_database::CatalogStore;
use catalog_database::memory::MemoryCatalogStore;
use catalog_storage::ImagePipeline;

const BOUNDARY: &str = "catalog-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for planting rows the API refuses to write
    pub store: MemoryCatalogStore,
    /// Upload and output directories, removed on drop
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = AppConfig {
            images: ImageConfig {
                temp_dir: dir.path().join("temp").to_string_lossy().into_owned(),
                output_dir: dir.path().join("images").to_string_lossy().into_owned(),
                blur_sigma: 2.0,
                ..ImageConfig::default()
            },
            ..AppConfig::default()
        };

        let store = MemoryCatalogStore::new();
        let images = ImagePipeline::new(&config.images)
            .await
            .expect("Failed to init image pipeline");
        let state = AppState::new(config, CatalogStore::from_memory(store.clone()), images);

        Self {
            router: build_app(state),
            store,
            _dir: dir,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload a single file part to the image endpoint
    pub async fn upload(&self, content_type: &str, data: &[u8]) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"picture\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/image/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Fetch raw bytes, for statically served files
    pub async fn get_raw(&self, path: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let req = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        (status, content_type, bytes.to_vec())
    }

    /// Create a category through the API and return its id
    pub async fn create_category(&self, name: &str, parent_id: Option<i64>) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/v1/categories",
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create category failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_i64()
            .expect("No id in create response")
    }

    /// Create a product through the API and return its id
    pub async fn create_product(&self, name: &str, category_id: i64) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/v1/products",
                Some(serde_json::json!({ "name": name, "categoryId": category_id })),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create product failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_i64()
            .expect("No id in create response")
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Encode a solid-color PNG of the given size
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    buf
}
