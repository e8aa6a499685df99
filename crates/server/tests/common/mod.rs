//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the full router over a
//! temporary SQLite database (or a failure-injecting mock store) and drives
//! it with `tower::ServiceExt::oneshot`, without binding a socket.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use edutech_core::{
    testing::MockTicketStore, ApiConfig, Config, DatabaseConfig, SqliteTicketStore, TicketStore,
};
use edutech_server::state::AppState;

/// Test fixture for in-process API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_ticket_creation() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/edutech", json!({
///         "titulo": "X",
///         "clienteid": 5
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Temporary directory holding the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` when empty or not JSON
    pub body: Value,
    /// Raw body text
    pub text: String,
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Attach `_links` to responses
    pub hypermedia: bool,
    /// Absolute origin for links
    pub base_url: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            hypermedia: true,
            base_url: None,
        }
    }
}

impl TestConfig {
    /// Plain JSON responses without links.
    pub fn without_hypermedia() -> Self {
        Self {
            hypermedia: false,
            base_url: None,
        }
    }
}

impl TestFixture {
    /// Create a new test fixture backed by a temporary SQLite database.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let config = Config {
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            api: ApiConfig {
                hypermedia: test_config.hypermedia,
                base_url: test_config.base_url,
            },
            ..Default::default()
        };

        let store: Arc<dyn TicketStore> = Arc::new(
            SqliteTicketStore::new(&db_path).expect("Failed to create ticket store"),
        );

        Self::from_parts(config, store, temp_dir)
    }

    /// Create a fixture over a mock store, returned for failure injection.
    pub fn with_mock_store() -> (Self, Arc<MockTicketStore>) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(MockTicketStore::new());
        let fixture = Self::from_parts(
            Config::default(),
            Arc::clone(&store) as Arc<dyn TicketStore>,
            temp_dir,
        );
        (fixture, store)
    }

    fn from_parts(config: Config, store: Arc<dyn TicketStore>, temp_dir: TempDir) -> Self {
        let state = Arc::new(AppState::new(config, store));
        let router = edutech_server::api::create_router(state);
        Self { router, temp_dir }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a PATCH request without a body.
    pub async fn patch(&self, path: &str) -> TestResponse {
        self.request("PATCH", path, None).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Create a ticket and return its id.
    pub async fn create_ticket(&self, title: &str, customer_id: i64) -> i64 {
        let response = self
            .post(
                "/api/edutech",
                serde_json::json!({ "titulo": title, "clienteid": customer_id }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.body["id"].as_i64().expect("created ticket has no id")
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
