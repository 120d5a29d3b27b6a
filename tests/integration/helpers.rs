//! Shared test helpers for integration tests.
//!
//! Every test needs a PostgreSQL database given by
//! `LINKHUB_TEST_DATABASE_URL`. When it is unset, `TestApp::new` returns
//! `None` and the test returns early.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use linkhub_api::{AppState, build_router};
use linkhub_core::config::{AppConfig, AuthConfig, DatabaseConfig};
use linkhub_database::DatabasePool;
use linkhub_database::migration::run_migrations;
use linkhub_entity::user::User;
use linkhub_service::{CreateUserRequest, RequestContext};

/// Password given to every test account.
pub const TEST_PASSWORD: &str = "Corr3ct-horse-battery-staple";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db: DatabasePool,
    /// Wired services, for setup that bypasses HTTP
    pub state: AppState,
}

/// An account together with a bearer token for it.
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub fn context(&self) -> RequestContext {
        RequestContext::for_user(&self.user)
    }
}

impl TestApp {
    /// Create a new test application, or `None` without a test database.
    pub async fn new() -> Option<Self> {
        let url = std::env::var("LINKHUB_TEST_DATABASE_URL").ok()?;

        let config = AppConfig {
            server: Default::default(),
            database: DatabaseConfig::with_url(url),
            auth: AuthConfig {
                jwt_secret: "integration-test-secret-value".to_string(),
                ..AuthConfig::default()
            },
            links: Default::default(),
            logging: Default::default(),
        };

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(config, db.clone())
            .await
            .expect("Failed to build app state");
        let router = build_router(state.clone());

        Some(Self { router, db, state })
    }

    /// A name no other test run has used.
    pub fn unique(prefix: &str) -> String {
        format!("{prefix}_{}", &Uuid::new_v4().simple().to_string()[..12])
    }

    /// Create an account directly through the admin service.
    pub async fn create_user(&self, is_system: bool) -> User {
        let username = Self::unique("user");
        self.state
            .users
            .bootstrap_user(CreateUserRequest {
                email: Some(format!("{username}@example.com")),
                username,
                password: TEST_PASSWORD.to_string(),
                display_name: None,
                is_system,
            })
            .await
            .expect("Failed to create test user")
    }

    /// Create an account and log it in.
    pub async fn user(&self) -> TestUser {
        let user = self.create_user(false).await;
        let token = self.login(&user.username, TEST_PASSWORD).await;
        TestUser { user, token }
    }

    /// Create a system administrator and log it in.
    pub async fn admin(&self) -> TestUser {
        let user = self.create_user(true).await;
        let token = self.login(&user.username, TEST_PASSWORD).await;
        TestUser { user, token }
    }

    /// Login and return JWT access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.data()["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Create a card through the panel and return its `data` object.
    pub async fn create_card(&self, token: &str, extra: Value) -> Value {
        let mut body = serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "company": "Analytical Engines"
        });
        if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            body.extend(extra.clone());
        }

        let response = self
            .request("POST", "/api/panel/cards", Some(body), Some(token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Card creation failed: {:?}",
            response.body
        );
        response.data().clone()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

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

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error.code` member of a failure envelope.
    pub fn error_code(&self) -> Option<&str> {
        self.body["error"]["code"].as_str()
    }
}
