//! Integration tests for authentication and account administration.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_health() {
    let Some(app) = TestApp::new().await else { return };

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["database"], "connected");
}

#[tokio::test]
async fn test_login_success() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user(false).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": user.username, "password": TEST_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["access_token"].is_string());
    assert_eq!(response.data()["token_type"], "Bearer");
    assert_eq!(response.data()["user"]["username"], user.username.as_str());
    assert!(response.data()["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user(false).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": user.username, "password": "Wrong-passw0rd" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("AUTHENTICATION"));
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let Some(app) = TestApp::new().await else { return };

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": TestApp::unique("nobody"), "password": TEST_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_requires_fields() {
    let Some(app) = TestApp::new().await else { return };

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "", "password": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_authenticated() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.user().await;

    let response = app.request("GET", "/api/auth/me", None, Some(&user.token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["id"], user.user.id.0);
    assert_eq!(response.data()["is_system"], false);
}

#[tokio::test]
async fn test_me_without_token() {
    let Some(app) = TestApp::new().await else { return };

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_creates_and_lists_users() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.admin().await;
    let username = TestApp::unique("created");

    let response = app
        .request(
            "POST",
            "/api/dashboard/users",
            Some(json!({
                "username": username,
                "password": "Fresh-lantern-orchard-42",
                "email": format!("{username}@example.com")
            })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["is_system"], false);

    // Same name again.
    let response = app
        .request(
            "POST",
            "/api/dashboard/users",
            Some(json!({ "username": username, "password": "Fresh-lantern-orchard-42" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "GET",
            &format!("/api/dashboard/users?search={username}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["total_items"], 1);

    let token = app.login(&username, "Fresh-lantern-orchard-42").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_weak_password_is_rejected() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.admin().await;

    let response = app
        .request(
            "POST",
            "/api/dashboard/users",
            Some(json!({ "username": TestApp::unique("weak"), "password": "short" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Long enough, but trivially guessable.
    let username = TestApp::unique("guessable");
    let response = app
        .request(
            "POST",
            "/api/dashboard/users",
            Some(json!({ "username": username, "password": "password1" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": username, "password": "password1" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_regular_user_cannot_manage_users() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.user().await;

    let response = app
        .request("GET", "/api/dashboard/users", None, Some(&user.token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deactivated_user_is_locked_out() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.admin().await;
    let user = app.user().await;
    let path = format!("/api/dashboard/users/{}/status", user.user.id);

    let response = app
        .request("PUT", &path, Some(json!({ "status": "inactive" })), Some(&admin.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "inactive");

    // The token issued before deactivation stops working at once.
    let response = app
        .request("GET", "/api/auth/me", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": user.user.username, "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("PUT", &path, Some(json!({ "status": "active" })), Some(&admin.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!app.login(&user.user.username, TEST_PASSWORD).await.is_empty());
}

#[tokio::test]
async fn test_admin_cannot_deactivate_self() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.admin().await;

    let response = app
        .request(
            "PUT",
            &format!("/api/dashboard/users/{}/status", admin.user.id),
            Some(json!({ "status": "inactive" })),
            Some(&admin.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
