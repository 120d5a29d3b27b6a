//! Integration tests for the owner panel, public access rules and the
//! admin dashboard.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_each_kind_issues_a_short_key() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;

    let cases = [
        (
            "invitations",
            "INVITATION",
            json!({ "title": "Launch party", "event_at": "2031-05-01T18:00:00Z" }),
        ),
        (
            "appointments",
            "APPOINTMENT",
            json!({ "name": "Consultation", "duration_minutes": 30 }),
        ),
        ("forms", "FORM", json!({ "title": "Feedback" })),
        (
            "cards",
            "CARD",
            json!({ "first_name": "Grace", "last_name": "Hopper" }),
        ),
    ];

    for (segment, kind, body) in cases {
        let response = app
            .request("POST", &format!("/api/panel/{segment}"), Some(body), Some(&owner.token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{segment}: {:?}", response.body);

        let key = response.data()["link_key"].as_str().expect("key").to_string();
        assert_eq!(key.len(), 11);

        let public = app.request("GET", &format!("/{key}"), None, None).await;
        assert_eq!(public.status, StatusCode::OK, "{segment}");
        assert_eq!(public.data()["type"], kind);
    }

    let summary = app
        .request("GET", "/api/panel/summary", None, Some(&owner.token))
        .await;
    assert_eq!(summary.status, StatusCode::OK);
    for segment in ["invitations", "appointments", "forms", "cards"] {
        assert_eq!(summary.data()[segment], 1, "{segment}");
    }
}

#[tokio::test]
async fn test_invalid_detail_is_rejected() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;

    let response = app
        .request(
            "POST",
            "/api/panel/appointments",
            Some(json!({ "name": "Zero", "duration_minutes": 0 })),
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_INPUT"));
}

#[tokio::test]
async fn test_other_users_cannot_touch_a_resource() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;
    let stranger = app.user().await;
    let card = app.create_card(&owner.token, json!({})).await;
    let id = card["id"].as_i64().expect("id");
    let path = format!("/api/panel/cards/{id}");

    let response = app.request("GET", &path, None, Some(&stranger.token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "first_name": "Mallory", "last_name": "X" })),
            Some(&stranger.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("DELETE", &path, None, Some(&stranger.token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let listing = app
        .request("GET", "/api/panel/cards", None, Some(&stranger.token))
        .await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.data()["total_items"], 0);

    let response = app.request("GET", &path, None, Some(&owner.token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_search_and_pagination() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;

    for title in ["Quarterly review", "Team offsite", "Quarterly planning"] {
        let response = app
            .request(
                "POST",
                "/api/panel/forms",
                Some(json!({ "title": title })),
                Some(&owner.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = app
        .request(
            "GET",
            "/api/panel/forms?search=quarterly&page_size=1",
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["total_items"], 2);
    assert_eq!(response.data()["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(response.data()["has_next"], true);
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;
    app.create_card(&owner.token, json!({})).await;

    for page in [u64::MAX, u64::MAX / 50, i64::MAX as u64] {
        let response = app
            .request(
                "GET",
                &format!("/api/panel/cards?page={page}&page_size=100"),
                None,
                Some(&owner.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "page={page}");
        assert_eq!(response.data()["items"].as_array().map(Vec::len), Some(0));
        assert_eq!(response.data()["total_items"], 1);
        assert_eq!(response.data()["has_next"], false);
    }
}

#[tokio::test]
async fn test_password_protected_resource() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;
    let card = app
        .create_card(&owner.token, json!({ "password": "opensesame" }))
        .await;
    let key = card["link_key"].as_str().expect("key");

    let response = app.request("GET", &format!("/{key}"), None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            &format!("/{key}/unlock"),
            Some(json!({ "password": "wrong" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            &format!("/{key}/unlock"),
            Some(json!({ "password": "opensesame" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["type"], "CARD");
    assert_eq!(response.data()["password_protected"], true);
    assert!(response.data()["resource"].get("creator_user_id").is_none());

    // Clearing the password makes the card public again.
    let id = card["id"].as_i64().expect("id");
    let response = app
        .request(
            "PUT",
            &format!("/api/panel/cards/{id}"),
            Some(json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "clear_password": true
            })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &format!("/{key}"), None, None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_disabled_and_expired_resources_are_hidden() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;

    let card = app.create_card(&owner.token, json!({ "is_enabled": false })).await;
    let key = card["link_key"].as_str().expect("key");
    let response = app.request("GET", &format!("/{key}"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let closed = (Utc::now() - Duration::hours(1)).to_rfc3339();
    let response = app
        .request(
            "POST",
            "/api/panel/forms",
            Some(json!({ "title": "Closed survey", "closes_at": closed })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let key = response.data()["link_key"].as_str().expect("key").to_string();

    let response = app.request("GET", &format!("/{key}"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rsvp_flow() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;

    let response = app
        .request(
            "POST",
            "/api/panel/invitations",
            Some(json!({
                "title": "Garden party",
                "event_at": (Utc::now() + Duration::days(30)).to_rfc3339(),
                "max_plus_ones": 2
            })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.data()["id"].as_i64().expect("id");
    let key = response.data()["link_key"].as_str().expect("key").to_string();

    let answer = |email: &str, plus_ones: i32| {
        json!({
            "guest_name": "Guest",
            "guest_email": email,
            "status": "attending",
            "plus_ones": plus_ones
        })
    };

    let response = app
        .request("POST", &format!("/{key}/rsvp"), Some(answer("a@example.com", 1)), None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let response = app
        .request("POST", &format!("/{key}/rsvp"), Some(answer("b@example.com", 5)), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // A second answer from the same guest replaces the first.
    let response = app
        .request("POST", &format!("/{key}/rsvp"), Some(answer("A@example.com", 0)), None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app
        .request(
            "GET",
            &format!("/api/panel/invitations/{id}/rsvps"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["rsvps"]["total_items"], 1);
    assert_eq!(response.data()["tally"][0]["status"], "attending");
    assert_eq!(response.data()["tally"][0]["count"], 1);
}

#[tokio::test]
async fn test_rsvp_requires_an_invitation() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;
    let card = app.create_card(&owner.token, json!({})).await;
    let key = card["link_key"].as_str().expect("key");

    let response = app
        .request(
            "POST",
            &format!("/{key}/rsvp"),
            Some(json!({
                "guest_name": "Guest",
                "guest_email": "guest@example.com",
                "status": "maybe"
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_requires_system_admin() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;
    let admin = app.admin().await;
    let card = app.create_card(&owner.token, json!({})).await;
    let id = card["id"].as_i64().expect("id");

    let response = app
        .request("GET", "/api/dashboard/cards", None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("FORBIDDEN"));

    let response = app
        .request("GET", "/api/dashboard/summary", None, Some(&admin.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["users"].as_u64().unwrap_or(0) >= 2);
    assert!(response.data()["cards"].as_u64().unwrap_or(0) >= 1);

    let response = app
        .request(
            "PUT",
            &format!("/api/dashboard/cards/{id}"),
            Some(json!({ "first_name": "Ada", "last_name": "Byron" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["last_name"], "Byron");
    assert_eq!(response.data()["link_key"], card["link_key"]);

    let response = app
        .request("DELETE", &format!("/api/dashboard/cards/{id}"), None, Some(&admin.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/panel/cards/{id}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
