//! Integration tests for link issuance and public resolution.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use futures::future::join_all;

use linkhub_core::ErrorKind;
use linkhub_core::config::LinkConfig;
use linkhub_database::repositories::{LinkChanges, LinkRepository, LinkStore};
use linkhub_entity::KEY_ALPHABET;
use linkhub_entity::link::{LinkKind, NewLink};
use linkhub_entity::resource::LinkedResource;
use linkhub_entity::resource::card::CardDetail;
use linkhub_service::{
    LinkIssuer, LinkResolver, LinkTypeRegistry, ResourceDraft, SecureKeyGenerator,
};

use helpers::TestApp;

fn card_draft(n: usize) -> ResourceDraft<CardDetail> {
    serde_json::from_value(serde_json::json!({
        "first_name": format!("Guest{n}"),
        "last_name": "Parallel"
    }))
    .expect("card draft")
}

#[tokio::test]
async fn test_parallel_issuance_yields_distinct_keys() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user(false).await;
    let ctx = linkhub_service::RequestContext::for_user(&owner);

    let creations = (0..64).map(|n| {
        let cards = Arc::clone(&app.state.cards);
        let ctx = ctx.clone();
        async move { cards.create(&ctx, card_draft(n)).await }
    });
    let cards: Vec<_> = join_all(creations)
        .await
        .into_iter()
        .map(|r| r.expect("card created"))
        .collect();

    let keys: HashSet<&str> = cards.iter().map(|c| c.link_key()).collect();
    assert_eq!(keys.len(), cards.len());
    for key in &keys {
        assert_eq!(key.len(), 11);
        assert!(key.bytes().all(|b| KEY_ALPHABET.contains(&b)));
    }
}

#[tokio::test]
async fn test_public_dispatch_returns_typed_view() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;
    let card = app.create_card(&owner.token, serde_json::json!({})).await;
    let key = card["link_key"].as_str().expect("key");

    let response = app.request("GET", &format!("/{key}"), None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["type"], "CARD");
    assert_eq!(response.data()["key"], key);
    assert_eq!(response.data()["resource"]["first_name"], "Ada");
    assert_eq!(response.data()["password_protected"], false);

    let resource = response.data()["resource"].as_object().expect("resource");
    for hidden in [
        "password_hash",
        "creator_user_id",
        "created_by",
        "updated_by",
        "organization_id",
        "link_id",
        "is_enabled",
    ] {
        assert!(!resource.contains_key(hidden), "{hidden} is exposed publicly");
    }
}

#[tokio::test]
async fn test_malformed_keys_are_not_found() {
    let Some(app) = TestApp::new().await else { return };

    for path in ["/short", "/abcdefghij!", "/abcdefghijklmnopqrstu"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.error_code(), Some("NOT_FOUND"));
    }
}

#[tokio::test]
async fn test_keys_are_case_sensitive() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;
    let card = app.create_card(&owner.token, serde_json::json!({})).await;
    let key = card["link_key"].as_str().expect("key");

    let flipped: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect();
    if flipped == key {
        return;
    }

    let response = app.request("GET", &format!("/{flipped}"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_resource_key_is_not_found_and_never_reissued() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;
    let card = app.create_card(&owner.token, serde_json::json!({})).await;
    let key = card["link_key"].as_str().expect("key").to_string();
    let id = card["id"].as_i64().expect("id");

    let response = app
        .request("DELETE", &format!("/api/panel/cards/{id}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &format!("/{key}"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let mut conn = app.db.acquire().await.expect("conn");
    let store = LinkRepository::new();
    assert!(store.find_by_key(&mut *conn, &key).await.expect("lookup").is_none());
    assert!(store.exists_by_key(&mut *conn, &key).await.expect("exists"));
}

#[tokio::test]
async fn test_rolled_back_issuance_leaves_nothing() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user(false).await;
    let config = LinkConfig::default();
    let registry = LinkTypeRegistry::load(&app.db).await.expect("registry");
    let issuer = LinkIssuer::new(
        LinkRepository::new(),
        Arc::new(SecureKeyGenerator::new()),
        &config,
    );

    let key = {
        let mut tx = app.db.begin().await.expect("tx");
        let link = issuer
            .issue(
                &mut *tx,
                owner.id,
                registry.type_id(LinkKind::Form).expect("type"),
            )
            .await
            .expect("issued");
        assert_eq!(link.target_id, 0);
        link.key
    };

    let resolver = LinkResolver::new(LinkRepository::new(), config);
    let mut conn = app.db.acquire().await.expect("conn");
    let err = resolver.resolve(&mut *conn, &key).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_legacy_length_keys_still_resolve() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user(false).await;
    let registry = LinkTypeRegistry::load(&app.db).await.expect("registry");
    let legacy_key = format!("Legacy{}", uuid::Uuid::new_v4().simple())[..20].to_string();

    let mut conn = app.db.acquire().await.expect("conn");
    LinkRepository::new()
        .insert(
            &mut *conn,
            &NewLink {
                key: legacy_key.clone(),
                type_id: registry.type_id(LinkKind::Card).expect("type"),
                creator_user_id: owner.id,
            },
        )
        .await
        .expect("insert")
        .expect("key free");

    let resolver = LinkResolver::new(LinkRepository::new(), LinkConfig::default());
    let link = resolver.resolve(&mut *conn, &legacy_key).await.expect("resolved");
    assert_eq!(link.kind(), Some(LinkKind::Card));
    assert!(!link.has_target());

    // Not backfilled, so nothing is served publicly.
    let response = app.request("GET", &format!("/{legacy_key}"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stored_key_cannot_change() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.user().await;
    let card = app.create_card(&owner.token, serde_json::json!({})).await;
    let link_id = card["link_id"].as_i64().expect("link id");
    let key = card["link_key"].as_str().expect("key").to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/panel/links/{link_id}/key"),
            Some(serde_json::json!({ "key": "Zz9Zz9Zz9Zz" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("KEY_IMMUTABLE"));

    // The database trigger enforces the same rule below the service layer.
    let mut conn = app.db.acquire().await.expect("conn");
    let err = LinkRepository::new()
        .update_fields(
            &mut *conn,
            linkhub_core::types::LinkId(link_id),
            &LinkChanges {
                key: Some("Zz9Zz9Zz9Zz".into()),
                target_id: None,
            },
            owner.user.id,
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::KeyImmutable));

    let response = app
        .request("GET", &format!("/api/panel/links/{link_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["key"], key.as_str());
}
