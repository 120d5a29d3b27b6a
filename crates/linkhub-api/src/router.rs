//! Route definitions for the LinkHub HTTP API.
//!
//! Public key routes live at the root (`/{key}`); everything else is
//! mounted under `/api`. The router receives `AppState` and passes it to
//! all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use serde::de::DeserializeOwned;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use validator::Validate;

use linkhub_database::repositories::{
    AppointmentRepository, CardRepository, FormRepository, InvitationRepository,
};

use crate::handlers::{self, resource::ResourceRoutes};
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(panel_routes())
        .merge(dashboard_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(public_routes())
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(CompressionLayer::new())
        .layer(middleware::cors::build_cors_layer(&server.cors))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Link keys resolved without authentication.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/{key}", get(handlers::public::show))
        .route("/{key}/unlock", post(handlers::public::unlock))
        .route("/{key}/rsvp", post(handlers::public::rsvp))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Owner panel: the caller's own resources.
fn panel_routes() -> Router<AppState> {
    Router::new()
        .route("/panel/summary", get(handlers::panel::summary))
        .merge(panel_resource::<InvitationRepository>())
        .merge(panel_resource::<AppointmentRepository>())
        .merge(panel_resource::<FormRepository>())
        .merge(panel_resource::<CardRepository>())
        .route(
            "/panel/invitations/{id}/rsvps",
            get(handlers::panel::rsvps),
        )
        .route("/panel/links/{id}", get(handlers::links::get))
        .route("/panel/links/{id}/key", put(handlers::links::change_key))
}

fn panel_resource<R>() -> Router<AppState>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    use handlers::panel;

    Router::new()
        .route(
            &format!("/panel/{}", R::SEGMENT),
            get(panel::list::<R>).post(panel::create::<R>),
        )
        .route(
            &format!("/panel/{}/{{id}}", R::SEGMENT),
            get(panel::get::<R>)
                .put(panel::update::<R>)
                .delete(panel::delete::<R>),
        )
}

/// System-admin dashboard: every user's resources and accounts.
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/summary", get(handlers::dashboard::summary))
        .route(
            "/dashboard/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route(
            "/dashboard/users/{id}/status",
            put(handlers::users::set_status),
        )
        .merge(dashboard_resource::<InvitationRepository>())
        .merge(dashboard_resource::<AppointmentRepository>())
        .merge(dashboard_resource::<FormRepository>())
        .merge(dashboard_resource::<CardRepository>())
}

fn dashboard_resource<R>() -> Router<AppState>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    use handlers::dashboard;

    Router::new()
        .route(
            &format!("/dashboard/{}", R::SEGMENT),
            get(dashboard::list::<R>),
        )
        .route(
            &format!("/dashboard/{}/{{id}}", R::SEGMENT),
            get(dashboard::get::<R>)
                .put(dashboard::update::<R>)
                .delete(dashboard::delete::<R>),
        )
}
