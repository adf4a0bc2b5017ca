pub mod articles;
pub mod auth;
pub mod checklists;
pub mod evaluations;
pub mod events;
pub mod internal;
pub mod users;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Articles
        .route("/api/articles", get(articles::list).post(articles::create))
        .route("/api/articles/{id}", get(articles::get))
        .route("/api/articles/{id}/status", put(articles::update_status))
        .route("/api/articles/{id}/versions", post(articles::add_version))
        // Evaluations
        .route(
            "/api/articles/{id}/evaluations",
            get(evaluations::list_by_article).post(evaluations::assign),
        )
        .route("/api/evaluations/mine", get(evaluations::mine))
        .route("/api/evaluations/{id}", put(evaluations::complete))
        // Events
        .route("/api/events", get(events::list).post(events::create))
        .route("/api/events/{id}", get(events::get).put(events::update))
        .route("/api/events/{id}/banner", post(events::upload_banner))
        // Checklists
        .route(
            "/api/events/{id}/checklists",
            get(checklists::list_by_event).post(checklists::create),
        )
        .route(
            "/api/checklists/{id}",
            get(checklists::get).put(checklists::update),
        )
        // Users
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/{id}", get(users::get))
        .route("/api/users/{id}/roles", put(users::update_roles))
}

/// Internal data-management module, authenticated by a pre-shared token.
pub fn internal_routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/e/logs",
            get(internal::list_logs).post(internal::record_log),
        )
        .route("/api/e/logs/{id}", get(internal::get_log))
}
