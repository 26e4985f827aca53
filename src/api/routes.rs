//! API route configuration.
//!
//! Reads are public. Every mutation requires a Bearer token checked by
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, health_handler, list_links_handler,
    reorder_links_handler, token_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Routes reachable without authentication.
///
/// # Endpoints
///
/// - `GET  /links`   - List links in display order
/// - `POST /token`   - Exchange admin credentials for a bearer token
/// - `GET  /health`  - Health check: database, notification queue
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler))
        .route("/token", post(token_handler))
        .route("/health", get(health_handler))
}

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /links`          - Create a link
/// - `POST   /links/reorder`  - Rewrite the display order
/// - `PUT    /links/{id}`     - Replace a link
/// - `DELETE /links/{id}`     - Delete a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route("/links/reorder", post(reorder_links_handler))
        .route(
            "/links/{id}",
            put(update_link_handler).delete(delete_link_handler),
        )
}
