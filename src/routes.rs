//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /links`          - List links (public)
//! - `POST   /token`          - Admin login (public)
//! - `GET    /health`         - Health check: DB, notification queue (public)
//! - `POST   /links`          - Create (Bearer token required)
//! - `POST   /links/reorder`  - Reorder (Bearer token required)
//! - `PUT    /links/{id}`     - Replace (Bearer token required)
//! - `DELETE /links/{id}`     - Delete (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configured origin list, or any origin when empty
//! - **Authentication** - Bearer token on mutating routes only
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::http::HeaderValue;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Public and protected API routes with state applied.
///
/// Integration tests drive this router directly.
pub fn api_router(state: AppState) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .merge(api::routes::public_routes())
        .merge(protected)
        .with_state(state)
}

/// Builds the CORS policy.
///
/// An empty list allows any origin. Every method and header is allowed;
/// credentials are not, tokens travel in the `Authorization` header.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    ::tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `allowed_origins` - CORS origin list; empty allows any origin
pub fn app_router(state: AppState, allowed_origins: &[String]) -> NormalizePath<Router> {
    let router = api_router(state)
        .layer(cors_layer(allowed_origins))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
