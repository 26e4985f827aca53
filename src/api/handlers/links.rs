//! Handlers for link endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{LinkRequest, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all links in display order.
///
/// # Endpoint
///
/// `GET /links` (public)
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Creates a link.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "titulo": "Instagram",
///   "url": "instagram.com/sgtl",
///   "ordem": 3,            // optional, defaults to last position
///   "descricao": "Fotos",  // optional
///   "icone": "instagram"   // optional
/// }
/// ```
///
/// A URL without scheme is stored with `https://` prepended.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<LinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create_link(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Replaces a link.
///
/// # Endpoint
///
/// `PUT /links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
/// Returns 400 Bad Request if validation fails.
pub async fn update_link_handler(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state.link_service.update_link(id, payload.into()).await?;

    Ok(Json(link.into()))
}

/// Deletes a link permanently.
///
/// # Endpoint
///
/// `DELETE /links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn delete_link_handler(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Rewrites the display order.
///
/// # Endpoint
///
/// `POST /links/reorder`
///
/// # Request Body
///
/// Every existing id exactly once, in the new order:
///
/// ```json
/// [3, 1, 2]
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with `missing`, `unknown` and `duplicates`
/// details if the list is not a permutation of the stored ids.
pub async fn reorder_links_handler(
    State(state): State<AppState>,
    Json(ordered_ids): Json<Vec<i32>>,
) -> Result<StatusCode, AppError> {
    state.link_service.reorder_links(ordered_ids).await?;

    Ok(StatusCode::NO_CONTENT)
}
