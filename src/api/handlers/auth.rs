//! Handler for the token endpoint.

use axum::{Form, Json, extract::State};

use crate::api::dto::token::LoginForm;
use crate::application::services::AccessToken;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges admin credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /token` with an `application/x-www-form-urlencoded` body.
///
/// # Response
///
/// ```json
/// { "access_token": "eyJhbGciOi...", "token_type": "bearer" }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized if the username or password does not match.
pub async fn token_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AccessToken>, AppError> {
    let token = state.auth_service.login(&form.username, &form.password)?;

    Ok(Json(token))
}
