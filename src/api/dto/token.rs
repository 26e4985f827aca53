//! DTOs for the token endpoint.

use serde::Deserialize;

/// Form body for `POST /token` (`application/x-www-form-urlencoded`).
///
/// Extra OAuth2 password-grant fields such as `grant_type` or `scope` are
/// accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
