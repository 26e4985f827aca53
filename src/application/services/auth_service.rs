//! Authentication service for the single admin identity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::config::AuthSettings;
use crate::error::AppError;
use crate::utils::token_codec::{self, Claims};

/// Bearer token returned by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Issues and verifies stateless bearer tokens.
///
/// There is exactly one identity, configured at startup. Tokens are HS256
/// JWTs with the admin username as subject and a fixed lifetime. Every
/// verification failure maps to the same [`AppError::Unauthorized`].
pub struct AuthService {
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(settings: AuthSettings) -> Self {
        Self { settings }
    }

    fn credentials_match(&self, username: &str, password: &str) -> bool {
        username == self.settings.admin_username && password == self.settings.admin_password
    }

    /// Exchanges admin credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] unless both values match exactly.
    pub fn login(&self, username: &str, password: &str) -> Result<AccessToken, AppError> {
        self.login_at(username, password, Utc::now())
    }

    pub(crate) fn login_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, AppError> {
        if !self.credentials_match(username, password) {
            tracing::debug!("Rejected login attempt");
            return Err(AppError::unauthorized());
        }

        let expires_at = now
            .checked_add_signed(self.settings.token_lifetime)
            .ok_or_else(|| AppError::internal("Token expiry is out of range", json!({})))?;

        let claims = Claims {
            sub: username.to_string(),
            exp: expires_at.timestamp(),
        };

        Ok(AccessToken {
            access_token: token_codec::encode(&claims, self.settings.secret_key.as_bytes()),
            token_type: "bearer",
        })
    }

    /// Verifies a bearer token and returns its subject.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, badly
    /// signed, expired, or issued for another subject.
    pub fn authenticate(&self, token: &str) -> Result<String, AppError> {
        self.authenticate_at(token, Utc::now())
    }

    pub(crate) fn authenticate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = token_codec::decode(token, self.settings.secret_key.as_bytes(), now)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Rejected bearer token");
                AppError::unauthorized()
            })?;

        if claims.sub != self.settings.admin_username {
            tracing::debug!(subject = %claims.sub, "Rejected bearer token for unknown subject");
            return Err(AppError::unauthorized());
        }

        Ok(claims.sub)
    }
}
