//! Application error type and its HTTP mapping.
//!
//! Every handler returns `Result<_, AppError>`. The error serializes to a
//! uniform JSON envelope:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Link not found", "details": { "id": 7 } } }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::ordering::OrderMismatch;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced by services and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Authentication failure. Never carries the concrete reason.
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    /// The single unauthorized outcome shared by login and token checks.
    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            message: "Invalid credentials".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => {
                ("validation_error", message.clone(), details.clone())
            }
            AppError::NotFound { message, details } => {
                ("not_found", message.clone(), details.clone())
            }
            AppError::Unauthorized { message } => ("unauthorized", message.clone(), json!({})),
            AppError::Internal { message, details } => {
                ("internal_error", message.clone(), details.clone())
            }
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        // RFC 6750
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = ?e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<OrderMismatch> for AppError {
    fn from(mismatch: OrderMismatch) -> Self {
        AppError::bad_request(
            "Id list does not match the existing links",
            json!({
                "missing": mismatch.missing,
                "unknown": mismatch.unknown,
                "duplicates": mismatch.duplicates,
            }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::bad_request("Validation failed", json!({ "fields": fields }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::unauthorized().status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::internal("x", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_response_has_challenge_header() {
        let response = AppError::unauthorized().into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_unauthorized_info_has_no_details() {
        let info = AppError::unauthorized().to_error_info();

        assert_eq!(info.code, "unauthorized");
        assert_eq!(info.details, json!({}));
    }

    #[test]
    fn test_order_mismatch_details() {
        let err = AppError::from(OrderMismatch {
            missing: vec![1, 3],
            unknown: vec![9],
            duplicates: vec![2],
        });
        let info = err.to_error_info();

        assert_eq!(info.code, "validation_error");
        assert_eq!(info.details["missing"], json!([1, 3]));
        assert_eq!(info.details["unknown"], json!([9]));
        assert_eq!(info.details["duplicates"], json!([2]));
    }
}
