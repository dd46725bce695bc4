//! Unified error handling for the auth API.
//!
//! Handlers return [`ApiResult`] and use `?` on domain errors; the
//! `IntoResponse` impl below picks the HTTP status and JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared_types::ErrorResponse;
use thiserror::Error;

use crate::auth::{PasswordError, TokenError};
use crate::repository::RepositoryError;

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Hashing, signing, or other server-side failure
    #[error("{0}")]
    Internal(#[from] anyhow::Error),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Authentication required but not provided or invalid
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(anyhow::Error::new(err).context("Error hashing password"))
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) | TokenError::InvalidLifetime(_) => {
                ApiError::Internal(anyhow::Error::new(err).context("Token error"))
            }
            TokenError::Invalid(_) | TokenError::Expired => {
                tracing::debug!("Rejected token: {}", err);
                ApiError::unauthorized("Invalid or expired token")
            }
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateEmail(_) => {
                ApiError::Conflict("Email already registered".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            ApiError::Internal(e) => {
                // Logged only; the cause is not sent to the client.
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            ApiError::JsonParse(e) => {
                tracing::warn!("JSON parse error: {:?}", e);
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid request".to_string(),
                    Some(e.to_string()),
                )
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), None),
        };

        let body = Json(ErrorResponse {
            details,
            ..ErrorResponse::new(error_message)
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::bad_request("x"), StatusCode::BAD_REQUEST),
            (ApiError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                ApiError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_token_errors_map_to_unauthorized_except_signing() {
        let expired: ApiError = TokenError::Expired.into();
        assert!(matches!(expired, ApiError::Unauthorized(_)));

        let signing: ApiError =
            TokenError::Signing(jsonwebtoken::errors::ErrorKind::InvalidKeyFormat.into()).into();
        assert!(matches!(signing, ApiError::Internal(_)));

        let lifetime: ApiError = TokenError::InvalidLifetime(i64::MAX).into();
        assert!(matches!(lifetime, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_internal_error_body_has_no_details() {
        let response = ApiError::Internal(anyhow::anyhow!("bcrypt exploded")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "Internal server error");
        assert!(body.details.is_none());
        assert!(!String::from_utf8_lossy(&bytes).contains("bcrypt"));
    }

    #[test]
    fn test_json_parse_error_is_bad_request() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{nope")
            .unwrap_err()
            .into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_email_maps_to_conflict() {
        let err: ApiError = RepositoryError::DuplicateEmail("a@x.com".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
