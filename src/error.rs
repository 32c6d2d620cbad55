/*
 * Responsibility
 * - Application-wide ApiError definition
 * - IntoResponse (HTTP status + flat JSON `{ "message": ... }` body)
 * - Trust failures surface here only at enforcement points (refresh, guarded routes)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::CredentialError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    // Never carries the rejection reason.
    #[error("invalid token")]
    InvalidToken,

    #[error("invalid credentials")]
    InvalidCredentials,

    // Never names the missing permission.
    #[error("forbidden")]
    Forbidden,

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("too many requests")]
    TooManyRequests,

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(_: ConfigError) -> Self {
        AppError::Internal
    }
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::Signing => AppError::Internal,
            // Malformed / bad signature / expired / wrong kind all look the same to the caller
            _ => AppError::InvalidToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_collapse_to_invalid_token() {
        for e in [
            CredentialError::Malformed,
            CredentialError::InvalidSignature,
            CredentialError::Expired,
        ] {
            assert!(matches!(AppError::from(e), AppError::InvalidToken));
        }
        assert!(matches!(
            AppError::from(CredentialError::Signing),
            AppError::Internal
        ));
    }

    #[test]
    fn public_messages_are_fixed() {
        assert_eq!(AppError::Forbidden.to_string(), "forbidden");
        assert_eq!(AppError::InvalidToken.to_string(), "invalid token");
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::TooManyRequests.to_string(), "too many requests");
        assert_eq!(
            AppError::TooManyRequests.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
