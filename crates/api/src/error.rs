//! Unified error handling for the API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::middleware::AuthError;
use crate::services::{SettlementError, TokenError};

/// Application-level error type for request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Access-gate rejection.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Settlement failure (validation, charge processor, or store).
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// Token issuance or verification failure.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_)
            | Self::Settlement(SettlementError::Repository(_))
            | Self::Token(TokenError::Sign(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Settlement(SettlementError::Charge(_)) => StatusCode::BAD_GATEWAY,
            Self::Settlement(
                SettlementError::BelowMinimum | SettlementError::InvalidAmount,
            )
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Auth(auth) => auth.status(),
            Self::Token(TokenError::InvalidOrExpired) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Whether this is a server-side failure worth capturing.
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Settlement(
                    SettlementError::Repository(_) | SettlementError::Charge(_)
                )
                | Self::Token(TokenError::Sign(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Settlement(SettlementError::Repository(_)) => {
                "Internal server error".to_owned()
            }
            Self::Settlement(SettlementError::Charge(_)) => "External service error".to_owned(),
            Self::Token(TokenError::Sign(_)) => "Internal server error".to_owned(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("user 3".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("invalid email".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::MissingCredential)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InsufficientRole)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Settlement(SettlementError::BelowMinimum)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Token(TokenError::InvalidOrExpired)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let err = AppError::Database(crate::db::RepositoryError::DataCorruption(
            "bad row 17".to_owned(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
