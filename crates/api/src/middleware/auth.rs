//! Authentication and authorization extractors (the access gate).
//!
//! Two checks in fixed order: [`RequireAuth`] establishes identity from a
//! `Bearer` token, and [`RequireAdmin`] additionally requires the stored
//! role to be admin. A rejection short-circuits the request before any
//! handler logic runs.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::services::Claims;
use crate::state::AppState;

/// Access-gate failures. All are terminal for the request.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer <token>` header was presented.
    #[error("missing credential")]
    MissingCredential,

    /// The presented token failed verification. Format, signature, and
    /// expiry failures are deliberately not distinguished.
    #[error("invalid or expired token")]
    InvalidOrExpired,

    /// The caller is authenticated but the stored role is not admin.
    #[error("insufficient role")]
    InsufficientRole,
}

impl AuthError {
    /// HTTP status this failure surfaces as.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::InvalidOrExpired => StatusCode::UNAUTHORIZED,
            Self::InsufficientRole => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingCredential)
}

/// Extractor that requires a verified session token.
///
/// The verified claims carried by this extractor are the only channel by
/// which identity reaches handlers.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(claims): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.email)
/// }
/// ```
pub struct RequireAuth(pub Claims);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = bearer_token(&parts.headers)?;

        let claims = state
            .tokens()
            .verify(token)
            .map_err(|_| AuthError::InvalidOrExpired)?;

        Ok(Self(claims))
    }
}

/// Extractor that requires a verified token AND a stored admin role.
///
/// Authentication always runs first; the role check then re-reads the
/// credential store for the claims email on every request. The role inside
/// the token is never consulted, since tokens can outlive role changes.
///
/// # Example
///
/// ```rust,ignore
/// async fn admin_handler(
///     RequireAdmin(claims): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, admin {}!", claims.email)
/// }
/// ```
pub struct RequireAdmin(pub Claims);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(claims) = RequireAuth::from_request_parts(parts, state).await?;

        let state = AppState::from_ref(state);
        let is_admin = UserRepository::new(state.pool())
            .is_admin(&claims.email)
            .await?;

        if !is_admin {
            return Err(AuthError::InsufficientRole.into());
        }

        Ok(Self(claims))
    }
}
