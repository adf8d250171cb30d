//! Token issuance route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bistro_core::{Email, Role};

use crate::error::AppError;
use crate::state::AppState;

/// Identity payload presented when requesting a token.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityPayload {
    pub email: Email,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Issued-token response body.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a signed session token for the given identity.
///
/// Claim semantics are not validated here. The embedded role is
/// informational; admin-gated operations re-read the store.
#[instrument(skip_all, fields(email = %identity.email))]
pub async fn issue_token(
    State(state): State<AppState>,
    Json(identity): Json<IdentityPayload>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.tokens().issue(identity.email, identity.role)?;
    Ok(Json(TokenResponse { token }))
}
