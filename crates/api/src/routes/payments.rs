//! Payment route handlers.
//!
//! All three operations sit behind the authentication check; none require
//! the admin role.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bistro_core::{Amount, Email};

use crate::db::PaymentRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::PaymentRecord;
use crate::services::settlement::{SettleRequest, SettlementCoordinator, SettlementOutcome};
use crate::state::AppState;

/// Charge-intent request body.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateChargeIntentRequest {
    /// Amount in base currency units.
    pub price: Amount,
}

/// Charge-intent response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChargeIntentResponse {
    pub client_secret: String,
}

/// Create an unconfirmed charge intent for the given price.
#[instrument(skip_all, fields(email = %claims.email))]
pub async fn create_intent(
    RequireAuth(claims): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<CreateChargeIntentRequest>,
) -> Result<Json<CreateChargeIntentResponse>, AppError> {
    let client_secret = SettlementCoordinator::new(state.pool(), state.charge())
        .create_charge_intent(request.price)
        .await?;

    Ok(Json(CreateChargeIntentResponse { client_secret }))
}

/// Settle a payment: record it, then retract the purchased cart entries.
#[instrument(skip_all, fields(email = %request.email))]
pub async fn settle(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<SettleRequest>,
) -> Result<Json<SettlementOutcome>, AppError> {
    let outcome = SettlementCoordinator::new(state.pool(), state.charge())
        .settle(request)
        .await?;

    Ok(Json(outcome))
}

/// List a user's settlement records.
#[instrument(skip_all, fields(email = %email))]
pub async fn history(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<PaymentRecord>>, AppError> {
    let email = Email::parse(&email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let records = PaymentRepository::new(state.pool())
        .list_by_email(&email)
        .await?;

    Ok(Json(records))
}
