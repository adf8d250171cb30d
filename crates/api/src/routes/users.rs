//! User route handlers.
//!
//! Registration is open; listing and deletion are admin-gated; the admin
//! status check and partial updates require authentication only.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bistro_core::{Email, Role, UserId};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::User;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: Email,
    #[serde(default)]
    pub name: Option<String>,
}

/// Partial-update request body.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Update result body.
#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub updated: u64,
}

/// Delete result body.
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub deleted: u64,
}

/// Register a user (create-if-absent keyed by email).
///
/// Returns the inserted record, or `204 No Content` when the email already
/// exists; a second registration is a no-op, not an error.
#[instrument(skip_all, fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    let created = UserRepository::new(state.pool())
        .create_if_absent(&request.email, request.name.as_deref())
        .await?;

    match created {
        Some(user) => {
            tracing::info!(user_id = %user.id, "user registered");
            Ok((StatusCode::CREATED, Json(user)).into_response())
        }
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Whether the stored record for this email carries the admin role.
#[instrument(skip_all, fields(email = %email))]
pub async fn admin_status(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<bool>, AppError> {
    let email = Email::parse(&email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let is_admin = UserRepository::new(state.pool()).is_admin(&email).await?;
    Ok(Json(is_admin))
}

/// List every registered user. Admin-gated.
#[instrument(skip_all)]
pub async fn list(
    RequireAdmin(_claims): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// Apply a partial update to a user.
#[instrument(skip_all, fields(user_id = id))]
pub async fn update(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, AppError> {
    let updated = UserRepository::new(state.pool())
        .update(UserId::new(id), request.name.as_deref(), request.role)
        .await?;

    if updated == 0 {
        return Err(AppError::NotFound(format!("user {id}")));
    }

    Ok(Json(UpdateUserResponse { updated }))
}

/// Delete a user. Admin-gated.
#[instrument(skip_all, fields(user_id = id))]
pub async fn delete(
    RequireAdmin(_claims): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteUserResponse>, AppError> {
    let deleted = UserRepository::new(state.pool())
        .delete(UserId::new(id))
        .await?;

    if deleted == 0 {
        return Err(AppError::NotFound(format!("user {id}")));
    }

    Ok(Json(DeleteUserResponse { deleted }))
}
