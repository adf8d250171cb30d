//! Menu route handlers.

use axum::{Json, extract::State};

use crate::db::MenuRepository;
use crate::error::AppError;
use crate::models::MenuItem;
use crate::state::AppState;

/// List the full menu.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, AppError> {
    let items = MenuRepository::new(state.pool()).list().await?;
    Ok(Json(items))
}
