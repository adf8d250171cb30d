//! Review route handlers.

use axum::{Json, extract::State};

use crate::db::ReviewRepository;
use crate::error::AppError;
use crate::models::Review;
use crate::state::AppState;

/// List every review.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = ReviewRepository::new(state.pool()).list().await?;
    Ok(Json(reviews))
}
