//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bistro_core::{Amount, CartEntryId, Email, MenuItemId};

use crate::db::CartRepository;
use crate::error::AppError;
use crate::models::CartEntry;
use crate::state::AppState;

/// Query string for cart listing.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CartQuery {
    pub email: Email,
}

/// Add-to-cart request body.
///
/// Carries a copy of the item's name, image, and price so the entry stays
/// stable if the menu changes afterwards.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddToCartRequest {
    pub email: Email,
    pub menu_item_id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: Amount,
}

/// Remove result body.
#[derive(Debug, Serialize)]
pub struct RemoveCartEntryResponse {
    pub deleted: u64,
}

/// List a user's cart entries.
#[instrument(skip_all, fields(email = %query.email))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<CartEntry>>, AppError> {
    let entries = CartRepository::new(state.pool())
        .list_by_email(&query.email)
        .await?;
    Ok(Json(entries))
}

/// Add an entry to a cart.
#[instrument(skip_all, fields(email = %request.email, menu_item_id = %request.menu_item_id))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartEntry>), AppError> {
    let entry = CartRepository::new(state.pool())
        .insert(
            &request.email,
            request.menu_item_id,
            &request.name,
            request.image.as_deref(),
            request.price,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Remove a single cart entry.
#[instrument(skip_all, fields(entry_id = id))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RemoveCartEntryResponse>, AppError> {
    let deleted = CartRepository::new(state.pool())
        .delete(CartEntryId::new(id))
        .await?;

    if deleted == 0 {
        return Err(AppError::NotFound(format!("cart entry {id}")));
    }

    Ok(Json(RemoveCartEntryResponse { deleted }))
}
