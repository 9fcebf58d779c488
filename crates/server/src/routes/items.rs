//! Admin menu item route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use quickbite_core::MenuItemId;
use quickbite_core::catalog::{MenuItem, MenuItemDraft};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// List every menu item, including those in disabled categories.
#[instrument(skip(state))]
pub async fn list(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuItem>>> {
    let items = CatalogRepository::new(state.pool()).list_all_items().await?;
    Ok(Json(items))
}

/// Create a menu item from a draft. Malformed prices are coerced, not
/// rejected; an unknown category is.
#[instrument(skip(state, draft), fields(name = %draft.name))]
pub async fn create(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Json(draft): Json<MenuItemDraft>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    let item = CatalogRepository::new(state.pool()).add_item(draft).await?;
    tracing::info!(item_id = %item.id, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Replace a menu item, applying the same coercion rules as `create`.
#[instrument(skip(state, draft), fields(item_id = %id))]
pub async fn update(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
    Json(draft): Json<MenuItemDraft>,
) -> Result<Json<MenuItem>> {
    let item = CatalogRepository::new(state.pool())
        .update_item(&id, draft)
        .await?;
    Ok(Json(item))
}

/// Delete a menu item. Historical orders keep their captured name and
/// price snapshots.
#[instrument(skip(state), fields(item_id = %id))]
pub async fn delete(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> Result<StatusCode> {
    CatalogRepository::new(state.pool())
        .delete_item(&id)
        .await
        .map_err(AppError::from)?;
    tracing::info!(item_id = %id, "Menu item deleted");
    Ok(StatusCode::NO_CONTENT)
}
