//! Admin category route handlers.
//!
//! Categories are fixed at seed time; the admin console only toggles their
//! enabled flags, which controls whether their items are orderable.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use quickbite_core::CategoryId;
use quickbite_core::catalog::Category;

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Body for `PUT /categories/{id}`.
#[derive(Debug, Deserialize)]
pub struct SetEnabledRequest {
    pub enabled: bool,
}

/// List all categories with their enabled flags.
#[instrument(skip(state))]
pub async fn list(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>> {
    let categories = CatalogRepository::new(state.pool())
        .list_categories()
        .await?;
    Ok(Json(categories))
}

/// Toggle a category's enabled flag. Items keep their stored data either
/// way; disabled categories simply drop out of the public menu.
#[instrument(skip(state), fields(category_id = %id, enabled = body.enabled))]
pub async fn set_enabled(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(body): Json<SetEnabledRequest>,
) -> Result<Json<Category>> {
    let category = CatalogRepository::new(state.pool())
        .set_category_enabled(&id, body.enabled)
        .await?;
    Ok(Json(category))
}
