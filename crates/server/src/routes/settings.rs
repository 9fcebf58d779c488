//! Menu settings route handlers.
//!
//! The settings singleton is publicly readable (the menu page needs the
//! fees and display flags) but only writable through the admin gate.

use axum::{Json, extract::State};
use tracing::instrument;

use quickbite_core::catalog::{MenuSettings, SettingsPatch};

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Read the settings singleton. A fresh database yields the defaults.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<MenuSettings>> {
    let settings = CatalogRepository::new(state.pool()).get_settings().await?;
    Ok(Json(settings))
}

/// Merge a partial patch into the settings singleton. Absent fields keep
/// their current values; malformed fees coerce to 0; `itemsPerRow` clamps
/// to the nearest of {2, 3, 4}.
#[instrument(skip(state, patch))]
pub async fn update(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<MenuSettings>> {
    let settings = CatalogRepository::new(state.pool())
        .update_settings(patch)
        .await?;
    tracing::info!("Menu settings updated");
    Ok(Json(settings))
}
