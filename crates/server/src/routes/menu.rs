//! Public menu route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use quickbite_core::catalog::{Category, MenuItem, MenuSettings};

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::state::AppState;

/// The menu page payload: the orderable subset of the catalog, every
/// category (so the client can render section headers and filters), and the
/// display settings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub items: Vec<MenuItem>,
    pub categories: Vec<Category>,
    pub settings: MenuSettings,
}

/// Serve the menu: items whose category is enabled, plus categories and
/// settings. An empty catalog yields empty collections, not an error.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<MenuResponse>> {
    let repo = CatalogRepository::new(state.pool());

    let items = repo.list_orderable_items().await?;
    let categories = repo.list_categories().await?;
    let settings = repo.get_settings().await?;

    Ok(Json(MenuResponse {
        items,
        categories,
        settings,
    }))
}
