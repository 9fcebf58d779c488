//! Admin dashboard stats handler.

use axum::{Json, extract::State};
use tracing::instrument;

use quickbite_core::stats::Stats;

use crate::db::{CatalogRepository, OrderRepository};
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Dashboard aggregates, recomputed from the ledger and catalog on every
/// request. Earnings sum the stored order totals; customers are counted by
/// distinct email.
#[instrument(skip(state))]
pub async fn dashboard(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Stats>> {
    let orders = OrderRepository::new(state.pool()).list_orders().await?;
    let total_products = CatalogRepository::new(state.pool()).count_items().await?;

    Ok(Json(Stats::compute(&orders, total_products)))
}
