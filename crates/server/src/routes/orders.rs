//! Order route handlers: public checkout plus the admin order console.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use quickbite_core::order::{CustomerDraft, InvoiceData, Order};
use quickbite_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::db::orders::CheckoutLine;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Body for `POST /orders`: the whole checkout in one request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer: CustomerDraft,
    #[serde(default)]
    pub payment_method: String,
    pub items: Vec<CheckoutLine>,
}

/// Body for `PUT /orders/{id}`: status is the only mutable order field.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

/// Place an order. The single public write path: validates the customer
/// draft, resolves items at their current prices, and persists customer,
/// order, and lines in one transaction.
#[instrument(skip(state, body), fields(lines = body.items.len()))]
pub async fn place(
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = OrderRepository::new(state.pool())
        .place_order(&body.customer, &body.payment_method, &body.items)
        .await
        .map_err(AppError::from_checkout)?;

    tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

/// List all orders, newest first, with embedded customers and lines.
#[instrument(skip(state))]
pub async fn list(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_orders().await?;
    Ok(Json(orders))
}

/// Apply a lifecycle transition. Re-applying the current status is a
/// no-op; any other change away from a terminal status is a 409.
#[instrument(skip(state), fields(order_id = %id, status = %body.status))]
pub async fn set_status(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<SetStatusRequest>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .set_status(&id, body.status)
        .await?;
    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");
    Ok(Json(order))
}

/// Invoice projection for an order. Absent fields render as `"N/A"`
/// rather than failing, so old orders always produce a document.
#[instrument(skip(state), fields(order_id = %id))]
pub async fn invoice(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<InvoiceData>> {
    let order = OrderRepository::new(state.pool()).get_order(&id).await?;
    Ok(Json(InvoiceData::from_order(&order)))
}
