//! HTTP route handlers.
//!
//! Admin handlers take the [`crate::middleware::RequireAdminAuth`]
//! extractor; everything else is public.
//!
//! # Route Structure
//!
//! ```text
//! # Public
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database reachable)
//! GET  /menu                   - Orderable items + categories + settings
//! GET  /menu-settings          - Settings singleton (the menu page reads it)
//! POST /orders                 - Checkout (201 with the persisted order)
//!
//! # Admin (bearer token)
//! GET    /menu-items           - All items, enabled categories or not
//! POST   /menu-items           - Create item
//! PUT    /menu-items/{id}      - Replace item
//! DELETE /menu-items/{id}      - Delete item (historical orders keep snapshots)
//! GET    /categories           - All categories with enabled flags
//! PUT    /categories/{id}      - Toggle enabled flag
//! PUT    /menu-settings        - Partial settings merge
//! GET    /orders               - All orders, newest first
//! PUT    /orders/{id}          - Status transition
//! GET    /orders/{id}/invoice  - Invoice projection
//! GET    /stats                - Dashboard aggregates
//! ```

pub mod categories;
pub mod health;
pub mod items;
pub mod menu;
pub mod orders;
pub mod settings;
pub mod stats;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health checks
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        // Public menu payload
        .route("/menu", get(menu::show))
        // Catalog administration
        .route("/menu-items", get(items::list).post(items::create))
        .route(
            "/menu-items/{id}",
            put(items::update).delete(items::delete),
        )
        .route("/categories", get(categories::list))
        .route("/categories/{id}", put(categories::set_enabled))
        .route("/menu-settings", get(settings::show).put(settings::update))
        // Checkout and the order console
        .route("/orders", get(orders::list).post(orders::place))
        .route("/orders/{id}", put(orders::set_status))
        .route("/orders/{id}/invoice", get(orders::invoice))
        .route("/stats", get(stats::dashboard))
}
