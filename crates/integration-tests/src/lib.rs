//! Integration test harness for QuickBite.
//!
//! Builds the full axum router over an in-memory `SQLite` pool, so the
//! tests exercise the real HTTP surface (routing, extractors, error
//! mapping, repositories) without binding a socket.
//!
//! # Usage
//!
//! ```rust,ignore
//! let ctx = TestContext::new().await;
//! ctx.seed_catalog().await;
//! let (status, body) = ctx.get("/menu").await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::IpAddr;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use quickbite_core::catalog::{Category, MenuItem, MenuSettings};
use quickbite_core::{CategoryId, MenuItemId};
use quickbite_server::config::ServerConfig;
use quickbite_server::db::{self, CatalogRepository};
use quickbite_server::state::AppState;

/// Fixed admin token used by every test (32+ chars, passes validation).
pub const ADMIN_TOKEN: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6j";

/// One router plus the pool behind it.
pub struct TestContext {
    app: Router,
    pool: SqlitePool,
}

impl TestContext {
    /// Create a migrated in-memory database and the router over it.
    ///
    /// A single connection keeps the `:memory:` database alive and shared
    /// for the lifetime of the context.
    ///
    /// # Panics
    ///
    /// Panics if the pool or migrations fail; tests cannot proceed then.
    pub async fn new() -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory pool");

        db::MIGRATOR.run(&pool).await.expect("Failed to migrate");

        let config = ServerConfig {
            database_url: "sqlite::memory:".to_owned(),
            host: "127.0.0.1".parse::<IpAddr>().expect("valid host"),
            port: 0,
            admin_token: SecretString::from(ADMIN_TOKEN),
        };

        let state = AppState::new(config, pool.clone());
        Self {
            app: quickbite_server::app(state),
            pool,
        }
    }

    /// Direct pool access for repository-level assertions.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Seed the fixed categories, two sample items, and default settings.
    ///
    /// # Panics
    ///
    /// Panics on repository failure.
    pub async fn seed_catalog(&self) {
        let repo = CatalogRepository::new(&self.pool);

        for (id, name) in [
            ("donuts", "Donuts"),
            ("burgers", "Burgers"),
            ("iceCream", "Ice Cream"),
            ("pizza", "Pizza"),
            ("hotdog", "Hot Dog"),
        ] {
            repo.insert_category(&Category {
                id: CategoryId::new(id),
                name: name.to_owned(),
                enabled: true,
            })
            .await
            .expect("Failed to seed category");
        }

        repo.insert_item(&donut())
            .await
            .expect("Failed to seed donut");
        repo.insert_item(&cheeseburger())
            .await
            .expect("Failed to seed cheeseburger");

        repo.write_settings(&MenuSettings::default())
            .await
            .expect("Failed to seed settings");
    }

    /// GET a path without auth.
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send(Request::get(path).body(Body::empty()).expect("request"))
            .await
    }

    /// GET a path with the admin bearer token.
    pub async fn get_admin(&self, path: &str) -> (StatusCode, Value) {
        self.send(
            Request::get(path)
                .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    /// POST a JSON body without auth.
    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
    }

    /// POST a JSON body with the admin bearer token.
    pub async fn post_json_admin(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
    }

    /// PUT a JSON body with the admin bearer token.
    pub async fn put_json_admin(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::put(path)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
    }

    /// DELETE a path with the admin bearer token.
    pub async fn delete_admin(&self, path: &str) -> (StatusCode, Value) {
        self.send(
            Request::delete(path)
                .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    /// Drive one request through the router and decode the JSON body.
    ///
    /// Empty bodies (204s) decode as `Value::Null`.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body is not valid JSON.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response was not JSON")
        };

        (status, body)
    }
}

/// Seeded donut: $3.99, single option.
#[must_use]
pub fn donut() -> MenuItem {
    MenuItem {
        id: MenuItemId::new("item-donut"),
        name: "Chocolate Glazed Donut".to_owned(),
        price: Decimal::new(399, 2),
        description: "Rich chocolate glaze".to_owned(),
        image: String::new(),
        category_id: CategoryId::new("donuts"),
        options: vec!["Regular".to_owned()],
        meal_includes: vec!["Meal".to_owned()],
        popular: true,
    }
}

/// Seeded cheeseburger: $12.99, two options.
#[must_use]
pub fn cheeseburger() -> MenuItem {
    MenuItem {
        id: MenuItemId::new("item-burger"),
        name: "Classic Cheeseburger".to_owned(),
        price: Decimal::new(1299, 2),
        description: "Quarter-pound patty".to_owned(),
        image: String::new(),
        category_id: CategoryId::new("burgers"),
        options: vec!["Regular".to_owned(), "Large".to_owned()],
        meal_includes: vec!["Meal".to_owned(), "Fries".to_owned()],
        popular: true,
    }
}

/// A valid checkout customer block.
#[must_use]
pub fn customer_json(email: &str) -> Value {
    serde_json::json!({
        "name": "Jordan Lee",
        "email": email,
        "phone": "555-0134",
        "address": "12 Elm Street",
        "deliveryTime": "18:30",
    })
}
