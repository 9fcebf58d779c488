//! Order ledger repository: the checkout transaction, lifecycle updates,
//! and queries.
//!
//! `place_order` is the only code path that creates `Customer` or `Order`
//! records, and the only operation requiring atomicity: the customer upsert,
//! order insert, and line inserts run in a single transaction, so a failure
//! partway through leaves neither a partially-created order nor an orphaned
//! customer update.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use quickbite_core::cart::Cart;
use quickbite_core::order::{Customer, CustomerDraft, Order, OrderLine};
use quickbite_core::{
    CustomerId, Email, MenuItemId, OrderId, OrderLineId, OrderStatus, ValidationError,
};
use serde::Deserialize;

use super::catalog::{fetch_item, fetch_settings};
use super::{RepositoryError, StoreError, parse_stored_decimal};

/// One requested line of a checkout: the public `POST /orders` body shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub item_id: MenuItemId,
    pub quantity: u32,
    /// Must be one of the item's declared options when present; defaults to
    /// the item's first declared option.
    #[serde(default)]
    pub selected_option: Option<String>,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: String,
    total: String,
    payment_method: String,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    customer_id: i64,
    email: Email,
    name: String,
    phone: String,
    address: String,
}

#[derive(sqlx::FromRow)]
struct OrderLineRow {
    id: String,
    order_id: String,
    menu_item_id: String,
    item_name: String,
    quantity: i64,
    unit_price: String,
    selected_option: String,
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderLine>) -> Result<Order, RepositoryError> {
        Ok(Order {
            total: parse_stored_decimal(&self.total, "food_order.total")?,
            id: OrderId::new(self.id),
            customer: Customer {
                id: CustomerId::new(self.customer_id),
                email: self.email,
                name: self.name,
                phone: self.phone,
                address: self.address,
            },
            lines,
            payment_method: self.payment_method,
            status: self.status,
            created_at: self.created_at,
        })
    }
}

impl TryFrom<OrderLineRow> for OrderLine {
    type Error = RepositoryError;

    fn try_from(row: OrderLineRow) -> Result<Self, Self::Error> {
        Ok(Self {
            unit_price: parse_stored_decimal(&row.unit_price, "order_line.unit_price")?,
            quantity: u32::try_from(row.quantity).map_err(|_| {
                RepositoryError::DataCorruption(format!(
                    "invalid quantity in order_line: {}",
                    row.quantity
                ))
            })?,
            id: OrderLineId::new(row.id),
            menu_item_id: MenuItemId::new(row.menu_item_id),
            item_name: row.item_name,
            selected_option: row.selected_option,
        })
    }
}

const SELECT_ORDERS: &str = r"
    SELECT o.id, o.total, o.payment_method, o.status, o.created_at,
           c.id AS customer_id, c.email, c.name, c.phone, c.address
    FROM food_order o
    JOIN customer c ON c.id = o.customer_id
";

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert a checkout request into a durable order.
    ///
    /// Validates the customer draft, then - inside one transaction -
    /// resolves the requested items against the catalog (capturing current
    /// unit prices), upserts the customer by email (newest submission
    /// wins), and inserts the order with status `pending` plus its lines.
    /// Any failure rolls the whole unit back.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a malformed draft, empty order,
    /// zero quantity, unknown item, or undeclared option;
    /// `StoreError::Repository` when the backing store fails.
    pub async fn place_order(
        &self,
        draft: &CustomerDraft,
        payment_method: &str,
        requested: &[CheckoutLine],
    ) -> Result<Order, StoreError> {
        let email = draft.validate()?;

        if requested.is_empty() {
            return Err(ValidationError::EmptyOrder.into());
        }
        if requested.iter().any(|line| line.quantity < 1) {
            return Err(ValidationError::InvalidQuantity.into());
        }

        let mut tx = self.pool.begin().await?;

        let settings = fetch_settings(&mut *tx).await?;

        // Snapshot the requested lines into a cart, capturing each item's
        // current unit price and validating its option label.
        let mut cart = Cart::new();
        for line in requested {
            let item = fetch_item(&mut *tx, &line.item_id)
                .await?
                .ok_or_else(|| ValidationError::UnknownItem(line.item_id.to_string()))?;

            let option = match &line.selected_option {
                Some(option) if item.offers_option(option) => option.clone(),
                Some(option) => {
                    return Err(ValidationError::UnknownOption {
                        item: item.id.to_string(),
                        option: option.clone(),
                    }
                    .into());
                }
                None => item
                    .options
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Regular".to_owned()),
            };

            let line_id = cart.add_line(&item, option, None);
            cart.set_quantity(&line_id, line.quantity);
        }

        let totals = cart.totals(settings.service_fee_rate);
        let total = totals.total_with_delivery(settings.delivery_fee);

        let customer = upsert_customer(&mut tx, &email, draft).await?;

        let order_id = OrderId::generate();
        let created_at = Utc::now();

        sqlx::query(
            r"
            INSERT INTO food_order (id, customer_id, total, payment_method, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(order_id.as_str())
        .bind(customer.id.as_i64())
        .bind(total.to_string())
        .bind(payment_method)
        .bind(OrderStatus::Pending)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let mut lines = Vec::with_capacity(cart.lines().len());
        for cart_line in cart.lines() {
            let line = OrderLine {
                id: OrderLineId::generate(),
                menu_item_id: cart_line.item_id.clone(),
                item_name: cart_line.name.clone(),
                quantity: cart_line.quantity,
                unit_price: cart_line.unit_price,
                selected_option: cart_line.selected_option.clone(),
            };

            sqlx::query(
                r"
                INSERT INTO order_line (id, order_id, menu_item_id, item_name,
                                        quantity, unit_price, selected_option)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(line.id.as_str())
            .bind(order_id.as_str())
            .bind(line.menu_item_id.as_str())
            .bind(&line.item_name)
            .bind(i64::from(line.quantity))
            .bind(line.unit_price.to_string())
            .bind(&line.selected_option)
            .execute(&mut *tx)
            .await?;

            lines.push(line);
        }

        tx.commit().await?;

        Ok(Order {
            id: order_id,
            customer,
            lines,
            total,
            payment_method: payment_method.to_owned(),
            status: OrderStatus::Pending,
            created_at,
        })
    }

    /// List all orders, newest first, with embedded customers and lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` for unreadable stored values.
    pub async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let order_rows =
            sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDERS} ORDER BY o.created_at DESC, o.id"))
                .fetch_all(self.pool)
                .await?;

        let line_rows = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT id, order_id, menu_item_id, item_name,
                   quantity, unit_price, selected_option
            FROM order_line
            ORDER BY order_id, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut lines_by_order: HashMap<String, Vec<OrderLine>> = HashMap::new();
        for row in line_rows {
            let order_id = row.order_id.clone();
            lines_by_order
                .entry(order_id)
                .or_default()
                .push(OrderLine::try_from(row)?);
        }

        order_rows
            .into_iter()
            .map(|row| {
                let lines = lines_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(lines)
            })
            .collect()
    }

    /// Get a single order with its customer and lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id is unknown.
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDERS} WHERE o.id = ?"))
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let line_rows = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT id, order_id, menu_item_id, item_name,
                   quantity, unit_price, selected_option
            FROM order_line
            WHERE order_id = ?
            ORDER BY id
            ",
        )
        .bind(id.as_str())
        .fetch_all(self.pool)
        .await?;

        let lines = line_rows
            .into_iter()
            .map(OrderLine::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        row.into_order(lines)
    }

    /// Apply a lifecycle transition to an order.
    ///
    /// Re-applying the current status is accepted as a no-op; any other
    /// change away from a terminal status is rejected.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id and
    /// `RepositoryError::InvalidTransition` for an illegal change.
    pub async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current: Option<OrderStatus> =
            sqlx::query_scalar("SELECT status FROM food_order WHERE id = ?")
                .bind(id.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        let current = current.ok_or(RepositoryError::NotFound)?;
        current.check_transition(status)?;

        sqlx::query("UPDATE food_order SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_order(id).await
    }
}

/// Explicit two-branch customer upsert by email: overwrite the mutable
/// contact fields when the email is known, insert otherwise. Runs inside
/// the checkout transaction boundary.
async fn upsert_customer(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    email: &Email,
    draft: &CustomerDraft,
) -> Result<Customer, RepositoryError> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM customer WHERE email = ?")
        .bind(email.as_str())
        .fetch_optional(&mut **tx)
        .await?;

    let id = if let Some(id) = existing {
        sqlx::query(
            r"
            UPDATE customer
            SET name = ?, phone = ?, address = ?
            WHERE id = ?
            ",
        )
        .bind(draft.name.trim())
        .bind(draft.phone.trim())
        .bind(draft.address.trim())
        .bind(id)
        .execute(&mut **tx)
        .await?;
        id
    } else {
        let result = sqlx::query(
            r"
            INSERT INTO customer (email, name, phone, address)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(email.as_str())
        .bind(draft.name.trim())
        .bind(draft.phone.trim())
        .bind(draft.address.trim())
        .execute(&mut **tx)
        .await?;
        result.last_insert_rowid()
    };

    Ok(Customer {
        id: CustomerId::new(id),
        email: email.clone(),
        name: draft.name.trim().to_owned(),
        phone: draft.phone.trim().to_owned(),
        address: draft.address.trim().to_owned(),
    })
}
