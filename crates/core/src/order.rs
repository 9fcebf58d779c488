//! Orders, order lines, customers, and the invoice projection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ValidationError;
use crate::types::{CustomerId, Email, MenuItemId, OrderId, OrderLineId, OrderStatus};

/// A customer record, keyed by email.
///
/// Created on first order with a given email; subsequent orders with the
/// same email overwrite the contact fields (newest submission wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: Email,
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Customer details submitted at checkout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub delivery_time: String,
}

impl CustomerDraft {
    /// Validate the draft, reporting the first missing field, and parse
    /// the email.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for the first empty field
    /// in form order, or [`ValidationError::InvalidEmail`] if the email is
    /// present but malformed.
    pub fn validate(&self) -> Result<Email, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::MissingField("phone"));
        }
        if self.address.trim().is_empty() {
            return Err(ValidationError::MissingField("address"));
        }
        if self.delivery_time.trim().is_empty() {
            return Err(ValidationError::MissingField("deliveryTime"));
        }
        Ok(Email::parse(self.email.trim())?)
    }
}

/// One line of a placed order.
///
/// The unit price is captured at order time and never rewritten, so
/// historical orders are unaffected by later catalog price edits or item
/// deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: OrderLineId,
    /// The originating menu item. Intentionally not a live reference: the
    /// item may have been deleted since.
    pub menu_item_id: MenuItemId,
    /// Item name snapshot for invoices and the admin console.
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub selected_option: String,
}

impl OrderLine {
    /// Line extension: unit price times quantity.
    #[must_use]
    pub fn extension(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A durable order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub lines: Vec<OrderLine>,
    /// Sum of line extensions plus fees, computed at checkout time and
    /// stored; never recomputed later.
    pub total: Decimal,
    /// Recorded, not executed or verified.
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Neutral placeholder for absent invoice fields.
const NOT_AVAILABLE: &str = "N/A";

/// One line of an invoice, with its computed extension.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub extension: Decimal,
}

/// Read-only projection of an order for external document generation.
///
/// Values default to neutral placeholders (`"N/A"`, `0`) when a referenced
/// field is absent, rather than failing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub order_id: String,
    pub date: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub lines: Vec<InvoiceLine>,
    pub total: Decimal,
}

impl InvoiceData {
    /// Build the projection from an order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: or_not_available(order.id.as_str()),
            date: order.created_at.format("%Y-%m-%d").to_string(),
            customer_name: or_not_available(&order.customer.name),
            customer_email: or_not_available(order.customer.email.as_str()),
            customer_phone: or_not_available(&order.customer.phone),
            customer_address: or_not_available(&order.customer.address),
            lines: order
                .lines
                .iter()
                .map(|line| InvoiceLine {
                    item_name: or_not_available(&line.item_name),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    extension: line.extension(),
                })
                .collect(),
            total: order.total,
        }
    }
}

fn or_not_available(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_owned()
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CustomerDraft {
        CustomerDraft {
            name: "Jordan Lee".to_owned(),
            email: "jordan@example.com".to_owned(),
            phone: "555-0134".to_owned(),
            address: "12 Elm Street".to_owned(),
            delivery_time: "18:30".to_owned(),
        }
    }

    #[test]
    fn test_draft_valid() {
        let email = draft().validate().expect("valid draft");
        assert_eq!(email.as_str(), "jordan@example.com");
    }

    #[test]
    fn test_draft_reports_first_missing_field() {
        let mut d = draft();
        d.name = "  ".to_owned();
        d.phone = String::new();
        match d.validate() {
            Err(ValidationError::MissingField(field)) => assert_eq!(field, "name"),
            other => panic!("expected missing name, got {other:?}"),
        }
    }

    #[test]
    fn test_draft_rejects_malformed_email() {
        let mut d = draft();
        d.email = "not-an-email".to_owned();
        assert!(matches!(
            d.validate(),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    fn order() -> Order {
        Order {
            id: OrderId::new("order-1"),
            customer: Customer {
                id: CustomerId::new(1),
                email: Email::parse("jordan@example.com").expect("email"),
                name: "Jordan Lee".to_owned(),
                phone: String::new(),
                address: "12 Elm Street".to_owned(),
            },
            lines: vec![OrderLine {
                id: OrderLineId::new("line-1"),
                menu_item_id: MenuItemId::new("item-1"),
                item_name: "Classic Cheeseburger".to_owned(),
                quantity: 2,
                unit_price: Decimal::new(1299, 2),
                selected_option: "Regular".to_owned(),
            }],
            total: Decimal::new(3358, 2),
            payment_method: "creditCard".to_owned(),
            status: OrderStatus::Pending,
            created_at: "2026-08-25T12:00:00Z".parse().expect("timestamp"),
        }
    }

    #[test]
    fn test_invoice_projection_defaults_absent_fields() {
        let invoice = InvoiceData::from_order(&order());
        assert_eq!(invoice.customer_phone, "N/A");
        assert_eq!(invoice.customer_name, "Jordan Lee");
        assert_eq!(invoice.date, "2026-08-25");
    }

    #[test]
    fn test_invoice_line_extensions() {
        let invoice = InvoiceData::from_order(&order());
        assert_eq!(invoice.lines.len(), 1);
        assert_eq!(invoice.lines[0].extension, Decimal::new(2598, 2));
        assert_eq!(invoice.total, Decimal::new(3358, 2));
    }
}
