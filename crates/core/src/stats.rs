//! Dashboard aggregates derived from the order ledger and the catalog.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::order::Order;

/// Read-only aggregates for the admin dashboard.
///
/// A pure function of the current ledger and catalog contents; recomputed on
/// demand and never cached beyond the caller's own read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Count of all orders regardless of status.
    pub total_orders: usize,
    /// Sum of each order's stored total (not recomputed from lines).
    pub total_earnings: Decimal,
    /// Count of distinct non-empty customer emails across all orders.
    pub total_customers: usize,
    /// Count of menu items across all categories, enabled or not.
    pub total_products: usize,
}

impl Stats {
    /// Compute the aggregates from the full order list and the catalog item
    /// count.
    #[must_use]
    pub fn compute(orders: &[Order], total_products: usize) -> Self {
        let emails: HashSet<&str> = orders
            .iter()
            .map(|o| o.customer.email.as_str())
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            total_orders: orders.len(),
            total_earnings: orders.iter().map(|o| o.total).sum(),
            total_customers: emails.len(),
            total_products,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::order::Customer;
    use crate::types::{CustomerId, Email, OrderId, OrderStatus};

    use super::*;

    fn order(id: &str, email: &str, total: Decimal, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            customer: Customer {
                id: CustomerId::new(1),
                email: Email::parse(email).expect("email"),
                name: "Jordan Lee".to_owned(),
                phone: "555-0134".to_owned(),
                address: "12 Elm Street".to_owned(),
            },
            lines: Vec::new(),
            total,
            payment_method: "cash".to_owned(),
            status,
            created_at: "2026-08-25T12:00:00Z".parse().expect("timestamp"),
        }
    }

    #[test]
    fn test_empty_ledger() {
        let stats = Stats::compute(&[], 0);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_earnings, Decimal::ZERO);
        assert_eq!(stats.total_customers, 0);
    }

    #[test]
    fn test_distinct_emails_counted_once() {
        let orders = vec![
            order(
                "o1",
                "repeat@example.com",
                Decimal::new(2000, 2),
                OrderStatus::Pending,
            ),
            order(
                "o2",
                "repeat@example.com",
                Decimal::new(1500, 2),
                OrderStatus::Completed,
            ),
            order(
                "o3",
                "other@example.com",
                Decimal::new(500, 2),
                OrderStatus::Rejected,
            ),
        ];

        let stats = Stats::compute(&orders, 7);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_customers, 2);
        assert_eq!(stats.total_products, 7);
    }

    #[test]
    fn test_earnings_sum_stored_totals_all_statuses() {
        let orders = vec![
            order(
                "o1",
                "a@example.com",
                Decimal::new(1099, 2),
                OrderStatus::Rejected,
            ),
            order(
                "o2",
                "b@example.com",
                Decimal::new(901, 2),
                OrderStatus::Pending,
            ),
        ];
        let stats = Stats::compute(&orders, 0);
        assert_eq!(stats.total_earnings, Decimal::new(2000, 2));
    }
}
