//! Session-scoped shopping cart and its totals arithmetic.
//!
//! A [`Cart`] lives for a single shopping session and is never persisted;
//! checkout consumes a snapshot of it and the cart is cleared only after the
//! order is durably created. Line values are copied from the menu item at
//! add time, not live-linked, so later catalog edits do not move a cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::MenuItem;
use crate::types::{CartLineId, MenuItemId};

/// One selected item in a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Line id, distinct from the menu item id so the same item can appear
    /// as two independent lines with different options.
    pub id: CartLineId,
    pub item_id: MenuItemId,
    /// Item name captured at add time.
    pub name: String,
    /// Unit price captured at add time.
    pub unit_price: Decimal,
    /// Image reference captured at add time.
    pub image: String,
    /// One of the item's declared option labels.
    pub selected_option: String,
    /// Free-text note from the shopper.
    pub special_instructions: Option<String>,
    /// Always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line extension: unit price times quantity.
    #[must_use]
    pub fn extension(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Read-only totals snapshot for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub service_fee: Decimal,
    /// Subtotal plus service fee. Checkout additionally adds the flat
    /// delivery fee; see [`CartTotals::total_with_delivery`].
    pub total: Decimal,
}

impl CartTotals {
    /// The final checkout total once the flat delivery fee is added.
    #[must_use]
    pub fn total_with_delivery(&self, delivery_fee: Decimal) -> Decimal {
        self.total + delivery_fee
    }
}

/// An in-progress, unpersisted selection of catalog items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line for `item` with quantity 1, snapshotting its current
    /// name, price, and image. Returns the fresh line id.
    pub fn add_line(
        &mut self,
        item: &MenuItem,
        selected_option: impl Into<String>,
        special_instructions: Option<String>,
    ) -> CartLineId {
        let id = CartLineId::generate();
        self.lines.push(CartLine {
            id: id.clone(),
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            image: item.image.clone(),
            selected_option: selected_option.into(),
            special_instructions,
            quantity: 1,
        });
        id
    }

    /// Replace the quantity of a line. Quantities below 1 are rejected
    /// silently; an unknown line id is a no-op.
    pub fn set_quantity(&mut self, line_id: &CartLineId, quantity: u32) {
        if quantity < 1 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| &l.id == line_id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line if present; no-op otherwise.
    pub fn remove_line(&mut self, line_id: &CartLineId) {
        self.lines.retain(|l| &l.id != line_id);
    }

    /// Drop all lines. Called after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Compute the totals snapshot for a service-fee rate given as a
    /// percentage of the subtotal (10 means 10%). Never mutates the cart.
    #[must_use]
    pub fn totals(&self, service_fee_rate: Decimal) -> CartTotals {
        let subtotal: Decimal = self.lines.iter().map(CartLine::extension).sum();
        let service_fee = subtotal * service_fee_rate / Decimal::ONE_HUNDRED;
        CartTotals {
            subtotal,
            service_fee,
            total: subtotal + service_fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::CategoryId;

    use super::*;

    fn item(id: &str, name: &str, price: Decimal) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(id),
            name: name.to_owned(),
            price,
            description: String::new(),
            image: String::new(),
            category_id: CategoryId::new("donuts"),
            options: vec!["Regular".to_owned()],
            meal_includes: vec!["Meal".to_owned()],
            popular: false,
        }
    }

    #[test]
    fn test_totals_subtotal_plus_service_fee() {
        // subtotal $20, rate 10% => fee $2, total $22; +$5 delivery => $27.00
        let mut cart = Cart::new();
        cart.add_line(&item("a", "Donut Box", Decimal::new(20, 0)), "Regular", None);

        let totals = cart.totals(Decimal::new(10, 0));
        assert_eq!(totals.subtotal, Decimal::new(20, 0));
        assert_eq!(totals.service_fee, Decimal::new(2, 0));
        assert_eq!(totals.total, Decimal::new(22, 0));
        assert_eq!(
            totals.total_with_delivery(Decimal::new(5, 0)),
            Decimal::new(27, 0)
        );
    }

    #[test]
    fn test_totals_menu_scenario() {
        // 1x donut $3.99 + 2x cheeseburger $12.99, 10% fee, $5 delivery
        let mut cart = Cart::new();
        cart.add_line(
            &item("d1", "Chocolate Glazed Donut", Decimal::new(399, 2)),
            "With Sprinkles",
            None,
        );
        let burger_line = cart.add_line(
            &item("b1", "Classic Cheeseburger", Decimal::new(1299, 2)),
            "Regular",
            None,
        );
        cart.set_quantity(&burger_line, 2);

        let totals = cart.totals(Decimal::new(10, 0));
        assert_eq!(totals.subtotal, Decimal::new(2997, 2));
        assert_eq!(totals.service_fee, Decimal::new(2997, 3));
        let checkout_total = totals.total_with_delivery(Decimal::new(5, 0));
        assert_eq!(checkout_total, Decimal::new(37_967, 3));
        assert_eq!(crate::format_usd(checkout_total), "$37.97");
    }

    #[test]
    fn test_same_item_twice_is_two_lines() {
        let mut cart = Cart::new();
        let donut = item("d1", "Donut", Decimal::new(399, 2));
        let first = cart.add_line(&donut, "With Sprinkles", None);
        let second = cart.add_line(&donut, "Without Sprinkles", None);
        assert_ne!(first, second);
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_set_quantity_rejects_zero_silently() {
        let mut cart = Cart::new();
        let line = cart.add_line(&item("d1", "Donut", Decimal::new(399, 2)), "Regular", None);
        cart.set_quantity(&line, 0);
        assert_eq!(cart.lines()[0].quantity, 1);
        cart.set_quantity(&line, 3);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_remove_line_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add_line(&item("d1", "Donut", Decimal::new(399, 2)), "Regular", None);
        cart.remove_line(&CartLineId::new("missing"));
        assert_eq!(cart.lines().len(), 1);

        let id = cart.lines()[0].id.clone();
        cart.remove_line(&id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_never_mutate() {
        let mut cart = Cart::new();
        cart.add_line(&item("d1", "Donut", Decimal::new(399, 2)), "Regular", None);
        let before = cart.lines().to_vec();
        let _ = cart.totals(Decimal::new(10, 0));
        assert_eq!(cart.lines().len(), before.len());
        assert_eq!(cart.lines()[0].quantity, before[0].quantity);
    }
}
