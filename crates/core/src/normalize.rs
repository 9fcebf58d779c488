//! Tolerant numeric normalization.
//!
//! Exactly three fields in the system repair bad input instead of rejecting
//! it: the menu item price, the settings fee fields, and the settings
//! `items_per_row`. The policy lives here, in one function per field, so
//! every write path applies the same rules.
//!
//! All other malformed input is rejected with a [`crate::ValidationError`].

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Coerce a menu item price to a non-negative amount.
///
/// Missing or unparseable input becomes 0, as does a negative amount.
#[must_use]
pub fn coerce_price(raw: Option<Decimal>) -> Decimal {
    match raw {
        Some(amount) if amount >= Decimal::ZERO => amount,
        _ => Decimal::ZERO,
    }
}

/// Coerce a fee amount or rate to a non-negative amount.
///
/// Same repair rule as [`coerce_price`], kept separate so the two policies
/// can diverge independently.
#[must_use]
pub fn coerce_fee(raw: Option<Decimal>) -> Decimal {
    match raw {
        Some(amount) if amount >= Decimal::ZERO => amount,
        _ => Decimal::ZERO,
    }
}

/// Clamp a requested grid width to the nearest member of {2, 3, 4}.
#[must_use]
pub const fn clamp_items_per_row(raw: i64) -> u8 {
    match raw {
        i64::MIN..=2 => 2,
        3 => 3,
        _ => 4,
    }
}

/// Deserialize a decimal leniently: numbers and numeric strings parse
/// normally, anything else (including absent values) becomes `None` for the
/// coercion functions above to repair.
///
/// # Errors
///
/// Never fails; malformed input maps to `None`.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => s.trim().parse().ok(),
        serde_json::Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }))
}

/// Like [`lenient_decimal`], but distinguishes an absent field from a
/// present-but-invalid one: absent stays `None` (partial merges keep the
/// current value), while present garbage becomes `Some(None)` for the
/// coercion functions to repair to 0.
///
/// Use with `#[serde(default, deserialize_with = "...")]`.
///
/// # Errors
///
/// Never fails; malformed input maps to `Some(None)`.
pub fn lenient_decimal_field<'de, D>(deserializer: D) -> Result<Option<Option<Decimal>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_decimal(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(mantissa: i64, scale: u32) -> Decimal {
        Decimal::new(mantissa, scale)
    }

    #[test]
    fn test_coerce_price_passes_valid() {
        assert_eq!(coerce_price(Some(d(399, 2))), d(399, 2));
        assert_eq!(coerce_price(Some(Decimal::ZERO)), Decimal::ZERO);
    }

    #[test]
    fn test_coerce_price_repairs_invalid() {
        assert_eq!(coerce_price(None), Decimal::ZERO);
        assert_eq!(coerce_price(Some(d(-500, 2))), Decimal::ZERO);
    }

    #[test]
    fn test_coerce_fee_repairs_invalid() {
        assert_eq!(coerce_fee(Some(d(-10, 0))), Decimal::ZERO);
        assert_eq!(coerce_fee(None), Decimal::ZERO);
        assert_eq!(coerce_fee(Some(d(5, 0))), d(5, 0));
    }

    #[test]
    fn test_clamp_items_per_row_nearest() {
        assert_eq!(clamp_items_per_row(-3), 2);
        assert_eq!(clamp_items_per_row(1), 2);
        assert_eq!(clamp_items_per_row(2), 2);
        assert_eq!(clamp_items_per_row(3), 3);
        assert_eq!(clamp_items_per_row(4), 4);
        assert_eq!(clamp_items_per_row(12), 4);
    }

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "lenient_decimal")]
        price: Option<Decimal>,
    }

    #[test]
    fn test_lenient_decimal_accepts_number_and_string() {
        let w: Wrapper = serde_json::from_str(r#"{"price": 3.99}"#).expect("number");
        assert_eq!(w.price, Some(d(399, 2)));

        let w: Wrapper = serde_json::from_str(r#"{"price": "12.99"}"#).expect("string");
        assert_eq!(w.price, Some(d(1299, 2)));
    }

    #[test]
    fn test_lenient_decimal_maps_garbage_to_none() {
        let w: Wrapper = serde_json::from_str(r#"{"price": "abc"}"#).expect("garbage string");
        assert_eq!(w.price, None);

        let w: Wrapper = serde_json::from_str(r#"{"price": null}"#).expect("null");
        assert_eq!(w.price, None);

        let w: Wrapper = serde_json::from_str(r"{}").expect("absent");
        assert_eq!(w.price, None);
    }
}
