//! Catalog entities: categories, menu items, and the menu settings singleton.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::normalize;
use crate::types::{CategoryId, MenuItemId};

/// A menu category.
///
/// Categories are seeded at setup and toggled by the admin; they are never
/// deleted in normal operation. Items of a disabled category stay in the
/// catalog but are not orderable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Stable slug, unique (e.g. `"donuts"`).
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Whether items of this category are currently orderable.
    pub enabled: bool,
}

/// A single item on the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    /// Non-negative amount in the settings currency.
    pub price: Decimal,
    pub description: String,
    /// Image reference (URL); display concerns stay outside the core.
    pub image: String,
    /// Owning category; must reference an existing [`Category`].
    pub category_id: CategoryId,
    /// Ordered option labels; never empty.
    pub options: Vec<String>,
    /// Ordered "meal includes" labels; never empty.
    pub meal_includes: Vec<String>,
    pub popular: bool,
}

impl MenuItem {
    /// Whether `option` is one of this item's declared option labels.
    #[must_use]
    pub fn offers_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Admin input for creating or replacing a menu item.
///
/// `price` deserializes leniently and is coerced to a non-negative amount at
/// write time; missing `options`/`meal_includes` fall back to single-element
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    pub name: String,
    #[serde(default, deserialize_with = "normalize::lenient_decimal")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub category_id: CategoryId,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub meal_includes: Option<Vec<String>>,
    #[serde(default)]
    pub popular: bool,
}

impl MenuItemDraft {
    /// Default option list for items that declare none.
    pub const DEFAULT_OPTIONS: &'static [&'static str] = &["Regular"];
    /// Default "meal includes" list for items that declare none.
    pub const DEFAULT_INCLUDES: &'static [&'static str] = &["Meal"];

    /// Apply the write-time coercion rules, producing a [`MenuItem`] with
    /// the given id.
    #[must_use]
    pub fn into_item(self, id: MenuItemId) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            price: normalize::coerce_price(self.price),
            description: self.description,
            image: self.image,
            category_id: self.category_id,
            options: non_empty_or(self.options, Self::DEFAULT_OPTIONS),
            meal_includes: non_empty_or(self.meal_includes, Self::DEFAULT_INCLUDES),
            popular: self.popular,
        }
    }
}

fn non_empty_or(labels: Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    match labels {
        Some(labels) if !labels.is_empty() => labels,
        _ => default.iter().map(ToString::to_string).collect(),
    }
}

/// Display gating flags for the menu page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    pub show_popular: bool,
    pub show_descriptions: bool,
    pub enable_wishlist: bool,
    pub show_prices: bool,
    pub enable_ratings: bool,
    /// Grid width; always one of {2, 3, 4}.
    pub items_per_row: u8,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_popular: true,
            show_descriptions: true,
            enable_wishlist: true,
            show_prices: true,
            enable_ratings: true,
            items_per_row: 3,
        }
    }
}

/// Global menu settings. Exactly one instance exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSettings {
    /// ISO 4217 currency code.
    pub currency: String,
    /// Flat fee added once at checkout; non-negative.
    pub delivery_fee: Decimal,
    /// Service fee as a percentage of the subtotal (10 means 10%);
    /// non-negative.
    pub service_fee_rate: Decimal,
    #[serde(flatten)]
    pub display: DisplayOptions,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_owned(),
            delivery_fee: Decimal::new(5, 0),
            service_fee_rate: Decimal::new(10, 0),
            display: DisplayOptions::default(),
        }
    }
}

/// Partial-merge input for `PUT /menu-settings`.
///
/// Absent fields keep their current value; fee fields deserialize leniently
/// and are coerced non-negative, and `items_per_row` is clamped to {2, 3, 4}.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub currency: Option<String>,
    /// `None` = field absent; `Some(None)` = present but unparseable.
    #[serde(default, deserialize_with = "normalize::lenient_decimal_field")]
    pub delivery_fee: Option<Option<Decimal>>,
    /// `None` = field absent; `Some(None)` = present but unparseable.
    #[serde(default, deserialize_with = "normalize::lenient_decimal_field")]
    pub service_fee_rate: Option<Option<Decimal>>,
    #[serde(default)]
    pub show_popular: Option<bool>,
    #[serde(default)]
    pub show_descriptions: Option<bool>,
    #[serde(default)]
    pub enable_wishlist: Option<bool>,
    #[serde(default)]
    pub show_prices: Option<bool>,
    #[serde(default)]
    pub enable_ratings: Option<bool>,
    #[serde(default)]
    pub items_per_row: Option<i64>,
}

impl MenuSettings {
    /// Merge a patch into these settings, re-validating the lenient fields.
    #[must_use]
    pub fn merged(mut self, patch: SettingsPatch) -> Self {
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(raw) = patch.delivery_fee {
            self.delivery_fee = normalize::coerce_fee(raw);
        }
        if let Some(raw) = patch.service_fee_rate {
            self.service_fee_rate = normalize::coerce_fee(raw);
        }
        if let Some(v) = patch.show_popular {
            self.display.show_popular = v;
        }
        if let Some(v) = patch.show_descriptions {
            self.display.show_descriptions = v;
        }
        if let Some(v) = patch.enable_wishlist {
            self.display.enable_wishlist = v;
        }
        if let Some(v) = patch.show_prices {
            self.display.show_prices = v;
        }
        if let Some(v) = patch.enable_ratings {
            self.display.enable_ratings = v;
        }
        if let Some(v) = patch.items_per_row {
            self.display.items_per_row = normalize::clamp_items_per_row(v);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(category: &str) -> MenuItemDraft {
        MenuItemDraft {
            name: "Chocolate Glazed Donut".to_owned(),
            price: Some(Decimal::new(399, 2)),
            description: "Rich chocolate glazed donut".to_owned(),
            image: "donut.jpg".to_owned(),
            category_id: CategoryId::new(category),
            options: None,
            meal_includes: None,
            popular: true,
        }
    }

    #[test]
    fn test_draft_defaults_option_lists() {
        let item = draft("donuts").into_item(MenuItemId::new("item-1"));
        assert_eq!(item.options, vec!["Regular"]);
        assert_eq!(item.meal_includes, vec!["Meal"]);
    }

    #[test]
    fn test_draft_keeps_declared_options() {
        let mut d = draft("donuts");
        d.options = Some(vec!["With Sprinkles".to_owned(), "Without".to_owned()]);
        let item = d.into_item(MenuItemId::new("item-1"));
        assert!(item.offers_option("With Sprinkles"));
        assert!(!item.offers_option("Regular"));
    }

    #[test]
    fn test_draft_coerces_negative_price() {
        let mut d = draft("donuts");
        d.price = Some(Decimal::new(-399, 2));
        let item = d.into_item(MenuItemId::new("item-1"));
        assert_eq!(item.price, Decimal::ZERO);
    }

    #[test]
    fn test_settings_merge_is_partial() {
        let patched = MenuSettings::default().merged(SettingsPatch {
            delivery_fee: Some(Some(Decimal::new(750, 2))),
            show_prices: Some(false),
            ..SettingsPatch::default()
        });
        assert_eq!(patched.delivery_fee, Decimal::new(750, 2));
        assert!(!patched.display.show_prices);
        // untouched fields survive
        assert_eq!(patched.currency, "USD");
        assert_eq!(patched.service_fee_rate, Decimal::new(10, 0));
        assert!(patched.display.show_popular);
    }

    #[test]
    fn test_settings_merge_clamps_items_per_row() {
        let patched = MenuSettings::default().merged(SettingsPatch {
            items_per_row: Some(9),
            ..SettingsPatch::default()
        });
        assert_eq!(patched.display.items_per_row, 4);

        let patched = MenuSettings::default().merged(SettingsPatch {
            items_per_row: Some(0),
            ..SettingsPatch::default()
        });
        assert_eq!(patched.display.items_per_row, 2);
    }

    #[test]
    fn test_settings_merge_coerces_negative_fee() {
        let patched = MenuSettings::default().merged(SettingsPatch {
            service_fee_rate: Some(Some(Decimal::new(-10, 0))),
            ..SettingsPatch::default()
        });
        assert_eq!(patched.service_fee_rate, Decimal::ZERO);
    }

    #[test]
    fn test_settings_patch_lenient_json() {
        // Present-but-garbage fee input is repaired to 0; absent fields keep
        // their current value.
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"currency": "EUR", "deliveryFee": "oops"}"#).expect("parse");
        let patched = MenuSettings::default().merged(patch);
        assert_eq!(patched.currency, "EUR");
        assert_eq!(patched.delivery_fee, Decimal::ZERO);
        assert_eq!(patched.service_fee_rate, Decimal::new(10, 0));
    }
}
