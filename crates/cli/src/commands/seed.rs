//! Catalog seeding command.
//!
//! Inserts the five fixed categories, a couple of sample items, and the
//! default settings singleton. Idempotent: existing categories are left
//! untouched, and the settings upsert overwrites the singleton with
//! defaults only when run explicitly.

use rust_decimal::Decimal;

use quickbite_core::catalog::{Category, MenuItem, MenuSettings};
use quickbite_core::{CategoryId, MenuItemId};
use quickbite_server::db::{self, CatalogRepository, RepositoryError};

use super::CommandError;

/// The fixed category set. Admin edits toggle their enabled flags; the
/// set itself never changes.
const CATEGORIES: &[(&str, &str)] = &[
    ("donuts", "Donuts"),
    ("burgers", "Burgers"),
    ("iceCream", "Ice Cream"),
    ("pizza", "Pizza"),
    ("hotdog", "Hot Dog"),
];

/// Seed the database with categories, sample items, and default settings.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let repo = CatalogRepository::new(&pool);

    tracing::info!("Seeding categories...");
    for (id, name) in CATEGORIES {
        repo.insert_category(&Category {
            id: CategoryId::new(*id),
            name: (*name).to_owned(),
            enabled: true,
        })
        .await?;
    }

    tracing::info!("Seeding sample items...");
    for item in sample_items() {
        match repo.insert_item(&item).await {
            Ok(()) => {}
            // Re-running the seed leaves existing items alone.
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!(item_id = %item.id, "Item already present, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("Seeding default settings...");
    repo.write_settings(&MenuSettings::default()).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

fn sample_items() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: MenuItemId::new("seed-chocolate-glazed-donut"),
            name: "Chocolate Glazed Donut".to_owned(),
            price: Decimal::new(399, 2),
            description: "Rich chocolate glaze over a fresh-baked ring".to_owned(),
            image: String::new(),
            category_id: CategoryId::new("donuts"),
            options: vec!["Regular".to_owned()],
            meal_includes: vec!["Meal".to_owned()],
            popular: true,
        },
        MenuItem {
            id: MenuItemId::new("seed-classic-cheeseburger"),
            name: "Classic Cheeseburger".to_owned(),
            price: Decimal::new(1299, 2),
            description: "Quarter-pound patty, cheddar, lettuce, tomato".to_owned(),
            image: String::new(),
            category_id: CategoryId::new("burgers"),
            options: vec!["Regular".to_owned(), "Large".to_owned()],
            meal_includes: vec!["Meal".to_owned(), "Fries".to_owned()],
            popular: true,
        },
    ]
}
