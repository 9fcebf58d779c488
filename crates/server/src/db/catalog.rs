//! Catalog repository: categories, menu items, and the settings singleton.
//!
//! All write paths funnel through the coercion rules in
//! `quickbite_core::normalize` via [`MenuItemDraft::into_item`] and
//! [`MenuSettings::merged`], so the tolerant-repair policy is applied in one
//! place.

use sqlx::SqlitePool;

use quickbite_core::catalog::{Category, MenuItem, MenuItemDraft, MenuSettings, SettingsPatch};
use quickbite_core::normalize;
use quickbite_core::{CategoryId, MenuItemId, ValidationError};

use super::{RepositoryError, StoreError, parse_stored_decimal, parse_stored_labels};

/// Repository for catalog database operations.
pub struct CatalogRepository<'a> {
    pool: &'a SqlitePool,
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    enabled: bool,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            enabled: row.enabled,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: String,
    name: String,
    price: String,
    description: String,
    image: String,
    category_id: String,
    options: String,
    meal_includes: String,
    popular: bool,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = RepositoryError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MenuItemId::new(row.id),
            name: row.name,
            price: parse_stored_decimal(&row.price, "menu_item.price")?,
            description: row.description,
            image: row.image,
            category_id: CategoryId::new(row.category_id),
            options: parse_stored_labels(&row.options, "menu_item.options")?,
            meal_includes: parse_stored_labels(&row.meal_includes, "menu_item.meal_includes")?,
            popular: row.popular,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    currency: String,
    delivery_fee: String,
    service_fee_rate: String,
    show_popular: bool,
    show_descriptions: bool,
    enable_wishlist: bool,
    show_prices: bool,
    enable_ratings: bool,
    items_per_row: i64,
}

impl TryFrom<SettingsRow> for MenuSettings {
    type Error = RepositoryError;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        let mut settings = Self {
            currency: row.currency,
            delivery_fee: parse_stored_decimal(&row.delivery_fee, "menu_settings.delivery_fee")?,
            service_fee_rate: parse_stored_decimal(
                &row.service_fee_rate,
                "menu_settings.service_fee_rate",
            )?,
            ..Self::default()
        };
        settings.display.show_popular = row.show_popular;
        settings.display.show_descriptions = row.show_descriptions;
        settings.display.enable_wishlist = row.enable_wishlist;
        settings.display.show_prices = row.show_prices;
        settings.display.enable_ratings = row.enable_ratings;
        settings.display.items_per_row = normalize::clamp_items_per_row(row.items_per_row);
        Ok(settings)
    }
}

fn encode_labels(labels: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(labels)
        .map_err(|e| RepositoryError::DataCorruption(format!("failed to encode labels: {e}")))
}

/// Fetch a menu item by id on any executor, so checkout can resolve items
/// inside its transaction.
pub(crate) async fn fetch_item<'e, E>(
    executor: E,
    id: &MenuItemId,
) -> Result<Option<MenuItem>, RepositoryError>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let row = sqlx::query_as::<_, MenuItemRow>(
        r"
        SELECT id, name, price, description, image, category_id,
               options, meal_includes, popular
        FROM menu_item
        WHERE id = ?
        ",
    )
    .bind(id.as_str())
    .fetch_optional(executor)
    .await?;

    row.map(MenuItem::try_from).transpose()
}

/// Fetch the settings singleton on any executor, defaulting when the row is
/// absent (a fresh database before seeding).
pub(crate) async fn fetch_settings<'e, E>(executor: E) -> Result<MenuSettings, RepositoryError>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let row = sqlx::query_as::<_, SettingsRow>(
        r"
        SELECT currency, delivery_fee, service_fee_rate,
               show_popular, show_descriptions, enable_wishlist,
               show_prices, enable_ratings, items_per_row
        FROM menu_settings
        WHERE id = 'default'
        ",
    )
    .fetch_optional(executor)
    .await?;

    row.map_or_else(|| Ok(MenuSettings::default()), MenuSettings::try_from)
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all categories with their enabled flags.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, name, enabled
            FROM category
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Insert a category, used by seeding. Existing ids are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert_category(&self, category: &Category) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO category (id, name, enabled)
            VALUES (?, ?, ?)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(category.id.as_str())
        .bind(&category.name)
        .bind(category.enabled)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Flip a category's enabled flag. Does not touch its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    pub async fn set_category_enabled(
        &self,
        id: &CategoryId,
        enabled: bool,
    ) -> Result<Category, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE category
            SET enabled = ?
            WHERE id = ?
            ",
        )
        .bind(enabled)
        .bind(id.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, name, enabled
            FROM category
            WHERE id = ?
            ",
        )
        .bind(id.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List every menu item, enabled category or not (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for unreadable stored values.
    pub async fn list_all_items(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(
            r"
            SELECT id, name, price, description, image, category_id,
                   options, meal_includes, popular
            FROM menu_item
            ORDER BY category_id, name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    /// List the currently orderable subset: items whose owning category has
    /// `enabled = true`. An empty catalog yields an empty vec.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for unreadable stored values.
    pub async fn list_orderable_items(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(
            r"
            SELECT i.id, i.name, i.price, i.description, i.image, i.category_id,
                   i.options, i.meal_includes, i.popular
            FROM menu_item i
            JOIN category c ON c.id = i.category_id
            WHERE c.enabled = 1
            ORDER BY i.category_id, i.name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    /// Get a menu item by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_item(&self, id: &MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        fetch_item(self.pool, id).await
    }

    /// Count all menu items across all categories, enabled or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_items(&self) -> Result<usize, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item")
            .fetch_one(self.pool)
            .await?;

        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Create a menu item from an admin draft, assigning a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownCategory` if the draft references a
    /// category that does not exist.
    pub async fn add_item(&self, draft: MenuItemDraft) -> Result<MenuItem, StoreError> {
        self.ensure_category_exists(&draft.category_id).await?;
        let item = draft.into_item(MenuItemId::generate());
        self.insert_item(&item).await?;
        Ok(item)
    }

    /// Insert a fully-formed item, used by seeding (stable ids).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id already exists.
    pub async fn insert_item(&self, item: &MenuItem) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO menu_item (id, name, price, description, image, category_id,
                                   options, meal_includes, popular)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(item.id.as_str())
        .bind(&item.name)
        .bind(item.price.to_string())
        .bind(&item.description)
        .bind(&item.image)
        .bind(item.category_id.as_str())
        .bind(encode_labels(&item.options)?)
        .bind(encode_labels(&item.meal_includes)?)
        .bind(item.popular)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("menu item id already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Replace a menu item, applying the same coercion rules as `add_item`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown item, or
    /// `ValidationError::UnknownCategory` for an unknown category.
    pub async fn update_item(
        &self,
        id: &MenuItemId,
        draft: MenuItemDraft,
    ) -> Result<MenuItem, StoreError> {
        self.ensure_category_exists(&draft.category_id).await?;
        let item = draft.into_item(id.clone());

        let result = sqlx::query(
            r"
            UPDATE menu_item
            SET name = ?, price = ?, description = ?, image = ?, category_id = ?,
                options = ?, meal_includes = ?, popular = ?
            WHERE id = ?
            ",
        )
        .bind(&item.name)
        .bind(item.price.to_string())
        .bind(&item.description)
        .bind(&item.image)
        .bind(item.category_id.as_str())
        .bind(encode_labels(&item.options)?)
        .bind(encode_labels(&item.meal_includes)?)
        .bind(item.popular)
        .bind(id.as_str())
        .execute(self.pool)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound.into());
        }

        Ok(item)
    }

    /// Delete a menu item. Historical orders keep their captured snapshots;
    /// nothing cascades.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    pub async fn delete_item(&self, id: &MenuItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM menu_item WHERE id = ?")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Get the settings singleton.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_settings(&self) -> Result<MenuSettings, RepositoryError> {
        fetch_settings(self.pool).await
    }

    /// Merge a patch into the settings singleton and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn update_settings(
        &self,
        patch: SettingsPatch,
    ) -> Result<MenuSettings, RepositoryError> {
        let merged = self.get_settings().await?.merged(patch);
        self.write_settings(&merged).await?;
        Ok(merged)
    }

    /// Persist the settings singleton, used by seeding and `update_settings`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn write_settings(&self, settings: &MenuSettings) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO menu_settings (id, currency, delivery_fee, service_fee_rate,
                                       show_popular, show_descriptions, enable_wishlist,
                                       show_prices, enable_ratings, items_per_row)
            VALUES ('default', ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                currency = excluded.currency,
                delivery_fee = excluded.delivery_fee,
                service_fee_rate = excluded.service_fee_rate,
                show_popular = excluded.show_popular,
                show_descriptions = excluded.show_descriptions,
                enable_wishlist = excluded.enable_wishlist,
                show_prices = excluded.show_prices,
                enable_ratings = excluded.enable_ratings,
                items_per_row = excluded.items_per_row
            ",
        )
        .bind(&settings.currency)
        .bind(settings.delivery_fee.to_string())
        .bind(settings.service_fee_rate.to_string())
        .bind(settings.display.show_popular)
        .bind(settings.display.show_descriptions)
        .bind(settings.display.enable_wishlist)
        .bind(settings.display.show_prices)
        .bind(settings.display.enable_ratings)
        .bind(i64::from(settings.display.items_per_row))
        .execute(self.pool)
        .await?;

        Ok(())
    }

    async fn ensure_category_exists(&self, id: &CategoryId) -> Result<(), StoreError> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM category WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await
            .map_err(RepositoryError::from)?;

        if exists.is_none() {
            return Err(ValidationError::UnknownCategory(id.to_string()).into());
        }

        Ok(())
    }
}
