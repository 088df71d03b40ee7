//! # Menu Repository
//!
//! Database operations for the menu catalog: base drinks and toppings.
//!
//! The catalog feeds two consumers:
//! - the cashier UI, which lists available drinks and toppings
//! - the decoration build, which resolves topping names to surcharges
//!
//! Availability is a soft delete: unavailable items stay in the table so
//! that old receipts keep meaning, but they never come back from the
//! listing queries.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use milktea_core::{Money, MenuCategory, MenuItem};

/// Repository for menu catalog operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Lists available base drinks, alphabetically.
    pub async fn list_drinks(&self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price_vnd, category, description,
                   is_available, created_at, updated_at
            FROM menu_items
            WHERE category = 'milk_tea' AND is_available = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists available toppings, alphabetically.
    pub async fn list_toppings(&self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price_vnd, category, description,
                   is_available, created_at, updated_at
            FROM menu_items
            WHERE category = 'topping' AND is_available = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Resolves an available topping's surcharge by name.
    ///
    /// Returns `None` for unknown or unavailable toppings; the decoration
    /// build reports those as catalog misses rather than failing.
    pub async fn lookup_topping_price(&self, name: &str) -> DbResult<Option<Money>> {
        let price: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT price_vnd
            FROM menu_items
            WHERE category = 'topping' AND is_available = 1 AND name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(price.map(Money::from_vnd))
    }

    /// Gets a menu item by ID, available or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price_vnd, category, description,
                   is_available, created_at, updated_at
            FROM menu_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets an available base drink by name.
    pub async fn get_drink_by_name(&self, name: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price_vnd, category, description,
                   is_available, created_at, updated_at
            FROM menu_items
            WHERE category = 'milk_tea' AND is_available = 1 AND name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new menu item.
    pub async fn insert(&self, item: &MenuItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, name, price_vnd, category, description,
                is_available, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_vnd)
        .bind(item.category)
        .bind(&item.description)
        .bind(item.is_available)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Creates and inserts a menu item from its parts, returning it.
    pub async fn create(
        &self,
        name: &str,
        price_vnd: i64,
        category: MenuCategory,
        description: Option<String>,
    ) -> DbResult<MenuItem> {
        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price_vnd,
            category,
            description,
            is_available: true,
            created_at: now,
            updated_at: now,
        };
        self.insert(&item).await?;
        Ok(item)
    }

    /// Updates name, price, and description of an existing item.
    ///
    /// Category is immutable: a topping never becomes a drink.
    pub async fn update(&self, item: &MenuItem) -> DbResult<()> {
        debug!(id = %item.id, "Updating menu item");

        let result = sqlx::query(
            r#"
            UPDATE menu_items
            SET name = ?2, price_vnd = ?3, description = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_vnd)
        .bind(&item.description)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", &item.id));
        }

        Ok(())
    }

    /// Toggles availability (soft delete / restore).
    pub async fn set_availability(&self, id: &str, available: bool) -> DbResult<()> {
        debug!(id = %id, available, "Setting menu item availability");

        let result = sqlx::query(
            r#"
            UPDATE menu_items
            SET is_available = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(available)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", id));
        }

        Ok(())
    }

    /// Counts all menu items, available or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = test_db().await;
        let menu = db.menu();

        menu.create("Trà sữa truyền thống", 35_000, MenuCategory::MilkTea, None)
            .await
            .unwrap();
        menu.create("Trân châu đen", 8_000, MenuCategory::Topping, None)
            .await
            .unwrap();

        let drinks = menu.list_drinks().await.unwrap();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].name, "Trà sữa truyền thống");
        assert_eq!(drinks[0].price().vnd(), 35_000);

        let toppings = menu.list_toppings().await.unwrap();
        assert_eq!(toppings.len(), 1);
        assert_eq!(menu.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_lookup_topping_price() {
        let db = test_db().await;
        let menu = db.menu();
        menu.create("Pudding", 14_000, MenuCategory::Topping, None)
            .await
            .unwrap();

        let price = menu.lookup_topping_price("Pudding").await.unwrap();
        assert_eq!(price, Some(Money::from_vnd(14_000)));

        let missing = menu.lookup_topping_price("Không có").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_unavailable_items_hidden_from_listing() {
        let db = test_db().await;
        let menu = db.menu();
        let item = menu
            .create("Kem cheese", 18_000, MenuCategory::Topping, None)
            .await
            .unwrap();

        menu.set_availability(&item.id, false).await.unwrap();

        assert!(menu.list_toppings().await.unwrap().is_empty());
        assert!(menu
            .lookup_topping_price("Kem cheese")
            .await
            .unwrap()
            .is_none());
        // Still reachable by id for receipt history tooling
        assert!(menu.get_by_id(&item.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = test_db().await;
        let menu = db.menu();
        menu.create("Trà đào", 40_000, MenuCategory::MilkTea, None)
            .await
            .unwrap();

        let err = menu
            .create("Trà đào", 42_000, MenuCategory::MilkTea, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_item() {
        let db = test_db().await;
        let menu = db.menu();

        let err = menu.set_availability("no-such-id", false).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
