//! # Catalog Service
//!
//! Menu access and decorated-drink building for the terminal.
//!
//! ## Price Snapshot
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Building One Drink                                   │
//! │                                                                         │
//! │  build_drink("Trà sữa truyền thống", ["Trân châu đen", "Pudding"])      │
//! │       │                                                                 │
//! │       ├── 1. load base drink row (must exist and be available)          │
//! │       ├── 2. snapshot ALL topping prices in one query                   │
//! │       │      └── prices are stable for the whole fold; a concurrent     │
//! │       │          menu edit cannot split one drink across two prices     │
//! │       └── 3. fold the selection over the base (milktea-core)            │
//! │              └── catalog misses are logged at warn and skipped          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::warn;

use crate::error::ApiError;
use milktea_core::{build_drink, Drink, MenuItem, Money};
use milktea_db::Database;

/// Service exposing the menu catalog to the UI and the checkout flow.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    pub fn new(db: Database) -> Self {
        CatalogService { db }
    }

    /// Lists available base drinks for the menu screen.
    pub async fn list_drinks(&self) -> Result<Vec<MenuItem>, ApiError> {
        Ok(self.db.menu().list_drinks().await?)
    }

    /// Lists available toppings for the customization screen.
    pub async fn list_toppings(&self) -> Result<Vec<MenuItem>, ApiError> {
        Ok(self.db.menu().list_toppings().await?)
    }

    /// Builds a decorated drink from a base drink name and a topping
    /// selection.
    ///
    /// Topping prices are snapshotted once before the fold, so every
    /// topping in this build prices against the same menu state. Unknown
    /// topping names are logged and skipped, never fatal.
    pub async fn build_drink(
        &self,
        drink_name: &str,
        toppings: &[String],
    ) -> Result<Drink, ApiError> {
        let menu = self.db.menu();

        let base_item = menu
            .get_drink_by_name(drink_name)
            .await?
            .ok_or_else(|| ApiError::not_found("Menu item", drink_name))?;

        let base = Drink::base(&base_item.name, base_item.price());

        if toppings.is_empty() {
            return Ok(base);
        }

        let snapshot: Vec<(String, Money)> = menu
            .list_toppings()
            .await?
            .into_iter()
            .map(|item| {
                let price = item.price();
                (item.name, price)
            })
            .collect();

        let outcome = build_drink(base, toppings, &snapshot);
        for name in &outcome.missing {
            warn!(topping = %name, drink = %drink_name, "Topping missing from catalog, skipped");
        }

        Ok(outcome.drink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milktea_core::MenuCategory;
    use milktea_db::DbConfig;

    async fn seeded_catalog() -> CatalogService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let menu = db.menu();
        menu.create("Trà sữa truyền thống", 35_000, MenuCategory::MilkTea, None)
            .await
            .unwrap();
        menu.create("Trân châu đen", 8_000, MenuCategory::Topping, None)
            .await
            .unwrap();
        menu.create("Pudding", 14_000, MenuCategory::Topping, None)
            .await
            .unwrap();
        CatalogService::new(db)
    }

    #[tokio::test]
    async fn test_build_plain_drink() {
        let catalog = seeded_catalog().await;
        let drink = catalog
            .build_drink("Trà sữa truyền thống", &[])
            .await
            .unwrap();
        assert_eq!(drink.price().vnd(), 35_000);
    }

    #[tokio::test]
    async fn test_build_decorated_drink() {
        let catalog = seeded_catalog().await;
        let drink = catalog
            .build_drink(
                "Trà sữa truyền thống",
                &["Trân châu đen".to_string(), "Pudding".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(drink.price().vnd(), 57_000);
        assert_eq!(
            drink.description(),
            "Trà sữa truyền thống + Trân châu đen + Pudding"
        );
    }

    #[tokio::test]
    async fn test_unknown_base_drink_fails() {
        let catalog = seeded_catalog().await;
        let err = catalog
            .build_drink("Trà sữa sầu riêng", &[])
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_topping_skipped() {
        let catalog = seeded_catalog().await;
        let drink = catalog
            .build_drink(
                "Trà sữa truyền thống",
                &["Trân châu đen".to_string(), "Thạch không có".to_string()],
            )
            .await
            .unwrap();

        // The miss costs nothing and the rest of the chain stands
        assert_eq!(drink.price().vnd(), 43_000);
        assert_eq!(drink.topping_labels(), vec!["Trân châu đen"]);
    }
}
