//! # Receipt Repository
//!
//! Persistence and reporting for completed sales.
//!
//! ## Save Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Receipt Save Path                                 │
//! │                                                                         │
//! │  Receipt (frozen snapshot from milktea-core)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate gate ── total ≤ 0 or no items ──► DbError::InvalidSnapshot    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN TRANSACTION                                                      │
//! │       ├── INSERT receipts (header)                                      │
//! │       ├── INSERT receipt_items ×N                                       │
//! │  COMMIT ── any failure rolls back the whole receipt                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Receipts are immutable once committed: there is no update or delete
//! method here, by contract.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use milktea_core::{Money, Receipt, ReceiptItem};

// =============================================================================
// Row Types
// =============================================================================
// Receipts cross the db boundary through flat row structs: the core type
// carries Uuid ids and a Vec<String> topping list, which SQLite stores as
// TEXT and a JSON column.

#[derive(Debug, sqlx::FromRow)]
struct ReceiptRow {
    id: String,
    order_id: String,
    cashier: String,
    subtotal_vnd: i64,
    discount_vnd: i64,
    total_vnd: i64,
    promotion_name: Option<String>,
    payment_method: String,
    customer_note: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ReceiptItemRow {
    id: String,
    drink_name: String,
    toppings: String,
    size: String,
    sugar_level: String,
    ice_level: String,
    quantity: i64,
    unit_price_vnd: i64,
    line_total_vnd: i64,
}

fn parse_id(field: &str, value: &str) -> DbResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| DbError::Internal(format!("corrupt {} in receipt row: '{}'", field, value)))
}

impl ReceiptItemRow {
    fn into_item(self) -> DbResult<ReceiptItem> {
        let toppings: Vec<String> = serde_json::from_str(&self.toppings)
            .map_err(|e| DbError::Internal(format!("corrupt toppings JSON: {}", e)))?;

        Ok(ReceiptItem {
            id: parse_id("item id", &self.id)?,
            drink_name: self.drink_name,
            toppings,
            size: self.size,
            sugar_level: self.sugar_level,
            ice_level: self.ice_level,
            quantity: self.quantity,
            unit_price_vnd: self.unit_price_vnd,
            line_total_vnd: self.line_total_vnd,
        })
    }
}

impl ReceiptRow {
    fn into_receipt(self, items: Vec<ReceiptItem>) -> DbResult<Receipt> {
        Ok(Receipt {
            id: parse_id("receipt id", &self.id)?,
            order_id: parse_id("order id", &self.order_id)?,
            cashier: self.cashier,
            items,
            subtotal_vnd: self.subtotal_vnd,
            discount_vnd: self.discount_vnd,
            total_vnd: self.total_vnd,
            promotion_name: self.promotion_name,
            payment_method: self.payment_method,
            customer_note: self.customer_note,
            created_at: self.created_at,
        })
    }
}

/// A reporting row: how many cups of a drink were sold.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DrinkSales {
    pub drink_name: String,
    pub cups_sold: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for receipt persistence and reporting.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Saves a receipt atomically: header and line items commit together or
    /// not at all.
    ///
    /// ## Errors
    /// - [`DbError::InvalidSnapshot`] if the receipt has no items or a
    ///   non-positive total; nothing touches the database in that case.
    pub async fn save(&self, receipt: &Receipt) -> DbResult<()> {
        receipt
            .validate()
            .map_err(|e| DbError::invalid_snapshot(e.to_string()))?;

        debug!(
            id = %receipt.id,
            total_vnd = receipt.total_vnd,
            items = receipt.items.len(),
            "Saving receipt"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO receipts (
                id, order_id, cashier,
                subtotal_vnd, discount_vnd, total_vnd,
                promotion_name, payment_method, customer_note, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(receipt.id.to_string())
        .bind(receipt.order_id.to_string())
        .bind(&receipt.cashier)
        .bind(receipt.subtotal_vnd)
        .bind(receipt.discount_vnd)
        .bind(receipt.total_vnd)
        .bind(&receipt.promotion_name)
        .bind(&receipt.payment_method)
        .bind(&receipt.customer_note)
        .bind(receipt.created_at)
        .execute(&mut *tx)
        .await?;

        for item in &receipt.items {
            let toppings_json = serde_json::to_string(&item.toppings)
                .map_err(|e| DbError::Internal(e.to_string()))?;

            sqlx::query(
                r#"
                INSERT INTO receipt_items (
                    id, receipt_id, drink_name, toppings,
                    size, sugar_level, ice_level,
                    quantity, unit_price_vnd, line_total_vnd
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(item.id.to_string())
            .bind(receipt.id.to_string())
            .bind(&item.drink_name)
            .bind(toppings_json)
            .bind(&item.size)
            .bind(&item.sugar_level)
            .bind(&item.ice_level)
            .bind(item.quantity)
            .bind(item.unit_price_vnd)
            .bind(item.line_total_vnd)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Loads one receipt with its line items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Receipt>> {
        let row = sqlx::query_as::<_, ReceiptRow>(
            r#"
            SELECT id, order_id, cashier, subtotal_vnd, discount_vnd,
                   total_vnd, promotion_name, payment_method, customer_note,
                   created_at
            FROM receipts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.items_for(id).await?;
        Ok(Some(row.into_receipt(items)?))
    }

    /// Lists receipts newest-first, without line items, up to `limit`.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<Receipt>> {
        let rows = sqlx::query_as::<_, ReceiptRow>(
            r#"
            SELECT id, order_id, cashier, subtotal_vnd, discount_vnd,
                   total_vnd, promotion_name, payment_method, customer_note,
                   created_at
            FROM receipts
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_receipt(Vec::new()))
            .collect()
    }

    /// Lists receipts in `[from, to)`, newest-first, without line items.
    pub async fn list_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<Vec<Receipt>> {
        let rows = sqlx::query_as::<_, ReceiptRow>(
            r#"
            SELECT id, order_id, cashier, subtotal_vnd, discount_vnd,
                   total_vnd, promotion_name, payment_method, customer_note,
                   created_at
            FROM receipts
            WHERE created_at >= ?1 AND created_at < ?2
            ORDER BY created_at DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_receipt(Vec::new()))
            .collect()
    }

    /// Total revenue for one calendar day (UTC).
    pub async fn total_sales_for_date(&self, date: NaiveDate) -> DbResult<Money> {
        let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        let end = start + chrono::Duration::days(1);

        let total: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT SUM(total_vnd)
            FROM receipts
            WHERE created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_vnd(total.unwrap_or(0)))
    }

    /// Best-selling drinks by cups sold, descending.
    pub async fn top_selling_items(&self, count: i64) -> DbResult<Vec<DrinkSales>> {
        let rows = sqlx::query_as::<_, DrinkSales>(
            r#"
            SELECT drink_name, SUM(quantity) AS cups_sold
            FROM receipt_items
            GROUP BY drink_name
            ORDER BY cups_sold DESC, drink_name
            LIMIT ?1
            "#,
        )
        .bind(count)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts all persisted receipts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn items_for(&self, receipt_id: &str) -> DbResult<Vec<ReceiptItem>> {
        let rows = sqlx::query_as::<_, ReceiptItemRow>(
            r#"
            SELECT id, drink_name, toppings, size, sugar_level, ice_level,
                   quantity, unit_price_vnd, line_total_vnd
            FROM receipt_items
            WHERE receipt_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(receipt_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReceiptItemRow::into_item).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use milktea_core::drink::Drink;
    use milktea_core::order::{Order, OrderItem};
    use milktea_core::promotion::PromotionStrategy;
    use milktea_core::types::{LevelOption, SizeOption};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_receipt() -> Receipt {
        let mut order = Order::new();
        let drink = Drink::base("Trà sữa truyền thống", Money::from_vnd(35_000))
            .with_topping("Trân châu đen", Money::from_vnd(8_000));
        order.add_item(OrderItem::new(
            drink,
            SizeOption::Large,
            2,
            LevelOption::Half,
            LevelOption::Full,
        ));
        order.apply_promotion(&PromotionStrategy::AmountOff(Money::from_vnd(20_000)));
        order.checkout();
        order.checkout();
        Receipt::from_order(&order, "admin", "Tiền mặt", None)
    }

    #[tokio::test]
    async fn test_save_and_reload_round_trip() {
        let db = test_db().await;
        let repo = db.receipts();
        let receipt = sample_receipt();

        repo.save(&receipt).await.unwrap();

        let loaded = repo
            .get_by_id(&receipt.id.to_string())
            .await
            .unwrap()
            .expect("receipt should exist");

        assert_eq!(loaded.total_vnd, 78_900);
        assert_eq!(loaded.cashier, "admin");
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].drink_name, "Trà sữa truyền thống");
        assert_eq!(loaded.items[0].toppings, vec!["Trân châu đen"]);
        assert_eq!(loaded.items[0].line_total_vnd, 98_900);
    }

    #[tokio::test]
    async fn test_save_refuses_empty_receipt() {
        let db = test_db().await;
        let repo = db.receipts();

        let mut order = Order::new();
        order.checkout();
        order.checkout();
        let receipt = Receipt::from_order(&order, "admin", "Tiền mặt", None);

        let err = repo.save(&receipt).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidSnapshot { .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_refuses_zero_total() {
        let db = test_db().await;
        let repo = db.receipts();

        let mut order = Order::new();
        order.add_item(OrderItem::new(
            Drink::base("Trà sữa truyền thống", Money::from_vnd(35_000)),
            SizeOption::Medium,
            1,
            LevelOption::Full,
            LevelOption::Full,
        ));
        order.apply_promotion(&PromotionStrategy::AmountOff(Money::from_vnd(99_000)));
        order.checkout();
        order.checkout();
        let receipt = Receipt::from_order(&order, "admin", "Tiền mặt", None);

        let err = repo.save(&receipt).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidSnapshot { .. }));
    }

    #[tokio::test]
    async fn test_reporting_queries() {
        let db = test_db().await;
        let repo = db.receipts();

        let first = sample_receipt();
        let second = sample_receipt();
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let today = Utc::now().date_naive();
        let total = repo.total_sales_for_date(today).await.unwrap();
        assert_eq!(total.vnd(), 78_900 * 2);

        let top = repo.top_selling_items(5).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].drink_name, "Trà sữa truyền thống");
        assert_eq!(top[0].cups_sold, 4);

        let recent = repo.list_recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
    }

    #[tokio::test]
    async fn test_list_by_date_range_excludes_outside() {
        let db = test_db().await;
        let repo = db.receipts();
        repo.save(&sample_receipt()).await.unwrap();

        let now = Utc::now();
        let hits = repo
            .list_by_date_range(now - chrono::Duration::hours(1), now + chrono::Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let misses = repo
            .list_by_date_range(now + chrono::Duration::hours(1), now + chrono::Duration::hours(2))
            .await
            .unwrap();
        assert!(misses.is_empty());
    }
}
