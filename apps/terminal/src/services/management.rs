//! # Management Service
//!
//! Back-office operations: staff accounts, menu upkeep, and sales reports.
//! Every entry point takes the caller's [`Session`] and checks the role gate
//! before touching the database.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                   Role Gates                                   │
//! │                                                                │
//! │  manage users    admin only          create / deactivate /     │
//! │                                      reset password            │
//! │  view reports    admin + manager     daily totals, top sellers │
//! │  manage menu     admin + manager     add / reprice / toggle    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::session::Session;
use milktea_core::{validation, MenuCategory, MenuItem, Receipt, User, UserRole};
use milktea_db::{Database, DrinkSales};

// =============================================================================
// Report Types
// =============================================================================

/// One day of sales, for the reports screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_vnd: i64,
    pub receipt_count: usize,
}

// =============================================================================
// Service
// =============================================================================

/// Session-gated administration over users, menu, and reports.
#[derive(Clone)]
pub struct ManagementService {
    db: Database,
}

impl ManagementService {
    pub fn new(db: Database) -> Self {
        ManagementService { db }
    }

    // =========================================================================
    // User Administration
    // =========================================================================

    /// Creates a staff account. Admin only.
    pub async fn create_user(
        &self,
        session: &Session,
        username: &str,
        password: &str,
        full_name: &str,
        role: UserRole,
    ) -> Result<User, ApiError> {
        session.require_manage_users()?;
        validation::validate_username(username)
            .map_err(|e| ApiError::validation(e.to_string()))?;

        if !self.db.users().is_username_available(username).await? {
            return Err(ApiError::validation(format!(
                "Username '{username}' is already taken"
            )));
        }

        let user = self
            .db
            .users()
            .create(username, password, full_name, role)
            .await?;
        info!(username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    /// Disables an account without deleting its history. Admin only.
    pub async fn deactivate_user(&self, session: &Session, user_id: &str) -> Result<(), ApiError> {
        session.require_manage_users()?;

        let target = self
            .db
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User", user_id))?;

        if target.username == session.username() {
            return Err(ApiError::validation("Cannot deactivate your own account"));
        }

        self.db.users().deactivate(user_id).await?;
        info!(username = %target.username, "User deactivated");
        Ok(())
    }

    /// Resets an account password. Admin only.
    pub async fn change_password(
        &self,
        session: &Session,
        user_id: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        session.require_manage_users()?;
        if new_password.trim().is_empty() {
            return Err(ApiError::validation("Password is required"));
        }
        self.db.users().change_password(user_id, new_password).await?;
        Ok(())
    }

    /// Lists all accounts, active or not. Admin only.
    pub async fn list_users(&self, session: &Session) -> Result<Vec<User>, ApiError> {
        session.require_manage_users()?;
        Ok(self.db.users().list_all().await?)
    }

    // =========================================================================
    // Menu Upkeep
    // =========================================================================

    /// Adds a drink or topping to the menu.
    pub async fn add_menu_item(
        &self,
        session: &Session,
        name: &str,
        price_vnd: i64,
        category: MenuCategory,
        description: Option<String>,
    ) -> Result<MenuItem, ApiError> {
        session.require_manage_menu()?;
        validation::validate_item_name(name).map_err(|e| ApiError::validation(e.to_string()))?;
        validation::validate_price_vnd(price_vnd)
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let item = self
            .db
            .menu()
            .create(name.trim(), price_vnd, category, description)
            .await?;
        info!(name = %item.name, price = %item.price(), "Menu item added");
        Ok(item)
    }

    /// Renames or reprices an existing item.
    pub async fn update_menu_item(
        &self,
        session: &Session,
        item_id: &str,
        name: &str,
        price_vnd: i64,
        description: Option<String>,
    ) -> Result<MenuItem, ApiError> {
        session.require_manage_menu()?;
        validation::validate_item_name(name).map_err(|e| ApiError::validation(e.to_string()))?;
        validation::validate_price_vnd(price_vnd)
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let mut item = self
            .db
            .menu()
            .get_by_id(item_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Menu item", item_id))?;

        item.name = name.trim().to_string();
        item.price_vnd = price_vnd;
        item.description = description;
        self.db.menu().update(&item).await?;
        Ok(item)
    }

    /// Takes an item on or off sale without removing it.
    pub async fn set_menu_availability(
        &self,
        session: &Session,
        item_id: &str,
        available: bool,
    ) -> Result<(), ApiError> {
        session.require_manage_menu()?;
        self.db.menu().set_availability(item_id, available).await?;
        Ok(())
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Sales total and receipt count for one calendar day.
    pub async fn daily_sales(
        &self,
        session: &Session,
        date: NaiveDate,
    ) -> Result<DailySales, ApiError> {
        session.require_view_reports()?;

        let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        let end = start + chrono::Duration::days(1);

        let total = self.db.receipts().total_sales_for_date(date).await?;
        let receipts = self.db.receipts().list_by_date_range(start, end).await?;

        Ok(DailySales {
            date,
            total_vnd: total.vnd(),
            receipt_count: receipts.len(),
        })
    }

    /// Best-selling drinks by cups sold, descending.
    pub async fn top_selling_items(
        &self,
        session: &Session,
        count: i64,
    ) -> Result<Vec<DrinkSales>, ApiError> {
        session.require_view_reports()?;
        Ok(self.db.receipts().top_selling_items(count).await?)
    }

    /// Most recent receipts, newest first.
    pub async fn recent_receipts(
        &self,
        session: &Session,
        limit: i64,
    ) -> Result<Vec<Receipt>, ApiError> {
        session.require_view_reports()?;
        Ok(self.db.receipts().list_recent(limit).await?)
    }

    /// Reprints a past receipt by id.
    pub async fn find_receipt(
        &self,
        session: &Session,
        receipt_id: &str,
    ) -> Result<Receipt, ApiError> {
        session.require_view_reports()?;
        self.db
            .receipts()
            .get_by_id(receipt_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Receipt", receipt_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use milktea_core::{Drink, LevelOption, Money, Order, OrderItem, SizeOption};
    use milktea_db::DbConfig;

    async fn setup() -> (ManagementService, Session, Session) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let admin = db
            .users()
            .create("admin", "admin123", "Quản trị viên", UserRole::Admin)
            .await
            .unwrap();
        let employee = db
            .users()
            .create("cashier1", "pass123", "Nhân viên", UserRole::Employee)
            .await
            .unwrap();
        (
            ManagementService::new(db),
            Session::for_user(admin),
            Session::for_user(employee),
        )
    }

    #[tokio::test]
    async fn test_employee_cannot_manage_users() {
        let (service, _, employee) = setup().await;

        let err = service
            .create_user(&employee, "new_user", "pw", "New", UserRole::Employee)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err = service.list_users(&employee).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_admin_creates_and_deactivates_user() {
        let (service, admin, _) = setup().await;

        let user = service
            .create_user(&admin, "manager1", "pw12345", "Cửa hàng trưởng", UserRole::Manager)
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Manager);

        service.deactivate_user(&admin, &user.id).await.unwrap();
        let users = service.list_users(&admin).await.unwrap();
        let stored = users.iter().find(|u| u.id == user.id).unwrap();
        assert!(!stored.is_active);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let (service, admin, _) = setup().await;

        let err = service
            .create_user(&admin, "admin", "pw12345", "Dup", UserRole::Employee)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_admin_cannot_deactivate_self() {
        let (service, admin, _) = setup().await;
        let admin_id = admin.user().id.clone();

        let err = service.deactivate_user(&admin, &admin_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_menu_upkeep() {
        let (service, admin, employee) = setup().await;

        let err = service
            .add_menu_item(&employee, "Trà đào", 40_000, MenuCategory::MilkTea, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let item = service
            .add_menu_item(&admin, "Trà đào", 40_000, MenuCategory::MilkTea, None)
            .await
            .unwrap();

        let item = service
            .update_menu_item(&admin, &item.id, "Trà đào cam sả", 45_000, None)
            .await
            .unwrap();
        assert_eq!(item.price_vnd, 45_000);

        service
            .set_menu_availability(&admin, &item.id, false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_menu_price_rejected() {
        let (service, admin, _) = setup().await;

        let err = service
            .add_menu_item(&admin, "Trà lỗi", -5, MenuCategory::MilkTea, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_daily_sales_counts_persisted_receipts() {
        let (service, admin, _) = setup().await;

        let mut order = Order::new();
        order.add_item(OrderItem::new(
            Drink::base("Trà sữa truyền thống", Money::from_vnd(35_000)),
            SizeOption::Medium,
            2,
            LevelOption::Full,
            LevelOption::Full,
        ));
        order.checkout();
        order.checkout();
        let receipt = Receipt::from_order(&order, "admin", "Tiền mặt", None);
        service.db.receipts().save(&receipt).await.unwrap();

        let today = chrono::Utc::now().date_naive();
        let report = service.daily_sales(&admin, today).await.unwrap();
        assert_eq!(report.total_vnd, 70_000);
        assert_eq!(report.receipt_count, 1);

        // A receipt from today must not leak into other days
        let yesterday = today.pred_opt().unwrap();
        let report = service.daily_sales(&admin, yesterday).await.unwrap();
        assert_eq!(report.total_vnd, 0);
        assert_eq!(report.receipt_count, 0);
    }

    #[tokio::test]
    async fn test_reports_gated_and_empty() {
        let (service, admin, employee) = setup().await;
        let today = chrono::Utc::now().date_naive();

        let err = service.daily_sales(&employee, today).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let report = service.daily_sales(&admin, today).await.unwrap();
        assert_eq!(report.total_vnd, 0);
        assert_eq!(report.receipt_count, 0);

        let top = service.top_selling_items(&admin, 5).await.unwrap();
        assert!(top.is_empty());
    }
}
