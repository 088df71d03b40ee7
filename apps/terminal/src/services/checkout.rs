//! # Checkout Service
//!
//! The order workflow: start, build lines, promote, pay, persist, print.
//!
//! ## Checkout Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Workflow                                 │
//! │                                                                         │
//! │  start_order()          Draft                                           │
//! │  add_item() ×N          Draft (validated, catalog-priced lines)         │
//! │  apply_promotion()      Draft (discount resolved against subtotal)      │
//! │  checkout(session)                                                      │
//! │       │                                                                 │
//! │       ├── Draft ──► PendingPayment   (item list locks)                  │
//! │       ├── charge provider for order.total()                             │
//! │       │      └── declined? order restored, still PendingPayment         │
//! │       ├── PendingPayment ──► Paid                                       │
//! │       ├── Receipt::from_order + save (atomic, validated)                │
//! │       │      └── rejected? order restored, error surfaced               │
//! │       └── slot cleared, rendered receipt returned                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::services::catalog::CatalogService;
use crate::services::payment::{MockPaymentProvider, PaymentProvider, PaymentRequest};
use crate::session::Session;
use crate::state::ActiveOrder;
use milktea_core::{
    validation, LevelOption, Order, OrderItem, OrderState, PromotionStrategy, Receipt, SizeOption,
};
use milktea_db::Database;

// =============================================================================
// View Types
// =============================================================================

/// One order line, shaped for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub id: Uuid,
    pub display_name: String,
    pub sugar_level: String,
    pub ice_level: String,
    pub quantity: i64,
    pub unit_price_vnd: i64,
    pub line_total_vnd: i64,
}

impl From<&OrderItem> for LineView {
    fn from(item: &OrderItem) -> Self {
        LineView {
            id: item.id,
            display_name: item.display_name(),
            sugar_level: item.sugar_level.to_string(),
            ice_level: item.ice_level.to_string(),
            quantity: item.quantity,
            unit_price_vnd: item.unit_price().vnd(),
            line_total_vnd: item.line_total().vnd(),
        }
    }
}

/// Snapshot of the active order, shaped for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: Uuid,
    pub state: OrderState,
    pub lines: Vec<LineView>,
    pub subtotal_vnd: i64,
    pub discount_vnd: i64,
    pub total_vnd: i64,
    pub promotion_name: Option<String>,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        OrderSummary {
            order_id: order.id,
            state: order.state,
            lines: order.items.iter().map(LineView::from).collect(),
            subtotal_vnd: order.subtotal().vnd(),
            discount_vnd: order.discount.vnd(),
            total_vnd: order.total().vnd(),
            promotion_name: order.promotion_name.clone(),
        }
    }
}

/// Result of a completed checkout.
#[derive(Debug, Clone)]
pub struct CompletedSale {
    pub receipt: Receipt,
    /// Printable receipt text, already rendered with the store header.
    pub rendered: String,
    pub transaction_id: String,
}

// =============================================================================
// Service
// =============================================================================

/// Drives one order from first cup to persisted receipt.
#[derive(Clone)]
pub struct CheckoutService {
    db: Database,
    catalog: CatalogService,
    payments: Arc<dyn PaymentProvider>,
    active: ActiveOrder,
    config: AppConfig,
}

impl CheckoutService {
    /// Creates a checkout service with the mock payment provider.
    pub fn new(db: Database, config: AppConfig) -> Self {
        Self::with_provider(db, config, Arc::new(MockPaymentProvider))
    }

    /// Creates a checkout service with a custom payment provider.
    pub fn with_provider(
        db: Database,
        config: AppConfig,
        payments: Arc<dyn PaymentProvider>,
    ) -> Self {
        CheckoutService {
            catalog: CatalogService::new(db.clone()),
            db,
            payments,
            active: ActiveOrder::new(),
            config,
        }
    }

    /// The catalog half of the workflow, for menu screens.
    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    /// Starts a new draft order, discarding any unfinished one.
    pub fn start_order(&self) -> Uuid {
        if self.active.is_active() {
            warn!("Starting a new order while one was in progress; old order dropped");
        }
        let id = self.active.start();
        info!(order_id = %id, "Order started");
        id
    }

    /// Whether an order is currently in progress.
    pub fn has_active_order(&self) -> bool {
        self.active.is_active()
    }

    /// Adds a customized drink line to the active order.
    ///
    /// Quantity and order capacity are validated first; the drink is priced
    /// against the current catalog. Returns the updated summary.
    pub async fn add_item(
        &self,
        drink_name: &str,
        toppings: &[String],
        size: SizeOption,
        quantity: i64,
        sugar_level: LevelOption,
        ice_level: LevelOption,
    ) -> Result<OrderSummary, ApiError> {
        validation::validate_quantity(quantity).map_err(|e| ApiError::validation(e.to_string()))?;

        let current = self.active.with_order(|order| order.item_count())?;
        validation::validate_order_capacity(current)
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let drink = self.catalog.build_drink(drink_name, toppings).await?;
        let item = OrderItem::new(drink, size, quantity, sugar_level, ice_level);

        let summary = self.active.with_order(|order| {
            let accepted = order.add_item(item);
            if !accepted {
                warn!(state = ?order.state, "Item rejected: order no longer accepts changes");
            }
            OrderSummary::from(&*order)
        })?;

        Ok(summary)
    }

    /// Removes one line from the active order.
    pub fn remove_item(&self, item_id: &str) -> Result<OrderSummary, ApiError> {
        let id = validation::parse_uuid("item_id", item_id)
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let (removed, summary) = self.active.with_order(|order| {
            let removed = order.remove_item(id);
            (removed, OrderSummary::from(&*order))
        })?;

        if !removed {
            return Err(ApiError::not_found("Order item", item_id));
        }
        Ok(summary)
    }

    /// Applies a promotion, replacing any previous one.
    pub fn apply_promotion(&self, strategy: PromotionStrategy) -> Result<OrderSummary, ApiError> {
        let summary = self.active.with_order(|order| {
            order.apply_promotion(&strategy);
            info!(promotion = %strategy.name(), discount = %order.discount, "Promotion applied");
            OrderSummary::from(&*order)
        })?;
        Ok(summary)
    }

    /// Removes any applied promotion.
    pub fn clear_promotion(&self) -> Result<OrderSummary, ApiError> {
        let summary = self.active.with_order(|order| {
            order.clear_promotion();
            OrderSummary::from(&*order)
        })?;
        Ok(summary)
    }

    /// Current order snapshot for the cart display.
    pub fn order_summary(&self) -> Result<OrderSummary, ApiError> {
        let summary = self.active.with_order(|order| OrderSummary::from(&*order))?;
        Ok(summary)
    }

    /// Cancels and discards the active order.
    pub fn cancel_order(&self) -> Result<(), ApiError> {
        if self.active.cancel_and_clear() {
            info!("Order cancelled");
            Ok(())
        } else {
            Err(ApiError::order("No active order"))
        }
    }

    /// Completes the active order: locks items, collects payment, persists
    /// the receipt, and clears the terminal for the next customer.
    ///
    /// On payment decline or persistence failure the order is restored to
    /// the terminal unchanged, so the cashier can retry or cancel.
    pub async fn checkout(
        &self,
        session: &Session,
        payment_method: Option<String>,
        customer_note: Option<String>,
    ) -> Result<CompletedSale, ApiError> {
        let mut order = self.active.take()?;
        let method = payment_method.unwrap_or_else(|| self.config.default_payment_method.clone());

        // Draft → PendingPayment: item list locks. A retry after a decline
        // arrives already at PendingPayment and must not advance here.
        if order.state == OrderState::Draft {
            order.checkout();
        }

        let outcome = match self.payments.charge(PaymentRequest {
            amount: order.total(),
            method: method.clone(),
        }) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "Payment declined, order kept for retry");
                self.active.restore(order);
                return Err(err.into());
            }
        };

        // PendingPayment → Paid
        order.checkout();

        let receipt = Receipt::from_order(&order, session.username(), &method, customer_note);

        if let Err(err) = self.db.receipts().save(&receipt).await {
            warn!(error = %err, "Receipt not persisted, order kept");
            self.active.restore(order);
            return Err(err.into());
        }

        info!(
            receipt_id = %receipt.id,
            total = %receipt.total(),
            cashier = %receipt.cashier,
            "Sale completed"
        );

        let rendered = receipt.render(&self.config.store_name);
        Ok(CompletedSale {
            receipt,
            rendered,
            transaction_id: outcome.transaction_id,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::payment::PaymentOutcome;
    use milktea_core::{CoreError, CoreResult, MenuCategory, Money, UserRole};
    use milktea_db::DbConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Declines the first `declines` charges, then approves.
    struct FlakyProvider {
        declines: AtomicUsize,
        charges: AtomicUsize,
    }

    impl FlakyProvider {
        fn new(declines: usize) -> Self {
            FlakyProvider {
                declines: AtomicUsize::new(declines),
                charges: AtomicUsize::new(0),
            }
        }
    }

    impl PaymentProvider for FlakyProvider {
        fn charge(&self, request: PaymentRequest) -> CoreResult<PaymentOutcome> {
            self.charges.fetch_add(1, Ordering::SeqCst);
            if self
                .declines
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(CoreError::PaymentDeclined {
                    amount: request.amount.to_string(),
                    method: request.method,
                });
            }
            Ok(PaymentOutcome {
                transaction_id: "test-txn".to_string(),
                amount: request.amount,
                method: request.method,
            })
        }
    }

    async fn service_with_menu() -> (CheckoutService, Session) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let menu = db.menu();
        menu.create("Trà sữa truyền thống", 35_000, MenuCategory::MilkTea, None)
            .await
            .unwrap();
        menu.create("Trân châu đen", 8_000, MenuCategory::Topping, None)
            .await
            .unwrap();

        let user = db
            .users()
            .create("admin", "admin123", "Quản trị viên", UserRole::Admin)
            .await
            .unwrap();
        let session = Session::for_user(user);

        (CheckoutService::new(db, AppConfig::default()), session)
    }

    async fn add_standard_line(service: &CheckoutService) -> OrderSummary {
        service
            .add_item(
                "Trà sữa truyền thống",
                &["Trân châu đen".to_string()],
                SizeOption::Large,
                2,
                LevelOption::Half,
                LevelOption::Full,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_full_checkout_flow() {
        let (service, session) = service_with_menu().await;

        service.start_order();
        let summary = add_standard_line(&service).await;
        assert_eq!(summary.subtotal_vnd, 98_900);

        let summary = service
            .apply_promotion(PromotionStrategy::AmountOff(Money::from_vnd(20_000)))
            .unwrap();
        assert_eq!(summary.total_vnd, 78_900);

        let sale = service.checkout(&session, None, None).await.unwrap();
        assert_eq!(sale.receipt.total_vnd, 78_900);
        assert_eq!(sale.receipt.cashier, "admin");
        assert!(sale.rendered.contains("TỔNG CỘNG"));
        assert!(!service.has_active_order());

        // The receipt made it to the database
        assert_eq!(service.db.receipts().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_declined_payment_keeps_order_pending_until_retry_succeeds() {
        let (base, session) = service_with_menu().await;
        let provider = Arc::new(FlakyProvider::new(2));
        let service = CheckoutService::with_provider(
            base.db.clone(),
            AppConfig::default(),
            Arc::clone(&provider) as Arc<dyn PaymentProvider>,
        );

        service.start_order();
        add_standard_line(&service).await;

        for _ in 0..2 {
            let err = service.checkout(&session, None, None).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::PaymentError);
            // Declines must not advance the order past PendingPayment
            let summary = service.order_summary().unwrap();
            assert_eq!(summary.state, OrderState::PendingPayment);
        }

        let sale = service.checkout(&session, None, None).await.unwrap();
        assert_eq!(sale.receipt.total_vnd, 98_900);
        assert_eq!(provider.charges.load(Ordering::SeqCst), 3);
        assert!(!service.has_active_order());
    }

    #[tokio::test]
    async fn test_checkout_without_order_fails() {
        let (service, session) = service_with_menu().await;

        let err = service.checkout(&session, None, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderError);
    }

    #[tokio::test]
    async fn test_empty_order_persistence_refused_and_order_kept() {
        let (service, session) = service_with_menu().await;
        service.start_order();

        let err = service.checkout(&session, None, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReceiptRejected);
        // Order survives for the cashier to cancel or fill
        assert!(service.has_active_order());
        assert_eq!(service.db.receipts().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_quantity_rejected() {
        let (service, _) = service_with_menu().await;
        service.start_order();

        let err = service
            .add_item(
                "Trà sữa truyền thống",
                &[],
                SizeOption::Medium,
                0,
                LevelOption::Full,
                LevelOption::Full,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let (service, _) = service_with_menu().await;
        service.start_order();
        let summary = add_standard_line(&service).await;

        let line_id = summary.lines[0].id.to_string();
        let summary = service.remove_item(&line_id).unwrap();
        assert!(summary.lines.is_empty());

        let err = service.remove_item(&line_id).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_cancel_order() {
        let (service, _) = service_with_menu().await;

        assert!(service.cancel_order().is_err());

        service.start_order();
        add_standard_line(&service).await;
        service.cancel_order().unwrap();
        assert!(!service.has_active_order());
    }

    #[tokio::test]
    async fn test_oversized_discount_checks_out_at_zero_is_refused() {
        let (service, session) = service_with_menu().await;
        service.start_order();
        add_standard_line(&service).await;

        service
            .apply_promotion(PromotionStrategy::AmountOff(Money::from_vnd(500_000)))
            .unwrap();
        let summary = service.order_summary().unwrap();
        assert_eq!(summary.total_vnd, 0);

        // total = 0 fails the receipt gate
        let err = service.checkout(&session, None, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReceiptRejected);
    }
}
