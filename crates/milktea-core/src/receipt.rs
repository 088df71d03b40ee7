//! # Receipt Snapshot
//!
//! An immutable record of a paid order. Prices, names, and customization
//! levels are frozen into plain strings and đồng amounts at creation time:
//! later menu edits must never change what a persisted receipt says.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Receipt Flow                                 │
//! │                                                                     │
//! │  Order (Paid) ──► Receipt::from_order ──► validate() ──► db save    │
//! │                         │                                           │
//! │                         └──► render() ──► console / printer         │
//! │                                                                     │
//! │  validation rejects: empty item list, total ≤ 0                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::order::{Order, OrderItem};

// =============================================================================
// Receipt Item
// =============================================================================

/// One frozen line of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub id: Uuid,
    /// Base drink name at sale time.
    pub drink_name: String,
    /// Topping labels at sale time, application order.
    pub toppings: Vec<String>,
    pub size: String,
    pub sugar_level: String,
    pub ice_level: String,
    pub quantity: i64,
    pub unit_price_vnd: i64,
    pub line_total_vnd: i64,
}

impl ReceiptItem {
    fn from_order_item(item: &OrderItem) -> Self {
        ReceiptItem {
            id: Uuid::new_v4(),
            drink_name: item.drink.base_name().to_string(),
            toppings: item.topping_labels(),
            size: item.size.to_string(),
            sugar_level: item.sugar_level.to_string(),
            ice_level: item.ice_level.to_string(),
            quantity: item.quantity,
            unit_price_vnd: item.unit_price().vnd(),
            line_total_vnd: item.line_total().vnd(),
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Frozen record of a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub order_id: Uuid,
    /// Username of the staff member who rang up the sale.
    pub cashier: String,
    pub items: Vec<ReceiptItem>,
    pub subtotal_vnd: i64,
    pub discount_vnd: i64,
    pub total_vnd: i64,
    pub promotion_name: Option<String>,
    pub payment_method: String,
    pub customer_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Receipt {
    /// Snapshots a paid order. The caller is responsible for having driven
    /// the order to `Paid`; this constructor only copies numbers out.
    pub fn from_order(
        order: &Order,
        cashier: impl Into<String>,
        payment_method: impl Into<String>,
        customer_note: Option<String>,
    ) -> Self {
        Receipt {
            id: Uuid::new_v4(),
            order_id: order.id,
            cashier: cashier.into(),
            items: order.items.iter().map(ReceiptItem::from_order_item).collect(),
            subtotal_vnd: order.subtotal().vnd(),
            discount_vnd: order.discount.vnd(),
            total_vnd: order.total().vnd(),
            promotion_name: order.promotion_name.clone(),
            payment_method: payment_method.into(),
            customer_note,
            created_at: Utc::now(),
        }
    }

    pub fn subtotal(&self) -> Money {
        Money::from_vnd(self.subtotal_vnd)
    }

    pub fn discount(&self) -> Money {
        Money::from_vnd(self.discount_vnd)
    }

    pub fn total(&self) -> Money {
        Money::from_vnd(self.total_vnd)
    }

    /// Gate before persistence: a receipt with no items or a non-positive
    /// total is not a sale and must not reach storage.
    pub fn validate(&self) -> CoreResult<()> {
        if self.items.is_empty() {
            return Err(CoreError::ReceiptRejected {
                reason: "receipt has no items".to_string(),
            });
        }
        if self.total_vnd <= 0 {
            return Err(CoreError::ReceiptRejected {
                reason: format!("total must be positive, got {}", self.total()),
            });
        }
        Ok(())
    }

    /// Renders the printable receipt text.
    ///
    /// Layout follows the shop's paper format: centered header, per-item
    /// detail with toppings and levels, totals block, optional note, footer.
    pub fn render(&self, store_name: &str) -> String {
        const WIDTH: usize = 38;
        let rule = "=".repeat(WIDTH);
        let thin = "-".repeat(WIDTH);

        let mut out = String::new();
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("{:^WIDTH$}\n", store_name));
        out.push_str(&format!("{:^WIDTH$}\n", "HÓA ĐƠN THANH TOÁN"));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("Số HĐ: {}\n", self.id));
        out.push_str(&format!(
            "Ngày: {}\n",
            self.created_at.format("%d/%m/%Y %H:%M")
        ));
        out.push_str(&format!("Thu ngân: {}\n", self.cashier));
        out.push_str(&thin);
        out.push('\n');

        for item in &self.items {
            out.push_str(&format!("{} ({})\n", item.drink_name, item.size));
            for topping in &item.toppings {
                out.push_str(&format!("  + {}\n", topping));
            }
            out.push_str(&format!(
                "  Đường: {} | Đá: {}\n",
                item.sugar_level, item.ice_level
            ));
            out.push_str(&format!(
                "  {} x {} = {}\n",
                item.quantity,
                Money::from_vnd(item.unit_price_vnd),
                Money::from_vnd(item.line_total_vnd)
            ));
        }

        out.push_str(&thin);
        out.push('\n');
        out.push_str(&format!("Tạm tính:  {:>12}\n", self.subtotal().to_string()));
        if self.discount_vnd > 0 {
            let label = self.promotion_name.as_deref().unwrap_or("Khuyến mãi");
            out.push_str(&format!(
                "Giảm giá:  {:>12}  ({})\n",
                self.discount().to_string(),
                label
            ));
        }
        out.push_str(&format!("TỔNG CỘNG: {:>12}\n", self.total().to_string()));
        out.push_str(&format!("Thanh toán: {}\n", self.payment_method));
        if let Some(note) = &self.customer_note {
            out.push_str(&format!("Ghi chú: {}\n", note));
        }
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("{:^WIDTH$}\n", "Cảm ơn quý khách!"));
        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drink::Drink;
    use crate::promotion::PromotionStrategy;
    use crate::types::{LevelOption, SizeOption};

    fn paid_order() -> Order {
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
        order
    }

    #[test]
    fn test_snapshot_freezes_order_numbers() {
        let order = paid_order();
        let receipt = Receipt::from_order(&order, "admin", "Tiền mặt", None);

        assert_eq!(receipt.order_id, order.id);
        assert_eq!(receipt.subtotal_vnd, 98_900);
        assert_eq!(receipt.discount_vnd, 20_000);
        assert_eq!(receipt.total_vnd, 78_900);
        assert_eq!(receipt.items.len(), 1);

        let line = &receipt.items[0];
        assert_eq!(line.drink_name, "Trà sữa truyền thống");
        assert_eq!(line.toppings, vec!["Trân châu đen"]);
        assert_eq!(line.size, "Large");
        assert_eq!(line.sugar_level, "50%");
        assert_eq!(line.unit_price_vnd, 49_450);
        assert_eq!(line.line_total_vnd, 98_900);
    }

    #[test]
    fn test_validate_accepts_normal_receipt() {
        let receipt = Receipt::from_order(&paid_order(), "admin", "Tiền mặt", None);
        assert!(receipt.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_receipt() {
        let mut order = Order::new();
        order.checkout();
        order.checkout();
        let receipt = Receipt::from_order(&order, "admin", "Tiền mặt", None);

        let err = receipt.validate().unwrap_err();
        assert!(matches!(err, CoreError::ReceiptRejected { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_total() {
        let mut order = Order::new();
        let drink = Drink::base("Trà sữa truyền thống", Money::from_vnd(35_000));
        order.add_item(OrderItem::new(
            drink,
            SizeOption::Medium,
            1,
            LevelOption::Full,
            LevelOption::Full,
        ));
        order.apply_promotion(&PromotionStrategy::AmountOff(Money::from_vnd(100_000)));
        order.checkout();
        order.checkout();

        let receipt = Receipt::from_order(&order, "admin", "Tiền mặt", None);
        assert_eq!(receipt.total_vnd, 0);
        assert!(receipt.validate().is_err());
    }

    #[test]
    fn test_render_contains_key_lines() {
        let order = paid_order();
        let receipt = Receipt::from_order(
            &order,
            "admin",
            "Tiền mặt",
            Some("Ít đá".to_string()),
        );
        let text = receipt.render("Milk Tea Ngon");

        assert!(text.contains("Milk Tea Ngon"));
        assert!(text.contains("Thu ngân: admin"));
        assert!(text.contains("Trà sữa truyền thống (Large)"));
        assert!(text.contains("+ Trân châu đen"));
        assert!(text.contains("Đường: 50% | Đá: 100%"));
        assert!(text.contains("2 x 49.450đ = 98.900đ"));
        assert!(text.contains("Tạm tính:"));
        assert!(text.contains("98.900đ"));
        assert!(text.contains("Giảm giá:"));
        assert!(text.contains("TỔNG CỘNG:"));
        assert!(text.contains("78.900đ"));
        assert!(text.contains("Ghi chú: Ít đá"));
        assert!(text.contains("Cảm ơn quý khách!"));
    }
}
