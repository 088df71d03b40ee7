//! # Promotion Strategies
//!
//! Discount computation as a closed strategy enum, pure over the subtotal.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Promotion Strategies                            │
//! │                                                                     │
//! │  AmountOff(Money)    discount = amount.clamp(0, subtotal)           │
//! │  PercentOff(bps)     discount = subtotal × bps / 10000              │
//! │                                                                     │
//! │  subtotal ──► strategy.discount(subtotal) ──► Order.apply_promotion │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `PercentOff` carries basis points as `u32`, so it is non-negative by
//! construction. It has no upper clamp: a rate above 100% yields a discount
//! above the subtotal, and the order-level `total = max(0, …)` clamp is the
//! single place that floors the result. Clamping here as well would hide
//! misconfigured rates instead of surfacing them in the stored discount.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A discount rule applied to an order subtotal. One per order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionStrategy {
    /// Fixed amount off, resolved into `[0, subtotal]`.
    AmountOff(Money),
    /// Percentage off in basis points (1000 = 10%).
    PercentOff(u32),
}

impl PromotionStrategy {
    /// Computes the discount for a subtotal. Pure: same inputs, same result.
    pub fn discount(&self, subtotal: Money) -> Money {
        match self {
            PromotionStrategy::AmountOff(amount) => amount.clamp_to(subtotal),
            PromotionStrategy::PercentOff(bps) => subtotal.apply_bps(*bps),
        }
    }

    /// Human-readable name for the receipt, e.g. `"Giảm 20.000đ"` or
    /// `"Giảm 10%"`.
    pub fn name(&self) -> String {
        match self {
            PromotionStrategy::AmountOff(amount) => format!("Giảm {}", amount),
            PromotionStrategy::PercentOff(bps) => {
                if bps % 100 == 0 {
                    format!("Giảm {}%", bps / 100)
                } else {
                    format!("Giảm {}.{:02}%", bps / 100, bps % 100)
                }
            }
        }
    }
}
