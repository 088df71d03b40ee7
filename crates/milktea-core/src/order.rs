//! # Order & State Machine
//!
//! The in-progress order: insertion-ordered items plus a closed lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Order Lifecycle                              │
//! │                                                                     │
//! │            AddItem/RemoveItem                                       │
//! │                 ┌────┐                                              │
//! │                 ▼    │                                              │
//! │              ┌─────────┐  Checkout   ┌────────────────┐             │
//! │              │  Draft  │────────────►│ PendingPayment │             │
//! │              └─────────┘             └────────────────┘             │
//! │                   │                     │         │                 │
//! │                   │ Cancel       Cancel │         │ Checkout        │
//! │                   ▼                     ▼         ▼                 │
//! │              ┌───────────┐          ┌──────┐                        │
//! │              │ Cancelled │          │ Paid │  (terminal: every op   │
//! │              └───────────┘          └──────┘   is an explicit no-op)│
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions live in a single pure, total function over (state, op): every
//! combination maps to a next state plus an effect, so "op not allowed here"
//! is a first-class [`OpEffect::Ignore`] result rather than a panic or a
//! forgotten branch. Checkout twice lands on `Paid` and stays there.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::drink::Drink;
use crate::money::Money;
use crate::promotion::PromotionStrategy;
use crate::types::{LevelOption, SizeOption};

// =============================================================================
// State Machine
// =============================================================================

/// Order lifecycle state. Closed set: no state exists outside these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    /// Items may be added and removed.
    Draft,
    /// Item list is locked; awaiting payment.
    PendingPayment,
    /// Terminal. Payment collected, receipt eligible for persistence.
    Paid,
    /// Terminal. Abandoned before payment.
    Cancelled,
}

/// Operations the terminal can request against an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOp {
    AddItem,
    RemoveItem,
    Checkout,
    Cancel,
}

/// What a transition did with the requested operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpEffect {
    /// The operation's side effect (mutate items, advance state) happens.
    Apply,
    /// The operation is a no-op in this state; state is returned unchanged.
    Ignore,
}

/// The transition table as a pure, total function.
///
/// Totality is the point: callers never match on (state, op) themselves, and
/// adding a state or op forces this table to account for it.
pub const fn transition(state: OrderState, op: OrderOp) -> (OrderState, OpEffect) {
    use OpEffect::{Apply, Ignore};
    use OrderState::{Cancelled, Draft, Paid, PendingPayment};

    match (state, op) {
        (Draft, OrderOp::AddItem) => (Draft, Apply),
        (Draft, OrderOp::RemoveItem) => (Draft, Apply),
        (Draft, OrderOp::Checkout) => (PendingPayment, Apply),
        (Draft, OrderOp::Cancel) => (Cancelled, Apply),

        (PendingPayment, OrderOp::AddItem) => (PendingPayment, Ignore),
        (PendingPayment, OrderOp::RemoveItem) => (PendingPayment, Ignore),
        (PendingPayment, OrderOp::Checkout) => (Paid, Apply),
        (PendingPayment, OrderOp::Cancel) => (Cancelled, Apply),

        // Terminal states ignore everything, explicitly.
        (Paid, _) => (Paid, Ignore),
        (Cancelled, _) => (Cancelled, Ignore),
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// One line of an order: a decorated drink plus its customization.
///
/// The topping list is derived from the drink chain, never stored
/// separately, so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub drink: Drink,
    pub size: SizeOption,
    /// Always ≥ 1; validated at the boundary.
    pub quantity: i64,
    pub sugar_level: LevelOption,
    pub ice_level: LevelOption,
}

impl OrderItem {
    pub fn new(
        drink: Drink,
        size: SizeOption,
        quantity: i64,
        sugar_level: LevelOption,
        ice_level: LevelOption,
    ) -> Self {
        OrderItem {
            id: Uuid::new_v4(),
            drink,
            size,
            quantity,
            sugar_level,
            ice_level,
        }
    }

    /// Size-adjusted price of one cup: the size multiplier applied exactly
    /// once to the fully decorated price.
    pub fn unit_price(&self) -> Money {
        self.size.adjust(self.drink.price())
    }

    /// `unit_price × quantity`. The authoritative number for display and
    /// persistence.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Topping labels in application order, read off the drink chain.
    pub fn topping_labels(&self) -> Vec<String> {
        self.drink.topping_labels()
    }

    /// Display line in receipt style, e.g.
    /// `"Trà sữa truyền thống + Trân châu đen (Large) x2"`.
    pub fn display_name(&self) -> String {
        format!(
            "{} ({}) x{}",
            self.drink.description(),
            self.size,
            self.quantity
        )
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order under construction at the terminal.
///
/// Owns its items exclusively; items never outlive the order. All mutating
/// methods route through [`transition`], so the lifecycle table is the only
/// place that decides what is allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub items: Vec<OrderItem>,
    pub state: OrderState,
    /// Discount already resolved against the subtotal at application time.
    pub discount: Money,
    /// Name of the applied promotion, for the receipt.
    pub promotion_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Order {
    pub fn new() -> Self {
        Order {
            id: Uuid::new_v4(),
            items: Vec::new(),
            state: OrderState::Draft,
            discount: Money::zero(),
            promotion_name: None,
            created_at: chrono::Utc::now(),
        }
    }

    /// Adds an item. Returns `true` if the order accepted it; after
    /// checkout the item list is locked and the add is silently ignored.
    pub fn add_item(&mut self, item: OrderItem) -> bool {
        let (next, effect) = transition(self.state, OrderOp::AddItem);
        self.state = next;
        match effect {
            OpEffect::Apply => {
                self.items.push(item);
                true
            }
            OpEffect::Ignore => false,
        }
    }

    /// Removes the item with the given id. Returns `true` only if the state
    /// allowed removal and the item existed.
    pub fn remove_item(&mut self, item_id: Uuid) -> bool {
        let (next, effect) = transition(self.state, OrderOp::RemoveItem);
        self.state = next;
        match effect {
            OpEffect::Apply => {
                let before = self.items.len();
                self.items.retain(|item| item.id != item_id);
                self.items.len() < before
            }
            OpEffect::Ignore => false,
        }
    }

    /// Advances the lifecycle: Draft → PendingPayment → Paid.
    ///
    /// Idempotent once Paid. Returns the state after the transition.
    pub fn checkout(&mut self) -> OrderState {
        let (next, _) = transition(self.state, OrderOp::Checkout);
        self.state = next;
        self.state
    }

    /// Cancels the order from Draft or PendingPayment. Returns `true` if
    /// the cancellation took effect.
    pub fn cancel(&mut self) -> bool {
        let (next, effect) = transition(self.state, OrderOp::Cancel);
        self.state = next;
        matches!(effect, OpEffect::Apply)
    }

    /// Resolves a promotion against the current subtotal and stores the
    /// result. Exactly one promotion per order; a second application
    /// replaces the first.
    pub fn apply_promotion(&mut self, strategy: &PromotionStrategy) {
        self.discount = strategy.discount(self.subtotal());
        self.promotion_name = Some(strategy.name());
    }

    /// Clears any applied promotion.
    pub fn clear_promotion(&mut self) {
        self.discount = Money::zero();
        self.promotion_name = None;
    }

    /// Sum of line totals over all items. Zero for an empty order.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// `max(0, subtotal − discount)` — the order-level safety net. No
    /// promotion can push the total below zero.
    pub fn total(&self) -> Money {
        let raw = self.subtotal() - self.discount;
        if raw.is_negative() {
            Money::zero()
        } else {
            raw
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total number of cups across all lines.
    pub fn cup_count(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
