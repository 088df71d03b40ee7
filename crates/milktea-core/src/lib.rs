//! # milktea-core: Pure Business Logic for the Milk Tea POS
//!
//! This crate is the **heart** of the milk tea terminal. It contains all
//! pricing and order logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Milk Tea POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Cashier UI (external collaborator)             │   │
//! │  │    Menu pick ──► Customize ──► Cart ──► Pay ──► Receipt         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/terminal (services)                     │   │
//! │  │    catalog, checkout, payment, session, active order state      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ milktea-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌─────────┐ ┌───────┐ │   │
//! │  │   │  drink  │ │  order  │ │ promotion │ │ receipt │ │ money │ │   │
//! │  │   │  chain  │ │  + FSM  │ │ strategy  │ │snapshot │ │ (đồng)│ │   │
//! │  │   └─────────┘ └─────────┘ └───────────┘ └─────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK BEYOND TIMESTAMPS • PURE      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  milktea-db (Database Layer)                    │   │
//! │  │           SQLite queries, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`drink`] - Decoration chain: base drink plus stacked toppings
//! - [`order`] - Order aggregate and the closed lifecycle state machine
//! - [`promotion`] - Discount strategies (amount off, percent off)
//! - [`receipt`] - Frozen sale snapshot and printable rendering
//! - [`money`] - Integer đồng arithmetic (no floating point!)
//! - [`types`] - Menu items, sizes, sugar/ice levels, users and roles
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary input checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; recomputing a price
//!    never changes it
//! 2. **No I/O**: database, network, and file system access are FORBIDDEN
//! 3. **Integer Money**: all amounts are whole đồng (i64), multipliers are
//!    basis points
//! 4. **Closed Sets**: drink shapes, order states, promotion kinds, and
//!    sugar/ice levels are enums, so every match is checked by the compiler
//!
//! ## Example Usage
//!
//! ```rust
//! use milktea_core::drink::Drink;
//! use milktea_core::money::Money;
//! use milktea_core::types::SizeOption;
//!
//! let drink = Drink::base("Trà sữa truyền thống", Money::from_vnd(35_000))
//!     .with_topping("Trân châu đen", Money::from_vnd(8_000));
//!
//! // Size multiplies the fully decorated price, exactly once
//! let unit = SizeOption::Large.adjust(drink.price());
//! assert_eq!(unit.vnd(), 49_450);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod drink;
pub mod error;
pub mod money;
pub mod order;
pub mod promotion;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use milktea_core::Money` instead of
// `use milktea_core::money::Money`

pub use drink::{build_drink, DecorationOutcome, Drink, ToppingCatalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{transition, OpEffect, Order, OrderItem, OrderOp, OrderState};
pub use promotion::PromotionStrategy;
pub use receipt::{Receipt, ReceiptItem};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single order.
///
/// ## Business Reason
/// A single-terminal walk-up order never legitimately grows past this;
/// the cap catches UI loops gone wrong.
pub const MAX_ORDER_ITEMS: usize = 50;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Maximum length of menu item and topping names, in characters.
pub const MAX_NAME_LEN: usize = 100;
