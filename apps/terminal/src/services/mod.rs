//! # Terminal Services
//!
//! The service layer behind the terminal: each service owns one slice of the
//! workflow and is the only place that slice's database access and role
//! checks live.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Service Layout                           │
//! │                                                              │
//! │  catalog      menu lookups, drink decoration pricing         │
//! │  checkout     active order lifecycle and payment             │
//! │  management   users, menu upkeep, sales reports (gated)      │
//! │  payment      provider trait + always-approve mock           │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod checkout;
pub mod management;
pub mod payment;

pub use catalog::CatalogService;
pub use checkout::{CheckoutService, CompletedSale, LineView, OrderSummary};
pub use management::{DailySales, ManagementService};
pub use payment::{MockPaymentProvider, PaymentOutcome, PaymentProvider, PaymentRequest};
