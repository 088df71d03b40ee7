//! # Repository Module
//!
//! Database repository implementations for Milktea POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Checkout Service                                                       │
//! │       │                                                                 │
//! │       │  db.menu().list_toppings()                                      │
//! │       ▼                                                                 │
//! │  MenuRepository                                                         │
//! │  ├── list_drinks(&self)                                                 │
//! │  ├── lookup_topping_price(&self, name)                                  │
//! │  ├── insert(&self, item)                                                │
//! │  └── update(&self, item)                                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                         │
//! │  • Repositories are cheap clones over the shared pool                   │
//! │  • Services stay free of persistence details                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`menu::MenuRepository`] - Menu catalog (drinks + toppings) CRUD
//! - [`receipt::ReceiptRepository`] - Receipt persistence and reporting
//! - [`user::UserRepository`] - Staff accounts and authentication

pub mod menu;
pub mod receipt;
pub mod user;
