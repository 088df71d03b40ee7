//! # milktea-db: Database Layer for Milktea POS
//!
//! This crate provides database access for the milk tea terminal.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Milktea POS Data Flow                              │
//! │                                                                         │
//! │  Terminal service (checkout, catalog, users)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    milktea-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │   │   │
//! │  │   │               │    │ MenuRepo      │    │              │   │   │
//! │  │   │ SqlitePool    │◄───│ ReceiptRepo   │    │ 001_init.sql │   │   │
//! │  │   │ Connection    │    │ UserRepo      │    │              │   │   │
//! │  │   │ Management    │    │               │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (app-data directory, WAL mode)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (menu, receipt, user)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use milktea_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/milktea.db");
//! let db = Database::new(config).await?; // runs migrations
//!
//! let drinks = db.menu().list_drinks().await?;
//! db.receipts().save(&receipt).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::menu::MenuRepository;
pub use repository::receipt::{DrinkSales, ReceiptRepository};
pub use repository::user::UserRepository;
