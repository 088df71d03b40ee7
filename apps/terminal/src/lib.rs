//! # Milktea Terminal
//!
//! The point-of-sale terminal backend: login sessions, the active order, and
//! the services a register screen calls into.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Terminal Architecture                          │
//! │                                                                     │
//! │   ┌──────────┐    ┌───────────────────────────────┐                 │
//! │   │ Session  │───►│           Services            │                 │
//! │   │ (login + │    │  catalog / checkout /         │                 │
//! │   │  roles)  │    │  management / payment         │                 │
//! │   └──────────┘    └───────────┬───────────────────┘                 │
//! │                               │                                     │
//! │            ┌──────────────────┼──────────────────┐                  │
//! │            ▼                  ▼                  ▼                  │
//! │     ┌────────────┐    ┌──────────────┐    ┌─────────────┐           │
//! │     │ActiveOrder │    │ milktea-core │    │ milktea-db  │           │
//! │     │ (in-memory)│    │ (pure rules) │    │ (SQLite)    │           │
//! │     └────────────┘    └──────────────┘    └─────────────┘           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod state;

pub use config::AppConfig;
pub use error::{ApiError, ErrorCode};
pub use services::{CatalogService, CheckoutService, ManagementService};
pub use session::Session;
pub use state::ActiveOrder;

use tracing_subscriber::EnvFilter;

/// Initializes tracing for the terminal process.
///
/// Honors `RUST_LOG` when set; otherwise logs the app at debug and keeps
/// sqlx quiet.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,milktea=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
