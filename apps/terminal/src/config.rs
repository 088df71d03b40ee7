//! # Application Configuration
//!
//! Stores terminal configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MILKTEA_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Terminal configuration.
///
/// Most fields have sensible defaults for development; production
/// deployments override them through the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Store name, printed on receipt headers.
    pub store_name: String,

    /// Payment method label used when the cashier doesn't pick one.
    pub default_payment_method: String,

    /// How many receipts `list_recent` style views fetch at once.
    pub recent_receipts_limit: i64,
}

impl Default for AppConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        AppConfig {
            store_name: "Milk Tea Ngon".to_string(),
            default_payment_method: "Tiền mặt".to_string(),
            recent_receipts_limit: 20,
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MILKTEA_STORE_NAME`: Override store name
    /// - `MILKTEA_PAYMENT_METHOD`: Override default payment method label
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(store_name) = std::env::var("MILKTEA_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(method) = std::env::var("MILKTEA_PAYMENT_METHOD") {
            config.default_payment_method = method;
        }

        config
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.milktea.pos/milktea.db`
/// - **Windows**: `%APPDATA%\milktea\pos\milktea.db`
/// - **Linux**: `~/.local/share/milktea-pos/milktea.db`
///
/// ## Development Override
/// Set `MILKTEA_DB_PATH` environment variable to use a custom path.
pub fn database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Check for override
    if let Ok(path) = std::env::var("MILKTEA_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "milktea", "pos")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("milktea.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.default_payment_method, "Tiền mặt");
        assert!(!config.store_name.is_empty());
    }
}
