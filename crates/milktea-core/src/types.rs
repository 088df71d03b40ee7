//! # Domain Types
//!
//! Core domain types used throughout Milktea POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐         │
//! │  │   MenuItem    │   │  SizeOption   │   │  LevelOption  │         │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │         │
//! │  │  id (UUID)    │   │  Small ×0.85  │   │  0% … 100%    │         │
//! │  │  name         │   │  Medium ×1.0  │   │  (sugar, ice) │         │
//! │  │  price_vnd    │   │  Large ×1.15  │   └───────────────┘         │
//! │  │  category     │   └───────────────┘                             │
//! │  └───────────────┘                                                 │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐                             │
//! │  │     User      │   │   UserRole    │                             │
//! │  │  ───────────  │   │  ───────────  │                             │
//! │  │  id (UUID)    │   │  Admin        │                             │
//! │  │  username     │   │  Manager      │                             │
//! │  │  role         │   │  Employee     │                             │
//! │  └───────────────┘   └───────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Menu Category
// =============================================================================

/// Which half of the menu an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    /// A base drink that starts a decoration chain.
    MilkTea,
    /// A topping that wraps a drink with a fixed surcharge.
    Topping,
}

// =============================================================================
// Menu Item
// =============================================================================

/// A catalog entry: either a base drink or a topping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Base price (drinks) or surcharge (toppings) in đồng. Never negative.
    pub price_vnd: i64,

    /// Drink or topping.
    pub category: MenuCategory,

    /// Optional description for menu details.
    pub description: Option<String>,

    /// Whether the item can currently be ordered (soft delete).
    pub is_available: bool,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_vnd(self.price_vnd)
    }
}

// =============================================================================
// Size Option
// =============================================================================

/// Cup size, priced as a fixed multiplier over the fully decorated price.
///
/// The multiplier applies exactly once, to the total of base drink plus all
/// toppings, never per-topping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeOption {
    /// ×0.85
    Small,
    /// ×1.0 (base price)
    Medium,
    /// ×1.15
    Large,
}

impl SizeOption {
    /// Price multiplier in basis points (10000 = ×1.0).
    #[inline]
    pub const fn multiplier_bps(&self) -> u32 {
        match self {
            SizeOption::Small => 8_500,
            SizeOption::Medium => 10_000,
            SizeOption::Large => 11_500,
        }
    }

    /// Applies the size multiplier to a decorated price.
    ///
    /// Pure function of (price, size): recomputation always yields the same
    /// result.
    #[inline]
    pub fn adjust(&self, decorated_price: Money) -> Money {
        decorated_price.apply_bps(self.multiplier_bps())
    }
}

impl Default for SizeOption {
    fn default() -> Self {
        SizeOption::Medium
    }
}

impl fmt::Display for SizeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SizeOption::Small => "Small",
            SizeOption::Medium => "Medium",
            SizeOption::Large => "Large",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Level Option (sugar / ice)
// =============================================================================

/// Sugar or ice level: a closed five-step scale.
///
/// The UI offers exactly these five values; free-form percentages never
/// reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelOption {
    #[serde(rename = "0%")]
    None,
    #[serde(rename = "25%")]
    Quarter,
    #[serde(rename = "50%")]
    Half,
    #[serde(rename = "75%")]
    ThreeQuarters,
    #[serde(rename = "100%")]
    Full,
}

impl LevelOption {
    /// The display/persistence string, e.g. `"75%"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LevelOption::None => "0%",
            LevelOption::Quarter => "25%",
            LevelOption::Half => "50%",
            LevelOption::ThreeQuarters => "75%",
            LevelOption::Full => "100%",
        }
    }
}

impl Default for LevelOption {
    fn default() -> Self {
        LevelOption::Full
    }
}

impl fmt::Display for LevelOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelOption {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0%" => Ok(LevelOption::None),
            "25%" => Ok(LevelOption::Quarter),
            "50%" => Ok(LevelOption::Half),
            "75%" => Ok(LevelOption::ThreeQuarters),
            "100%" => Ok(LevelOption::Full),
            other => Err(ValidationError::InvalidFormat {
                field: "level".to_string(),
                reason: format!("'{}' is not one of 0%, 25%, 50%, 75%, 100%", other),
            }),
        }
    }
}

// =============================================================================
// User & Role
// =============================================================================

/// Staff role, ordered from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Admin => "Admin",
            UserRole::Manager => "Manager",
            UserRole::Employee => "Employee",
        };
        f.write_str(s)
    }
}

/// A staff member who can log into the terminal.
///
/// Credential storage itself is a collaborator concern; the core only
/// carries the fields the terminal needs for session and permission checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Only admins may manage user accounts.
    pub fn can_manage_users(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Admins and managers may view sales reports.
    pub fn can_view_reports(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Manager)
    }

    /// Admins and managers may edit the menu.
    pub fn can_manage_menu(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Manager)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_multipliers() {
        assert_eq!(SizeOption::Small.multiplier_bps(), 8_500);
        assert_eq!(SizeOption::Medium.multiplier_bps(), 10_000);
        assert_eq!(SizeOption::Large.multiplier_bps(), 11_500);
    }

    #[test]
    fn test_size_adjust_applies_to_decorated_price() {
        let decorated = Money::from_vnd(43_000);
        assert_eq!(SizeOption::Large.adjust(decorated).vnd(), 49_450);
        assert_eq!(SizeOption::Medium.adjust(decorated).vnd(), 43_000);
        assert_eq!(SizeOption::Small.adjust(decorated).vnd(), 36_550);
    }

    #[test]
    fn test_size_adjust_idempotent_recomputation() {
        let decorated = Money::from_vnd(43_000);
        let first = SizeOption::Large.adjust(decorated);
        let second = SizeOption::Large.adjust(decorated);
        assert_eq!(first, second);
    }

    #[test]
    fn test_level_round_trip() {
        for level in [
            LevelOption::None,
            LevelOption::Quarter,
            LevelOption::Half,
            LevelOption::ThreeQuarters,
            LevelOption::Full,
        ] {
            assert_eq!(level.as_str().parse::<LevelOption>().unwrap(), level);
        }
        assert!("33%".parse::<LevelOption>().is_err());
    }

    #[test]
    fn test_default_customization_is_full() {
        assert_eq!(LevelOption::default(), LevelOption::Full);
        assert_eq!(SizeOption::default(), SizeOption::Medium);
    }

    #[test]
    fn test_role_permissions() {
        let mut user = User {
            id: "u1".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            full_name: "Administrator".to_string(),
            role: UserRole::Admin,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        };

        assert!(user.can_manage_users());
        assert!(user.can_view_reports());
        assert!(user.can_manage_menu());

        user.role = UserRole::Manager;
        assert!(!user.can_manage_users());
        assert!(user.can_view_reports());
        assert!(user.can_manage_menu());

        user.role = UserRole::Employee;
        assert!(!user.can_manage_users());
        assert!(!user.can_view_reports());
        assert!(!user.can_manage_menu());
    }
}
