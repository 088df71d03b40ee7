//! # Error Types
//!
//! Domain-specific error types for milktea-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  milktea-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  milktea-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  Terminal app errors                                                │
//! │  └── ApiError         - What the UI collaborator sees               │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → UI        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, order id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Nothing in the pricing/order core is fatal to the process

use thiserror::Error;

use crate::order::OrderState;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu item cannot be found in the active catalog.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// The order is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Adding items after checkout started
    /// - Checking out a cancelled order
    #[error("Order {order_id} is {state:?}, cannot perform operation")]
    InvalidOrderState { order_id: String, state: OrderState },

    /// No order is currently in progress.
    #[error("No active order")]
    NoActiveOrder,

    /// Receipt snapshot failed validation (zero/negative total or no items).
    #[error("Receipt rejected: {reason}")]
    ReceiptRejected { reason: String },

    /// Payment was declined by the payment provider.
    #[error("Payment declined for {amount} via {method}")]
    PaymentDeclined { amount: String, method: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. Used for early
/// validation at the boundary, before the pricing core runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, unknown sugar level).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate username).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidOrderState {
            order_id: "abc123".to_string(),
            state: OrderState::Paid,
        };
        assert_eq!(
            err.to_string(),
            "Order abc123 is Paid, cannot perform operation"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
