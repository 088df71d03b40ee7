//! # Input Validation
//!
//! Boundary checks for caller-supplied input. Everything here runs before
//! the pricing core does, so the core only ever sees validated values.
//!
//! Validation functions return `Result<(), ValidationError>` and are cheap
//! enough to call on every request.

use uuid::Uuid;

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_NAME_LEN, MAX_ORDER_ITEMS};

/// Item quantity: at least one cup, bounded against fat-finger input.
pub fn validate_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Menu prices are non-negative đồng amounts.
pub fn validate_price_vnd(price_vnd: i64) -> Result<(), ValidationError> {
    if price_vnd < 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Menu item / topping name: non-empty after trimming, bounded length.
pub fn validate_item_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Usernames: 3-32 chars, ASCII alphanumeric plus `_` and `.`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }
    if trimmed.len() < 3 || trimmed.len() > 32 {
        return Err(ValidationError::OutOfRange {
            field: "username length".to_string(),
            min: 3,
            max: 32,
        });
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "only letters, digits, '_' and '.' are allowed".to_string(),
        });
    }
    Ok(())
}

/// Parses a caller-supplied id string into a [`Uuid`].
pub fn parse_uuid(field: &str, value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a valid UUID", value),
    })
}

/// An order can only take so many lines before it stops being one order.
pub fn validate_order_capacity(current_items: usize) -> Result<(), ValidationError> {
    if current_items >= MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "order items".to_string(),
            min: 0,
            max: MAX_ORDER_ITEMS as i64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_price_non_negative() {
        assert!(validate_price_vnd(0).is_ok());
        assert!(validate_price_vnd(35_000).is_ok());
        assert!(validate_price_vnd(-1).is_err());
    }

    #[test]
    fn test_item_name() {
        assert!(validate_item_name("Trà sữa truyền thống").is_ok());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("thu.ngan_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn test_parse_uuid() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(parse_uuid("order_id", &id.to_string()).unwrap(), id);
        assert!(parse_uuid("order_id", "not-a-uuid").is_err());
    }

    #[test]
    fn test_order_capacity() {
        assert!(validate_order_capacity(0).is_ok());
        assert!(validate_order_capacity(MAX_ORDER_ITEMS - 1).is_ok());
        assert!(validate_order_capacity(MAX_ORDER_ITEMS).is_err());
    }
}
