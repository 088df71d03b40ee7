//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer đồng                                         │
//! │    VND has no minor unit, so every price is a whole number of       │
//! │    đồng held in an i64. Size multipliers and percentage discounts   │
//! │    are basis-point integer math with explicit rounding.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use milktea_core::money::Money;
//!
//! let price = Money::from_vnd(35_000);
//! let large = price.apply_bps(11_500); // ×1.15
//! assert_eq!(large.vnd(), 40_250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in Vietnamese đồng.
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results of `subtotal - discount` may dip
///   below zero before the order-level clamp
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole number of đồng.
    #[inline]
    pub const fn from_vnd(vnd: i64) -> Self {
        Money(vnd)
    }

    /// Returns the value in đồng.
    #[inline]
    pub const fn vnd(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a basis-point multiplier with half-up rounding.
    ///
    /// ## Arguments
    /// * `bps` - Multiplier in basis points (10000 = ×1.0, 11500 = ×1.15)
    ///
    /// ## Example
    /// ```rust
    /// use milktea_core::money::Money;
    ///
    /// let decorated = Money::from_vnd(43_000);
    /// assert_eq!(decorated.apply_bps(11_500).vnd(), 49_450); // Large ×1.15
    /// assert_eq!(decorated.apply_bps(8_500).vnd(), 36_550);  // Small ×0.85
    /// ```
    pub fn apply_bps(&self, bps: u32) -> Money {
        // Use i128 to prevent overflow on large amounts.
        // Formula: (amount * bps + 5000) / 10000 — the +5000 rounds half up.
        let adjusted = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(adjusted as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use milktea_core::money::Money;
    ///
    /// let unit_price = Money::from_vnd(49_450);
    /// assert_eq!(unit_price.multiply_quantity(2).vnd(), 98_900);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Clamps this value into `[0, upper]`.
    ///
    /// Used by the amount-off promotion: a discount may never be negative
    /// and may never exceed the order subtotal.
    pub fn clamp_to(&self, upper: Money) -> Money {
        Money(self.0.clamp(0, upper.0.max(0)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display groups thousands with `.` and suffixes `đ`, the format used on
/// printed receipts: `49450` → `"49.450đ"`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        write!(f, "{}{}đ", sign, grouped)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over line totals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vnd() {
        let money = Money::from_vnd(35_000);
        assert_eq!(money.vnd(), 35_000);
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(format!("{}", Money::from_vnd(35_000)), "35.000đ");
        assert_eq!(format!("{}", Money::from_vnd(49_450)), "49.450đ");
        assert_eq!(format!("{}", Money::from_vnd(500)), "500đ");
        assert_eq!(format!("{}", Money::from_vnd(1_234_567)), "1.234.567đ");
        assert_eq!(format!("{}", Money::from_vnd(0)), "0đ");
        assert_eq!(format!("{}", Money::from_vnd(-8_000)), "-8.000đ");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_vnd(35_000);
        let b = Money::from_vnd(8_000);

        assert_eq!((a + b).vnd(), 43_000);
        assert_eq!((a - b).vnd(), 27_000);
        assert_eq!((a * 2).vnd(), 70_000);
    }

    #[test]
    fn test_apply_bps_size_multipliers() {
        let decorated = Money::from_vnd(43_000);
        assert_eq!(decorated.apply_bps(11_500).vnd(), 49_450); // Large
        assert_eq!(decorated.apply_bps(10_000).vnd(), 43_000); // Medium
        assert_eq!(decorated.apply_bps(8_500).vnd(), 36_550); // Small
    }

    #[test]
    fn test_apply_bps_rounds_half_up() {
        // 35.001 × 0.85 = 29.750,85 → 29.751
        assert_eq!(Money::from_vnd(35_001).apply_bps(8_500).vnd(), 29_751);
    }

    #[test]
    fn test_clamp_to() {
        let subtotal = Money::from_vnd(98_900);
        assert_eq!(Money::from_vnd(20_000).clamp_to(subtotal).vnd(), 20_000);
        assert_eq!(Money::from_vnd(150_000).clamp_to(subtotal).vnd(), 98_900);
        assert_eq!(Money::from_vnd(-5_000).clamp_to(subtotal).vnd(), 0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [35_000, 8_000, 500].iter().map(|&v| Money::from_vnd(v)).sum();
        assert_eq!(total.vnd(), 43_500);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_vnd(100).is_positive());
        assert!(Money::from_vnd(-100).is_negative());
    }
}
