//! # Drink Decoration Chain
//!
//! A priced drink is a chain of topping wrappers around a base drink.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              Building "Trà sữa truyền thống" + 2 toppings           │
//! │                                                                     │
//! │  Base   ──►  Topping("Trân châu đen", 8.000đ)                       │
//! │  35.000đ          │                                                 │
//! │                   └──►  Topping("Pudding", 14.000đ)                 │
//! │                                                                     │
//! │  price()       = 35.000 + 8.000 + 14.000 = 57.000đ                  │
//! │  description() = "Trà sữa truyền thống + Trân châu đen + Pudding"   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The chain is a closed enum with exactly two shapes instead of trait
//! objects: recursion over the variant replaces virtual dispatch, and every
//! wrapper exclusively owns its inner drink (singly linked, never cyclic).
//!
//! Size adjustment is NOT part of the chain — it applies exactly once to the
//! fully decorated price, in [`crate::order::OrderItem`].

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Drink
// =============================================================================

/// A priceable drink: a base or a topping wrapping an inner drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drink {
    /// The start of a decoration chain.
    Base {
        name: String,
        price: Money,
    },
    /// A topping layered over an inner drink, adding a fixed surcharge.
    Topping {
        label: String,
        surcharge: Money,
        inner: Box<Drink>,
    },
}

impl Drink {
    /// Creates a base drink.
    pub fn base(name: impl Into<String>, price: Money) -> Self {
        Drink::Base {
            name: name.into(),
            price,
        }
    }

    /// Wraps this drink with one topping, consuming it.
    ///
    /// Toppings may repeat; a duplicate stacks its surcharge again. The core
    /// does not enforce uniqueness — de-duplication, when wanted, happens
    /// upstream in the UI.
    pub fn with_topping(self, label: impl Into<String>, surcharge: Money) -> Self {
        Drink::Topping {
            label: label.into(),
            surcharge,
            inner: Box::new(self),
        }
    }

    /// Total price of the chain: base price plus every surcharge.
    ///
    /// Always ≥ 0 since catalog prices are validated non-negative.
    pub fn price(&self) -> Money {
        match self {
            Drink::Base { price, .. } => *price,
            Drink::Topping {
                surcharge, inner, ..
            } => inner.price() + *surcharge,
        }
    }

    /// Cumulative description: base name, then topping labels in
    /// application order, ` + ` separated.
    pub fn description(&self) -> String {
        match self {
            Drink::Base { name, .. } => name.clone(),
            Drink::Topping { label, inner, .. } => {
                format!("{} + {}", inner.description(), label)
            }
        }
    }

    /// Name of the base drink at the bottom of the chain.
    pub fn base_name(&self) -> &str {
        match self {
            Drink::Base { name, .. } => name,
            Drink::Topping { inner, .. } => inner.base_name(),
        }
    }

    /// Topping labels in application order (innermost first).
    pub fn topping_labels(&self) -> Vec<String> {
        match self {
            Drink::Base { .. } => Vec::new(),
            Drink::Topping { label, inner, .. } => {
                let mut labels = inner.topping_labels();
                labels.push(label.clone());
                labels
            }
        }
    }
}

// =============================================================================
// Catalog-driven decoration build
// =============================================================================

/// Resolves a topping name to its surcharge at decoration time.
///
/// Implemented by the menu catalog collaborator; prices must be stable and
/// non-negative for the duration of one build.
pub trait ToppingCatalog {
    fn lookup_topping_price(&self, name: &str) -> Option<Money>;
}

/// Price lookup over a fixed in-memory list, used for the per-build price
/// snapshot and in tests.
impl ToppingCatalog for Vec<(String, Money)> {
    fn lookup_topping_price(&self, name: &str) -> Option<Money> {
        self.iter()
            .find(|(n, _)| n == name)
            .map(|(_, price)| *price)
    }
}

/// Outcome of folding a topping selection over a base drink.
#[derive(Debug, Clone)]
pub struct DecorationOutcome {
    /// The decorated drink. Toppings missing from the catalog are not part
    /// of the chain, so the price is exactly base + found surcharges.
    pub drink: Drink,
    /// Topping names the catalog could not resolve. A non-empty list is a
    /// data-integrity condition the caller must report (warn, never crash).
    pub missing: Vec<String>,
}

/// Builds a decorated drink as a fold over the selected topping list.
///
/// Each resolved topping wraps the previous drink with a named fixed-price
/// addition, in selection order. A lookup miss leaves the price unchanged
/// and is recorded in [`DecorationOutcome::missing`].
pub fn build_drink(
    base: Drink,
    toppings: &[String],
    catalog: &impl ToppingCatalog,
) -> DecorationOutcome {
    let mut missing = Vec::new();
    let drink = toppings.iter().fold(base, |drink, name| {
        match catalog.lookup_topping_price(name) {
            Some(surcharge) => drink.with_topping(name.clone(), surcharge),
            None => {
                missing.push(name.clone());
                drink
            }
        }
    });

    DecorationOutcome { drink, missing }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<(String, Money)> {
        vec![
            ("Trân châu đen".to_string(), Money::from_vnd(8_000)),
            ("Pudding".to_string(), Money::from_vnd(14_000)),
            ("Kem cheese".to_string(), Money::from_vnd(18_000)),
        ]
    }

    #[test]
    fn test_base_price_and_description() {
        let drink = Drink::base("Trà sữa truyền thống", Money::from_vnd(35_000));
        assert_eq!(drink.price().vnd(), 35_000);
        assert_eq!(drink.description(), "Trà sữa truyền thống");
        assert!(drink.topping_labels().is_empty());
    }

    #[test]
    fn test_decorated_price_is_additive() {
        let drink = Drink::base("Trà sữa truyền thống", Money::from_vnd(35_000))
            .with_topping("Trân châu đen", Money::from_vnd(8_000))
            .with_topping("Pudding", Money::from_vnd(14_000));

        assert_eq!(drink.price().vnd(), 35_000 + 8_000 + 14_000);
        assert_eq!(
            drink.description(),
            "Trà sữa truyền thống + Trân châu đen + Pudding"
        );
        assert_eq!(drink.base_name(), "Trà sữa truyền thống");
        assert_eq!(drink.topping_labels(), vec!["Trân châu đen", "Pudding"]);
    }

    #[test]
    fn test_price_independent_of_decoration_order() {
        let a = Drink::base("Base", Money::from_vnd(30_000))
            .with_topping("X", Money::from_vnd(5_000))
            .with_topping("Y", Money::from_vnd(7_000));
        let b = Drink::base("Base", Money::from_vnd(30_000))
            .with_topping("Y", Money::from_vnd(7_000))
            .with_topping("X", Money::from_vnd(5_000));

        assert_eq!(a.price(), b.price());
        // Descriptions differ (application order is meaningful for display)
        assert_ne!(a.description(), b.description());
    }

    #[test]
    fn test_duplicate_topping_stacks() {
        let drink = Drink::base("Base", Money::from_vnd(30_000))
            .with_topping("Trân châu đen", Money::from_vnd(8_000))
            .with_topping("Trân châu đen", Money::from_vnd(8_000));

        assert_eq!(drink.price().vnd(), 46_000);
        assert_eq!(drink.topping_labels().len(), 2);
    }

    #[test]
    fn test_build_drink_fold() {
        let selections = vec!["Trân châu đen".to_string(), "Pudding".to_string()];
        let outcome = build_drink(
            Drink::base("Trà sữa truyền thống", Money::from_vnd(35_000)),
            &selections,
            &catalog(),
        );

        assert!(outcome.missing.is_empty());
        assert_eq!(outcome.drink.price().vnd(), 57_000);
        assert_eq!(outcome.drink.topping_labels(), selections);
    }

    #[test]
    fn test_build_drink_catalog_miss_leaves_price_unchanged() {
        let selections = vec![
            "Trân châu đen".to_string(),
            "Thạch không tồn tại".to_string(),
        ];
        let outcome = build_drink(
            Drink::base("Trà sữa truyền thống", Money::from_vnd(35_000)),
            &selections,
            &catalog(),
        );

        assert_eq!(outcome.missing, vec!["Thạch không tồn tại"]);
        // The missing topping contributes nothing to price or chain
        assert_eq!(outcome.drink.price().vnd(), 43_000);
        assert_eq!(outcome.drink.topping_labels(), vec!["Trân châu đen"]);
    }

    #[test]
    fn test_build_drink_empty_selection() {
        let outcome = build_drink(
            Drink::base("Trà sữa matcha", Money::from_vnd(48_000)),
            &[],
            &catalog(),
        );
        assert!(outcome.missing.is_empty());
        assert_eq!(outcome.drink.price().vnd(), 48_000);
    }
}
