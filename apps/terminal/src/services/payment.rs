//! # Payment Provider
//!
//! The payment seam: the checkout workflow charges through this trait and
//! never learns how money actually moves.
//!
//! The shop takes cash and QR-wallet payments settled outside the system,
//! so the shipped provider is a mock that always succeeds. A real gateway
//! integration would slot in behind the same trait.

use tracing::info;
use uuid::Uuid;

use milktea_core::{CoreResult, Money};

/// A request to collect payment for an order total.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount: Money,
    pub method: String,
}

/// A successful charge.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    /// Provider-side reference, recorded in logs only.
    pub transaction_id: String,
    pub amount: Money,
    pub method: String,
}

/// Collects payment for an order.
///
/// Implementations return `CoreError::PaymentDeclined` on failure; the
/// checkout workflow leaves the order in `PendingPayment` so the cashier
/// can retry.
pub trait PaymentProvider: Send + Sync {
    fn charge(&self, request: PaymentRequest) -> CoreResult<PaymentOutcome>;
}

/// Always-approve provider for cash and externally-settled payments.
#[derive(Debug, Clone, Default)]
pub struct MockPaymentProvider;

impl PaymentProvider for MockPaymentProvider {
    fn charge(&self, request: PaymentRequest) -> CoreResult<PaymentOutcome> {
        let transaction_id = Uuid::new_v4().to_string();

        info!(
            amount = %request.amount,
            method = %request.method,
            transaction_id = %transaction_id,
            "Payment collected"
        );

        Ok(PaymentOutcome {
            transaction_id,
            amount: request.amount,
            method: request.method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_always_succeeds() {
        let provider = MockPaymentProvider;
        let outcome = provider
            .charge(PaymentRequest {
                amount: Money::from_vnd(78_900),
                method: "Tiền mặt".to_string(),
            })
            .unwrap();

        assert_eq!(outcome.amount.vnd(), 78_900);
        assert_eq!(outcome.method, "Tiền mặt");
        assert!(!outcome.transaction_id.is_empty());
    }

    #[test]
    fn test_zero_amount_accepted() {
        // A fully-discounted order still "pays" zero; the receipt gate
        // downstream is what refuses to persist it.
        let provider = MockPaymentProvider;
        assert!(provider
            .charge(PaymentRequest {
                amount: Money::zero(),
                method: "Tiền mặt".to_string(),
            })
            .is_ok());
    }
}
