// ABOUTME: Payment processing seam for the credit purchase flow
// ABOUTME: Trait plus a simulated processor with a configurable decline rate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

use crate::errors::{HubError, HubResult};
use async_trait::async_trait;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

/// External payment step behind the credit purchase flow.
///
/// The ledger only mutates its balance after a charge succeeds, so a failing
/// processor can never leave the ledger half-updated.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Attempt to charge for a credit package; returns the transaction id
    ///
    /// # Errors
    ///
    /// Returns `PaymentDeclined` when the charge is refused
    async fn charge(&self, credits: u64, price_cents: u64) -> HubResult<String>;
}

/// Simulated processor declining a fixed fraction of charges.
///
/// A rate of `0.0` always approves and `1.0` always declines, which is what
/// tests pin it to; anything in between samples per charge.
#[derive(Debug, Clone)]
pub struct SimulatedPayments {
    failure_rate: f64,
}

impl SimulatedPayments {
    /// Create a simulated processor with the given decline rate, clamped to `[0, 1]`
    #[must_use]
    pub fn new(failure_rate: f64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedPayments {
    async fn charge(&self, credits: u64, price_cents: u64) -> HubResult<String> {
        let declined = if self.failure_rate >= 1.0 {
            true
        } else if self.failure_rate <= 0.0 {
            false
        } else {
            rand::thread_rng().gen::<f64>() < self.failure_rate
        };

        if declined {
            return Err(HubError::payment_declined(format!(
                "charge of {price_cents} cents for {credits} credits was declined"
            )));
        }

        let transaction_id = format!("TXN-{}", Uuid::new_v4());
        debug!(%transaction_id, credits, price_cents, "simulated charge approved");
        Ok(transaction_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[tokio::test]
    async fn test_zero_rate_always_approves() {
        let payments = SimulatedPayments::new(0.0);
        let txn = payments.charge(10, 2500).await.unwrap();
        assert!(txn.starts_with("TXN-"));
    }

    #[tokio::test]
    async fn test_full_rate_always_declines() {
        let payments = SimulatedPayments::new(1.0);
        let err = payments.charge(10, 2500).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentDeclined);
    }
}
