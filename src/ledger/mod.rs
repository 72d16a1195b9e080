// ABOUTME: Credit ledger store - balance, append-only usage history, membership status
// ABOUTME: Owns all credit state; debits, refunds, purchases and history replay live here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! Credit ledger.
//!
//! Holds the member's credit balance and an append-only usage history. Every
//! mutation appends one [`LedgerEntry`] whose `balance_after` equals the
//! balance right after that entry applied, so replaying the history from
//! oldest to newest against the initial balance reproduces the current
//! balance exactly.

/// Payment processing seam for the purchase flow
pub mod payments;

pub use payments::{PaymentProcessor, SimulatedPayments};

use crate::constants::defaults;
use crate::errors::{HubError, HubResult};
use crate::models::{
    LedgerEntry, LedgerEntryKind, MembershipState, MembershipStatus, PurchaseReceipt,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

struct LedgerState {
    balance: u64,
    /// Oldest-first; [`LedgerStore::list_history`] reverses for display
    history: Vec<LedgerEntry>,
    next_entry_id: u64,
    membership: MembershipStatus,
}

impl LedgerState {
    fn append_entry(&mut self, kind: LedgerEntryKind, description: String, delta: i64) {
        let entry = LedgerEntry {
            id: self.next_entry_id,
            timestamp: Utc::now(),
            kind,
            description,
            delta,
            balance_after: self.balance,
        };
        self.next_entry_id += 1;
        self.history.push(entry);
    }
}

/// In-memory credit ledger with exclusive ownership of balance and history
pub struct LedgerStore {
    state: Arc<RwLock<LedgerState>>,
    payments: Arc<dyn PaymentProcessor>,
}

impl LedgerStore {
    /// Create a ledger with the given opening balance and payment seam
    #[must_use]
    pub fn new(initial_balance: u64, payments: Arc<dyn PaymentProcessor>) -> Self {
        let now = Utc::now();
        Self {
            state: Arc::new(RwLock::new(LedgerState {
                balance: initial_balance,
                history: Vec::new(),
                next_entry_id: 1,
                membership: MembershipStatus {
                    state: MembershipState::Active,
                    join_date: now,
                    renewal_date: now + Duration::days(defaults::MEMBERSHIP_RENEWAL_DAYS),
                },
            })),
            payments,
        }
    }

    /// Current credit balance
    pub async fn balance(&self) -> u64 {
        self.state.read().await.balance
    }

    /// Spend credits on a booking
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a zero amount; `InsufficientCredit` when the
    /// balance is lower than `amount`. Nothing mutates on failure.
    pub async fn debit(&self, amount: u64, description: impl Into<String>) -> HubResult<u64> {
        if amount == 0 {
            return Err(HubError::invalid_input("debit amount must be positive"));
        }
        let mut state = self.state.write().await;
        if state.balance < amount {
            return Err(HubError::insufficient_credit(state.balance, amount));
        }
        state.balance -= amount;
        state.append_entry(LedgerEntryKind::Booking, description.into(), -(amount as i64));
        debug!(amount, balance = state.balance, "debited credits");
        Ok(state.balance)
    }

    /// Return credits after a cancellation or a rolled-back booking
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a zero amount
    pub async fn refund(&self, amount: u64, description: impl Into<String>) -> HubResult<u64> {
        self.credit_internal(amount, LedgerEntryKind::Refund, description.into())
            .await
    }

    /// Add purchased credits to the balance
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a zero amount
    pub async fn add_credits(&self, amount: u64, description: impl Into<String>) -> HubResult<u64> {
        self.credit_internal(amount, LedgerEntryKind::Purchase, description.into())
            .await
    }

    async fn credit_internal(
        &self,
        amount: u64,
        kind: LedgerEntryKind,
        description: String,
    ) -> HubResult<u64> {
        if amount == 0 {
            return Err(HubError::invalid_input("credit amount must be positive"));
        }
        let mut state = self.state.write().await;
        state.balance += amount;
        state.append_entry(kind, description, amount as i64);
        debug!(amount, balance = state.balance, ?kind, "credited");
        Ok(state.balance)
    }

    /// Buy a credit package through the payment seam.
    ///
    /// The balance only mutates after the charge succeeds, so a declined
    /// payment leaves the ledger untouched.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a zero amount; `PaymentDeclined` when the
    /// processor refuses the charge.
    pub async fn purchase(&self, amount: u64, price_cents: u64) -> HubResult<PurchaseReceipt> {
        if amount == 0 {
            return Err(HubError::invalid_input("purchase amount must be positive"));
        }
        let transaction_id = self.payments.charge(amount, price_cents).await?;
        let balance = self
            .add_credits(
                amount,
                format!(
                    "Purchased {amount} credit package for ${}.{:02}",
                    price_cents / 100,
                    price_cents % 100
                ),
            )
            .await?;
        info!(amount, balance, %transaction_id, "credit purchase completed");
        Ok(PurchaseReceipt {
            balance,
            transaction_id,
        })
    }

    /// Usage history, most recent first
    pub async fn list_history(&self) -> Vec<LedgerEntry> {
        let state = self.state.read().await;
        state.history.iter().rev().cloned().collect()
    }

    /// Current membership status
    pub async fn membership(&self) -> MembershipStatus {
        self.state.read().await.membership.clone()
    }

    /// Update membership state and/or renewal date; unchanged fields keep
    /// their current values
    pub async fn update_membership(
        &self,
        state: Option<MembershipState>,
        renewal_date: Option<DateTime<Utc>>,
    ) -> MembershipStatus {
        let mut guard = self.state.write().await;
        if let Some(new_state) = state {
            guard.membership.state = new_state;
        }
        if let Some(renewal) = renewal_date {
            guard.membership.renewal_date = renewal;
        }
        guard.membership.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn ledger(balance: u64) -> LedgerStore {
        LedgerStore::new(balance, Arc::new(SimulatedPayments::new(0.0)))
    }

    #[tokio::test]
    async fn test_debit_below_balance() {
        let store = ledger(10);
        assert_eq!(store.debit(1, "Gym booking").await.unwrap(), 9);
        assert_eq!(store.balance().await, 9);
    }

    #[tokio::test]
    async fn test_debit_insufficient() {
        let store = ledger(0);
        let err = store.debit(1, "Gym booking").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientCredit);
        assert_eq!(store.balance().await, 0);
        assert!(store.list_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_amounts_rejected() {
        let store = ledger(5);
        assert_eq!(
            store.debit(0, "x").await.unwrap_err().code,
            ErrorCode::InvalidInput
        );
        assert_eq!(
            store.refund(0, "x").await.unwrap_err().code,
            ErrorCode::InvalidInput
        );
    }

    #[tokio::test]
    async fn test_entry_kinds() {
        let store = ledger(5);
        store.debit(1, "Pool booking").await.unwrap();
        store.refund(1, "Pool booking cancelled").await.unwrap();
        store.add_credits(10, "Added 10 credits").await.unwrap();

        let history = store.list_history().await;
        assert_eq!(history.len(), 3);
        // Most recent first
        assert_eq!(history[0].kind, LedgerEntryKind::Purchase);
        assert_eq!(history[1].kind, LedgerEntryKind::Refund);
        assert_eq!(history[2].kind, LedgerEntryKind::Booking);
    }
}
