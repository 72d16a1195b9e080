// ABOUTME: Unified error handling for the booking core
// ABOUTME: Defines error codes, the HubError type, and convenience constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! # Unified Error Handling
//!
//! Every store operation in the core fails with a [`HubError`]: a typed
//! [`ErrorCode`] plus a human-readable message suitable for direct display.
//! Errors are always recoverable at the call site; a failed operation has
//! already compensated its own partial state before the error surfaces.

use crate::models::SlotKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the booking core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Ledger balance is lower than the requested debit
    #[serde(rename = "INSUFFICIENT_CREDIT")]
    InsufficientCredit,
    /// The external payment step declined the charge
    #[serde(rename = "PAYMENT_DECLINED")]
    PaymentDeclined,
    /// No time slot exists at the requested facility/date/start time
    #[serde(rename = "SLOT_NOT_FOUND")]
    SlotNotFound,
    /// No active booking with the requested id
    #[serde(rename = "BOOKING_NOT_FOUND")]
    BookingNotFound,
    /// The booking was already checked in once
    #[serde(rename = "ALREADY_CHECKED_IN")]
    AlreadyCheckedIn,
    /// An active confirmed booking already occupies the target slot
    #[serde(rename = "ALREADY_BOOKED")]
    AlreadyBooked,
    /// The operation only applies to confirmed bookings
    #[serde(rename = "NOT_CONFIRMED")]
    NotConfirmed,
    /// Transfer target equals the booking's current beneficiary
    #[serde(rename = "NO_OP_TRANSFER")]
    NoOpTransfer,
    /// No facility with the requested id in the catalog
    #[serde(rename = "FACILITY_NOT_FOUND")]
    FacilityNotFound,
    /// No notification with the requested id in the feed
    #[serde(rename = "NOTIFICATION_NOT_FOUND")]
    NotificationNotFound,
    /// Stored state violates an invariant (e.g. duplicate slot key)
    #[serde(rename = "DATA_INCONSISTENCY")]
    DataInconsistency,
    /// The provided input is invalid
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InsufficientCredit => "Not enough credits for this booking",
            ErrorCode::PaymentDeclined => "Payment processing failed. Please try again",
            ErrorCode::SlotNotFound => "The requested time slot was not found",
            ErrorCode::BookingNotFound => "The requested booking was not found",
            ErrorCode::AlreadyCheckedIn => "This booking was already checked in",
            ErrorCode::AlreadyBooked => "That time slot is already booked",
            ErrorCode::NotConfirmed => "Only confirmed bookings can be modified",
            ErrorCode::NoOpTransfer => "The booking already belongs to that member",
            ErrorCode::FacilityNotFound => "The requested facility was not found",
            ErrorCode::NotificationNotFound => "The requested notification was not found",
            ErrorCode::DataInconsistency => "Stored booking data is inconsistent",
            ErrorCode::InvalidInput => "The provided input is invalid",
        }
    }
}

/// Unified error type for the booking core
#[derive(Debug, Error)]
pub struct HubError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HubError {
    /// Create a new `HubError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for HubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type HubResult<T> = Result<T, HubError>;

/// Convenience functions for creating common errors
impl HubError {
    /// Balance too low for the requested debit
    pub fn insufficient_credit(balance: u64, requested: u64) -> Self {
        Self::new(
            ErrorCode::InsufficientCredit,
            format!("balance is {balance}, need {requested}"),
        )
    }

    /// The simulated payment step declined the charge
    pub fn payment_declined(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PaymentDeclined, message)
    }

    /// No slot matches the composite key
    pub fn slot_not_found(key: &SlotKey) -> Self {
        Self::new(ErrorCode::SlotNotFound, format!("no slot at {key}"))
    }

    /// No active booking with this id
    pub fn booking_not_found(id: u64) -> Self {
        Self::new(ErrorCode::BookingNotFound, format!("booking {id}"))
    }

    /// Second check-in attempt on the same booking
    pub fn already_checked_in(id: u64) -> Self {
        Self::new(ErrorCode::AlreadyCheckedIn, format!("booking {id}"))
    }

    /// An active confirmed booking occupies the target slot
    pub fn already_booked(key: &SlotKey) -> Self {
        Self::new(
            ErrorCode::AlreadyBooked,
            format!("an active booking already occupies {key}"),
        )
    }

    /// Operation requires a confirmed booking
    pub fn not_confirmed(id: u64) -> Self {
        Self::new(ErrorCode::NotConfirmed, format!("booking {id}"))
    }

    /// Transfer target equals the current beneficiary
    pub fn no_op_transfer(family_member_id: u64) -> Self {
        Self::new(
            ErrorCode::NoOpTransfer,
            format!("booking already assigned to member {family_member_id}"),
        )
    }

    /// No facility with this id
    pub fn facility_not_found(id: u64) -> Self {
        Self::new(ErrorCode::FacilityNotFound, format!("facility {id}"))
    }

    /// No notification with this id
    pub fn notification_not_found(id: u64) -> Self {
        Self::new(ErrorCode::NotificationNotFound, format!("notification {id}"))
    }

    /// Stored state violates an invariant
    pub fn data_inconsistency(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataInconsistency, message)
    }

    /// Invalid caller input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }
}
