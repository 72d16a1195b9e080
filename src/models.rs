// ABOUTME: Core domain models for facilities, time slots, bookings, credits and notifications
// ABOUTME: Shared data structures passed between the stores and their callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! Domain data structures for the booking core.
//!
//! Bookings reference time slots only through the composite [`SlotKey`]
//! (facility, date, start time); a slot's own id never crosses a component
//! boundary.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookable facility from the catalog (read-mostly reference data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    /// Unique facility id
    pub id: u64,
    /// Display name, e.g. "Tennis Court"
    pub name: String,
    /// Category used by presentation filters, e.g. "court"
    pub facility_type: String,
    /// Maximum simultaneous members
    pub capacity: u32,
    /// Daily opening window
    pub operating_hours: OperatingHours,
    /// Icon name consumed by the presentation layer
    pub icon: String,
}

/// Daily opening window of a facility
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OperatingHours {
    /// Opening time
    pub open: NaiveTime,
    /// Closing time
    pub close: NaiveTime,
}

/// A bookable one-hour interval for a specific facility and date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot id (internal to the availability store)
    pub id: u64,
    /// Facility this slot belongs to
    pub facility_id: u64,
    /// Calendar day
    pub date: NaiveDate,
    /// Interval start
    pub start_time: NaiveTime,
    /// Interval end
    pub end_time: NaiveTime,
    /// Whether the slot can currently be booked
    pub is_available: bool,
}

impl TimeSlot {
    /// Composite key identifying this slot across components
    #[must_use]
    pub fn key(&self) -> SlotKey {
        SlotKey {
            facility_id: self.facility_id,
            date: self.date,
            start_time: self.start_time,
        }
    }
}

/// Composite key `(facility, date, start time)`, the only way slots are
/// referenced across store boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// Facility id
    pub facility_id: u64,
    /// Calendar day
    pub date: NaiveDate,
    /// Interval start
    pub start_time: NaiveTime,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "facility {} on {} at {}",
            self.facility_id,
            self.date,
            self.start_time.format("%H:%M")
        )
    }
}

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Active reservation
    Confirmed,
    /// Terminal state; the record leaves the active set
    Cancelled,
}

/// A facility reservation
///
/// `facility_name` is a denormalized copy of catalog data captured at
/// creation time and never re-synced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking id
    pub id: u64,
    /// Facility the session takes place at
    pub facility_id: u64,
    /// Facility display name captured at creation
    pub facility_name: String,
    /// Session day
    pub date: NaiveDate,
    /// Session start
    pub start_time: NaiveTime,
    /// Session end
    pub end_time: NaiveTime,
    /// Lifecycle state
    pub status: BookingStatus,
    /// One-way attendance flag, set by check-in
    pub is_checked_in: bool,
    /// Family member the session is booked for, if not the account holder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_member_id: Option<u64>,
}

impl Booking {
    /// Composite key of the slot this booking occupies
    #[must_use]
    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            facility_id: self.facility_id,
            date: self.date,
            start_time: self.start_time,
        }
    }
}

/// Input to [`crate::booking::BookingStore::create`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Facility to book
    pub facility_id: u64,
    /// Facility display name (denormalized into the booking)
    pub facility_name: String,
    /// Session day
    pub date: NaiveDate,
    /// Session start
    pub start_time: NaiveTime,
    /// Session end
    pub end_time: NaiveTime,
    /// Optional family member beneficiary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_member_id: Option<u64>,
}

/// Source of a rebook operation
#[derive(Debug, Clone)]
pub enum RebookSource {
    /// Rebook an existing booking by id, one week later
    Booking(u64),
    /// Quick rebook from a favorite facility/time combination
    Favorite(RebookTemplate),
}

/// Inline template for a quick rebook (no source booking record)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebookTemplate {
    /// Facility to book
    pub facility_id: u64,
    /// Facility display name
    pub facility_name: String,
    /// Favorite start time
    pub start_time: NaiveTime,
    /// Reference day; when absent the target is one week from today
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Kind of a credit ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerEntryKind {
    /// Credit spent on a booking
    Booking,
    /// Credits bought through the purchase flow
    Purchase,
    /// Credit returned on cancellation or rollback
    Refund,
}

/// One append-only entry in the credit usage history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique entry id
    pub id: u64,
    /// When the entry was appended
    pub timestamp: DateTime<Utc>,
    /// Entry kind
    pub kind: LedgerEntryKind,
    /// Human-readable description, e.g. "Gym booking"
    pub description: String,
    /// Signed credit delta applied by this entry
    pub delta: i64,
    /// Balance immediately after applying this entry
    pub balance_after: u64,
}

/// Result of a successful credit purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Balance after the purchased credits were added
    pub balance: u64,
    /// Payment transaction id
    pub transaction_id: String,
}

/// Membership lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipState {
    /// Membership in good standing
    Active,
    /// Temporarily suspended
    Suspended,
    /// Lapsed past the renewal date
    Expired,
}

/// Membership status held alongside the credit balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipStatus {
    /// Current state
    pub state: MembershipState,
    /// When the member joined
    pub join_date: DateTime<Utc>,
    /// Next renewal due date
    pub renewal_date: DateTime<Utc>,
}

/// Kind of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A booking was created
    BookingConfirmation,
    /// A session starts soon
    SessionReminder,
    /// A booking was cancelled
    BookingCancelled,
    /// A booking was reassigned to another family member
    BookingTransferred,
    /// A waitlisted slot opened up
    WaitlistAvailable,
}

/// One entry in the per-user notification feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification id
    pub id: u64,
    /// Notification kind
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Short headline
    pub title: String,
    /// Display message
    pub message: String,
    /// When the notification was created
    pub timestamp: DateTime<Utc>,
    /// Whether the user has seen it
    pub is_read: bool,
    /// Route the presentation layer navigates to on tap
    pub action_url: String,
    /// Facility the notification relates to
    pub facility_id: u64,
    /// Weak back-reference; survives deletion of the booking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<u64>,
}

/// Payload for creating a notification (id/timestamp/read flag are assigned
/// by the store)
#[derive(Debug, Clone)]
pub struct NewNotification {
    /// Notification kind
    pub kind: NotificationKind,
    /// Short headline
    pub title: String,
    /// Display message
    pub message: String,
    /// Route the presentation layer navigates to on tap
    pub action_url: String,
    /// Facility the notification relates to
    pub facility_id: u64,
    /// Optional booking back-reference
    pub booking_id: Option<u64>,
}
