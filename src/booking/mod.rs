// ABOUTME: Booking store and cross-store transaction orchestrator
// ABOUTME: Create/cancel/rebook/check-in/transfer with compensation on partial failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! Booking orchestration.
//!
//! The booking store owns the active-booking set and drives every multi-step
//! operation across the ledger, availability and notification stores. Each
//! public operation is atomic from the caller's point of view: a failure
//! partway compensates all prior steps of that call before the error
//! propagates, so no debited-but-not-booked (or removed-but-not-refunded)
//! state is ever observable.

use crate::availability::AvailabilityStore;
use crate::errors::{ErrorCode, HubError, HubResult};
use crate::events::{AvailabilityChanged, EventBus};
use crate::ledger::LedgerStore;
use crate::models::{Booking, BookingRequest, BookingStatus, RebookSource, SlotKey};
use crate::notifications::NotificationStore;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

struct BookingState {
    bookings: Vec<Booking>,
    next_id: u64,
}

/// Owner of the active-booking set and orchestrator of the cross-store
/// booking transactions
pub struct BookingStore {
    state: Arc<RwLock<BookingState>>,
    ledger: Arc<LedgerStore>,
    availability: Arc<AvailabilityStore>,
    notifications: Arc<NotificationStore>,
    events: Arc<EventBus>,
    booking_cost: u64,
    rebook_offset_days: i64,
}

impl BookingStore {
    /// Wire the orchestrator to its collaborating stores
    #[must_use]
    pub fn new(
        ledger: Arc<LedgerStore>,
        availability: Arc<AvailabilityStore>,
        notifications: Arc<NotificationStore>,
        events: Arc<EventBus>,
        booking_cost: u64,
        rebook_offset_days: i64,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(BookingState {
                bookings: Vec::new(),
                next_id: 1,
            })),
            ledger,
            availability,
            notifications,
            events,
            booking_cost,
            rebook_offset_days,
        }
    }

    /// Snapshot of the active-booking set in creation order
    pub async fn list(&self) -> Vec<Booking> {
        self.state.read().await.bookings.clone()
    }

    /// Look up an active booking by id
    ///
    /// # Errors
    ///
    /// `BookingNotFound` when the id is not in the active set
    pub async fn get(&self, booking_id: u64) -> HubResult<Booking> {
        self.state
            .read()
            .await
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .cloned()
            .ok_or_else(|| HubError::booking_not_found(booking_id))
    }

    /// Create a booking: debit the ledger, take the slot, allocate the
    /// record, notify, and broadcast the availability change.
    ///
    /// The slot flip is part of this operation; callers never flip slots
    /// themselves. A failed flip credits the debit back before the error
    /// surfaces, so the ledger and slot table are untouched on any failure.
    ///
    /// # Errors
    ///
    /// `InsufficientCredit` aborts before any mutation; `SlotNotFound` /
    /// `DataInconsistency` from the slot flip roll the debit back first.
    pub async fn create(&self, request: BookingRequest) -> HubResult<Booking> {
        let key = SlotKey {
            facility_id: request.facility_id,
            date: request.date,
            start_time: request.start_time,
        };

        self.ledger
            .debit(self.booking_cost, format!("{} booking", request.facility_name))
            .await?;

        if let Err(err) = self.availability.set_availability(&key, false).await {
            warn!(%key, %err, "slot flip failed, crediting debit back");
            if let Err(refund_err) = self
                .ledger
                .refund(
                    self.booking_cost,
                    format!("{} booking rolled back", request.facility_name),
                )
                .await
            {
                error!(%refund_err, "compensating refund failed");
            }
            return Err(err);
        }

        let booking = {
            let mut state = self.state.write().await;
            let booking = Booking {
                id: state.next_id,
                facility_id: request.facility_id,
                facility_name: request.facility_name,
                date: request.date,
                start_time: request.start_time,
                end_time: request.end_time,
                status: BookingStatus::Confirmed,
                is_checked_in: false,
                family_member_id: request.family_member_id,
            };
            state.next_id += 1;
            state.bookings.push(booking.clone());
            booking
        };

        self.notifications.confirmation_for(&booking).await;
        self.events.publish_availability(AvailabilityChanged {
            facility_id: booking.facility_id,
            delta: -1,
            immediate: true,
        });

        info!(
            booking_id = booking.id,
            facility = %booking.facility_name,
            date = %booking.date,
            "booking created"
        );
        Ok(booking)
    }

    /// Cancel a booking: release the slot, remove the record, notify, and
    /// refund the credit.
    ///
    /// A missing (or duplicated) slot for a confirmed booking is a detected
    /// `DataInconsistency` and fails the cancel before anything mutates. If
    /// the refund fails after the record was removed, the booking is
    /// restored at its original position and the slot re-taken, leaving the
    /// active set exactly as before the call.
    ///
    /// # Errors
    ///
    /// `BookingNotFound`, `DataInconsistency`, or a refund failure.
    pub async fn cancel(&self, booking_id: u64) -> HubResult<Booking> {
        let (idx, booking) = {
            let state = self.state.read().await;
            let idx = state
                .bookings
                .iter()
                .position(|b| b.id == booking_id)
                .ok_or_else(|| HubError::booking_not_found(booking_id))?;
            (idx, state.bookings[idx].clone())
        };

        let key = booking.slot_key();
        if let Err(err) = self.availability.set_availability(&key, true).await {
            return Err(if err.code == ErrorCode::SlotNotFound {
                HubError::data_inconsistency(format!(
                    "confirmed booking {booking_id} has no slot at {key}"
                ))
            } else {
                err
            });
        }

        {
            let mut state = self.state.write().await;
            state.bookings.remove(idx);
        }

        self.notifications.cancellation_for(&booking).await;

        if let Err(err) = self
            .ledger
            .refund(
                self.booking_cost,
                format!("{} booking cancelled", booking.facility_name),
            )
            .await
        {
            warn!(booking_id, %err, "refund failed, restoring booking");
            {
                let mut state = self.state.write().await;
                let at = idx.min(state.bookings.len());
                state.bookings.insert(at, booking.clone());
            }
            if let Err(flip_err) = self.availability.set_availability(&key, false).await {
                error!(%flip_err, "could not re-take slot after failed refund");
            }
            return Err(err);
        }

        self.events.publish_availability(AvailabilityChanged {
            facility_id: booking.facility_id,
            delta: 1,
            immediate: true,
        });

        info!(booking_id, facility = %booking.facility_name, "booking cancelled");
        let mut cancelled = booking;
        cancelled.status = BookingStatus::Cancelled;
        Ok(cancelled)
    }

    /// One-way check-in. A second attempt on the same booking always fails
    /// rather than silently succeeding.
    ///
    /// # Errors
    ///
    /// `BookingNotFound` | `AlreadyCheckedIn`
    pub async fn check_in(&self, booking_id: u64) -> HubResult<Booking> {
        let mut state = self.state.write().await;
        let booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| HubError::booking_not_found(booking_id))?;
        if booking.is_checked_in {
            return Err(HubError::already_checked_in(booking_id));
        }
        booking.is_checked_in = true;
        info!(booking_id, "checked in");
        Ok(booking.clone())
    }

    /// Reassign the booking's beneficiary to another family member.
    /// Touches neither the ledger nor the slot table.
    ///
    /// # Errors
    ///
    /// `BookingNotFound` | `NotConfirmed` | `NoOpTransfer`
    pub async fn transfer(&self, booking_id: u64, family_member_id: u64) -> HubResult<Booking> {
        let snapshot = {
            let mut state = self.state.write().await;
            let booking = state
                .bookings
                .iter_mut()
                .find(|b| b.id == booking_id)
                .ok_or_else(|| HubError::booking_not_found(booking_id))?;
            if booking.status != BookingStatus::Confirmed {
                return Err(HubError::not_confirmed(booking_id));
            }
            if booking.family_member_id == Some(family_member_id) {
                return Err(HubError::no_op_transfer(family_member_id));
            }
            booking.family_member_id = Some(family_member_id);
            booking.clone()
        };

        self.notifications.transfer_for(&snapshot).await;
        info!(booking_id, family_member_id, "booking transferred");
        Ok(snapshot)
    }

    /// Book the same facility and start time one week later.
    ///
    /// The source is an existing booking or an inline favorite template;
    /// a template without a date targets one week from today. The target
    /// slot must exist and must not be occupied by an active confirmed
    /// booking; on success this delegates to [`Self::create`] and inherits
    /// its atomicity, so a failed rebook leaves every store untouched.
    ///
    /// # Errors
    ///
    /// `BookingNotFound` (source id), `SlotNotFound`, `AlreadyBooked`,
    /// plus anything [`Self::create`] can return.
    pub async fn rebook(&self, source: RebookSource) -> HubResult<Booking> {
        let (facility_id, facility_name, start_time, base_date, family_member_id) = match source {
            RebookSource::Booking(id) => {
                let booking = self.get(id).await?;
                (
                    booking.facility_id,
                    booking.facility_name,
                    booking.start_time,
                    Some(booking.date),
                    booking.family_member_id,
                )
            }
            RebookSource::Favorite(template) => (
                template.facility_id,
                template.facility_name,
                template.start_time,
                template.date,
                None,
            ),
        };

        let base = base_date.unwrap_or_else(|| Utc::now().date_naive());
        let target_date = base + Duration::days(self.rebook_offset_days);
        let key = SlotKey {
            facility_id,
            date: target_date,
            start_time,
        };

        let slot = self.availability.find_slot(&key).await?;

        let occupied = {
            let state = self.state.read().await;
            state
                .bookings
                .iter()
                .any(|b| b.status == BookingStatus::Confirmed && b.slot_key() == key)
        };
        if occupied {
            return Err(HubError::already_booked(&key));
        }

        info!(%key, "rebooking one week out");
        self.create(BookingRequest {
            facility_id,
            facility_name,
            date: target_date,
            start_time,
            end_time: slot.end_time,
            family_member_id,
        })
        .await
    }
}
