// ABOUTME: Append-only per-user notification feed driven by booking lifecycle events
// ABOUTME: Read/unread accounting plus typed constructors for each lifecycle notification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! Notification feed.
//!
//! An append-only feed owned by this store. Every mutation publishes a
//! [`NotificationsChanged`] event so observers (e.g. an unread-count badge)
//! can re-pull state; the event itself carries no payload guarantee.

use crate::constants::action_routes;
use crate::errors::{HubError, HubResult};
use crate::events::{EventBus, NotificationsChanged, NotificationsChangedKind};
use crate::models::{Booking, Facility, NewNotification, Notification, NotificationKind};
use chrono::{NaiveTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

struct NotificationState {
    /// Insertion order; [`NotificationStore::list`] reverses for display
    feed: Vec<Notification>,
    next_id: u64,
}

/// In-memory notification feed with exclusive ownership of its entries
pub struct NotificationStore {
    state: Arc<RwLock<NotificationState>>,
    events: Arc<EventBus>,
}

impl NotificationStore {
    /// Create an empty feed publishing change events on `events`
    #[must_use]
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            state: Arc::new(RwLock::new(NotificationState {
                feed: Vec::new(),
                next_id: 1,
            })),
            events,
        }
    }

    /// All notifications, most recent first
    pub async fn list(&self) -> Vec<Notification> {
        let state = self.state.read().await;
        state.feed.iter().rev().cloned().collect()
    }

    /// Number of unread notifications
    pub async fn unread_count(&self) -> usize {
        let state = self.state.read().await;
        state.feed.iter().filter(|n| !n.is_read).count()
    }

    /// Append a notification; id, timestamp and read flag are assigned here
    pub async fn create(&self, payload: NewNotification) -> Notification {
        let mut state = self.state.write().await;
        let notification = Notification {
            id: state.next_id,
            kind: payload.kind,
            title: payload.title,
            message: payload.message,
            timestamp: Utc::now(),
            is_read: false,
            action_url: payload.action_url,
            facility_id: payload.facility_id,
            booking_id: payload.booking_id,
        };
        state.next_id += 1;
        state.feed.push(notification.clone());
        drop(state);
        debug!(id = notification.id, kind = ?notification.kind, "notification created");
        self.publish(NotificationsChangedKind::Created);
        notification
    }

    /// Mark one notification as read
    ///
    /// # Errors
    ///
    /// `NotificationNotFound` when no entry has this id
    pub async fn mark_read(&self, id: u64) -> HubResult<Notification> {
        let mut state = self.state.write().await;
        let entry = state
            .feed
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| HubError::notification_not_found(id))?;
        entry.is_read = true;
        let snapshot = entry.clone();
        drop(state);
        self.publish(NotificationsChangedKind::MarkedRead);
        Ok(snapshot)
    }

    /// Mark the whole feed as read
    pub async fn mark_all_read(&self) {
        let mut state = self.state.write().await;
        for entry in &mut state.feed {
            entry.is_read = true;
        }
        drop(state);
        self.publish(NotificationsChangedKind::MarkedAllRead);
    }

    /// Remove one notification from the feed
    ///
    /// # Errors
    ///
    /// `NotificationNotFound` when no entry has this id
    pub async fn delete(&self, id: u64) -> HubResult<Notification> {
        let mut state = self.state.write().await;
        let idx = state
            .feed
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| HubError::notification_not_found(id))?;
        let removed = state.feed.remove(idx);
        drop(state);
        self.publish(NotificationsChangedKind::Deleted);
        Ok(removed)
    }

    /// Booking-confirmation notification for a freshly created booking
    pub async fn confirmation_for(&self, booking: &Booking) -> Notification {
        self.create(NewNotification {
            kind: NotificationKind::BookingConfirmation,
            title: "Booking Confirmed".into(),
            message: format!(
                "Your {} session is confirmed for {}, {}",
                booking.facility_name,
                booking.date,
                booking.start_time.format("%H:%M")
            ),
            action_url: action_routes::MY_BOOKINGS.into(),
            facility_id: booking.facility_id,
            booking_id: Some(booking.id),
        })
        .await
    }

    /// Cancellation notice; carries no booking back-reference since the
    /// booking record is gone
    pub async fn cancellation_for(&self, booking: &Booking) -> Notification {
        self.create(NewNotification {
            kind: NotificationKind::BookingCancelled,
            title: "Booking Cancelled".into(),
            message: format!(
                "Your {} session on {} has been cancelled",
                booking.facility_name, booking.date
            ),
            action_url: action_routes::BOOK_FACILITY.into(),
            facility_id: booking.facility_id,
            booking_id: None,
        })
        .await
    }

    /// Transfer notice after a booking was reassigned
    pub async fn transfer_for(&self, booking: &Booking) -> Notification {
        let beneficiary = booking
            .family_member_id
            .map_or_else(|| "you".to_string(), |id| format!("family member {id}"));
        self.create(NewNotification {
            kind: NotificationKind::BookingTransferred,
            title: "Booking Transferred".into(),
            message: format!(
                "Your {} session on {} is now assigned to {}",
                booking.facility_name, booking.date, beneficiary
            ),
            action_url: action_routes::MY_BOOKINGS.into(),
            facility_id: booking.facility_id,
            booking_id: Some(booking.id),
        })
        .await
    }

    /// Session reminder shortly before the start time
    pub async fn reminder_for(&self, booking: &Booking) -> Notification {
        self.create(NewNotification {
            kind: NotificationKind::SessionReminder,
            title: "Session Starting Soon".into(),
            message: format!(
                "Your {} session starts in 30 minutes",
                booking.facility_name
            ),
            action_url: action_routes::MY_BOOKINGS.into(),
            facility_id: booking.facility_id,
            booking_id: Some(booking.id),
        })
        .await
    }

    /// Waitlist notice when a spot opens up at a facility
    pub async fn waitlist_for(&self, facility: &Facility, start_time: NaiveTime) -> Notification {
        self.create(NewNotification {
            kind: NotificationKind::WaitlistAvailable,
            title: "Spot Available".into(),
            message: format!(
                "A spot opened up for {} at {}",
                facility.name,
                start_time.format("%H:%M")
            ),
            action_url: action_routes::BOOK_FACILITY.into(),
            facility_id: facility.id,
            booking_id: None,
        })
        .await
    }

    fn publish(&self, kind: NotificationsChangedKind) {
        self.events.publish_notifications(NotificationsChanged { kind });
    }
}
