// ABOUTME: In-process publish/subscribe bus for availability and notification change signals
// ABOUTME: Typed broadcast channels; a refresh hint for observers, never a source of truth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! In-process event bus.
//!
//! Two typed channels fan out to whoever is subscribed at publish time:
//! availability changes (a slot was taken or released) and notification-feed
//! changes. There is no queuing for late subscribers and no delivery
//! guarantee. The stores' own state is the source of truth, and subscribers
//! re-query it rather than trusting event contents.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// Published when a booking takes or releases a slot at a facility
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AvailabilityChanged {
    /// Facility whose availability moved
    pub facility_id: u64,
    /// Net change in available slots (-1 on booking, +1 on cancellation)
    pub delta: i64,
    /// Hint that observers should refresh now instead of on their next poll
    pub immediate: bool,
}

/// What mutated the notification feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationsChangedKind {
    /// A notification was appended
    Created,
    /// One notification was marked read
    MarkedRead,
    /// The whole feed was marked read
    MarkedAllRead,
    /// A notification was removed
    Deleted,
}

/// Published on every notification-feed mutation.
///
/// Carries no payload guarantee beyond "something changed"; subscribers
/// must re-query the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NotificationsChanged {
    /// What kind of mutation happened
    pub kind: NotificationsChangedKind,
}

/// In-process publish/subscribe bus with one broadcast channel per event type
pub struct EventBus {
    availability_tx: broadcast::Sender<AvailabilityChanged>,
    notifications_tx: broadcast::Sender<NotificationsChanged>,
}

impl EventBus {
    /// Create a bus whose channels buffer up to `capacity` events per subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Arc<Self> {
        let (availability_tx, _) = broadcast::channel(capacity.max(1));
        let (notifications_tx, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self {
            availability_tx,
            notifications_tx,
        })
    }

    /// Subscribe to availability changes from this point on (no replay)
    #[must_use]
    pub fn subscribe_availability(&self) -> broadcast::Receiver<AvailabilityChanged> {
        self.availability_tx.subscribe()
    }

    /// Subscribe to notification-feed changes from this point on (no replay)
    #[must_use]
    pub fn subscribe_notifications(&self) -> broadcast::Receiver<NotificationsChanged> {
        self.notifications_tx.subscribe()
    }

    /// Publish an availability change to current subscribers.
    ///
    /// Publishing with no live subscriber is not an error.
    pub fn publish_availability(&self, event: AvailabilityChanged) {
        debug!(
            facility_id = event.facility_id,
            delta = event.delta,
            "availability changed"
        );
        let _ = self.availability_tx.send(event);
    }

    /// Publish a notification-feed change to current subscribers
    pub fn publish_notifications(&self, event: NotificationsChanged) {
        debug!(kind = ?event.kind, "notifications changed");
        let _ = self.notifications_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_subscribers_does_not_error() {
        let bus = EventBus::new(8);
        bus.publish_availability(AvailabilityChanged {
            facility_id: 1,
            delta: -1,
            immediate: true,
        });
        bus.publish_notifications(NotificationsChanged {
            kind: NotificationsChangedKind::Created,
        });
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe_availability();
        bus.publish_availability(AvailabilityChanged {
            facility_id: 3,
            delta: 1,
            immediate: false,
        });
        let event = rx.recv().await.unwrap();
        assert_eq!(event.facility_id, 3);
        assert_eq!(event.delta, 1);
    }
}
