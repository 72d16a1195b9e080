// ABOUTME: Composition root wiring the catalog, event bus and the four stores together
// ABOUTME: The only place cross-store references are injected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! Hub context.
//!
//! Builds the event bus, catalog and stores from a [`HubConfig`] and injects
//! the booking store's collaborators directly. Callers hold `Arc` handles to
//! the pieces they use; no store reaches another except through the
//! references wired here.

use crate::availability::AvailabilityStore;
use crate::booking::BookingStore;
use crate::catalog::FacilityCatalog;
use crate::config::HubConfig;
use crate::events::EventBus;
use crate::ledger::{LedgerStore, PaymentProcessor, SimulatedPayments};
use crate::notifications::NotificationStore;
use std::sync::Arc;

/// Fully wired booking core
pub struct HubContext {
    config: HubConfig,
    catalog: Arc<FacilityCatalog>,
    events: Arc<EventBus>,
    ledger: Arc<LedgerStore>,
    availability: Arc<AvailabilityStore>,
    notifications: Arc<NotificationStore>,
    bookings: Arc<BookingStore>,
}

impl HubContext {
    /// Wire the hub from configuration with the default catalog and the
    /// simulated payment processor
    #[must_use]
    pub fn new(config: HubConfig) -> Self {
        let payments = Arc::new(SimulatedPayments::new(config.payment_failure_rate));
        Self::with_parts(config, FacilityCatalog::with_defaults(), payments)
    }

    /// Wire the hub with an explicit catalog and payment seam (tests swap
    /// these for deterministic doubles)
    #[must_use]
    pub fn with_parts(
        config: HubConfig,
        catalog: FacilityCatalog,
        payments: Arc<dyn PaymentProcessor>,
    ) -> Self {
        let events = EventBus::new(config.event_channel_capacity);
        let ledger = Arc::new(LedgerStore::new(config.initial_balance, payments));
        let availability = Arc::new(AvailabilityStore::new(
            config.day_start(),
            config.day_last_start(),
        ));
        let notifications = Arc::new(NotificationStore::new(events.clone()));
        let bookings = Arc::new(BookingStore::new(
            ledger.clone(),
            availability.clone(),
            notifications.clone(),
            events.clone(),
            config.booking_cost,
            config.rebook_offset_days,
        ));
        Self {
            config,
            catalog: Arc::new(catalog),
            events,
            ledger,
            availability,
            notifications,
            bookings,
        }
    }

    /// The configuration the hub was wired with
    #[must_use]
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Facility reference data
    #[must_use]
    pub fn catalog(&self) -> &Arc<FacilityCatalog> {
        &self.catalog
    }

    /// The in-process event bus
    #[must_use]
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Credit ledger store
    #[must_use]
    pub fn ledger(&self) -> &Arc<LedgerStore> {
        &self.ledger
    }

    /// Time-slot availability store
    #[must_use]
    pub fn availability(&self) -> &Arc<AvailabilityStore> {
        &self.availability
    }

    /// Notification feed store
    #[must_use]
    pub fn notifications(&self) -> &Arc<NotificationStore> {
        &self.notifications
    }

    /// Booking store and transaction orchestrator
    #[must_use]
    pub fn bookings(&self) -> &Arc<BookingStore> {
        &self.bookings
    }
}
