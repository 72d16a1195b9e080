// ABOUTME: Main library entry point for the Fitness Hub booking core
// ABOUTME: Keeps time slots, bookings, credits and notifications mutually consistent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

#![deny(unsafe_code)]

//! # Fitness Hub booking core
//!
//! The consistency core of a facility-booking application: members spend
//! credits to book one-hour facility time slots, and every booking operation
//! keeps four denormalized resources in step: the slot table, the
//! active-booking set, the credit ledger, and the notification feed.
//!
//! ## Architecture
//!
//! Each resource is owned exclusively by its store:
//! - **[`ledger`]**: credit balance, append-only usage history, purchases
//! - **[`availability`]**: time-slot table addressed by composite key
//! - **[`booking`]**: active bookings and the cross-store orchestration for
//!   create / cancel / rebook / check-in / transfer, with compensation on
//!   partial failure
//! - **[`notifications`]**: append-only per-user notification feed
//! - **[`events`]**: typed in-process publish/subscribe refresh hints
//! - **[`catalog`]**: read-mostly facility reference data
//!
//! [`context::HubContext`] wires everything together.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitness_hub_core::config::HubConfig;
//! use fitness_hub_core::context::HubContext;
//! use fitness_hub_core::models::BookingRequest;
//! use chrono::{NaiveDate, NaiveTime};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let hub = HubContext::new(HubConfig::from_env());
//!     let date = NaiveDate::from_ymd_opt(2024, 6, 10).ok_or_else(|| anyhow::anyhow!("date"))?;
//!     hub.availability().generate_day(3, date).await;
//!
//!     let booking = hub
//!         .bookings()
//!         .create(BookingRequest {
//!             facility_id: 3,
//!             facility_name: "Gym".into(),
//!             date,
//!             start_time: NaiveTime::from_hms_opt(7, 0, 0).ok_or_else(|| anyhow::anyhow!("time"))?,
//!             end_time: NaiveTime::from_hms_opt(8, 0, 0).ok_or_else(|| anyhow::anyhow!("time"))?,
//!             family_member_id: None,
//!         })
//!         .await?;
//!     println!("booked {} on {}", booking.facility_name, booking.date);
//!     Ok(())
//! }
//! ```

/// Time-slot availability store
pub mod availability;

/// Booking store and cross-store transaction orchestrator
pub mod booking;

/// Read-mostly facility reference data
pub mod catalog;

/// Environment-based configuration management
pub mod config;

/// Application constants and typed defaults
pub mod constants;

/// Composition root wiring the stores together
pub mod context;

/// Unified error handling with typed error codes
pub mod errors;

/// In-process publish/subscribe bus
pub mod events;

/// Credit ledger store and payment seam
pub mod ledger;

/// Structured logging setup
pub mod logging;

/// Shared domain models
pub mod models;

/// Per-user notification feed
pub mod notifications;
