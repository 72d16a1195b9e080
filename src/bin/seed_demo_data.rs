// ABOUTME: Demo data seeder for the Fitness Hub booking core
// ABOUTME: Generates a week of slots and exercises the booking lifecycle end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! Demo data seeder for the Fitness Hub booking core.
//!
//! Populates an in-memory hub with a week of time slots, places a handful of
//! bookings, and walks one of them through check-in, rebook and cancellation
//! so the resulting ledger history and notification feed look lived-in.
//!
//! Usage:
//! ```bash
//! # Seed with default settings
//! cargo run --bin seed-demo-data
//!
//! # Ten bookings over two weeks, reproducible
//! cargo run --bin seed-demo-data -- --days 14 --bookings 10 --seed 7
//! ```

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Parser;
use fitness_hub_core::config::HubConfig;
use fitness_hub_core::context::HubContext;
use fitness_hub_core::models::{BookingRequest, RebookSource};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Fitness Hub demo data seeder",
    long_about = "Populate an in-memory hub with slots, bookings, credits and notifications"
)]
struct SeedArgs {
    /// Number of days of time slots to generate
    #[arg(long, default_value = "8")]
    days: u32,

    /// Number of demo bookings to place
    #[arg(long, default_value = "5")]
    bookings: u32,

    /// RNG seed for reproducible runs
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    fitness_hub_core::logging::init()?;
    let args = SeedArgs::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let hub = HubContext::new(HubConfig::from_env());
    let today = Utc::now().date_naive();

    let created = hub
        .availability()
        .generate_range(&hub.catalog().ids(), today, args.days)
        .await;
    info!(created, days = args.days, "generated slot templates");

    let mut placed = Vec::new();
    for _ in 0..args.bookings {
        let open_slots: Vec<_> = hub
            .availability()
            .list_slots(None, None)
            .await
            .into_iter()
            .filter(|slot| slot.is_available)
            .collect();
        let Some(slot) = open_slots.choose(&mut rng) else {
            warn!("no open slots left to book");
            break;
        };
        let facility = hub.catalog().get(slot.facility_id)?;
        match hub
            .bookings()
            .create(BookingRequest {
                facility_id: slot.facility_id,
                facility_name: facility.name,
                date: slot.date,
                start_time: slot.start_time,
                end_time: slot.end_time,
                family_member_id: None,
            })
            .await
        {
            Ok(booking) => placed.push(booking),
            Err(err) => {
                warn!(%err, "stopping demo bookings early");
                break;
            }
        }
    }

    if let Some(first) = placed.first() {
        hub.bookings().check_in(first.id).await?;
        match hub.bookings().rebook(RebookSource::Booking(first.id)).await {
            Ok(rebooked) => info!(booking_id = rebooked.id, date = %rebooked.date, "rebooked a week out"),
            Err(err) => warn!(%err, "rebook skipped"),
        }
    }
    if let Some(last) = placed.last() {
        let cancelled = hub.bookings().cancel(last.id).await?;
        info!(booking_id = cancelled.id, "cancelled the newest booking");
    }

    match hub.ledger().purchase(10, 2500).await {
        Ok(receipt) => info!(balance = receipt.balance, txn = %receipt.transaction_id, "bought a credit package"),
        Err(err) => warn!(%err, "credit purchase declined"),
    }

    let first_facility = hub
        .catalog()
        .list()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("catalog is empty"))?;
    hub.notifications()
        .waitlist_for(&first_facility, first_facility.operating_hours.open)
        .await;

    info!(
        balance = hub.ledger().balance().await,
        active_bookings = hub.bookings().list().await.len(),
        unread = hub.notifications().unread_count().await,
        ledger_entries = hub.ledger().list_history().await.len(),
        "demo data ready"
    );
    Ok(())
}
