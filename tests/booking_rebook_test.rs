// ABOUTME: Integration tests for rebooking one week out
// ABOUTME: Covers date shifting, occupancy detection, and failure side-effect freedom
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use common::{gym_request, hub_with_gym_day, june_10, june_17, seven_am, GYM};
use fitness_hub_core::errors::ErrorCode;
use fitness_hub_core::models::{BookingStatus, RebookSource, RebookTemplate, SlotKey};

#[tokio::test]
async fn test_rebook_creates_booking_one_week_later() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    hub.availability().generate_day(GYM, june_17()).await;

    let original = hub.bookings().create(gym_request(june_10())).await?;
    let rebooked = hub
        .bookings()
        .rebook(RebookSource::Booking(original.id))
        .await?;

    assert_eq!(rebooked.date, june_17());
    assert_eq!(rebooked.facility_id, original.facility_id);
    assert_eq!(rebooked.start_time, original.start_time);
    assert_eq!(rebooked.status, BookingStatus::Confirmed);
    assert_ne!(rebooked.id, original.id);

    // Both slots are now taken and two credits are spent
    assert_eq!(hub.ledger().balance().await, 8);
    assert_eq!(hub.bookings().list().await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_rebook_occupied_slot_fails_without_side_effects() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    hub.availability().generate_day(GYM, june_17()).await;

    let original = hub.bookings().create(gym_request(june_10())).await?;
    // Occupy the target slot with an ordinary booking
    hub.bookings().create(gym_request(june_17())).await?;

    let balance_before = hub.ledger().balance().await;
    let history_before = hub.ledger().list_history().await.len();
    let slots_before = hub.availability().list_slots(Some(GYM), None).await;
    let feed_before = hub.notifications().list().await.len();

    let err = hub
        .bookings()
        .rebook(RebookSource::Booking(original.id))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AlreadyBooked);

    // Neither the ledger nor the slot table moved
    assert_eq!(hub.ledger().balance().await, balance_before);
    assert_eq!(hub.ledger().list_history().await.len(), history_before);
    let slots_after = hub.availability().list_slots(Some(GYM), None).await;
    for (before, after) in slots_before.iter().zip(slots_after.iter()) {
        assert_eq!(before.is_available, after.is_available);
    }
    assert_eq!(hub.notifications().list().await.len(), feed_before);
    assert_eq!(hub.bookings().list().await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_rebook_without_target_slot_fails() -> Result<()> {
    // Slots exist for the source day only
    let hub = hub_with_gym_day(10, june_10()).await;
    let original = hub.bookings().create(gym_request(june_10())).await?;

    let balance_before = hub.ledger().balance().await;
    let err = hub
        .bookings()
        .rebook(RebookSource::Booking(original.id))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::SlotNotFound);
    assert_eq!(hub.ledger().balance().await, balance_before);
    assert_eq!(hub.bookings().list().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_rebook_unknown_source_booking() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    let err = hub
        .bookings()
        .rebook(RebookSource::Booking(404))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BookingNotFound);
    Ok(())
}

#[tokio::test]
async fn test_quick_rebook_template_targets_one_week_from_today() -> Result<()> {
    let hub = common::test_hub(10);
    let target = Utc::now().date_naive() + Duration::days(7);
    hub.availability().generate_day(GYM, target).await;

    let booking = hub
        .bookings()
        .rebook(RebookSource::Favorite(RebookTemplate {
            facility_id: GYM,
            facility_name: "Gym".into(),
            start_time: seven_am(),
            date: None,
        }))
        .await?;

    assert_eq!(booking.date, target);
    let key = SlotKey {
        facility_id: GYM,
        date: target,
        start_time: seven_am(),
    };
    assert!(!hub.availability().find_slot(&key).await?.is_available);
    Ok(())
}
