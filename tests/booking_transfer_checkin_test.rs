// ABOUTME: Integration tests for check-in and family-member transfer
// ABOUTME: Covers the idempotency guard and the no-op transfer rule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

mod common;

use anyhow::Result;
use common::{hub_with_gym_day, june_10, seven_am, GYM};
use fitness_hub_core::errors::ErrorCode;
use fitness_hub_core::models::{BookingRequest, NotificationKind};

fn family_request(family_member_id: Option<u64>) -> BookingRequest {
    BookingRequest {
        facility_id: GYM,
        facility_name: "Gym".into(),
        date: june_10(),
        start_time: seven_am(),
        end_time: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        family_member_id,
    }
}

#[tokio::test]
async fn test_check_in_succeeds_once_then_fails() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    let booking = hub.bookings().create(family_request(None)).await?;

    let checked = hub.bookings().check_in(booking.id).await?;
    assert!(checked.is_checked_in);

    let err = hub.bookings().check_in(booking.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AlreadyCheckedIn);

    // Still checked in, still one booking
    assert!(hub.bookings().get(booking.id).await?.is_checked_in);
    Ok(())
}

#[tokio::test]
async fn test_check_in_unknown_booking() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    let err = hub.bookings().check_in(7).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BookingNotFound);
    Ok(())
}

#[tokio::test]
async fn test_transfer_to_current_owner_is_a_no_op_error() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    let booking = hub.bookings().create(family_request(Some(2))).await?;

    let err = hub.bookings().transfer(booking.id, 2).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NoOpTransfer);

    // Beneficiary unchanged, no transfer notification emitted
    assert_eq!(hub.bookings().get(booking.id).await?.family_member_id, Some(2));
    let transfers = hub
        .notifications()
        .list()
        .await
        .into_iter()
        .filter(|n| n.kind == NotificationKind::BookingTransferred)
        .count();
    assert_eq!(transfers, 0);
    Ok(())
}

#[tokio::test]
async fn test_transfer_reassigns_and_notifies() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    let booking = hub.bookings().create(family_request(Some(2))).await?;
    let balance_before = hub.ledger().balance().await;

    let transferred = hub.bookings().transfer(booking.id, 5).await?;
    assert_eq!(transferred.family_member_id, Some(5));

    // Ledger and slot state are untouched by a transfer
    assert_eq!(hub.ledger().balance().await, balance_before);

    let feed = hub.notifications().list().await;
    assert_eq!(feed[0].kind, NotificationKind::BookingTransferred);
    assert_eq!(feed[0].booking_id, Some(booking.id));
    Ok(())
}

#[tokio::test]
async fn test_transfer_unknown_booking() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    let err = hub.bookings().transfer(7, 2).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BookingNotFound);
    Ok(())
}
