// ABOUTME: Integration tests for the notification feed
// ABOUTME: Covers lifecycle constructors, feed ordering, and change events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

mod common;

use anyhow::Result;
use common::{gym_request, hub_with_gym_day, june_10};
use fitness_hub_core::events::NotificationsChangedKind;
use fitness_hub_core::models::NotificationKind;

#[tokio::test]
async fn test_lifecycle_constructors_shape_the_feed() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    let booking = hub.bookings().create(gym_request(june_10())).await?;
    hub.bookings().transfer(booking.id, 4).await?;
    hub.bookings().cancel(booking.id).await?;

    let feed = hub.notifications().list().await;
    assert_eq!(feed.len(), 3);
    // Most recent first: cancelled, transferred, confirmed
    assert_eq!(feed[0].kind, NotificationKind::BookingCancelled);
    assert_eq!(feed[1].kind, NotificationKind::BookingTransferred);
    assert_eq!(feed[2].kind, NotificationKind::BookingConfirmation);

    assert_eq!(feed[2].action_url, "/my-bookings");
    assert_eq!(feed[0].action_url, "/book-facility");
    assert!(feed[2].message.contains("Gym"));
    assert!(feed[2].message.contains("2024-06-10"));
    Ok(())
}

#[tokio::test]
async fn test_reminder_and_waitlist_constructors() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    let booking = hub.bookings().create(gym_request(june_10())).await?;

    hub.notifications().reminder_for(&booking).await;
    let pool = hub.catalog().get(1)?;
    hub.notifications()
        .waitlist_for(&pool, chrono::NaiveTime::from_hms_opt(14, 0, 0).unwrap())
        .await;

    let feed = hub.notifications().list().await;
    assert_eq!(feed[0].kind, NotificationKind::WaitlistAvailable);
    assert!(feed[0].message.contains("Pool"));
    assert!(feed[0].message.contains("14:00"));
    assert_eq!(feed[1].kind, NotificationKind::SessionReminder);
    Ok(())
}

#[tokio::test]
async fn test_every_mutation_publishes_a_change_event() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    let mut rx = hub.events().subscribe_notifications();

    let booking = hub.bookings().create(gym_request(june_10())).await?;
    assert_eq!(rx.recv().await?.kind, NotificationsChangedKind::Created);

    let first = hub.notifications().list().await.remove(0);
    hub.notifications().mark_read(first.id).await?;
    assert_eq!(rx.recv().await?.kind, NotificationsChangedKind::MarkedRead);

    hub.notifications().mark_all_read().await;
    assert_eq!(rx.recv().await?.kind, NotificationsChangedKind::MarkedAllRead);

    hub.notifications().delete(first.id).await?;
    assert_eq!(rx.recv().await?.kind, NotificationsChangedKind::Deleted);

    // The booking itself is still active; events only signal feed changes
    assert_eq!(hub.bookings().get(booking.id).await?.id, booking.id);
    Ok(())
}

#[tokio::test]
async fn test_unread_badge_flow() -> Result<()> {
    let hub = hub_with_gym_day(10, june_10()).await;
    let booking = hub.bookings().create(gym_request(june_10())).await?;
    hub.notifications().reminder_for(&booking).await;
    assert_eq!(hub.notifications().unread_count().await, 2);

    hub.notifications().mark_all_read().await;
    assert_eq!(hub.notifications().unread_count().await, 0);

    // A cancellation notice arrives unread
    hub.bookings().cancel(booking.id).await?;
    assert_eq!(hub.notifications().unread_count().await, 1);
    Ok(())
}
