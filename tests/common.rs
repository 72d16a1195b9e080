// ABOUTME: Shared helpers for the booking-core integration tests
// ABOUTME: Deterministic hub construction and canonical booking fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

#![allow(dead_code)] // each test binary uses a subset of these helpers

use chrono::{NaiveDate, NaiveTime};
use fitness_hub_core::config::HubConfig;
use fitness_hub_core::context::HubContext;
use fitness_hub_core::models::BookingRequest;

/// Facility id of the gym in the default catalog
pub const GYM: u64 = 3;

/// Deterministic configuration: payments always approve
pub fn test_config(initial_balance: u64) -> HubConfig {
    HubConfig {
        initial_balance,
        payment_failure_rate: 0.0,
        ..HubConfig::default()
    }
}

/// Hub wired from [`test_config`]
pub fn test_hub(initial_balance: u64) -> HubContext {
    HubContext::new(test_config(initial_balance))
}

/// Hub with a full day of gym slots generated for `date`
pub async fn hub_with_gym_day(initial_balance: u64, date: NaiveDate) -> HubContext {
    let hub = test_hub(initial_balance);
    hub.availability().generate_day(GYM, date).await;
    hub
}

/// The canonical test day, 2024-06-10
pub fn june_10() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// One week after [`june_10`]
pub fn june_17() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 17).unwrap()
}

/// 07:00
pub fn seven_am() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap()
}

/// A gym booking request for 07:00-08:00 on `date`
pub fn gym_request(date: NaiveDate) -> BookingRequest {
    BookingRequest {
        facility_id: GYM,
        facility_name: "Gym".into(),
        date,
        start_time: seven_am(),
        end_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        family_member_id: None,
    }
}
