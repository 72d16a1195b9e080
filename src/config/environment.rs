// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses HUB_* environment variables with typed fallbacks to constants::defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! Environment-based configuration for the booking core.
//!
//! Configuration is environment-only: every tunable has a hardcoded default
//! in [`crate::constants`] and an optional `HUB_*` environment override.
//! Malformed values fall back to the default rather than failing startup.

use crate::constants::{defaults, slot_template};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Runtime configuration for the hub's stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Credits a fresh account starts with (`HUB_INITIAL_CREDITS`)
    pub initial_balance: u64,
    /// Credits one booking costs (`HUB_BOOKING_COST`)
    pub booking_cost: u64,
    /// Days a rebook shifts forward (`HUB_REBOOK_OFFSET_DAYS`)
    pub rebook_offset_days: i64,
    /// Fraction of simulated charges declined (`HUB_PAYMENT_FAILURE_RATE`)
    pub payment_failure_rate: f64,
    /// First bookable hour of the day (`HUB_FIRST_SLOT_HOUR`)
    pub first_slot_hour: u32,
    /// Last bookable hour of the day, inclusive (`HUB_LAST_SLOT_HOUR`)
    pub last_slot_hour: u32,
    /// Event-bus broadcast channel capacity (`HUB_EVENT_CHANNEL_CAPACITY`)
    pub event_channel_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            initial_balance: defaults::INITIAL_CREDIT_BALANCE,
            booking_cost: defaults::BOOKING_COST,
            rebook_offset_days: defaults::REBOOK_OFFSET_DAYS,
            payment_failure_rate: defaults::PAYMENT_FAILURE_RATE,
            first_slot_hour: slot_template::FIRST_SLOT_HOUR,
            last_slot_hour: slot_template::LAST_SLOT_HOUR,
            event_channel_capacity: defaults::EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl HubConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for missing or malformed variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            initial_balance: env_parsed("HUB_INITIAL_CREDITS", defaults::INITIAL_CREDIT_BALANCE),
            booking_cost: env_parsed("HUB_BOOKING_COST", defaults::BOOKING_COST),
            rebook_offset_days: env_parsed("HUB_REBOOK_OFFSET_DAYS", defaults::REBOOK_OFFSET_DAYS),
            payment_failure_rate: env_parsed(
                "HUB_PAYMENT_FAILURE_RATE",
                defaults::PAYMENT_FAILURE_RATE,
            ),
            first_slot_hour: env_parsed("HUB_FIRST_SLOT_HOUR", slot_template::FIRST_SLOT_HOUR),
            last_slot_hour: env_parsed("HUB_LAST_SLOT_HOUR", slot_template::LAST_SLOT_HOUR),
            event_channel_capacity: env_parsed(
                "HUB_EVENT_CHANNEL_CAPACITY",
                defaults::EVENT_CHANNEL_CAPACITY,
            ),
        }
    }

    /// Start of the first bookable slot of a day
    #[must_use]
    pub fn day_start(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.first_slot_hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Start of the last bookable slot of a day (slots are one hour)
    #[must_use]
    pub fn day_last_start(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.last_slot_hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }
}

/// Parse an environment variable, warning and falling back on bad input
fn env_parsed<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("ignoring malformed {key}={raw}, using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = HubConfig::default();
        assert_eq!(config.initial_balance, defaults::INITIAL_CREDIT_BALANCE);
        assert_eq!(config.booking_cost, defaults::BOOKING_COST);
        assert_eq!(config.rebook_offset_days, defaults::REBOOK_OFFSET_DAYS);
    }

    #[test]
    fn test_day_bounds() {
        let config = HubConfig::default();
        assert_eq!(config.day_start(), NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(
            config.day_last_start(),
            NaiveTime::from_hms_opt(20, 0, 0).unwrap()
        );
    }
}
