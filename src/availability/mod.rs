// ABOUTME: Time-slot availability store keyed by facility/date/start time
// ABOUTME: Snapshot listing, composite-key resolution, and hourly template generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! Time-slot availability.
//!
//! Slots are created in bulk per facility and day from an hourly template and
//! flipped between available/unavailable as bookings come and go. Other
//! components address slots exclusively through the composite
//! [`SlotKey`](crate::models::SlotKey); a slot's own id stays inside this
//! store.

use crate::errors::{HubError, HubResult};
use crate::models::{SlotKey, TimeSlot};
use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

struct AvailabilityState {
    slots: Vec<TimeSlot>,
    next_slot_id: u64,
}

/// In-memory slot table with exclusive ownership of availability flags
pub struct AvailabilityStore {
    state: Arc<RwLock<AvailabilityState>>,
    day_start: NaiveTime,
    day_last_start: NaiveTime,
}

impl AvailabilityStore {
    /// Create an empty store; `day_start`/`day_last_start` bound the hourly
    /// generation template (first and last slot start of a day)
    #[must_use]
    pub fn new(day_start: NaiveTime, day_last_start: NaiveTime) -> Self {
        Self {
            state: Arc::new(RwLock::new(AvailabilityState {
                slots: Vec::new(),
                next_slot_id: 1,
            })),
            day_start,
            day_last_start,
        }
    }

    /// Consistent snapshot of slots, optionally filtered by facility and/or date
    pub async fn list_slots(
        &self,
        facility_id: Option<u64>,
        date: Option<NaiveDate>,
    ) -> Vec<TimeSlot> {
        let state = self.state.read().await;
        state
            .slots
            .iter()
            .filter(|slot| facility_id.map_or(true, |id| slot.facility_id == id))
            .filter(|slot| date.map_or(true, |d| slot.date == d))
            .cloned()
            .collect()
    }

    /// Resolve a slot by its composite key without mutating it
    ///
    /// # Errors
    ///
    /// `SlotNotFound` when no slot matches; `DataInconsistency` when more
    /// than one does (the key is supposed to be unique)
    pub async fn find_slot(&self, key: &SlotKey) -> HubResult<TimeSlot> {
        let state = self.state.read().await;
        Self::resolve_index(&state.slots, key).map(|idx| state.slots[idx].clone())
    }

    /// Flip the availability flag of the slot at `key`
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::find_slot`]
    pub async fn set_availability(&self, key: &SlotKey, is_available: bool) -> HubResult<TimeSlot> {
        let mut state = self.state.write().await;
        let idx = Self::resolve_index(&state.slots, key)?;
        state.slots[idx].is_available = is_available;
        debug!(%key, is_available, "slot availability updated");
        Ok(state.slots[idx].clone())
    }

    /// Insert one slot record directly (seeding and tests; bulk callers use
    /// [`Self::generate_day`])
    pub async fn add_slot(
        &self,
        facility_id: u64,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        is_available: bool,
    ) -> TimeSlot {
        let mut state = self.state.write().await;
        let slot = TimeSlot {
            id: state.next_slot_id,
            facility_id,
            date,
            start_time,
            end_time,
            is_available,
        };
        state.next_slot_id += 1;
        state.slots.push(slot.clone());
        slot
    }

    /// Remove the slot at `key` (maintenance path, e.g. a facility closure)
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::find_slot`]
    pub async fn remove_slot(&self, key: &SlotKey) -> HubResult<TimeSlot> {
        let mut state = self.state.write().await;
        let idx = Self::resolve_index(&state.slots, key)?;
        let removed = state.slots.remove(idx);
        debug!(%key, "slot removed");
        Ok(removed)
    }

    /// Generate the hourly slot template for one facility and day, skipping
    /// keys that already exist. Returns the number of slots created.
    pub async fn generate_day(&self, facility_id: u64, date: NaiveDate) -> usize {
        let mut state = self.state.write().await;
        let mut created = 0;
        for hour in self.day_start.hour()..=self.day_last_start.hour() {
            let Some(start) = NaiveTime::from_hms_opt(hour, 0, 0) else {
                break;
            };
            let key = SlotKey {
                facility_id,
                date,
                start_time: start,
            };
            let exists = state.slots.iter().any(|slot| slot.key() == key);
            if !exists {
                let slot = TimeSlot {
                    id: state.next_slot_id,
                    facility_id,
                    date,
                    start_time: start,
                    end_time: start + Duration::hours(1),
                    is_available: true,
                };
                state.next_slot_id += 1;
                state.slots.push(slot);
                created += 1;
            }
        }
        debug!(facility_id, %date, created, "generated day template");
        created
    }

    /// Generate templates for several facilities over a date range
    pub async fn generate_range(
        &self,
        facility_ids: &[u64],
        from_date: NaiveDate,
        days: u32,
    ) -> usize {
        let mut created = 0;
        for offset in 0..days {
            let date = from_date + Duration::days(i64::from(offset));
            for &facility_id in facility_ids {
                created += self.generate_day(facility_id, date).await;
            }
        }
        created
    }

    /// Find the unique slot index for a key, detecting duplicate keys
    fn resolve_index(slots: &[TimeSlot], key: &SlotKey) -> HubResult<usize> {
        let mut matches = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.key() == *key);
        let Some((first, _)) = matches.next() else {
            return Err(HubError::slot_not_found(key));
        };
        if matches.next().is_some() {
            warn!(%key, "duplicate slots share one composite key");
            return Err(HubError::data_inconsistency(format!(
                "more than one slot at {key}"
            )));
        }
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn store() -> AvailabilityStore {
        AvailabilityStore::new(
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        )
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[tokio::test]
    async fn test_generate_day_is_idempotent() {
        let slots = store();
        assert_eq!(slots.generate_day(1, day()).await, 15);
        assert_eq!(slots.generate_day(1, day()).await, 0);
        assert_eq!(slots.list_slots(Some(1), Some(day())).await.len(), 15);
    }

    #[tokio::test]
    async fn test_duplicate_key_is_data_inconsistency() {
        let slots = store();
        let start = NaiveTime::from_hms_opt(7, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        slots.add_slot(1, day(), start, end, true).await;
        slots.add_slot(1, day(), start, end, true).await;

        let key = SlotKey {
            facility_id: 1,
            date: day(),
            start_time: start,
        };
        let err = slots.find_slot(&key).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DataInconsistency);
    }
}
