// ABOUTME: Read-mostly facility reference data looked up by the booking stores
// ABOUTME: Ships a default catalog matching the hub's seed facilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

//! Facility catalog.
//!
//! Static reference data (name, capacity, hours, icon). The other stores only
//! read it; bookings copy the facility name at creation time and never
//! re-sync it.

use crate::errors::{HubError, HubResult};
use crate::models::{Facility, OperatingHours};
use chrono::NaiveTime;

/// Read-only catalog of bookable facilities
#[derive(Debug, Clone)]
pub struct FacilityCatalog {
    facilities: Vec<Facility>,
}

impl FacilityCatalog {
    /// Build a catalog from explicit facility records
    #[must_use]
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    /// The default hub catalog: pool, tennis court, gym, yoga studio, squash court
    #[must_use]
    pub fn with_defaults() -> Self {
        let all_day = |open_h: u32, close_h: u32| OperatingHours {
            open: NaiveTime::from_hms_opt(open_h, 0, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(close_h, 0, 0).unwrap_or(NaiveTime::MIN),
        };
        Self::new(vec![
            Facility {
                id: 1,
                name: "Pool".into(),
                facility_type: "aquatics".into(),
                capacity: 30,
                operating_hours: all_day(6, 21),
                icon: "Waves".into(),
            },
            Facility {
                id: 2,
                name: "Tennis Court".into(),
                facility_type: "court".into(),
                capacity: 4,
                operating_hours: all_day(7, 21),
                icon: "Trophy".into(),
            },
            Facility {
                id: 3,
                name: "Gym".into(),
                facility_type: "gym".into(),
                capacity: 50,
                operating_hours: all_day(6, 21),
                icon: "Dumbbell".into(),
            },
            Facility {
                id: 4,
                name: "Yoga Studio".into(),
                facility_type: "studio".into(),
                capacity: 20,
                operating_hours: all_day(7, 20),
                icon: "Heart".into(),
            },
            Facility {
                id: 5,
                name: "Squash Court".into(),
                facility_type: "court".into(),
                capacity: 2,
                operating_hours: all_day(7, 21),
                icon: "Target".into(),
            },
        ])
    }

    /// Look up a facility by id
    ///
    /// # Errors
    ///
    /// Returns `FacilityNotFound` if no facility has this id
    pub fn get(&self, id: u64) -> HubResult<Facility> {
        self.facilities
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| HubError::facility_not_found(id))
    }

    /// All facilities in catalog order
    #[must_use]
    pub fn list(&self) -> Vec<Facility> {
        self.facilities.clone()
    }

    /// Ids of all facilities (used by bulk slot generation)
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.facilities.iter().map(|f| f.id).collect()
    }
}

impl Default for FacilityCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
