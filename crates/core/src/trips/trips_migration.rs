//! One-time upgrade of version 1 trip records.
//!
//! Version 1 stored `estimatedCost`/`actualCost`. Version 2 stores
//! `prepaidCost`/`plannedCost` only. Some records were written during the
//! changeover and carry both; for those the new fields are authoritative.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::trips_model::Trip;
use crate::constants::TRIP_SCHEMA_VERSION;
use crate::errors::Result;
use crate::utils::validation::{ensure_date_range, ensure_non_negative};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTrip {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub estimated_cost: Option<Decimal>,
    #[serde(default)]
    pub actual_cost: Option<Decimal>,
    #[serde(default)]
    pub prepaid_cost: Option<Decimal>,
    #[serde(default)]
    pub planned_cost: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl LegacyTrip {
    fn has_current_fields(&self) -> bool {
        self.schema_version.unwrap_or(1) >= TRIP_SCHEMA_VERSION
            || self.prepaid_cost.is_some()
            || self.planned_cost.is_some()
    }
}

/// Converts a stored record of any schema version into the current [`Trip`].
///
/// Version 1 mapping: what was actually paid is prepaid; whatever of the
/// estimate is not yet covered is still planned.
pub fn migrate_legacy_trip(legacy: LegacyTrip) -> Result<Trip> {
    ensure_date_range(legacy.start_date, legacy.end_date)?;

    let (prepaid, planned) = if legacy.has_current_fields() {
        (
            legacy.prepaid_cost.unwrap_or(Decimal::ZERO),
            legacy.planned_cost.unwrap_or(Decimal::ZERO),
        )
    } else {
        let actual = legacy.actual_cost.unwrap_or(Decimal::ZERO);
        let estimated = legacy.estimated_cost.unwrap_or(Decimal::ZERO);
        (actual, (estimated - actual).max(Decimal::ZERO))
    };

    ensure_non_negative("prepaidCost", prepaid)?;
    ensure_non_negative("plannedCost", planned)?;

    debug!(
        "Migrated trip {} (schema v{}) -> prepaid {}, planned {}",
        legacy.id,
        legacy.schema_version.unwrap_or(1),
        prepaid,
        planned
    );

    let now = Utc::now().naive_utc();
    Ok(Trip {
        id: legacy.id,
        name: legacy.name,
        destination: legacy.destination,
        start_date: legacy.start_date,
        end_date: legacy.end_date,
        prepaid_cost: prepaid,
        planned_cost: planned,
        notes: legacy.notes,
        created_at: legacy.created_at.unwrap_or(now),
        updated_at: now,
    })
}
