//! Trip domain models.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::validation::{ensure_date_range, ensure_non_negative, ensure_not_blank};

/// Where a trip sits relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    Upcoming,
    Ongoing,
    Completed,
}

/// A multi-day trip. Its prepaid part is already spent; its planned part
/// is still to come.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub prepaid_cost: Decimal,
    pub planned_cost: Decimal,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Trip {
    pub fn total_cost(&self) -> Decimal {
        self.prepaid_cost + self.planned_cost
    }

    /// Length in days as the weekly split counts it: `max(1, end - start)`.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(1)
    }

    pub fn status(&self, today: NaiveDate) -> TripStatus {
        if today < self.start_date {
            TripStatus::Upcoming
        } else if today > self.end_date {
            TripStatus::Completed
        } else {
            TripStatus::Ongoing
        }
    }

    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.status(today) == TripStatus::Upcoming
    }
}

/// Input model for creating a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub prepaid_cost: Decimal,
    pub planned_cost: Decimal,
    pub notes: Option<String>,
}

impl NewTrip {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("name", &self.name)?;
        ensure_date_range(self.start_date, self.end_date)?;
        ensure_non_negative("prepaidCost", self.prepaid_cost)?;
        ensure_non_negative("plannedCost", self.planned_cost)?;
        Ok(())
    }

    pub fn into_trip(self) -> Trip {
        let now = Utc::now().naive_utc();
        Trip {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: self.name.trim().to_string(),
            destination: self.destination.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            prepaid_cost: self.prepaid_cost,
            planned_cost: self.planned_cost,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input model for editing a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripUpdate {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub prepaid_cost: Decimal,
    pub planned_cost: Decimal,
    pub notes: Option<String>,
}

impl TripUpdate {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("id", &self.id)?;
        ensure_not_blank("name", &self.name)?;
        ensure_date_range(self.start_date, self.end_date)?;
        ensure_non_negative("prepaidCost", self.prepaid_cost)?;
        ensure_non_negative("plannedCost", self.planned_cost)?;
        Ok(())
    }

    pub fn apply_to(self, existing: &Trip) -> Trip {
        Trip {
            id: existing.id.clone(),
            name: self.name.trim().to_string(),
            destination: self.destination.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            prepaid_cost: self.prepaid_cost,
            planned_cost: self.planned_cost,
            notes: self.notes,
            created_at: existing.created_at,
            updated_at: Utc::now().naive_utc(),
        }
    }
}
