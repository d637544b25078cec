//! Weekly planner models.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::time_utils::{end_of_week, is_monday};
use crate::utils::validation::{ensure_non_negative, ensure_not_blank};

/// Scratch plan for one calendar week. Never touches the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub id: String,
    /// Always a Monday.
    pub week_start: NaiveDate,
    /// In creation order.
    #[serde(default)]
    pub events: Vec<WeeklyPlanEvent>,
    pub created_at: NaiveDateTime,
}

impl WeeklyPlan {
    pub fn new(week_start: NaiveDate) -> Result<Self> {
        if !is_monday(week_start) {
            return Err(ValidationError::NotAMonday(week_start).into());
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            week_start,
            events: Vec::new(),
            created_at: Utc::now().naive_utc(),
        })
    }

    pub fn week_end(&self) -> NaiveDate {
        end_of_week(self.week_start)
    }

    /// Calendar date of an event's day within this week.
    pub fn date_of(&self, day_of_week: u8) -> NaiveDate {
        self.week_start + chrono::Duration::days(i64::from(day_of_week))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlanEvent {
    pub id: String,
    /// 0 = Monday ... 6 = Sunday.
    pub day_of_week: u8,
    pub event_name: String,
    #[serde(default)]
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWeeklyPlanEvent {
    pub day_of_week: u8,
    pub event_name: String,
    #[serde(default)]
    pub amount: Decimal,
}

impl NewWeeklyPlanEvent {
    pub fn validate(&self) -> Result<()> {
        if self.day_of_week > 6 {
            return Err(ValidationError::InvalidInput(format!(
                "dayOfWeek must be between 0 and 6 (got {})",
                self.day_of_week
            ))
            .into());
        }
        ensure_not_blank("eventName", &self.event_name)?;
        ensure_non_negative("amount", self.amount)
    }

    pub fn into_event(self) -> WeeklyPlanEvent {
        WeeklyPlanEvent {
            id: uuid::Uuid::new_v4().to_string(),
            day_of_week: self.day_of_week,
            event_name: self.event_name.trim().to_string(),
            amount: self.amount,
            created_at: Utc::now().naive_utc(),
        }
    }
}

/// Index of `date` within its Monday-based week.
pub fn day_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    UnderBudget,
    OnBudget,
    OverBudget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlanSummary {
    pub week_start: NaiveDate,
    pub by_day: [Decimal; 7],
    pub planned_total: Decimal,
    pub weekly_allowance: Decimal,
    /// `weekly_allowance - planned_total`; negative when over.
    pub difference: Decimal,
    pub status: PlanStatus,
}
