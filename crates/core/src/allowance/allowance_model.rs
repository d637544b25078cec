use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What may be spent per day and per week for the rest of the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceSnapshot {
    pub remaining_days: i64,
    /// The figure being spread over the remaining days.
    pub allowance_base: Decimal,
    pub daily_allowance: Decimal,
    pub weekly_allowance: Decimal,
}

impl AllowanceSnapshot {
    pub fn empty(remaining_days: i64) -> Self {
        Self {
            remaining_days,
            allowance_base: Decimal::ZERO,
            daily_allowance: Decimal::ZERO,
            weekly_allowance: Decimal::ZERO,
        }
    }
}

/// One Monday-to-Sunday week of the even-split view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBreakdown {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// Equal share of the budget ceiling.
    pub budget: Decimal,
    pub expenses: Decimal,
    pub trip_costs: Decimal,
    /// `expenses + trip_costs`
    pub spent: Decimal,
    /// `budget - spent`; negative when the week is overspent.
    pub remaining: Decimal,
    pub is_current: bool,
}

impl WeekBreakdown {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.week_start && date <= self.week_end
    }
}
