use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allowance::{AllowanceSnapshot, WeekBreakdown};
use crate::budget::BudgetFigures;
use crate::expenses::CategoryTotal;
use crate::recommendations::Recommendation;
use crate::trips::TripCostDistribution;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewOptions {
    pub include_wishlist: bool,
}

/// Everything the dashboard renders, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub as_of: NaiveDate,
    pub has_budget: bool,
    pub figures: BudgetFigures,
    pub allowance: AllowanceSnapshot,
    pub weeks: Vec<WeekBreakdown>,
    pub current_week: Option<WeekBreakdown>,
    pub upcoming_trips_cost: Decimal,
    pub recommendations: Vec<Recommendation>,
    pub trip_breakdowns: Vec<TripCostDistribution>,
    pub expenses_by_category: Vec<CategoryTotal>,
}
