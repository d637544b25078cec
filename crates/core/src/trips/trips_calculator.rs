use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::trips_model::Trip;
use crate::allowance::{trip_week_share, week_overlaps_trip, weeks_spanned};
use crate::constants::DECIMAL_PRECISION;
use crate::utils::time_utils::end_of_week;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripWeekShare {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub amount: Decimal,
}

/// How one trip's cost lands on the weekly view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCostDistribution {
    pub trip_id: String,
    pub total_cost: Decimal,
    pub duration_days: i64,
    pub weeks_spanned: i64,
    pub per_day_cost: Decimal,
    pub weekly_share: Decimal,
    /// Every week among `weeks` the trip overlaps, each with the full share.
    pub weeks: Vec<TripWeekShare>,
}

/// Breaks a trip's cost down against the given Monday week starts.
pub fn trip_cost_distribution(trip: &Trip, weeks: &[NaiveDate]) -> TripCostDistribution {
    let duration = trip.duration_days();
    let share = trip_week_share(trip);
    let overlapping = weeks
        .iter()
        .map(|start| (*start, end_of_week(*start)))
        .filter(|(start, end)| week_overlaps_trip(*start, *end, trip))
        .map(|(week_start, week_end)| TripWeekShare {
            week_start,
            week_end,
            amount: share,
        })
        .collect();

    TripCostDistribution {
        trip_id: trip.id.clone(),
        total_cost: trip.total_cost(),
        duration_days: duration,
        weeks_spanned: weeks_spanned(trip),
        per_day_cost: (trip.total_cost() / Decimal::from(duration)).round_dp(DECIMAL_PRECISION),
        weekly_share: share,
        weeks: overlapping,
    }
}
