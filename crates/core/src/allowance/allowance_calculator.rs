//! Allowance arithmetic.
//!
//! Remaining days count `today` itself and never drop below one, so the
//! daily allowance is always defined.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::allowance_model::{AllowanceSnapshot, WeekBreakdown};
use crate::budget::{Budget, BudgetFigures, BudgetModeKind};
use crate::constants::{DAYS_PER_WEEK, DECIMAL_PRECISION};
use crate::expenses::{total_expenses_between, Expense};
use crate::trips::Trip;
use crate::utils::time_utils::{days_inclusive, each_week_of_interval, end_of_week};

/// Days left in the period, counting today.
///
/// Before the period starts this is the whole period; once it has ended it
/// stays at one.
pub fn remaining_days(period_start: NaiveDate, period_end: NaiveDate, today: NaiveDate) -> i64 {
    let days = if today < period_start {
        days_inclusive(period_start, period_end)
    } else if today > period_end {
        1
    } else {
        days_inclusive(today, period_end)
    };
    days.max(1)
}

/// The amount spread over the remaining days: `remaining`, less the wishlist
/// when it is included. Zero without a ceiling.
pub fn allowance_base(figures: &BudgetFigures) -> Decimal {
    match figures.mode {
        None | Some(BudgetModeKind::Tracking) => Decimal::ZERO,
        Some(_) => {
            if figures.wishlist_included {
                figures.remaining - figures.wishlist_total
            } else {
                figures.remaining
            }
        }
    }
}

pub fn daily_allowance(base: Decimal, remaining_days: i64) -> Decimal {
    let days = Decimal::from(remaining_days.max(1));
    (base / days).round_dp(DECIMAL_PRECISION)
}

pub fn weekly_allowance(daily: Decimal) -> Decimal {
    daily * Decimal::from(DAYS_PER_WEEK)
}

pub fn allowance_snapshot(
    budget: Option<&Budget>,
    figures: &BudgetFigures,
    today: NaiveDate,
) -> AllowanceSnapshot {
    let Some(budget) = budget else {
        return AllowanceSnapshot::empty(1);
    };
    let days = remaining_days(budget.period_start, budget.period_end, today);
    let base = allowance_base(figures);
    let daily = daily_allowance(base, days);
    AllowanceSnapshot {
        remaining_days: days,
        allowance_base: base,
        daily_allowance: daily,
        weekly_allowance: weekly_allowance(daily),
    }
}

/// A trip touches a week when it starts or ends inside it, or spans it.
pub fn week_overlaps_trip(week_start: NaiveDate, week_end: NaiveDate, trip: &Trip) -> bool {
    let starts_inside = trip.start_date >= week_start && trip.start_date <= week_end;
    let ends_inside = trip.end_date >= week_start && trip.end_date <= week_end;
    let spans = trip.start_date <= week_start && trip.end_date >= week_end;
    starts_inside || ends_inside || spans
}

/// Number of weeks a trip's cost is divided by: `ceil(duration / 7)`.
pub fn weeks_spanned(trip: &Trip) -> i64 {
    let duration = trip.duration_days();
    ((duration + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK).max(1)
}

/// The amount each overlapping week absorbs. Not prorated by the days that
/// actually fall in the week.
pub fn trip_week_share(trip: &Trip) -> Decimal {
    (trip.total_cost() / Decimal::from(weeks_spanned(trip))).round_dp(DECIMAL_PRECISION)
}

/// The even-split weekly view over the budget period.
///
/// Each week gets `ceiling / number_of_weeks`; its spend is the expenses dated
/// inside it plus the week share of every overlapping trip. Empty without a
/// budget.
pub fn even_split_weekly_breakdown(
    budget: Option<&Budget>,
    trips: &[Trip],
    expenses: &[Expense],
    today: NaiveDate,
) -> Vec<WeekBreakdown> {
    let Some(budget) = budget else {
        return Vec::new();
    };
    let weeks = each_week_of_interval(budget.period_start, budget.period_end);
    if weeks.is_empty() {
        return Vec::new();
    }
    let week_budget =
        (budget.ceiling() / Decimal::from(weeks.len() as i64)).round_dp(DECIMAL_PRECISION);

    weeks
        .into_iter()
        .map(|week_start| {
            let week_end = end_of_week(week_start);
            let expense_total = total_expenses_between(expenses, week_start, week_end);
            let trip_costs: Decimal = trips
                .iter()
                .filter(|t| week_overlaps_trip(week_start, week_end, t))
                .map(trip_week_share)
                .sum();
            let spent = expense_total + trip_costs;
            WeekBreakdown {
                week_start,
                week_end,
                budget: week_budget,
                expenses: expense_total,
                trip_costs,
                spent,
                remaining: week_budget - spent,
                is_current: today >= week_start && today <= week_end,
            }
        })
        .collect()
}

/// The week containing `today`, if it lies inside the period's weeks.
pub fn current_week(weeks: &[WeekBreakdown], today: NaiveDate) -> Option<&WeekBreakdown> {
    weeks.iter().find(|w| w.contains(today))
}
