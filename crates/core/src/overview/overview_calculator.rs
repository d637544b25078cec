use chrono::NaiveDate;

use super::overview_model::{BudgetOverview, OverviewOptions};
use crate::allowance::{allowance_snapshot, current_week, even_split_weekly_breakdown};
use crate::budget::calculate_budget_figures;
use crate::expenses::expenses_by_category;
use crate::recommendations::{generate_recommendations, upcoming_trip_costs};
use crate::settings::EngineSettings;
use crate::snapshot::Snapshot;
use crate::trips::trip_cost_distribution;
use crate::utils::time_utils::each_week_of_interval;

/// Derives the whole overview from a snapshot. Pure: the snapshot is only read.
///
/// Without a budget the spend figures are still filled in and everything that
/// depends on a ceiling is zero or empty.
pub fn compute_overview(
    snapshot: &Snapshot,
    today: NaiveDate,
    options: OverviewOptions,
    settings: &EngineSettings,
) -> BudgetOverview {
    let budget = snapshot.budget.as_ref();
    let figures = calculate_budget_figures(
        budget,
        &snapshot.trips,
        &snapshot.expenses,
        &snapshot.wishlist,
        options.include_wishlist,
    );
    let allowance = allowance_snapshot(budget, &figures, today);
    let weeks = even_split_weekly_breakdown(budget, &snapshot.trips, &snapshot.expenses, today);
    let this_week = current_week(&weeks, today).cloned();
    let upcoming = upcoming_trip_costs(&snapshot.trips, today);
    let recommendations =
        generate_recommendations(&figures, this_week.as_ref(), upcoming, settings);

    let week_starts = budget
        .map(|b| each_week_of_interval(b.period_start, b.period_end))
        .unwrap_or_default();
    let mut trips: Vec<_> = snapshot.trips.iter().collect();
    trips.sort_by_key(|t| t.start_date);
    let trip_breakdowns = trips
        .into_iter()
        .map(|t| trip_cost_distribution(t, &week_starts))
        .collect();

    BudgetOverview {
        as_of: today,
        has_budget: budget.is_some(),
        figures,
        allowance,
        weeks,
        current_week: this_week,
        upcoming_trips_cost: upcoming,
        recommendations,
        trip_breakdowns,
        expenses_by_category: expenses_by_category(&snapshot.expenses),
    }
}
