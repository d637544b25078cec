use rust_decimal::Decimal;

use super::planner_model::{PlanStatus, WeeklyPlan, WeeklyPlanSummary};

/// Totals a plan per day and overall, and compares it against the allowance.
pub fn summarize_week(plan: &WeeklyPlan, weekly_allowance: Decimal) -> WeeklyPlanSummary {
    let mut by_day = [Decimal::ZERO; 7];
    for event in &plan.events {
        if let Some(slot) = by_day.get_mut(usize::from(event.day_of_week)) {
            *slot += event.amount;
        }
    }
    let planned_total: Decimal = by_day.iter().copied().sum();
    let difference = weekly_allowance - planned_total;
    let status = if difference > Decimal::ZERO {
        PlanStatus::UnderBudget
    } else if difference.is_zero() {
        PlanStatus::OnBudget
    } else {
        PlanStatus::OverBudget
    };

    WeeklyPlanSummary {
        week_start: plan.week_start,
        by_day,
        planned_total,
        weekly_allowance,
        difference,
        status,
    }
}
