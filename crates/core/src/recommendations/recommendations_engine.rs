//! Recommendation rules, evaluated in order:
//!
//! 1. overall remaining below zero, otherwise below the low-balance share of the limit
//! 2. this week's remaining below zero, otherwise below the low-week share of the week budget
//! 3. upcoming trips costing more than what remains
//!
//! When none fires a single affirmation is returned. A budget without a
//! ceiling only ever gets the affirmation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::recommendations_model::{Recommendation, RecommendationKind, Severity};
use crate::allowance::WeekBreakdown;
use crate::budget::{BudgetFigures, BudgetModeKind};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::settings::EngineSettings;
use crate::trips::Trip;

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(DISPLAY_DECIMAL_PRECISION))
}

/// Total cost of trips that start after `today`.
pub fn upcoming_trip_costs(trips: &[Trip], today: NaiveDate) -> Decimal {
    trips
        .iter()
        .filter(|t| t.is_upcoming(today))
        .map(|t| t.total_cost())
        .sum()
}

pub fn generate_recommendations(
    figures: &BudgetFigures,
    current_week: Option<&WeekBreakdown>,
    upcoming_costs: Decimal,
    settings: &EngineSettings,
) -> Vec<Recommendation> {
    let mode = match figures.mode {
        None => return Vec::new(),
        Some(mode) => mode,
    };

    let mut out = Vec::new();

    if mode != BudgetModeKind::Tracking {
        let remaining = figures.remaining;
        if remaining < Decimal::ZERO {
            out.push(
                Recommendation::new(
                    RecommendationKind::OverBudget,
                    Severity::Critical,
                    format!("You are {} over budget.", money(-remaining)),
                )
                .with_amount(-remaining),
            );
        } else if remaining < settings.low_balance_ratio * figures.ceiling {
            out.push(
                Recommendation::new(
                    RecommendationKind::LowBalance,
                    Severity::Warning,
                    format!("Only {} of your budget is left.", money(remaining)),
                )
                .with_amount(remaining),
            );
        }

        if let Some(week) = current_week {
            if week.remaining < Decimal::ZERO {
                out.push(
                    Recommendation::new(
                        RecommendationKind::OverBudgetThisWeek,
                        Severity::Warning,
                        format!(
                            "You are {} over this week's budget.",
                            money(-week.remaining)
                        ),
                    )
                    .with_amount(-week.remaining),
                );
            } else if week.remaining < settings.low_week_balance_ratio * week.budget {
                out.push(
                    Recommendation::new(
                        RecommendationKind::LowWeekBalance,
                        Severity::Info,
                        format!("{} left for the rest of this week.", money(week.remaining)),
                    )
                    .with_amount(week.remaining),
                );
            }
        }

        if upcoming_costs > remaining {
            let shortfall = upcoming_costs - remaining;
            out.push(
                Recommendation::new(
                    RecommendationKind::InsufficientForUpcomingTrips,
                    Severity::Warning,
                    format!(
                        "Upcoming trips cost {} but only {} remains, a shortfall of {}.",
                        money(upcoming_costs),
                        money(remaining),
                        money(shortfall)
                    ),
                )
                .with_amount(shortfall),
            );
        }
    }

    if out.is_empty() {
        out.push(Recommendation::new(
            RecommendationKind::OnTrack,
            Severity::Info,
            "You're on track. Keep it up!".to_string(),
        ));
    }
    out
}
