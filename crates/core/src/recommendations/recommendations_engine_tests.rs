//! Tests for the recommendation rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::allowance::WeekBreakdown;
use crate::budget::{BudgetFigures, BudgetModeKind};
use crate::settings::EngineSettings;
use crate::trips::NewTrip;

fn figures(mode: BudgetModeKind, ceiling: Decimal, remaining: Decimal) -> BudgetFigures {
    BudgetFigures {
        mode: Some(mode),
        ceiling,
        remaining,
        remaining_after_planned: remaining,
        ..BudgetFigures::empty()
    }
}

fn week(budget: Decimal, spent: Decimal) -> WeekBreakdown {
    let start = NaiveDate::from_ymd_opt(2024, 9, 9).unwrap();
    WeekBreakdown {
        week_start: start,
        week_end: NaiveDate::from_ymd_opt(2024, 9, 15).unwrap(),
        budget,
        expenses: spent,
        trip_costs: Decimal::ZERO,
        spent,
        remaining: budget - spent,
        is_current: true,
    }
}

fn kinds(recs: &[Recommendation]) -> Vec<RecommendationKind> {
    recs.iter().map(|r| r.kind).collect()
}

#[test]
fn test_on_track_when_nothing_fires() {
    let recs = generate_recommendations(
        &figures(BudgetModeKind::Total, dec!(1000), dec!(600)),
        Some(&week(dec!(100), dec!(40))),
        dec!(200),
        &EngineSettings::default(),
    );
    assert_eq!(kinds(&recs), vec![RecommendationKind::OnTrack]);
    assert_eq!(recs[0].severity, Severity::Info);
}

#[test]
fn test_over_budget_excludes_low_balance() {
    let recs = generate_recommendations(
        &figures(BudgetModeKind::Total, dec!(1000), dec!(-25)),
        None,
        Decimal::ZERO,
        &EngineSettings::default(),
    );
    assert_eq!(kinds(&recs), vec![RecommendationKind::OverBudget]);
    assert_eq!(recs[0].amount, Some(dec!(25)));
    assert!(recs[0].message.contains("25.00"));
}

#[test]
fn test_low_balance_threshold() {
    let settings = EngineSettings::default();
    let low = generate_recommendations(
        &figures(BudgetModeKind::Total, dec!(1000), dec!(99.99)),
        None,
        Decimal::ZERO,
        &settings,
    );
    assert_eq!(kinds(&low), vec![RecommendationKind::LowBalance]);

    let fine = generate_recommendations(
        &figures(BudgetModeKind::Total, dec!(1000), dec!(100)),
        None,
        Decimal::ZERO,
        &settings,
    );
    assert_eq!(kinds(&fine), vec![RecommendationKind::OnTrack]);
}

#[test]
fn test_week_rules() {
    let settings = EngineSettings::default();
    let over = generate_recommendations(
        &figures(BudgetModeKind::Total, dec!(1000), dec!(500)),
        Some(&week(dec!(100), dec!(130))),
        Decimal::ZERO,
        &settings,
    );
    assert_eq!(kinds(&over), vec![RecommendationKind::OverBudgetThisWeek]);
    assert_eq!(over[0].amount, Some(dec!(30)));

    let low = generate_recommendations(
        &figures(BudgetModeKind::Total, dec!(1000), dec!(500)),
        Some(&week(dec!(100), dec!(85))),
        Decimal::ZERO,
        &settings,
    );
    assert_eq!(kinds(&low), vec![RecommendationKind::LowWeekBalance]);
}

#[test]
fn test_rules_fire_independently_in_order() {
    let recs = generate_recommendations(
        &figures(BudgetModeKind::Total, dec!(1000), dec!(-10)),
        Some(&week(dec!(100), dec!(150))),
        dec!(300),
        &EngineSettings::default(),
    );
    assert_eq!(
        kinds(&recs),
        vec![
            RecommendationKind::OverBudget,
            RecommendationKind::OverBudgetThisWeek,
            RecommendationKind::InsufficientForUpcomingTrips,
        ]
    );
    assert_eq!(recs[2].amount, Some(dec!(310)));
}

#[test]
fn test_upcoming_trip_shortfall() {
    let recs = generate_recommendations(
        &figures(BudgetModeKind::Remaining, dec!(150), dec!(150)),
        None,
        dec!(200),
        &EngineSettings::default(),
    );
    assert_eq!(kinds(&recs), vec![RecommendationKind::InsufficientForUpcomingTrips]);
    let message = &recs[0].message;
    assert!(message.contains("200.00"));
    assert!(message.contains("150.00"));
    assert!(message.contains("50.00"));
}

#[test]
fn test_tracking_mode_only_affirms() {
    let recs = generate_recommendations(
        &figures(BudgetModeKind::Tracking, Decimal::ZERO, Decimal::ZERO),
        Some(&week(Decimal::ZERO, dec!(90))),
        dec!(500),
        &EngineSettings::default(),
    );
    assert_eq!(kinds(&recs), vec![RecommendationKind::OnTrack]);
}

#[test]
fn test_missing_budget_has_no_recommendations() {
    let recs = generate_recommendations(
        &BudgetFigures::empty(),
        None,
        dec!(100),
        &EngineSettings::default(),
    );
    assert!(recs.is_empty());
}

#[test]
fn test_upcoming_trip_costs_only_counts_future_trips() {
    let today = NaiveDate::from_ymd_opt(2024, 9, 10).unwrap();
    let trip = |start: u32, end: u32| {
        NewTrip {
            id: None,
            name: "Trip".to_string(),
            destination: "Oslo".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 9, start).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 9, end).unwrap(),
            prepaid_cost: dec!(40),
            planned_cost: dec!(60),
            notes: None,
        }
        .into_trip()
    };
    let trips = vec![trip(1, 3), trip(9, 12), trip(20, 22), trip(25, 27)];
    assert_eq!(upcoming_trip_costs(&trips, today), dec!(200));
}
