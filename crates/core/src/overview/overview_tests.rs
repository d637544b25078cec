//! Tests for the overview entry point.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::budget::{BudgetMode, NewBudget};
use crate::errors::Error;
use crate::expenses::NewExpense;
use crate::recommendations::RecommendationKind;
use crate::session::{SessionState, SessionUser};
use crate::settings::EngineSettings;
use crate::snapshot::{InMemorySnapshotRepository, Snapshot};
use crate::trips::NewTrip;
use crate::wishlist::NewWishlistItem;

fn sep(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

/// Total budget of 1000 over September with 200 spent and 100 planned.
fn scenario() -> Snapshot {
    let budget = NewBudget {
        id: None,
        mode: BudgetMode::Total { limit: dec!(1000) },
        period_start: sep(1),
        period_end: sep(30),
    }
    .into_budget();
    let trip = NewTrip {
        id: None,
        name: "Coast".to_string(),
        destination: "Brighton".to_string(),
        start_date: sep(20),
        end_date: sep(22),
        prepaid_cost: dec!(50),
        planned_cost: dec!(100),
        notes: None,
    }
    .into_trip();
    let expense = NewExpense {
        id: None,
        description: "Rent top-up".to_string(),
        amount: dec!(150),
        date: sep(3),
        category: Some("Housing".to_string()),
        notes: None,
    }
    .into_expense();
    let wish = NewWishlistItem {
        id: None,
        name: "Boat party".to_string(),
        location: "Brighton".to_string(),
        estimated_cost: dec!(42),
        priority: None,
        notes: None,
    }
    .into_item();

    Snapshot {
        budget: Some(budget),
        trips: vec![trip],
        expenses: vec![expense],
        wishlist: vec![wish],
        weekly_plans: Vec::new(),
    }
}

#[test]
fn test_overview_scenario() {
    let overview = compute_overview(
        &scenario(),
        sep(10),
        OverviewOptions::default(),
        &EngineSettings::default(),
    );

    assert!(overview.has_budget);
    assert_eq!(overview.figures.spent, dec!(200));
    assert_eq!(overview.figures.remaining, dec!(800));
    assert_eq!(overview.figures.remaining_after_planned, dec!(700));
    assert_eq!(overview.allowance.remaining_days, 21);
    assert_eq!(overview.allowance.daily_allowance.round_dp(2), dec!(38.10));
    assert_eq!(overview.weeks.len(), 6);
    assert_eq!(overview.current_week.as_ref().unwrap().week_start, sep(9));
    assert_eq!(overview.upcoming_trips_cost, dec!(150));
    assert_eq!(overview.trip_breakdowns.len(), 1);
    assert_eq!(overview.expenses_by_category[0].category, "Housing");
    assert_eq!(
        overview.recommendations[0].kind,
        RecommendationKind::OnTrack
    );
}

#[test]
fn test_overview_with_wishlist() {
    let overview = compute_overview(
        &scenario(),
        sep(10),
        OverviewOptions {
            include_wishlist: true,
        },
        &EngineSettings::default(),
    );
    assert_eq!(overview.figures.total_planned, dec!(142));
    assert_eq!(overview.allowance.allowance_base, dec!(758));
}

#[test]
fn test_overview_does_not_mutate_snapshot() {
    let snapshot = scenario();
    let copy = snapshot.clone();
    compute_overview(&snapshot, sep(10), OverviewOptions::default(), &EngineSettings::default());
    assert_eq!(snapshot, copy);
}

#[test]
fn test_empty_overview_without_budget() {
    let mut snapshot = scenario();
    snapshot.budget = None;

    let overview = compute_overview(
        &snapshot,
        sep(10),
        OverviewOptions::default(),
        &EngineSettings::default(),
    );

    assert!(!overview.has_budget);
    assert_eq!(overview.figures.spent, dec!(200));
    assert_eq!(overview.figures.remaining, Decimal::ZERO);
    assert_eq!(overview.allowance.daily_allowance, Decimal::ZERO);
    assert!(overview.weeks.is_empty());
    assert!(overview.current_week.is_none());
    assert!(overview.recommendations.is_empty());
    assert!(overview.trip_breakdowns[0].weeks.is_empty());
}

#[test]
fn test_service_uses_session_and_settings_default() {
    let repo = InMemorySnapshotRepository::new().with_snapshot("student-1", scenario());
    let settings = EngineSettings {
        include_wishlist_by_default: true,
        ..EngineSettings::default()
    };
    let service = OverviewService::new(Arc::new(repo), Arc::new(settings));

    let session = SessionState::signed_in(SessionUser {
        user_id: "student-1".to_string(),
        home_currency: "GBP".to_string(),
    });
    let overview = service.get_overview(&session, sep(10), None).unwrap();
    assert!(overview.figures.wishlist_included);

    let overview = service.get_overview(&session, sep(10), Some(false)).unwrap();
    assert!(!overview.figures.wishlist_included);

    let err = service
        .get_overview(&SessionState::new(), sep(10), None)
        .unwrap_err();
    assert!(matches!(err, Error::NoSession));
}
