//! Property-based integration tests for the allocation engine.
//!
//! These tests verify the budget-mode laws hold across random inputs, using
//! the `proptest` crate for case generation.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use studybudget_core::allowance::{allowance_snapshot, remaining_days};
use studybudget_core::budget::{
    calculate_budget_figures, Budget, BudgetLedgerService, BudgetMode, BudgetServiceTrait,
    NewBudget,
};
use studybudget_core::expenses::{Expense, NewExpense};
use studybudget_core::snapshot::InMemorySnapshotRepository;
use studybudget_core::trips::{NewTrip, Trip};
use studybudget_core::{SessionState, SessionUser};

// =============================================================================
// Generators
// =============================================================================

/// Money with two decimal places, up to 100k.
fn arb_money() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strictly positive money.
fn arb_positive_money() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// A date within a few years of 2024.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..2000).prop_map(|offset| base_date() + Duration::days(offset))
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

/// An ordered `(start, end)` period.
fn arb_period() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (arb_date(), 0i64..400).prop_map(|(start, length)| (start, start + Duration::days(length)))
}

fn arb_expenses(max: usize) -> impl Strategy<Value = Vec<Expense>> {
    proptest::collection::vec((arb_positive_money(), arb_date()), 0..=max).prop_map(|items| {
        items
            .into_iter()
            .map(|(amount, date)| {
                NewExpense {
                    id: None,
                    description: "Generated".to_string(),
                    amount,
                    date,
                    category: None,
                    notes: None,
                }
                .into_expense()
            })
            .collect()
    })
}

fn arb_trips(max: usize) -> impl Strategy<Value = Vec<Trip>> {
    proptest::collection::vec((arb_money(), arb_money(), arb_period()), 0..=max).prop_map(
        |items| {
            items
                .into_iter()
                .map(|(prepaid, planned, (start, end))| {
                    NewTrip {
                        id: None,
                        name: "Generated".to_string(),
                        destination: "Anywhere".to_string(),
                        start_date: start,
                        end_date: end,
                        prepaid_cost: prepaid,
                        planned_cost: planned,
                        notes: None,
                    }
                    .into_trip()
                })
                .collect()
        },
    )
}

fn budget(mode: BudgetMode, (start, end): (NaiveDate, NaiveDate)) -> Budget {
    NewBudget {
        id: None,
        mode,
        period_start: start,
        period_end: end,
    }
    .into_budget()
}

fn session() -> SessionState {
    SessionState::signed_in(SessionUser {
        user_id: "prop-user".to_string(),
        home_currency: "USD".to_string(),
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// In Total mode `remaining + spent == limit` and
    /// `remaining_after_planned == remaining - total_planned`, exactly.
    #[test]
    fn prop_total_mode_identity(
        limit in arb_money(),
        period in arb_period(),
        trips in arb_trips(5),
        expenses in arb_expenses(10),
    ) {
        let budget = budget(BudgetMode::Total { limit }, period);
        let figures = calculate_budget_figures(Some(&budget), &trips, &expenses, &[], false);

        prop_assert_eq!(figures.remaining + figures.spent, limit);
        prop_assert_eq!(
            figures.remaining_after_planned,
            figures.remaining - figures.total_planned
        );
    }

    /// Remaining days never drop below one.
    #[test]
    fn prop_remaining_days_at_least_one(
        (start, end) in arb_period(),
        today in arb_date(),
    ) {
        prop_assert!(remaining_days(start, end, today) >= 1);
    }

    /// Tracking mode reports no remaining money and no allowance, whatever is spent.
    #[test]
    fn prop_tracking_mode_is_zero(
        period in arb_period(),
        today in arb_date(),
        trips in arb_trips(5),
        expenses in arb_expenses(10),
        include_wishlist in any::<bool>(),
    ) {
        let budget = budget(BudgetMode::Tracking, period);
        let figures =
            calculate_budget_figures(Some(&budget), &trips, &expenses, &[], include_wishlist);
        let allowance = allowance_snapshot(Some(&budget), &figures, today);

        prop_assert_eq!(figures.remaining, Decimal::ZERO);
        prop_assert_eq!(figures.remaining_after_planned, Decimal::ZERO);
        prop_assert_eq!(allowance.daily_allowance, Decimal::ZERO);
    }

    /// Recording then deleting an expense in Remaining mode restores the balance.
    #[test]
    fn prop_remaining_mode_round_trip(
        balance in arb_money(),
        amount in arb_positive_money(),
        period in arb_period(),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let (after_record, after_delete) = runtime.block_on(async {
            let repo = Arc::new(InMemorySnapshotRepository::new());
            let service = BudgetLedgerService::new(repo);
            service
                .create_budget(
                    &session(),
                    NewBudget {
                        id: None,
                        mode: BudgetMode::Remaining { balance },
                        period_start: period.0,
                        period_end: period.1,
                    },
                )
                .await
                .unwrap();

            let expense = service
                .record_expense(
                    &session(),
                    NewExpense {
                        id: None,
                        description: "Generated".to_string(),
                        amount,
                        date: period.0,
                        category: None,
                        notes: None,
                    },
                )
                .await
                .unwrap();
            let after_record = service.get_budget(&session()).unwrap().unwrap();

            service.delete_expense(&session(), &expense.id).await.unwrap();
            let after_delete = service.get_budget(&session()).unwrap().unwrap();
            (after_record, after_delete)
        });

        prop_assert_eq!(after_record.balance(), Some(balance - amount));
        prop_assert_eq!(after_delete.balance(), Some(balance));
        prop_assert_eq!(after_delete.spent, Decimal::ZERO);
    }
}
