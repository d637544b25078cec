//! Budget-mode arithmetic.
//!
//! | Mode      | remaining          | remaining after planned      |
//! |-----------|--------------------|------------------------------|
//! | Total     | `limit - spent`    | `remaining - total_planned`  |
//! | Remaining | `balance`          | `balance - total_planned`    |
//! | Tracking  | 0                  | 0                            |
//!
//! `spent` is always prepaid trip costs plus expenses. In Remaining mode it is
//! reported but not subtracted again, since every expense already lowered the
//! balance when it was recorded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::budget_model::{Budget, BudgetMode, BudgetModeKind};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::expenses::{total_expenses, Expense};
use crate::trips::Trip;
use crate::wishlist::{wishlist_total, WishlistItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetFigures {
    /// `None` when no budget exists.
    pub mode: Option<BudgetModeKind>,
    pub ceiling: Decimal,
    pub spent: Decimal,
    /// Planned trip costs, plus the wishlist when it is included.
    pub total_planned: Decimal,
    pub wishlist_total: Decimal,
    pub wishlist_included: bool,
    pub remaining: Decimal,
    pub remaining_after_planned: Decimal,
    /// Share of the ceiling already spent (Total mode only).
    pub spent_percent: Decimal,
    /// Share of the ceiling spoken for by spending and plans.
    pub committed_percent: Decimal,
}

impl BudgetFigures {
    pub fn empty() -> Self {
        Self {
            mode: None,
            ceiling: Decimal::ZERO,
            spent: Decimal::ZERO,
            total_planned: Decimal::ZERO,
            wishlist_total: Decimal::ZERO,
            wishlist_included: false,
            remaining: Decimal::ZERO,
            remaining_after_planned: Decimal::ZERO,
            spent_percent: Decimal::ZERO,
            committed_percent: Decimal::ZERO,
        }
    }
}

pub fn prepaid_total(trips: &[Trip]) -> Decimal {
    trips.iter().map(|t| t.prepaid_cost).sum()
}

pub fn planned_total(trips: &[Trip]) -> Decimal {
    trips.iter().map(|t| t.planned_cost).sum()
}

/// Prepaid trip costs plus expenses.
pub fn spent_total(trips: &[Trip], expenses: &[Expense]) -> Decimal {
    prepaid_total(trips) + total_expenses(expenses)
}

/// The values the storage layer caches on the budget row: `(spent, planned_spending)`.
pub fn cached_totals(trips: &[Trip], expenses: &[Expense]) -> (Decimal, Decimal) {
    (spent_total(trips, expenses), planned_total(trips))
}

/// Rewrites the cached aggregates. Returns `true` when they changed.
pub fn refresh_cached_totals(budget: &mut Budget, trips: &[Trip], expenses: &[Expense]) -> bool {
    let (spent, planned) = cached_totals(trips, expenses);
    let changed = budget.spent != spent || budget.planned_spending != planned;
    budget.spent = spent;
    budget.planned_spending = planned;
    changed
}

/// The budget as it must be stored after a ledger write: balance shifted by
/// `balance_delta` (Remaining mode only), caches rewritten, revision bumped.
pub fn settle_budget(
    budget: &Budget,
    trips: &[Trip],
    expenses: &[Expense],
    balance_delta: Decimal,
) -> Budget {
    let mut settled = budget.clone();
    settled.adjust_balance(balance_delta);
    refresh_cached_totals(&mut settled, trips, expenses);
    settled.touch();
    settled
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).round_dp(DISPLAY_DECIMAL_PRECISION)
}

/// Derives every budget-level figure from the snapshot.
///
/// With no budget the spend figures are still reported, while every
/// ceiling-dependent figure is zero so an empty state can render.
pub fn calculate_budget_figures(
    budget: Option<&Budget>,
    trips: &[Trip],
    expenses: &[Expense],
    wishlist: &[WishlistItem],
    include_wishlist: bool,
) -> BudgetFigures {
    let spent = spent_total(trips, expenses);
    let wishlist_sum = wishlist_total(wishlist);
    let mut total_planned = planned_total(trips);
    if include_wishlist {
        total_planned += wishlist_sum;
    }

    let base = BudgetFigures {
        spent,
        total_planned,
        wishlist_total: wishlist_sum,
        wishlist_included: include_wishlist,
        ..BudgetFigures::empty()
    };

    let Some(budget) = budget else {
        return base;
    };

    match budget.mode {
        BudgetMode::Total { limit } => {
            let remaining = limit - spent;
            BudgetFigures {
                mode: Some(BudgetModeKind::Total),
                ceiling: limit,
                remaining,
                remaining_after_planned: remaining - total_planned,
                spent_percent: percent_of(spent, limit),
                committed_percent: percent_of(spent + total_planned, limit),
                ..base
            }
        }
        BudgetMode::Remaining { balance } => BudgetFigures {
            mode: Some(BudgetModeKind::Remaining),
            ceiling: balance,
            remaining: balance,
            remaining_after_planned: balance - total_planned,
            committed_percent: percent_of(total_planned, balance),
            ..base
        },
        BudgetMode::Tracking => BudgetFigures {
            mode: Some(BudgetModeKind::Tracking),
            ..base
        },
    }
}
