use serde::{Deserialize, Serialize};

use crate::budget::Budget;
use crate::expenses::Expense;
use crate::planner::WeeklyPlan;
use crate::trips::Trip;
use crate::wishlist::WishlistItem;

/// Everything the engine reads for one user, taken at a single point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub budget: Option<Budget>,
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub wishlist: Vec<WishlistItem>,
    #[serde(default)]
    pub weekly_plans: Vec<WeeklyPlan>,
}

impl Snapshot {
    pub fn find_trip(&self, id: &str) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id)
    }

    pub fn find_expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn find_wishlist_item(&self, id: &str) -> Option<&WishlistItem> {
        self.wishlist.iter().find(|w| w.id == id)
    }

    pub fn find_plan(&self, week_start: chrono::NaiveDate) -> Option<&WeeklyPlan> {
        self.weekly_plans.iter().find(|p| p.week_start == week_start)
    }
}

/// One change inside a [`LedgerWrite`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityOperation {
    UpsertBudget(Budget),
    DeleteBudget,
    UpsertTrip(Trip),
    DeleteTrip(String),
    UpsertExpense(Expense),
    DeleteExpense(String),
    UpsertWishlistItem(WishlistItem),
    DeleteWishlistItem(String),
    UpsertWeeklyPlan(WeeklyPlan),
    /// Removes the plan together with its events.
    DeleteWeeklyPlan(String),
}

/// Ordered operations applied all-or-nothing.
///
/// `expected_budget_revision` is the revision of the budget as it was read.
/// When set, storage refuses the write if the stored budget moved on in the
/// meantime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerWrite {
    pub expected_budget_revision: Option<u64>,
    pub operations: Vec<EntityOperation>,
}

impl LedgerWrite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guards the write on the budget revision that was read.
    pub fn guarded_by(budget: Option<&Budget>) -> Self {
        Self {
            expected_budget_revision: budget.map(|b| b.revision),
            operations: Vec::new(),
        }
    }

    pub fn push(mut self, operation: EntityOperation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }
}
