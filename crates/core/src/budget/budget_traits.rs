//! Budget ledger service contract.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::budget_model::{BalanceUpdateOutcome, Budget, BudgetUpdate, NewBudget};
use crate::errors::Result;
use crate::expenses::{Expense, ExpenseUpdate, NewExpense};
use crate::session::SessionState;

/// Budget and expense writes for the signed-in user.
///
/// Every write that touches spending also rewrites the budget's cached
/// `spent`/`planned_spending` figures in the same atomic ledger write.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// The active budget, if one was created.
    fn get_budget(&self, session: &SessionState) -> Result<Option<Budget>>;

    /// Creates the budget. Fails if the user already has one.
    async fn create_budget(&self, session: &SessionState, new_budget: NewBudget) -> Result<Budget>;

    /// Edits the period and/or mode. Switching modes is allowed.
    async fn update_budget(&self, session: &SessionState, update: BudgetUpdate) -> Result<Budget>;

    /// Full reset: removes the budget and the expense ledger recorded against it.
    async fn reset_budget(&self, session: &SessionState) -> Result<()>;

    fn list_expenses(&self, session: &SessionState) -> Result<Vec<Expense>>;

    /// Records an expense. In Remaining mode the balance drops by its amount.
    async fn record_expense(&self, session: &SessionState, new_expense: NewExpense)
        -> Result<Expense>;

    /// Edits an expense. In Remaining mode the balance moves by the amount delta.
    async fn update_expense(&self, session: &SessionState, update: ExpenseUpdate)
        -> Result<Expense>;

    /// Deletes an expense. In Remaining mode its amount is restored.
    async fn delete_expense(&self, session: &SessionState, expense_id: &str) -> Result<Expense>;

    /// Sets a new absolute balance (Remaining mode only). A drop is booked as
    /// a "Balance Adjustment" expense dated `today`.
    async fn update_balance(
        &self,
        session: &SessionState,
        new_balance: Decimal,
        today: NaiveDate,
    ) -> Result<BalanceUpdateOutcome>;

    /// Recomputes the cached aggregates from the stored trips and expenses.
    async fn refresh_cached_totals(&self, session: &SessionState) -> Result<Option<Budget>>;
}
