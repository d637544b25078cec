use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, error, info};
use rust_decimal::Decimal;

use super::budget_calculator::{refresh_cached_totals, settle_budget};
use super::budget_model::{BalanceUpdateOutcome, Budget, BudgetUpdate, NewBudget};
use super::budget_traits::BudgetServiceTrait;
use crate::errors::{DatabaseError, Error, Result};
use crate::expenses::{Expense, ExpenseUpdate, NewExpense};
use crate::session::SessionState;
use crate::snapshot::{EntityOperation, LedgerWrite, SnapshotRepositoryTrait};
use crate::utils::validation::ensure_non_negative;

/// Owns every write that moves money: budget edits, expenses and balance
/// updates.
pub struct BudgetLedgerService {
    repository: Arc<dyn SnapshotRepositoryTrait>,
}

impl BudgetLedgerService {
    pub fn new(repository: Arc<dyn SnapshotRepositoryTrait>) -> Self {
        Self { repository }
    }

    async fn commit(&self, user_id: &str, write: LedgerWrite) -> Result<()> {
        self.repository.commit(user_id, write).await.map_err(|e| {
            error!("Ledger write for user {} failed: {}", user_id, e);
            e
        })
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetLedgerService {
    fn get_budget(&self, session: &SessionState) -> Result<Option<Budget>> {
        let user_id = session.require_user()?;
        Ok(self.repository.load_snapshot(user_id)?.budget)
    }

    async fn create_budget(&self, session: &SessionState, new_budget: NewBudget) -> Result<Budget> {
        let user_id = session.require_user()?;
        new_budget.validate()?;

        let snapshot = self.repository.load_snapshot(user_id)?;
        if snapshot.budget.is_some() {
            return Err(DatabaseError::UniqueViolation(format!(
                "user {} already has an active budget",
                user_id
            ))
            .into());
        }

        let mut budget = new_budget.into_budget();
        refresh_cached_totals(&mut budget, &snapshot.trips, &snapshot.expenses);

        self.commit(
            user_id,
            LedgerWrite::new().push(EntityOperation::UpsertBudget(budget.clone())),
        )
        .await?;
        info!(
            "Created {:?} budget {} for {} to {}",
            budget.kind(),
            budget.id,
            budget.period_start,
            budget.period_end
        );
        Ok(budget)
    }

    async fn update_budget(&self, session: &SessionState, update: BudgetUpdate) -> Result<Budget> {
        let user_id = session.require_user()?;
        update.validate()?;

        let snapshot = self.repository.load_snapshot(user_id)?;
        let current = snapshot
            .budget
            .as_ref()
            .ok_or_else(|| Error::not_found("Budget", user_id))?;

        let mut budget = current.clone();
        update.apply_to(&mut budget);
        refresh_cached_totals(&mut budget, &snapshot.trips, &snapshot.expenses);

        self.commit(
            user_id,
            LedgerWrite::guarded_by(Some(current))
                .push(EntityOperation::UpsertBudget(budget.clone())),
        )
        .await?;
        debug!("Updated budget {} (now {:?})", budget.id, budget.kind());
        Ok(budget)
    }

    async fn reset_budget(&self, session: &SessionState) -> Result<()> {
        let user_id = session.require_user()?;
        let snapshot = self.repository.load_snapshot(user_id)?;
        let Some(current) = snapshot.budget.as_ref() else {
            debug!("No budget to reset for user {}", user_id);
            return Ok(());
        };

        let mut write = LedgerWrite::guarded_by(Some(current)).push(EntityOperation::DeleteBudget);
        for expense in &snapshot.expenses {
            write = write.push(EntityOperation::DeleteExpense(expense.id.clone()));
        }
        let removed = snapshot.expenses.len();
        self.commit(user_id, write).await?;
        info!(
            "Reset budget for user {} ({} expense(s) removed)",
            user_id, removed
        );
        Ok(())
    }

    fn list_expenses(&self, session: &SessionState) -> Result<Vec<Expense>> {
        let user_id = session.require_user()?;
        let mut expenses = self.repository.load_snapshot(user_id)?.expenses;
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }

    async fn record_expense(
        &self,
        session: &SessionState,
        new_expense: NewExpense,
    ) -> Result<Expense> {
        let user_id = session.require_user()?;
        new_expense.validate()?;

        let mut snapshot = self.repository.load_snapshot(user_id)?;
        let expense = new_expense.into_expense();
        snapshot.expenses.push(expense.clone());

        let mut write = LedgerWrite::guarded_by(snapshot.budget.as_ref())
            .push(EntityOperation::UpsertExpense(expense.clone()));
        if let Some(budget) = snapshot.budget.as_ref() {
            let settled = settle_budget(budget, &snapshot.trips, &snapshot.expenses, -expense.amount);
            write = write.push(EntityOperation::UpsertBudget(settled));
        }

        self.commit(user_id, write).await?;
        info!("Recorded expense {} of {}", expense.id, expense.amount);
        Ok(expense)
    }

    async fn update_expense(
        &self,
        session: &SessionState,
        update: ExpenseUpdate,
    ) -> Result<Expense> {
        let user_id = session.require_user()?;
        update.validate()?;

        let mut snapshot = self.repository.load_snapshot(user_id)?;
        let index = snapshot
            .expenses
            .iter()
            .position(|e| e.id == update.id)
            .ok_or_else(|| Error::not_found("Expense", update.id.clone()))?;

        let previous_amount = snapshot.expenses[index].amount;
        let updated = update.apply_to(&snapshot.expenses[index]);
        snapshot.expenses[index] = updated.clone();

        let mut write = LedgerWrite::guarded_by(snapshot.budget.as_ref())
            .push(EntityOperation::UpsertExpense(updated.clone()));
        if let Some(budget) = snapshot.budget.as_ref() {
            let delta = previous_amount - updated.amount;
            let settled = settle_budget(budget, &snapshot.trips, &snapshot.expenses, delta);
            write = write.push(EntityOperation::UpsertBudget(settled));
        }

        self.commit(user_id, write).await?;
        debug!(
            "Updated expense {} ({} -> {})",
            updated.id, previous_amount, updated.amount
        );
        Ok(updated)
    }

    async fn delete_expense(&self, session: &SessionState, expense_id: &str) -> Result<Expense> {
        let user_id = session.require_user()?;

        let mut snapshot = self.repository.load_snapshot(user_id)?;
        let index = snapshot
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| Error::not_found("Expense", expense_id))?;
        let removed = snapshot.expenses.remove(index);

        let mut write = LedgerWrite::guarded_by(snapshot.budget.as_ref())
            .push(EntityOperation::DeleteExpense(removed.id.clone()));
        if let Some(budget) = snapshot.budget.as_ref() {
            let settled = settle_budget(budget, &snapshot.trips, &snapshot.expenses, removed.amount);
            write = write.push(EntityOperation::UpsertBudget(settled));
        }

        self.commit(user_id, write).await?;
        info!("Deleted expense {} of {}", removed.id, removed.amount);
        Ok(removed)
    }

    async fn update_balance(
        &self,
        session: &SessionState,
        new_balance: Decimal,
        today: NaiveDate,
    ) -> Result<BalanceUpdateOutcome> {
        let user_id = session.require_user()?;
        ensure_non_negative("balance", new_balance)?;

        let mut snapshot = self.repository.load_snapshot(user_id)?;
        let current = snapshot
            .budget
            .clone()
            .ok_or_else(|| Error::not_found("Budget", user_id))?;
        let previous_balance = current.balance().ok_or_else(|| {
            Error::invalid_input(format!(
                "balance updates need a Remaining-mode budget (this one is {:?})",
                current.kind()
            ))
        })?;

        let difference = previous_balance - new_balance;
        if difference.is_zero() {
            debug!("Balance unchanged at {}", previous_balance);
            return Ok(BalanceUpdateOutcome {
                previous_balance,
                new_balance,
                difference,
                adjustment_expense: None,
            });
        }

        let mut write = LedgerWrite::guarded_by(Some(&current));
        let adjustment_expense = if difference > Decimal::ZERO {
            let expense = NewExpense::balance_adjustment(difference, today).into_expense();
            snapshot.expenses.push(expense.clone());
            write = write.push(EntityOperation::UpsertExpense(expense.clone()));
            Some(expense)
        } else {
            None
        };

        // The new balance is absolute; the synthetic expense must not lower it again.
        let settled = settle_budget(
            &current,
            &snapshot.trips,
            &snapshot.expenses,
            new_balance - previous_balance,
        );
        write = write.push(EntityOperation::UpsertBudget(settled));

        self.commit(user_id, write).await?;
        info!(
            "Balance updated from {} to {} (difference {})",
            previous_balance, new_balance, difference
        );
        Ok(BalanceUpdateOutcome {
            previous_balance,
            new_balance,
            difference,
            adjustment_expense,
        })
    }

    async fn refresh_cached_totals(&self, session: &SessionState) -> Result<Option<Budget>> {
        let user_id = session.require_user()?;
        let snapshot = self.repository.load_snapshot(user_id)?;
        let Some(current) = snapshot.budget.as_ref() else {
            return Ok(None);
        };

        let mut budget = current.clone();
        if !refresh_cached_totals(&mut budget, &snapshot.trips, &snapshot.expenses) {
            return Ok(Some(budget));
        }
        budget.touch();
        self.commit(
            user_id,
            LedgerWrite::guarded_by(Some(current))
                .push(EntityOperation::UpsertBudget(budget.clone())),
        )
        .await?;
        debug!(
            "Refreshed cached totals: spent {}, planned {}",
            budget.spent, budget.planned_spending
        );
        Ok(Some(budget))
    }
}
