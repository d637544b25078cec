//! In-process storage. Backs tests and embedders that keep data in memory.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use log::{debug, warn};

use super::snapshot_model::{EntityOperation, LedgerWrite, Snapshot};
use super::snapshot_traits::SnapshotRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result};

#[derive(Debug, Default)]
pub struct InMemorySnapshotRepository {
    users: RwLock<HashMap<String, Snapshot>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user's records, replacing anything stored for them.
    pub fn with_snapshot(self, user_id: &str, snapshot: Snapshot) -> Self {
        if let Ok(mut users) = self.users.write() {
            users.insert(user_id.to_string(), snapshot);
        }
        self
    }

    fn apply(snapshot: &mut Snapshot, operation: EntityOperation) -> Result<()> {
        match operation {
            EntityOperation::UpsertBudget(budget) => snapshot.budget = Some(budget),
            EntityOperation::DeleteBudget => {
                if snapshot.budget.take().is_none() {
                    return Err(DatabaseError::NotFound("budget".to_string()).into());
                }
            }
            EntityOperation::UpsertTrip(trip) => upsert(&mut snapshot.trips, trip, |t| &t.id),
            EntityOperation::DeleteTrip(id) => remove(&mut snapshot.trips, &id, |t| &t.id)?,
            EntityOperation::UpsertExpense(expense) => {
                upsert(&mut snapshot.expenses, expense, |e| &e.id)
            }
            EntityOperation::DeleteExpense(id) => {
                remove(&mut snapshot.expenses, &id, |e| &e.id)?
            }
            EntityOperation::UpsertWishlistItem(item) => {
                upsert(&mut snapshot.wishlist, item, |w| &w.id)
            }
            EntityOperation::DeleteWishlistItem(id) => {
                remove(&mut snapshot.wishlist, &id, |w| &w.id)?
            }
            EntityOperation::UpsertWeeklyPlan(plan) => {
                let clash = snapshot
                    .weekly_plans
                    .iter()
                    .any(|p| p.week_start == plan.week_start && p.id != plan.id);
                if clash {
                    return Err(DatabaseError::UniqueViolation(format!(
                        "weekly plan for {}",
                        plan.week_start
                    ))
                    .into());
                }
                upsert(&mut snapshot.weekly_plans, plan, |p| &p.id)
            }
            EntityOperation::DeleteWeeklyPlan(id) => {
                remove(&mut snapshot.weekly_plans, &id, |p| &p.id)?
            }
        }
        Ok(())
    }
}

fn upsert<T>(records: &mut Vec<T>, record: T, id: impl Fn(&T) -> &String) {
    match records.iter().position(|r| id(r) == id(&record)) {
        Some(index) => records[index] = record,
        None => records.push(record),
    }
}

fn remove<T>(records: &mut Vec<T>, target: &str, id: impl Fn(&T) -> &String) -> Result<()> {
    let before = records.len();
    records.retain(|r| id(r) != target);
    if records.len() == before {
        return Err(DatabaseError::NotFound(target.to_string()).into());
    }
    Ok(())
}

fn poisoned() -> Error {
    Error::Database(DatabaseError::Internal("snapshot store lock poisoned".to_string()))
}

#[async_trait]
impl SnapshotRepositoryTrait for InMemorySnapshotRepository {
    fn load_snapshot(&self, user_id: &str) -> Result<Snapshot> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.get(user_id).cloned().unwrap_or_default())
    }

    async fn commit(&self, user_id: &str, write: LedgerWrite) -> Result<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        let current = users.get(user_id).cloned().unwrap_or_default();

        if let Some(expected) = write.expected_budget_revision {
            let stored = current.budget.as_ref().map(|b| b.revision);
            if stored != Some(expected) {
                warn!(
                    "Rejecting write for user {}: budget revision {:?}, expected {}",
                    user_id, stored, expected
                );
                return Err(DatabaseError::ConcurrentWriteConflict(format!(
                    "budget revision is {:?}, expected {}",
                    stored, expected
                ))
                .into());
            }
        }

        // Work on a copy so a failing operation leaves the stored state untouched.
        let mut staged = current;
        let count = write.len();
        for operation in write.operations {
            Self::apply(&mut staged, operation).map_err(|e| {
                DatabaseError::TransactionFailed(format!("ledger write rolled back: {}", e))
            })?;
        }
        users.insert(user_id.to_string(), staged);
        debug!("Committed {} operation(s) for user {}", count, user_id);
        Ok(())
    }
}
