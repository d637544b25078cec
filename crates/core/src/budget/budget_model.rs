//! Budget domain models.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::validation::{ensure_date_range, ensure_non_negative};

/// How the budget's money is interpreted. Each mode carries only the figure
/// that is meaningful to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetMode {
    /// A fixed pool for the whole period; spending is subtracted from it.
    Total { limit: Decimal },
    /// The live balance, already net of past spending. Every recorded
    /// expense lowers it immediately.
    Remaining { balance: Decimal },
    /// No ceiling; spending is only tracked.
    Tracking,
}

/// Fieldless mirror of [`BudgetMode`] for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetModeKind {
    Total,
    Remaining,
    Tracking,
}

impl BudgetMode {
    pub fn kind(&self) -> BudgetModeKind {
        match self {
            BudgetMode::Total { .. } => BudgetModeKind::Total,
            BudgetMode::Remaining { .. } => BudgetModeKind::Remaining,
            BudgetMode::Tracking => BudgetModeKind::Tracking,
        }
    }

    /// The ceiling used for ratios and the even weekly split: the limit in
    /// Total mode, the current balance in Remaining mode, zero when tracking.
    pub fn ceiling(&self) -> Decimal {
        match self {
            BudgetMode::Total { limit } => *limit,
            BudgetMode::Remaining { balance } => *balance,
            BudgetMode::Tracking => Decimal::ZERO,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            BudgetMode::Total { limit } => ensure_non_negative("limit", *limit),
            BudgetMode::Remaining { balance } => ensure_non_negative("balance", *balance),
            BudgetMode::Tracking => Ok(()),
        }
    }
}

/// The single active budget of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    #[serde(flatten)]
    pub mode: BudgetMode,
    /// First day of the period, inclusive.
    pub period_start: NaiveDate,
    /// Last day of the period, inclusive.
    pub period_end: NaiveDate,
    /// Cached prepaid trip costs plus expenses, rewritten on every ledger write.
    pub spent: Decimal,
    /// Cached planned trip costs. Never includes wishlist items.
    pub planned_spending: Decimal,
    /// Bumped on every write; storage uses it to reject racing writers.
    pub revision: u64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Budget {
    pub fn kind(&self) -> BudgetModeKind {
        self.mode.kind()
    }

    pub fn ceiling(&self) -> Decimal {
        self.mode.ceiling()
    }

    pub fn balance(&self) -> Option<Decimal> {
        match self.mode {
            BudgetMode::Remaining { balance } => Some(balance),
            _ => None,
        }
    }

    /// Shifts a Remaining-mode balance by `delta`. No-op in other modes.
    pub fn adjust_balance(&mut self, delta: Decimal) {
        if let BudgetMode::Remaining { balance } = &mut self.mode {
            *balance += delta;
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }

    /// Marks the record as changed: new revision and timestamp.
    pub fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Utc::now().naive_utc();
    }
}

/// Input model for creating the budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub mode: BudgetMode,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        ensure_date_range(self.period_start, self.period_end)?;
        self.mode.validate()
    }

    pub fn into_budget(self) -> Budget {
        let now = Utc::now().naive_utc();
        Budget {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            mode: self.mode,
            period_start: self.period_start,
            period_end: self.period_end,
            spent: Decimal::ZERO,
            planned_spending: Decimal::ZERO,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input model for editing the budget. Switching modes is allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    #[serde(flatten)]
    pub mode: BudgetMode,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

impl BudgetUpdate {
    pub fn validate(&self) -> Result<()> {
        ensure_date_range(self.period_start, self.period_end)?;
        self.mode.validate()
    }

    pub fn apply_to(self, budget: &mut Budget) {
        budget.mode = self.mode;
        budget.period_start = self.period_start;
        budget.period_end = self.period_end;
        budget.touch();
    }
}

/// Result of setting a new absolute balance in Remaining mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdateOutcome {
    pub previous_balance: Decimal,
    pub new_balance: Decimal,
    /// `previous - new`; positive when money left the account.
    pub difference: Decimal,
    /// The synthetic expense recorded for a positive difference.
    pub adjustment_expense: Option<crate::expenses::Expense>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_budget(mode: BudgetMode) -> NewBudget {
        NewBudget {
            id: None,
            mode,
            period_start: date(2024, 9, 1),
            period_end: date(2024, 12, 20),
        }
    }

    #[test]
    fn test_mode_serialization_is_tagged() {
        let budget = new_budget(BudgetMode::Total { limit: dec!(1000) }).into_budget();
        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json["mode"], "TOTAL");
        assert!(json.get("limit").is_some());
        assert!(json.get("balance").is_none());

        let tracking = new_budget(BudgetMode::Tracking).into_budget();
        let json = serde_json::to_value(&tracking).unwrap();
        assert_eq!(json["mode"], "TRACKING");
    }

    #[test]
    fn test_mode_round_trip() {
        let budget = new_budget(BudgetMode::Remaining { balance: dec!(480) }).into_budget();
        let json = serde_json::to_string(&budget).unwrap();
        let parsed: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.mode, BudgetMode::Remaining { balance: dec!(480) });
        assert_eq!(parsed.period_end, budget.period_end);
    }

    #[test]
    fn test_validate_period_order() {
        let mut input = new_budget(BudgetMode::Tracking);
        input.period_end = date(2024, 8, 31);
        assert!(input.validate().is_err());

        input.period_end = input.period_start;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_negative_amounts() {
        assert!(new_budget(BudgetMode::Total { limit: dec!(-1) })
            .validate()
            .is_err());
        assert!(new_budget(BudgetMode::Remaining { balance: dec!(-1) })
            .validate()
            .is_err());
        assert!(new_budget(BudgetMode::Total { limit: Decimal::ZERO })
            .validate()
            .is_ok());
    }

    #[test]
    fn test_ceiling_per_mode() {
        assert_eq!(BudgetMode::Total { limit: dec!(900) }.ceiling(), dec!(900));
        assert_eq!(BudgetMode::Remaining { balance: dec!(75) }.ceiling(), dec!(75));
        assert_eq!(BudgetMode::Tracking.ceiling(), Decimal::ZERO);
    }

    #[test]
    fn test_adjust_balance_only_in_remaining_mode() {
        let mut remaining = new_budget(BudgetMode::Remaining { balance: dec!(500) }).into_budget();
        remaining.adjust_balance(dec!(-50));
        assert_eq!(remaining.balance(), Some(dec!(450)));

        let mut total = new_budget(BudgetMode::Total { limit: dec!(500) }).into_budget();
        total.adjust_balance(dec!(-50));
        assert_eq!(total.mode, BudgetMode::Total { limit: dec!(500) });
    }

    #[test]
    fn test_touch_bumps_revision() {
        let mut budget = new_budget(BudgetMode::Tracking).into_budget();
        budget.touch();
        budget.touch();
        assert_eq!(budget.revision, 2);
    }
}
