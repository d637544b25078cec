//! Expense domain models.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::BALANCE_ADJUSTMENT_CATEGORY;
use crate::errors::Result;
use crate::utils::validation::{ensure_not_blank, ensure_positive};

/// Money already spent. Contributes to the budget's `spent` aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Expense {
    pub fn is_balance_adjustment(&self) -> bool {
        self.category.as_deref() == Some(BALANCE_ADJUSTMENT_CATEGORY)
    }
}

/// Input model for recording a new expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl NewExpense {
    /// The synthetic expense recorded when a tracked balance is lowered.
    pub fn balance_adjustment(amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: None,
            description: "Balance adjustment".to_string(),
            amount,
            date,
            category: Some(BALANCE_ADJUSTMENT_CATEGORY.to_string()),
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("description", &self.description)?;
        ensure_positive("amount", self.amount)?;
        Ok(())
    }

    pub fn into_expense(self) -> Expense {
        Expense {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            description: self.description.trim().to_string(),
            amount: self.amount,
            date: self.date,
            category: self.category.filter(|c| !c.trim().is_empty()),
            notes: self.notes,
            created_at: Utc::now().naive_utc(),
        }
    }
}

/// Input model for editing a recorded expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl ExpenseUpdate {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("id", &self.id)?;
        ensure_not_blank("description", &self.description)?;
        ensure_positive("amount", self.amount)?;
        Ok(())
    }

    /// Applies the edit on top of the stored record, keeping its creation time.
    pub fn apply_to(self, existing: &Expense) -> Expense {
        Expense {
            id: existing.id.clone(),
            description: self.description.trim().to_string(),
            amount: self.amount,
            date: self.date,
            category: self.category.filter(|c| !c.trim().is_empty()),
            notes: self.notes,
            created_at: existing.created_at,
        }
    }
}
