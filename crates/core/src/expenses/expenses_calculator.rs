//! Aggregations over recorded expenses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::expenses_model::Expense;
use crate::constants::UNCATEGORIZED;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}

pub fn total_expenses(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Expenses dated within `[start, end]`.
pub fn expenses_between(expenses: &[Expense], start: NaiveDate, end: NaiveDate) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .collect()
}

pub fn total_expenses_between(expenses: &[Expense], start: NaiveDate, end: NaiveDate) -> Decimal {
    expenses_between(expenses, start, end)
        .into_iter()
        .map(|e| e.amount)
        .sum()
}

/// Per-category totals, largest first; ties broken by name.
pub fn expenses_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut buckets: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
    for expense in expenses {
        let key = expense
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
            .to_string();
        let entry = buckets.entry(key).or_insert((Decimal::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut totals: Vec<CategoryTotal> = buckets
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category,
            total,
            count,
        })
        .collect();
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    totals
}
