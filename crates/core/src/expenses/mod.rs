//! Expenses module - recorded spending and its summaries.

mod expenses_calculator;
mod expenses_model;

pub use expenses_calculator::*;
pub use expenses_model::{Expense, ExpenseUpdate, NewExpense};
