//! Budget module - the single active budget, its mode arithmetic and the
//! ledger writes that keep it in step with recorded spending.

mod budget_calculator;
mod budget_model;
mod budget_service;
mod budget_traits;

pub use budget_calculator::*;
pub use budget_model::*;
pub use budget_service::BudgetLedgerService;
pub use budget_traits::BudgetServiceTrait;
