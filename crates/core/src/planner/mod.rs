//! Weekly planner - advisory per-week plans compared against the weekly
//! allowance. Plans never feed into the budget ledger.

mod planner_calculator;
mod planner_model;
mod planner_service;
mod planner_traits;

pub use planner_calculator::summarize_week;
pub use planner_model::*;
pub use planner_service::PlannerService;
pub use planner_traits::PlannerServiceTrait;
