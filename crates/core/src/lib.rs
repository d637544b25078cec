//! StudyBudget Core - the budget allocation and forecasting engine.
//!
//! Given one user's [`snapshot::Snapshot`] (budget, trips, expenses,
//! wishlist, weekly plans) the calculators derive remaining balances,
//! daily and weekly allowances, the per-week trip cost distribution and
//! recommendations. The services wrap those calculators with validation and
//! the atomic ledger writes that keep a budget's cached figures current.
//!
//! Storage is a collaborator behind [`snapshot::SnapshotRepositoryTrait`];
//! exchange rates come from the `studybudget-rates` crate through
//! [`fx::CurrencyNormalizer`].

pub mod allowance;
pub mod budget;
pub mod constants;
pub mod errors;
pub mod expenses;
pub mod fx;
pub mod overview;
pub mod planner;
pub mod recommendations;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod trips;
pub mod utils;
pub mod wishlist;

pub use overview::{compute_overview, BudgetOverview, OverviewOptions};
pub use session::{SessionState, SessionUser};
pub use settings::EngineSettings;
pub use snapshot::Snapshot;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
