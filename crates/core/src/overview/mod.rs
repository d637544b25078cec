//! Overview - the engine entry point. One snapshot in, one view model out.

mod overview_calculator;
mod overview_model;
mod overview_service;

pub use overview_calculator::compute_overview;
pub use overview_model::*;
pub use overview_service::{OverviewService, OverviewServiceTrait};

#[cfg(test)]
mod overview_tests;
