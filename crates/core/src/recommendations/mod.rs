//! Recommendations - short ordered advice derived from the budget figures.

mod recommendations_engine;
mod recommendations_model;

pub use recommendations_engine::{generate_recommendations, upcoming_trip_costs};
pub use recommendations_model::*;

#[cfg(test)]
mod recommendations_engine_tests;
