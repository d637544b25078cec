//! Trips module - domain models, migration, services, and traits.

mod trips_calculator;
mod trips_migration;
mod trips_model;
mod trips_service;
mod trips_traits;

pub use trips_calculator::{trip_cost_distribution, TripCostDistribution, TripWeekShare};
pub use trips_migration::{migrate_legacy_trip, LegacyTrip};
pub use trips_model::{NewTrip, Trip, TripStatus, TripUpdate};
pub use trips_service::TripService;
pub use trips_traits::TripServiceTrait;
