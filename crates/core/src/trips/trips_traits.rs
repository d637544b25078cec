use async_trait::async_trait;
use chrono::NaiveDate;

use super::trips_migration::LegacyTrip;
use super::trips_model::{NewTrip, Trip, TripUpdate};
use crate::errors::Result;
use crate::session::SessionState;

/// Trip operations for the signed-in user.
#[async_trait]
pub trait TripServiceTrait: Send + Sync {
    /// All trips, earliest first.
    fn list_trips(&self, session: &SessionState) -> Result<Vec<Trip>>;

    async fn create_trip(&self, session: &SessionState, new_trip: NewTrip) -> Result<Trip>;

    async fn update_trip(&self, session: &SessionState, update: TripUpdate) -> Result<Trip>;

    async fn delete_trip(&self, session: &SessionState, trip_id: &str) -> Result<()>;

    /// Trips that have not started by `today`, soonest first.
    fn upcoming_trips(&self, session: &SessionState, today: NaiveDate) -> Result<Vec<Trip>>;

    /// Upgrades stored version 1 records in a single write.
    async fn migrate_trips(
        &self,
        session: &SessionState,
        legacy: Vec<LegacyTrip>,
    ) -> Result<Vec<Trip>>;
}
