use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;

use super::trips_migration::{migrate_legacy_trip, LegacyTrip};
use super::trips_model::{NewTrip, Trip, TripUpdate};
use super::trips_traits::TripServiceTrait;
use crate::budget::settle_budget;
use crate::errors::{Error, Result};
use crate::session::SessionState;
use crate::snapshot::{EntityOperation, LedgerWrite, Snapshot, SnapshotRepositoryTrait};

pub struct TripService {
    repository: Arc<dyn SnapshotRepositoryTrait>,
}

impl TripService {
    pub fn new(repository: Arc<dyn SnapshotRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Starts a write guarded by the budget as read, and appends the budget
    /// with its caches recomputed against the trips as they will be stored.
    fn write_with_budget(snapshot: &Snapshot, operations: Vec<EntityOperation>) -> LedgerWrite {
        let mut write = LedgerWrite::guarded_by(snapshot.budget.as_ref());
        write.operations = operations;
        if let Some(budget) = snapshot.budget.as_ref() {
            let settled = settle_budget(budget, &snapshot.trips, &snapshot.expenses, Decimal::ZERO);
            write = write.push(EntityOperation::UpsertBudget(settled));
        }
        write
    }
}

fn sorted_by_start(mut trips: Vec<Trip>) -> Vec<Trip> {
    trips.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.name.cmp(&b.name)));
    trips
}

#[async_trait]
impl TripServiceTrait for TripService {
    fn list_trips(&self, session: &SessionState) -> Result<Vec<Trip>> {
        let user_id = session.require_user()?;
        Ok(sorted_by_start(self.repository.load_snapshot(user_id)?.trips))
    }

    async fn create_trip(&self, session: &SessionState, new_trip: NewTrip) -> Result<Trip> {
        let user_id = session.require_user()?;
        new_trip.validate()?;

        let mut snapshot = self.repository.load_snapshot(user_id)?;
        let trip = new_trip.into_trip();
        snapshot.trips.push(trip.clone());

        let write =
            Self::write_with_budget(&snapshot, vec![EntityOperation::UpsertTrip(trip.clone())]);
        self.repository.commit(user_id, write).await?;
        info!(
            "Created trip {} to {} ({} - {})",
            trip.id, trip.destination, trip.start_date, trip.end_date
        );
        Ok(trip)
    }

    async fn update_trip(&self, session: &SessionState, update: TripUpdate) -> Result<Trip> {
        let user_id = session.require_user()?;
        update.validate()?;

        let mut snapshot = self.repository.load_snapshot(user_id)?;
        let index = snapshot
            .trips
            .iter()
            .position(|t| t.id == update.id)
            .ok_or_else(|| Error::not_found("Trip", update.id.clone()))?;
        let trip = update.apply_to(&snapshot.trips[index]);
        snapshot.trips[index] = trip.clone();

        let write =
            Self::write_with_budget(&snapshot, vec![EntityOperation::UpsertTrip(trip.clone())]);
        self.repository.commit(user_id, write).await?;
        debug!("Updated trip {}", trip.id);
        Ok(trip)
    }

    async fn delete_trip(&self, session: &SessionState, trip_id: &str) -> Result<()> {
        let user_id = session.require_user()?;

        let mut snapshot = self.repository.load_snapshot(user_id)?;
        let before = snapshot.trips.len();
        snapshot.trips.retain(|t| t.id != trip_id);
        if snapshot.trips.len() == before {
            return Err(Error::not_found("Trip", trip_id));
        }

        let write = Self::write_with_budget(
            &snapshot,
            vec![EntityOperation::DeleteTrip(trip_id.to_string())],
        );
        self.repository.commit(user_id, write).await?;
        info!("Deleted trip {}", trip_id);
        Ok(())
    }

    fn upcoming_trips(&self, session: &SessionState, today: NaiveDate) -> Result<Vec<Trip>> {
        let trips = self.list_trips(session)?;
        Ok(trips.into_iter().filter(|t| t.is_upcoming(today)).collect())
    }

    async fn migrate_trips(
        &self,
        session: &SessionState,
        legacy: Vec<LegacyTrip>,
    ) -> Result<Vec<Trip>> {
        let user_id = session.require_user()?;
        if legacy.is_empty() {
            return Ok(Vec::new());
        }

        let migrated = legacy
            .into_iter()
            .map(migrate_legacy_trip)
            .collect::<Result<Vec<Trip>>>()?;

        let mut snapshot = self.repository.load_snapshot(user_id)?;
        for trip in &migrated {
            match snapshot.trips.iter_mut().find(|t| t.id == trip.id) {
                Some(existing) => *existing = trip.clone(),
                None => snapshot.trips.push(trip.clone()),
            }
        }

        let operations = migrated
            .iter()
            .cloned()
            .map(EntityOperation::UpsertTrip)
            .collect();
        let write = Self::write_with_budget(&snapshot, operations);
        self.repository.commit(user_id, write).await?;
        info!("Migrated {} trip(s) to the current schema", migrated.len());
        Ok(migrated)
    }
}
