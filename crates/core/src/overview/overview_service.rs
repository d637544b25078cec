use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use super::overview_calculator::compute_overview;
use super::overview_model::{BudgetOverview, OverviewOptions};
use crate::errors::Result;
use crate::session::SessionState;
use crate::settings::EngineSettings;
use crate::snapshot::SnapshotRepositoryTrait;

pub trait OverviewServiceTrait: Send + Sync {
    /// Loads the user's snapshot and derives the overview. `include_wishlist`
    /// falls back to the configured default.
    fn get_overview(
        &self,
        session: &SessionState,
        today: NaiveDate,
        include_wishlist: Option<bool>,
    ) -> Result<BudgetOverview>;
}

pub struct OverviewService {
    repository: Arc<dyn SnapshotRepositoryTrait>,
    settings: Arc<EngineSettings>,
}

impl OverviewService {
    pub fn new(repository: Arc<dyn SnapshotRepositoryTrait>, settings: Arc<EngineSettings>) -> Self {
        Self {
            repository,
            settings,
        }
    }
}

impl OverviewServiceTrait for OverviewService {
    fn get_overview(
        &self,
        session: &SessionState,
        today: NaiveDate,
        include_wishlist: Option<bool>,
    ) -> Result<BudgetOverview> {
        let user_id = session.require_user()?;
        let snapshot = self.repository.load_snapshot(user_id)?;
        let options = OverviewOptions {
            include_wishlist: include_wishlist
                .unwrap_or(self.settings.include_wishlist_by_default),
        };
        debug!(
            "Computing overview for user {} as of {} (wishlist: {})",
            user_id, today, options.include_wishlist
        );
        Ok(compute_overview(&snapshot, today, options, &self.settings))
    }
}
