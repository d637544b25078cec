use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};

use super::planner_calculator::summarize_week;
use super::planner_model::{NewWeeklyPlanEvent, WeeklyPlan, WeeklyPlanSummary};
use super::planner_traits::PlannerServiceTrait;
use crate::allowance::allowance_snapshot;
use crate::budget::calculate_budget_figures;
use crate::errors::{Error, Result};
use crate::session::SessionState;
use crate::settings::EngineSettings;
use crate::snapshot::{EntityOperation, LedgerWrite, SnapshotRepositoryTrait};
use crate::utils::time_utils::start_of_week;

pub struct PlannerService {
    repository: Arc<dyn SnapshotRepositoryTrait>,
    settings: Arc<EngineSettings>,
}

impl PlannerService {
    pub fn new(repository: Arc<dyn SnapshotRepositoryTrait>, settings: Arc<EngineSettings>) -> Self {
        Self {
            repository,
            settings,
        }
    }

    fn load_plan(&self, user_id: &str, plan_id: &str) -> Result<WeeklyPlan> {
        self.repository
            .load_snapshot(user_id)?
            .weekly_plans
            .into_iter()
            .find(|p| p.id == plan_id)
            .ok_or_else(|| Error::not_found("WeeklyPlan", plan_id))
    }

    /// The stored plan for the week containing `week_of`, or an unsaved new
    /// one. The flag is true when the plan is new.
    fn find_or_new_plan(&self, user_id: &str, week_of: NaiveDate) -> Result<(WeeklyPlan, bool)> {
        let week_start = start_of_week(week_of);
        match self.repository.load_snapshot(user_id)?.find_plan(week_start) {
            Some(plan) => Ok((plan.clone(), false)),
            None => Ok((WeeklyPlan::new(week_start)?, true)),
        }
    }

    async fn save(&self, user_id: &str, plan: &WeeklyPlan) -> Result<()> {
        self.repository
            .commit(
                user_id,
                LedgerWrite::new().push(EntityOperation::UpsertWeeklyPlan(plan.clone())),
            )
            .await
    }
}

#[async_trait]
impl PlannerServiceTrait for PlannerService {
    async fn get_or_create_plan(
        &self,
        session: &SessionState,
        week_of: NaiveDate,
    ) -> Result<WeeklyPlan> {
        let user_id = session.require_user()?;
        let (plan, created) = self.find_or_new_plan(user_id, week_of)?;
        if created {
            self.save(user_id, &plan).await?;
            debug!("Created weekly plan {} for week of {}", plan.id, plan.week_start);
        }
        Ok(plan)
    }

    async fn add_event(
        &self,
        session: &SessionState,
        week_of: NaiveDate,
        event: NewWeeklyPlanEvent,
    ) -> Result<WeeklyPlan> {
        let user_id = session.require_user()?;
        event.validate()?;
        let (mut plan, created) = self.find_or_new_plan(user_id, week_of)?;
        plan.events.push(event.into_event());
        // A new plan and its first event land in one write.
        self.save(user_id, &plan).await?;
        if created {
            debug!("Created weekly plan {} for week of {}", plan.id, plan.week_start);
        }
        Ok(plan)
    }

    async fn remove_event(
        &self,
        session: &SessionState,
        plan_id: &str,
        event_id: &str,
    ) -> Result<WeeklyPlan> {
        let user_id = session.require_user()?;
        let mut plan = self.load_plan(user_id, plan_id)?;
        let before = plan.events.len();
        plan.events.retain(|e| e.id != event_id);
        if plan.events.len() == before {
            return Err(Error::not_found("WeeklyPlanEvent", event_id));
        }
        self.save(user_id, &plan).await?;
        Ok(plan)
    }

    async fn delete_plan(&self, session: &SessionState, plan_id: &str) -> Result<()> {
        let user_id = session.require_user()?;
        let plan = self.load_plan(user_id, plan_id)?;
        self.repository
            .commit(
                user_id,
                LedgerWrite::new().push(EntityOperation::DeleteWeeklyPlan(plan.id.clone())),
            )
            .await?;
        info!(
            "Deleted weekly plan {} with {} event(s)",
            plan.id,
            plan.events.len()
        );
        Ok(())
    }

    fn summarize(
        &self,
        session: &SessionState,
        week_of: NaiveDate,
        today: NaiveDate,
    ) -> Result<WeeklyPlanSummary> {
        let user_id = session.require_user()?;
        let snapshot = self.repository.load_snapshot(user_id)?;
        let figures = calculate_budget_figures(
            snapshot.budget.as_ref(),
            &snapshot.trips,
            &snapshot.expenses,
            &snapshot.wishlist,
            self.settings.include_wishlist_by_default,
        );
        let allowance = allowance_snapshot(snapshot.budget.as_ref(), &figures, today);

        let (plan, _) = self.find_or_new_plan(user_id, week_of)?;
        Ok(summarize_week(&plan, allowance.weekly_allowance))
    }
}
