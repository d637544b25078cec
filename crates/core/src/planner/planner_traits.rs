use async_trait::async_trait;
use chrono::NaiveDate;

use super::planner_model::{NewWeeklyPlanEvent, WeeklyPlan, WeeklyPlanSummary};
use crate::errors::Result;
use crate::session::SessionState;

#[async_trait]
pub trait PlannerServiceTrait: Send + Sync {
    /// The plan for the week containing `week_of`, created empty if missing.
    async fn get_or_create_plan(&self, session: &SessionState, week_of: NaiveDate)
        -> Result<WeeklyPlan>;

    async fn add_event(
        &self,
        session: &SessionState,
        week_of: NaiveDate,
        event: NewWeeklyPlanEvent,
    ) -> Result<WeeklyPlan>;

    async fn remove_event(
        &self,
        session: &SessionState,
        plan_id: &str,
        event_id: &str,
    ) -> Result<WeeklyPlan>;

    /// Deletes the plan and every event it owns.
    async fn delete_plan(&self, session: &SessionState, plan_id: &str) -> Result<()>;

    /// Compares the week's plan against the weekly allowance as of `today`.
    /// A week without a plan summarises as empty.
    fn summarize(
        &self,
        session: &SessionState,
        week_of: NaiveDate,
        today: NaiveDate,
    ) -> Result<WeeklyPlanSummary>;
}
