use crate::config::Config;
use crate::core::goal::{self, GoalState};
use crate::core::report;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{info, success};
use crate::utils::date;

/// One-line progress summary for the current month.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = store::open(cfg)?;
    let view = report::current_view(store.as_ref(), cfg, date::today())?;

    let goal = cfg.default_goal;
    match goal::evaluate(view.in_person_count, goal) {
        GoalState::GoalReached => success(format!(
            "Goal reached: {}/{goal} in-person days this month",
            view.in_person_count
        )),
        GoalState::UnderGoal => info(format!(
            "{}/{goal} in-person days this month, {} to go",
            view.in_person_count,
            view.pending(goal)
        )),
    }
    Ok(())
}
