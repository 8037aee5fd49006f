//! Monthly goal evaluation and the soft-cap admission rule.

use crate::config::GoalPolicy;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalState {
    UnderGoal,
    GoalReached,
}

/// `GoalReached` iff `count >= goal`. The count is always recomputed from the
/// current month's records, so the state resets on month rollover.
pub fn evaluate(count: usize, goal: u32) -> GoalState {
    if count >= goal as usize {
        GoalState::GoalReached
    } else {
        GoalState::UnderGoal
    }
}

/// Informational notice shown before an in-person day beyond the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalNotice {
    pub count: usize,
    pub goal: u32,
}

impl fmt::Display for GoalNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Você já atingiu a meta de {} dias presenciais neste mês! ({} registrados)",
            self.goal, self.count
        )
    }
}

/// Outcome of checking an in-person submission against the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Proceed,
    ProceedWithNotice(GoalNotice),
    NeedsConfirmation(GoalNotice),
}

pub fn admit(count: usize, goal: u32, policy: GoalPolicy, confirmed: bool) -> Admission {
    if evaluate(count, goal) == GoalState::UnderGoal {
        return Admission::Proceed;
    }

    let notice = GoalNotice { count, goal };
    match policy {
        GoalPolicy::Notice => Admission::ProceedWithNotice(notice),
        GoalPolicy::Strict if confirmed => Admission::ProceedWithNotice(notice),
        GoalPolicy::Strict => Admission::NeedsConfirmation(notice),
    }
}
