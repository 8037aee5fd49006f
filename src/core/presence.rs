use crate::config::Config;
use crate::core::goal::{self, Admission, GoalNotice};
use crate::core::report;
use crate::errors::{AppError, AppResult};
use crate::models::{PresenceRecord, RecordId, Response};
use crate::store::RecordStore;
use crate::utils::clock::Clock;
use tracing::{info, warn};

/// What the user declares for the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    InPerson { area: String, note: String },
    Remote { note: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub id: RecordId,
    pub record: PresenceRecord,
    /// Set when the goal was already met before this in-person day.
    pub notice: Option<GoalNotice>,
    /// In-person days of the current month after this submission, `None`
    /// when the ledger could not be read back.
    pub monthly_count: Option<usize>,
}

pub struct PresenceLogic;

impl PresenceLogic {
    /// Validate and record today's declaration.
    ///
    /// Date and time come from `clock`. An in-person day must name one of
    /// the configured areas. Once the goal is met the day is still recorded
    /// (with a notice) unless the policy is strict and `confirm_extra` is
    /// false; days beyond the goal carry the extra label when no note is given.
    pub fn submit(
        store: &mut dyn RecordStore,
        cfg: &Config,
        clock: &dyn Clock,
        submission: Submission,
        confirm_extra: bool,
    ) -> AppResult<SubmitOutcome> {
        let now = clock.now();
        let markers = cfg.markers();
        // an unreadable ledger must not stop today's entry; the goal is then unknown
        let count = match report::monthly_count(store, cfg, now.date()) {
            Ok(n) => Some(n),
            Err(e) => {
                warn!("monthly count unavailable, recording without goal check: {e}");
                None
            }
        };

        let (record, notice) = match submission {
            Submission::InPerson { area, note } => {
                let area = area.trim().to_string();
                if cfg.area_options.is_empty() {
                    return Err(AppError::Config("no work areas configured".into()));
                }
                if !cfg.has_area(&area) {
                    return Err(AppError::InvalidArea(area));
                }

                let admission = match count {
                    Some(n) => goal::admit(n, cfg.default_goal, cfg.goal_policy, confirm_extra),
                    None => Admission::Proceed,
                };
                let notice = match admission {
                    Admission::Proceed => None,
                    Admission::ProceedWithNotice(n) => Some(n),
                    Admission::NeedsConfirmation(n) => {
                        return Err(AppError::GoalReached {
                            count: n.count,
                            goal: n.goal,
                        });
                    }
                };

                let note = match note.trim() {
                    "" if notice.is_some() => cfg.extra_label.clone(),
                    n => n.to_string(),
                };

                (
                    PresenceRecord::stamped(now, markers.marker_for(&Response::InPerson), note, area),
                    notice,
                )
            }
            Submission::Remote { note } => (
                PresenceRecord::stamped(now, markers.marker_for(&Response::Remote), note.trim(), ""),
                None,
            ),
        };

        let id = store.append(&record)?;
        let monthly_count = if record.kind(&markers).is_in_person() {
            count.map(|n| n + 1)
        } else {
            count
        };

        info!(id, response = %record.response, ?monthly_count, "presence recorded");

        Ok(SubmitOutcome {
            id,
            record,
            notice,
            monthly_count,
        })
    }
}
