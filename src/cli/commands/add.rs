use crate::cli::parser::{AddKind, Commands};
use crate::config::Config;
use crate::core::presence::{PresenceLogic, Submission};
use crate::core::report;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{success, warning};
use crate::utils::clock::{Clock, SystemClock};

/// Record today's presence and show the refreshed monthly report.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Add { kind } = cmd else {
        return Ok(());
    };

    let (submission, confirm_extra) = match kind {
        AddKind::InPerson {
            area,
            note,
            confirm_extra,
        } => (
            Submission::InPerson {
                area: area.clone(),
                note: note.clone(),
            },
            *confirm_extra,
        ),
        AddKind::Remote { note } => (Submission::Remote { note: note.clone() }, false),
    };

    let clock = SystemClock;
    let mut store = store::open(cfg)?;
    let outcome = PresenceLogic::submit(store.as_mut(), cfg, &clock, submission, confirm_extra)?;

    if let Some(notice) = &outcome.notice {
        warning(notice);
    }

    let recorded = format!(
        "Recorded {} {}",
        outcome.record.display_date(),
        outcome.record.time_str()
    );
    match outcome.monthly_count {
        Some(n) => success(format!(
            "{recorded} ({n}/{} in-person days this month)",
            cfg.default_goal
        )),
        None => success(recorded),
    }

    println!();
    println!("{}", report::report_or_fallback(store.as_ref(), cfg, clock.today()).trim_end());
    Ok(())
}
