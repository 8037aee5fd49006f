//! Monthly aggregation: the current month's slice of the ledger and the
//! progress report shown to the user.

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{Markers, PresenceRecord, Response};
use crate::store::RecordStore;
use crate::utils::date::same_month;
use chrono::NaiveDate;
use tracing::warn;

pub const NO_PRESENCE_LINE: &str = "Nenhuma presença registrada neste mês.";
pub const REPORT_UNAVAILABLE: &str = "Relatório indisponível.";
pub const PENDING_LINE: &str = "🔲 (presencial pendente)";

/// Records of one calendar month, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyView {
    pub reference: NaiveDate,
    pub records: Vec<PresenceRecord>,
    pub in_person_count: usize,
}

impl MonthlyView {
    pub fn pending(&self, goal: u32) -> usize {
        (goal as usize).saturating_sub(self.in_person_count)
    }
}

/// Keep the records sharing `reference`'s month and year, and count the
/// in-person ones. The ledger itself is never touched.
pub fn monthly_view(all: &[PresenceRecord], reference: NaiveDate, markers: &Markers) -> MonthlyView {
    let mut records: Vec<PresenceRecord> = all
        .iter()
        .filter(|r| same_month(r.date, reference))
        .cloned()
        .collect();

    // stable: ties keep the store's order
    records.sort_by(|a, b| b.key().cmp(&a.key()));

    let in_person_count = records
        .iter()
        .filter(|r| r.kind(markers).is_in_person())
        .count();

    MonthlyView {
        reference,
        records,
        in_person_count,
    }
}

pub fn render_report(view: &MonthlyView, goal: u32, markers: &Markers) -> String {
    if view.in_person_count == 0 {
        return NO_PRESENCE_LINE.to_string();
    }

    let mut out = format!(
        "Você registrou {} dia(s) presencial(is) neste mês:\n\n",
        view.in_person_count
    );

    for r in &view.records {
        let line = match r.kind(markers) {
            Response::InPerson => format!("🏢 {} - {} (Presencial)", r.display_date(), r.area),
            Response::Remote => format!("🏠 {} - Trabalho Remoto", r.display_date()),
            Response::Other(_) => format!("☑️ {} - {}", r.display_date(), r.area),
        };
        out.push_str(&line);
        if !r.observation.is_empty() {
            out.push_str(&format!(" [{}]", r.observation));
        }
        out.push('\n');
    }

    for _ in 0..view.pending(goal) {
        out.push_str(PENDING_LINE);
        out.push('\n');
    }

    out
}

/// Current-month view read straight from the store.
pub fn current_view(
    store: &dyn RecordStore,
    cfg: &Config,
    today: NaiveDate,
) -> AppResult<MonthlyView> {
    let all = store.list_all()?;
    Ok(monthly_view(&all, today, &cfg.markers()))
}

/// In-person days of the month containing `today`.
pub fn monthly_count(store: &dyn RecordStore, cfg: &Config, today: NaiveDate) -> AppResult<usize> {
    Ok(current_view(store, cfg, today)?.in_person_count)
}

/// Report for the month of `reference`. A failing read yields a fallback
/// text instead of an error, so a broken report never blocks recording.
pub fn report_or_fallback(store: &dyn RecordStore, cfg: &Config, reference: NaiveDate) -> String {
    match current_view(store, cfg, reference) {
        Ok(view) => render_report(&view, cfg.default_goal, &cfg.markers()),
        Err(e) => {
            warn!("monthly report unavailable: {e}");
            REPORT_UNAVAILABLE.to_string()
        }
    }
}
