use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report;
use crate::errors::{AppError, AppResult};
use crate::store;
use crate::ui::messages::header;
use crate::utils::date;
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report { month } = cmd else {
        return Ok(());
    };

    let reference = match month {
        Some(m) => date::parse_month(m).ok_or_else(|| AppError::InvalidDate(m.clone()))?,
        None => date::today(),
    };

    let store = store::open(cfg)?;

    header(format!(
        "📅 {} de {}",
        date::month_name(reference.month()),
        reference.year()
    ));
    println!("{}", report::report_or_fallback(store.as_ref(), cfg, reference).trim_end());
    Ok(())
}
