// src/export/excel_date.rs

use crate::models::record::{DATE_FORMAT, parse_time};
use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Interpret a ledger date or time as an Excel serial, paired with the
/// number format the cell should use.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(("dd/mm/yyyy", naive_datetime_to_excel_serial(&dt)));
    }

    if s.contains(':')
        && let Some(t) = parse_time(s)
    {
        let seconds = t.num_seconds_from_midnight() as f64;
        return Some(("hh:mm:ss", seconds / 86400.0));
    }

    None
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let Some(excel_epoch) = NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return 0.0;
    };

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    days + secs / 86400.0
}
