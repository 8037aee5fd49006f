use super::response::{Markers, Response};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

/// Row identifier returned by a store on append.
pub type RecordId = i64;

/// Ledger date layout (`date` column, interchange `date` field).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Ledger time layout (`time` column, interchange `time` field).
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Layout used when a date is shown to the user.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceRecord {
    pub date: NaiveDate,     // ⇔ presence_records.date (TEXT "YYYY-MM-DD")
    pub time: NaiveTime,     // ⇔ presence_records.time (TEXT "HH:MM:SS")
    pub response: String,    // ⇔ presence_records.response (raw marker)
    pub observation: String, // ⇔ presence_records.observation
    pub area: String,        // ⇔ presence_records.area ('' when remote)
}

impl PresenceRecord {
    /// Record stamped with the given submission instant.
    pub fn stamped(
        at: NaiveDateTime,
        response: impl Into<String>,
        observation: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        Self {
            date: at.date(),
            // sub-second precision is not part of the ledger
            time: at.time().with_nanosecond(0).unwrap_or(at.time()),
            response: response.into(),
            observation: observation.into(),
            area: area.into(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }

    pub fn display_date(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    pub fn kind(&self, markers: &Markers) -> Response {
        markers.classify(&self.response)
    }

    /// Dedup key used by import.
    pub fn key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.time)
    }

    /// Checks the area rule: in-person needs an area, remote must not carry one.
    pub fn check_area(&self, markers: &Markers) -> Result<(), String> {
        match self.kind(markers) {
            Response::InPerson if self.area.trim().is_empty() => {
                Err("in-person record without area".to_string())
            }
            Response::Remote if !self.area.trim().is_empty() => {
                Err(format!("remote record with area '{}'", self.area))
            }
            _ => Ok(()),
        }
    }
}

/// Sort newest first: (date, time) descending. Stable, so callers that pass
/// records in insertion order get insertion order descending on ties.
pub fn sort_newest_first(records: &mut [PresenceRecord]) {
    records.reverse();
    records.sort_by(|a, b| b.key().cmp(&a.key()));
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Accepts `HH:MM:SS`, and `HH:MM` as written by older ledgers.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}
