// src/export/model.rs

use crate::models::PresenceRecord;
use serde::{Deserialize, Serialize};

/// Interchange form of a record: every field named, dates `YYYY-MM-DD`,
/// times `HH:MM:SS`. Missing fields deserialize as empty strings so that
/// validation can report them with the record's position.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExchangeRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub observation: String,
    #[serde(default)]
    pub area: String,
}

impl From<&PresenceRecord> for ExchangeRecord {
    fn from(r: &PresenceRecord) -> Self {
        Self {
            date: r.date_str(),
            time: r.time_str(),
            response: r.response.clone(),
            observation: r.observation.clone(),
            area: r.area.clone(),
        }
    }
}

impl ExchangeRecord {
    pub(crate) fn to_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.time.clone(),
            self.response.clone(),
            self.observation.clone(),
            self.area.clone(),
        ]
    }
}

/// Column names of the interchange CSV and the XLSX sheet.
pub fn get_headers() -> Vec<&'static str> {
    vec!["date", "time", "response", "observation", "area"]
}
