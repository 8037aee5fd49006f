use crate::errors::AppError;
use crate::models::record::{self, DATE_FORMAT, PresenceRecord, RecordId, TIME_FORMAT};
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Where a row came from (`presence_records.source`).
pub const SOURCE_APP: &str = "app";
pub const SOURCE_IMPORT: &str = "import";

pub fn map_row(row: &Row) -> Result<PresenceRecord> {
    let date_str: String = row.get("date")?;
    let time_str: String = row.get("time")?;

    let date = record::parse_date(&date_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let time = record::parse_time(&time_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(AppError::Decode(format!("invalid time '{}'", time_str))),
        )
    })?;

    Ok(PresenceRecord {
        date,
        time,
        response: row.get("response")?,
        observation: row.get::<_, Option<String>>("observation")?.unwrap_or_default(),
        area: row.get::<_, Option<String>>("area")?.unwrap_or_default(),
    })
}

pub fn insert_record(conn: &Connection, rec: &PresenceRecord, source: &str) -> Result<RecordId> {
    conn.execute(
        "INSERT INTO presence_records (date, time, response, observation, area, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            rec.date.format(DATE_FORMAT).to_string(),
            rec.time.format(TIME_FORMAT).to_string(),
            rec.response,
            rec.observation,
            rec.area,
            source,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All records, newest first. Rows written in the same second keep their
/// insertion order (descending).
pub fn load_all(conn: &Connection) -> Result<Vec<PresenceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT date, time, response, observation, area
         FROM presence_records
         ORDER BY date DESC, time DESC, id DESC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn record_exists(conn: &Connection, date: &NaiveDate, time: &NaiveTime) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM presence_records WHERE date = ?1 AND time = ?2 LIMIT 1",
            params![
                date.format(DATE_FORMAT).to_string(),
                time.format(TIME_FORMAT).to_string()
            ],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}
