//! Ledger storage. Both backends honour the same contract: records are
//! written once, listed newest first, and deduplicated on (date, time)
//! during import.

pub mod csv_file;
pub mod sqlite;

use crate::config::{Backend, Config};
use crate::db::log::LogRow;
use crate::errors::AppResult;
use crate::models::{PresenceRecord, RecordId};
use chrono::{NaiveDate, NaiveTime};
use std::path::Path;
use tracing::debug;

pub use csv_file::CsvStore;
pub use sqlite::SqliteStore;

pub trait RecordStore {
    /// Write one record exactly as given.
    fn append(&mut self, record: &PresenceRecord) -> AppResult<RecordId>;

    /// Every record, ordered by (date, time) descending.
    /// A new store yields an empty list.
    fn list_all(&self) -> AppResult<Vec<PresenceRecord>>;

    /// Whether a record with this dedup key is already stored.
    fn exists(&self, date: NaiveDate, time: NaiveTime) -> AppResult<bool>;

    /// Insert every record whose key is not yet present (keys repeated
    /// inside `records` count as present after their first occurrence).
    /// Either all of them land or none does. Returns the number inserted.
    fn import_batch(&mut self, records: &[PresenceRecord]) -> AppResult<usize>;

    /// File backing this store.
    fn location(&self) -> &Path;

    /// Internal audit trail, when the backend keeps one.
    fn audit_log(&self) -> AppResult<Option<Vec<LogRow>>> {
        Ok(None)
    }

    /// Add an administrative entry (e.g. `init`) to the audit trail.
    /// Backends without one ignore it.
    fn record_event(&mut self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

/// Open the ledger described by `cfg`.
pub fn open(cfg: &Config) -> AppResult<Box<dyn RecordStore>> {
    let path = cfg.ledger_path();
    debug!(backend = cfg.backend.as_str(), path = %path.display(), "opening ledger");

    Ok(match cfg.backend {
        Backend::Sqlite => Box::new(SqliteStore::open(&path)?),
        Backend::Csv => Box::new(CsvStore::open(&path, &cfg.headers)?),
    })
}
