use super::RecordStore;
use crate::db::log::{LogRow, load_log, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries::{SOURCE_APP, SOURCE_IMPORT, insert_record, load_all, record_exists};
use crate::errors::AppResult;
use crate::models::{PresenceRecord, RecordId};
use chrono::{NaiveDate, NaiveTime};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Relational backend: one row per record in `presence_records`.
pub struct SqliteStore {
    pool: DbPool,
    path: PathBuf,
}

impl SqliteStore {
    /// Open the database at `path`, creating the schema on first use.
    pub fn open(path: &Path) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }
}

impl RecordStore for SqliteStore {
    fn append(&mut self, record: &PresenceRecord) -> AppResult<RecordId> {
        let id = self.pool.with_conn(|conn| {
            let tx = conn.transaction()?;
            let id = insert_record(&tx, record, SOURCE_APP)?;
            ttlog(
                &tx,
                "add",
                &format!("{} {}", record.date_str(), record.time_str()),
                &format!("response={} area={}", record.response, record.area),
            )?;
            tx.commit()?;
            Ok(id)
        })?;

        debug!(id, date = %record.date_str(), "record appended");
        Ok(id)
    }

    fn list_all(&self) -> AppResult<Vec<PresenceRecord>> {
        Ok(load_all(&self.pool.conn)?)
    }

    fn exists(&self, date: NaiveDate, time: NaiveTime) -> AppResult<bool> {
        Ok(record_exists(&self.pool.conn, &date, &time)?)
    }

    fn import_batch(&mut self, records: &[PresenceRecord]) -> AppResult<usize> {
        let inserted = self.pool.with_conn(|conn| {
            // dropped without commit → rolled back
            let tx = conn.transaction()?;

            let mut inserted = 0;
            for rec in records {
                if record_exists(&tx, &rec.date, &rec.time)? {
                    continue;
                }
                insert_record(&tx, rec, SOURCE_IMPORT)?;
                inserted += 1;
            }

            ttlog(
                &tx,
                "import",
                &format!("{} record(s)", records.len()),
                &format!("{inserted} inserted, {} skipped", records.len() - inserted),
            )?;

            tx.commit()?;
            Ok(inserted)
        })?;

        info!(inserted, total = records.len(), "import committed");
        Ok(inserted)
    }

    fn location(&self) -> &Path {
        &self.path
    }

    fn audit_log(&self) -> AppResult<Option<Vec<LogRow>>> {
        Ok(Some(load_log(&self.pool.conn)?))
    }

    fn record_event(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }
}
