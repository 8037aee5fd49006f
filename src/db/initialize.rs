use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Bring a freshly opened ledger up to the current schema.
/// Safe to call on every open: applied steps are skipped.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    debug!("ledger schema ready");
    Ok(())
}
