use rusqlite::{Connection, OptionalExtension, Result};
use tracing::{debug, info};

/// Migration that brings ledgers created by the desktop releases
/// (`id, date, time, response, observation, area`) to the current schema.
const LEGACY_COLUMNS_MIGRATION: &str = "20250601_0001_add_source_created_at";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn records_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='presence_records'",
    )?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn records_has_column(conn: &Connection, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('presence_records')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Create the `presence_records` table with the current schema.
fn create_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS presence_records (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL,
            time         TEXT NOT NULL,
            response     TEXT NOT NULL,
            observation  TEXT NOT NULL DEFAULT '',
            area         TEXT NOT NULL DEFAULT '',
            source       TEXT NOT NULL DEFAULT 'app',
            created_at   TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

fn ensure_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_presence_date_time ON presence_records(date, time);",
    )
}

/// Add `source` / `created_at` to a legacy table. Existing rows are
/// tagged `legacy`.
fn migrate_legacy_columns(conn: &Connection) -> Result<()> {
    if migration_applied(conn, LEGACY_COLUMNS_MIGRATION)? {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;

    if !records_has_column(&tx, "source")? {
        tx.execute(
            "ALTER TABLE presence_records ADD COLUMN source TEXT NOT NULL DEFAULT 'legacy'",
            [],
        )?;
    }
    if !records_has_column(&tx, "created_at")? {
        tx.execute(
            "ALTER TABLE presence_records ADD COLUMN created_at TEXT NOT NULL DEFAULT ''",
            [],
        )?;
    }

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added source/created_at to presence_records')",
        [LEGACY_COLUMNS_MIGRATION],
    )?;
    tx.commit()?;

    info!("migration applied: {LEGACY_COLUMNS_MIGRATION}");
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by db::initialize::init_db() every time a ledger is opened.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !records_table_exists(conn)? {
        create_records_table(conn)?;
        debug!("created presence_records table");
    } else if !records_has_column(conn, "source")? || !records_has_column(conn, "created_at")? {
        migrate_legacy_columns(conn)?;
    }

    ensure_indexes(conn)?;
    Ok(())
}
