use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
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

/// Single-row table holding the active event, if any.
fn create_session_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS session (
            id            INTEGER PRIMARY KEY CHECK(id = 1),
            event_name    TEXT NOT NULL,
            capacity      INTEGER NOT NULL CHECK(capacity > 0),
            started_at    TEXT NOT NULL,
            last_added_at TEXT
        );
        "#,
    )?;
    Ok(())
}

/// Guest ledger of the active event; `seq` gives the insertion order.
fn create_guests_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS guests (
            seq          INTEGER PRIMARY KEY AUTOINCREMENT,
            id           TEXT NOT NULL UNIQUE,
            name         TEXT NOT NULL,
            category     TEXT NOT NULL CHECK(category IN ('Adult','Child','Courtesy')),
            age_display  TEXT NOT NULL DEFAULT '-',
            status       TEXT NOT NULL CHECK(status IN ('Paying','Exempt','Courtesy')),
            is_paying    INTEGER NOT NULL DEFAULT 1,
            arrival_time TEXT NOT NULL,
            arrival_date TEXT NOT NULL,
            event_name   TEXT NOT NULL,
            sync_state   TEXT NOT NULL DEFAULT 'local'
        );

        CREATE INDEX IF NOT EXISTS idx_guests_event ON guests(event_name);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn guests_has_column(conn: &Connection, column: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('guests')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Schema version 2: guests gain the `sync_state` delivery indicator.
///
/// `create_guests_table` already creates the column, so on a fresh DB this
/// step only records its marker. It is the template for later schema
/// versions: check the marker, alter if needed, record the marker.
fn migrate_add_sync_state(conn: &Connection) -> AppResult<()> {
    let version = "20250921_0002_add_sync_state";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !guests_has_column(conn, "sync_state")? {
        conn.execute(
            "ALTER TABLE guests ADD COLUMN sync_state TEXT NOT NULL DEFAULT 'local';",
            [],
        )
        .map_err(|e| AppError::Migration(format!("Failed to add 'sync_state' column: {}", e)))?;

        success(format!(
            "Migration applied: {} → added 'sync_state' to guests table",
            version
        ));
    }

    mark_applied(conn, version, "Added sync_state to guests")
}

/// Run all pending migrations. Invoked whenever a `DbPool` is opened.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;
    create_session_table(conn)?;
    create_guests_table(conn)?;
    migrate_add_sync_state(conn)?;
    Ok(())
}
