use crate::errors::{AppError, AppResult};
use crate::models::category::{Category, PaymentStatus, SyncState};
use crate::models::guest::GuestRecord;
use crate::models::session::SessionInfo;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const TS_FMT: &str = "%Y-%m-%d %H:%M:%S%.f";

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_ts(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TS_FMT)
        .map_err(|_| conversion_error(AppError::Other(format!("Invalid timestamp: {}", s))))
}

fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FMT).to_string()
}

// ---------------------------
// session
// ---------------------------

pub fn load_session(conn: &Connection) -> AppResult<Option<SessionInfo>> {
    let row = conn
        .query_row(
            "SELECT event_name, capacity, started_at, last_added_at FROM session WHERE id = 1",
            [],
            |row| {
                let started: String = row.get(2)?;
                let last: Option<String> = row.get(3)?;
                Ok(SessionInfo {
                    event_name: row.get(0)?,
                    capacity: row.get(1)?,
                    started_at: parse_ts(&started)?,
                    last_added_at: last.as_deref().map(parse_ts).transpose()?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

pub fn save_session(conn: &Connection, info: &SessionInfo) -> AppResult<()> {
    conn.execute(
        "INSERT INTO session (id, event_name, capacity, started_at, last_added_at)
         VALUES (1, ?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            event_name = excluded.event_name,
            capacity = excluded.capacity,
            started_at = excluded.started_at,
            last_added_at = excluded.last_added_at",
        params![
            info.event_name,
            info.capacity,
            format_ts(&info.started_at),
            info.last_added_at.as_ref().map(format_ts),
        ],
    )?;
    Ok(())
}

/// Drop the active session and its local ledger.
pub fn clear_session(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("DELETE FROM guests; DELETE FROM session;")?;
    Ok(())
}

// ---------------------------
// guests
// ---------------------------

pub fn map_guest(row: &Row) -> Result<GuestRecord> {
    let category_str: String = row.get("category")?;
    let category = Category::from_label(&category_str).ok_or_else(|| {
        conversion_error(AppError::InvalidCategory(category_str.clone()))
    })?;

    let status_str: String = row.get("status")?;
    let status = PaymentStatus::from_label(&status_str).ok_or_else(|| {
        conversion_error(AppError::Other(format!("Invalid status: {}", status_str)))
    })?;

    let time_str: String = row.get("arrival_time")?;
    let arrival_time = NaiveTime::parse_from_str(&time_str, "%H:%M").map_err(|_| {
        conversion_error(AppError::Other(format!("Invalid time: {}", time_str)))
    })?;

    let date_str: String = row.get("arrival_date")?;
    let arrival_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        conversion_error(AppError::Other(format!("Invalid date: {}", date_str)))
    })?;

    let sync_str: String = row.get("sync_state")?;

    Ok(GuestRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        category,
        age_display: row.get("age_display")?,
        status,
        is_paying: row.get::<_, i32>("is_paying")? == 1,
        arrival_time,
        arrival_date,
        event_name: row.get("event_name")?,
        sync_state: SyncState::from_db_str(&sync_str).unwrap_or(SyncState::Local),
    })
}

/// Local ledger, newest first.
pub fn load_guests(conn: &Connection) -> AppResult<Vec<GuestRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category, age_display, status, is_paying,
                arrival_time, arrival_date, event_name, sync_state
         FROM guests
         ORDER BY seq DESC",
    )?;

    let rows = stmt.query_map([], map_guest)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_guest(conn: &Connection, g: &GuestRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO guests (id, name, category, age_display, status, is_paying,
                             arrival_time, arrival_date, event_name, sync_state)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            g.id,
            g.name,
            g.category.label(),
            g.age_display,
            g.status.label(),
            if g.is_paying { 1 } else { 0 },
            g.time_str(),
            g.date_str(),
            g.event_name,
            g.sync_state.to_db_str(),
        ],
    )?;
    Ok(())
}

/// Replace the whole local ledger (used after a load from the sheet).
/// `guests` is newest first; rows are inserted oldest first so `seq` keeps the order.
pub fn replace_guests(conn: &Connection, guests: &[GuestRecord]) -> AppResult<()> {
    conn.execute("DELETE FROM guests", [])?;
    for g in guests.iter().rev() {
        insert_guest(conn, g)?;
    }
    Ok(())
}

/// Store a joined session header and its guests atomically: either both
/// land in the local DB or neither does.
pub fn save_session_with_guests(
    conn: &Connection,
    info: &SessionInfo,
    guests: &[GuestRecord],
) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    clear_session(&tx)?;
    replace_guests(&tx, guests)?;
    save_session(&tx, info)?;
    tx.commit()?;
    Ok(())
}

pub fn delete_guest(conn: &Connection, id: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM guests WHERE id = ?1", [id])?;
    Ok(n > 0)
}

pub fn update_sync_state(conn: &Connection, id: &str, state: SyncState) -> AppResult<()> {
    conn.execute(
        "UPDATE guests SET sync_state = ?1 WHERE id = ?2",
        params![state.to_db_str(), id],
    )?;
    Ok(())
}
