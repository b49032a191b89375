use chrono::NaiveDateTime;
use serde::Serialize;

/// Persisted header of the active event (single row of the `session` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub event_name: String,
    pub capacity: u32,
    pub started_at: NaiveDateTime,
    /// Time of the last successful add; drives duplicate suppression and undo.
    pub last_added_at: Option<NaiveDateTime>,
}
