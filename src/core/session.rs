//! Event lifecycle: Idle → Active(event) → Idle.

use crate::core::ledger::Ledger;
use crate::core::report::{CapacityStatus, Summary, capacity_status};
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::guest::GuestRecord;
use crate::models::session::SessionInfo;
use chrono::NaiveDateTime;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct EventSession {
    pub event_name: String,
    pub capacity: u32,
    pub started_at: NaiveDateTime,
    pub ledger: Ledger,
}

impl EventSession {
    pub fn new(event_name: &str, capacity: u32, started_at: NaiveDateTime) -> Self {
        Self {
            event_name: event_name.trim().to_string(),
            capacity,
            started_at,
            ledger: Ledger::new(),
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            event_name: self.event_name.clone(),
            capacity: self.capacity,
            started_at: self.started_at,
            last_added_at: self.ledger.last_added_at(),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary::from_guests(self.ledger.guests())
    }

    pub fn capacity_status(&self) -> CapacityStatus {
        capacity_status(self.ledger.len(), self.capacity)
    }
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Active(EventSession),
}

fn validate_capacity(capacity: i64) -> AppResult<u32> {
    u32::try_from(capacity)
        .ok()
        .filter(|c| *c > 0)
        .ok_or(AppError::InvalidCapacity(capacity))
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("event name is empty".into()));
    }
    Ok(())
}

impl SessionState {
    /// Restore the session saved in the local DB.
    pub fn load(conn: &Connection) -> AppResult<Self> {
        let Some(info) = queries::load_session(conn)? else {
            return Ok(SessionState::Idle);
        };
        let guests = queries::load_guests(conn)?;
        Ok(SessionState::Active(EventSession {
            event_name: info.event_name,
            capacity: info.capacity,
            started_at: info.started_at,
            ledger: Ledger::from_parts(guests, info.last_added_at),
        }))
    }

    /// Save the session header. Guest rows are written as they change.
    pub fn persist(&self, conn: &Connection) -> AppResult<()> {
        match self {
            SessionState::Idle => queries::clear_session(conn),
            SessionState::Active(s) => queries::save_session(conn, &s.info()),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    pub fn active(&self) -> AppResult<&EventSession> {
        match self {
            SessionState::Active(s) => Ok(s),
            SessionState::Idle => Err(AppError::NoActiveEvent),
        }
    }

    pub fn active_mut(&mut self) -> AppResult<&mut EventSession> {
        match self {
            SessionState::Active(s) => Ok(s),
            SessionState::Idle => Err(AppError::NoActiveEvent),
        }
    }

    /// Idle → Active with an empty ledger.
    pub fn start(&mut self, event: &str, capacity: i64, now: NaiveDateTime) -> AppResult<&mut EventSession> {
        if let SessionState::Active(s) = self {
            return Err(AppError::EventAlreadyActive(s.event_name.clone()));
        }
        validate_name(event)?;
        let capacity = validate_capacity(capacity)?;

        *self = SessionState::Active(EventSession::new(event, capacity, now));
        self.active_mut()
    }

    /// Idle → Active with the guests loaded from the sheet (newest first).
    pub fn join(
        &mut self,
        event: &str,
        capacity: u32,
        guests: Vec<GuestRecord>,
        now: NaiveDateTime,
    ) -> AppResult<&mut EventSession> {
        if let SessionState::Active(s) = self {
            return Err(AppError::EventAlreadyActive(s.event_name.clone()));
        }
        validate_name(event)?;
        let capacity = validate_capacity(capacity as i64)?;

        let mut session = EventSession::new(event, capacity, now);
        session.ledger = Ledger::from_parts(guests, None);
        *self = SessionState::Active(session);
        self.active_mut()
    }

    /// Active → Idle, handing back the finished session.
    pub fn end(&mut self) -> Option<EventSession> {
        match std::mem::take(self) {
            SessionState::Active(s) => Some(s),
            SessionState::Idle => None,
        }
    }
}
