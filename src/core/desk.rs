//! Check-in desk: every user action goes through here.
//!
//! Local state (ledger + session DB) changes first and is the source of
//! truth for the running session; the shared sheet is mirrored afterwards
//! and its failures are reported, never raised.

use crate::config::Config;
use crate::core::classify::classify;
use crate::core::ledger::{AddOutcome, Ledger};
use crate::core::session::{EventSession, SessionState};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::category::SyncState;
use crate::models::guest::{GuestEntry, GuestRecord};
use crate::models::sheet_row::SheetRow;
use crate::store::StoreTarget;
use crate::sync::{BackgroundWriter, SyncAdapter, WriteHandle, WriteStatus};
use chrono::NaiveDateTime;
use std::collections::HashSet;

pub struct CheckInDesk<'a> {
    pool: &'a DbPool,
    cfg: &'a Config,
    adapter: SyncAdapter,
    writer: Option<BackgroundWriter>,
    pending: Vec<WriteHandle>,
}

impl<'a> CheckInDesk<'a> {
    pub fn new(pool: &'a DbPool, cfg: &'a Config) -> Self {
        let adapter = SyncAdapter::new(StoreTarget::from_config(cfg));
        Self::with_adapter(pool, cfg, adapter)
    }

    /// Desk on an explicit sheet; background writes follow `cfg.background_sync`.
    pub fn with_adapter(pool: &'a DbPool, cfg: &'a Config, adapter: SyncAdapter) -> Self {
        let writer = (cfg.background_sync && adapter.is_online())
            .then(|| BackgroundWriter::spawn(adapter.target().clone(), cfg.sync_workers));
        Self {
            pool,
            cfg,
            adapter,
            writer,
            pending: Vec::new(),
        }
    }

    pub fn adapter(&self) -> &SyncAdapter {
        &self.adapter
    }

    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    fn conn(&self) -> &rusqlite::Connection {
        &self.pool.conn
    }

    // ---------------------------
    // lifecycle
    // ---------------------------

    /// Start a new event and announce it on the sheet before any guest row.
    /// Returns whether the announcement reached the sheet.
    pub fn start_event(
        &mut self,
        state: &mut SessionState,
        event: &str,
        capacity: Option<i64>,
        now: NaiveDateTime,
    ) -> AppResult<bool> {
        let capacity = capacity.unwrap_or(self.cfg.default_capacity as i64);
        let session = state.start(event, capacity, now)?;
        let (name, cap) = (session.event_name.clone(), session.capacity);

        queries::clear_session(self.conn())?;
        state.persist(self.conn())?;

        let announced = self
            .adapter
            .announce(&name, cap, now)
            .report(self.conn(), "announce", &name);

        ttlog_soft(
            self.conn(),
            "start",
            &name,
            &format!("Event started, capacity {}", cap),
        );
        Ok(announced)
    }

    /// Join an event already announced on the sheet: load its guests of
    /// today and its capacity before accepting new entries.
    pub fn join_event(
        &mut self,
        state: &mut SessionState,
        event: &str,
        now: NaiveDateTime,
    ) -> AppResult<usize> {
        if let SessionState::Active(s) = state {
            return Err(AppError::EventAlreadyActive(s.event_name.clone()));
        }

        let today = now.date();
        let event = event.trim();
        let guests = self
            .adapter
            .load(event, today)
            .report(self.conn(), "load", event);
        let capacity = self
            .adapter
            .capacity_of(event, today)
            .report(self.conn(), "capacity", event)
            .unwrap_or(self.cfg.default_capacity);

        // the caller's state only turns Active once the local DB holds the session
        let mut joined = SessionState::Idle;
        let session = joined.join(event, capacity, guests, now)?;
        let loaded = session.ledger.len();
        queries::save_session_with_guests(self.conn(), &session.info(), session.ledger.guests())?;
        *state = joined;

        ttlog_soft(
            self.conn(),
            "join",
            event,
            &format!("Joined with {} guests, capacity {}", loaded, capacity),
        );
        Ok(loaded)
    }

    /// Close the session locally. Rows already on the sheet stay there.
    pub fn end_event(&mut self, state: &mut SessionState) -> AppResult<EventSession> {
        self.settle(state, true)?;
        let ended = state.end().ok_or(AppError::NoActiveEvent)?;
        state.persist(self.conn())?;

        ttlog_soft(
            self.conn(),
            "end",
            &ended.event_name,
            &format!("Event ended with {} guests", ended.ledger.len()),
        );
        Ok(ended)
    }

    // ---------------------------
    // ledger
    // ---------------------------

    /// Classify and register a guest, then mirror it to the sheet.
    pub fn register(
        &mut self,
        state: &mut SessionState,
        entry: &GuestEntry,
        now: NaiveDateTime,
    ) -> AppResult<AddOutcome> {
        let session = state.active_mut()?;
        let record = classify(entry, now, &session.event_name)?;
        let window = self.cfg.duplicate_window();

        let mut guest = match session.ledger.add(record, now, window) {
            AddOutcome::Added(g) => g,
            dup @ AddOutcome::Duplicate(_) => return Ok(dup),
        };

        queries::insert_guest(self.conn(), &guest)?;
        queries::save_session(self.conn(), &session.info())?;

        let sync_state = self.push(&guest);
        guest.sync_state = sync_state;
        session.ledger.set_sync_state(&guest.id, sync_state);
        queries::update_sync_state(self.conn(), &guest.id, sync_state)?;

        ttlog_soft(
            self.conn(),
            "add",
            &guest.id,
            &format!("{} ({}, {})", guest.name, guest.category.label(), guest.status.label()),
        );
        Ok(AddOutcome::Added(guest))
    }

    fn push(&mut self, guest: &GuestRecord) -> SyncState {
        if !self.adapter.is_online() {
            return SyncState::Local;
        }
        if let Some(writer) = &self.writer {
            self.pending.push(writer.submit(SheetRow::from_guest(guest)));
            return SyncState::Pending;
        }
        if self.adapter.save(guest).report(self.conn(), "save", &guest.id) {
            SyncState::Synced
        } else {
            SyncState::Failed
        }
    }

    /// Remove the most recent guest locally and from the sheet.
    /// The undo time window is a UI concern and is not checked here.
    pub fn undo(&mut self, state: &mut SessionState) -> AppResult<GuestRecord> {
        self.settle(state, true)?;
        let session = state.active_mut()?;
        let removed = session.ledger.undo_last().ok_or(AppError::NothingToUndo)?;

        queries::delete_guest(self.conn(), &removed.id)?;
        queries::save_session(self.conn(), &session.info())?;
        self.unmirror(&removed);

        ttlog_soft(self.conn(), "undo", &removed.id, &removed.name);
        Ok(removed)
    }

    /// Remove a specific guest (admin path).
    pub fn remove(&mut self, state: &mut SessionState, id: &str) -> AppResult<GuestRecord> {
        self.settle(state, true)?;
        let session = state.active_mut()?;
        let removed = session
            .ledger
            .remove_by_id(id)
            .ok_or_else(|| AppError::GuestNotFound(id.to_string()))?;

        queries::delete_guest(self.conn(), &removed.id)?;
        self.unmirror(&removed);

        ttlog_soft(self.conn(), "del", &removed.id, &removed.name);
        Ok(removed)
    }

    fn unmirror(&self, removed: &GuestRecord) {
        // rows that never reached the sheet have nothing to delete there
        if removed.sync_state == SyncState::Synced {
            let _ = self
                .adapter
                .delete(&removed.id)
                .report(self.conn(), "delete", &removed.id);
        }
    }

    // ---------------------------
    // sheet
    // ---------------------------

    /// Record the result of background writes. With `wait` the call blocks
    /// until every queued write is answered. Returns how many settled.
    pub fn settle(&mut self, state: &mut SessionState, wait: bool) -> AppResult<usize> {
        let mut settled = 0;
        let mut still_pending = Vec::new();

        for mut handle in std::mem::take(&mut self.pending) {
            if !wait && handle.poll() == WriteStatus::Pending {
                still_pending.push(handle);
                continue;
            }
            let id = handle.id.clone();
            let delivered = handle.wait().report(self.conn(), "save", &id);
            let sync_state = if delivered {
                SyncState::Synced
            } else {
                SyncState::Failed
            };

            if let SessionState::Active(s) = state {
                s.ledger.set_sync_state(&id, sync_state);
            }
            queries::update_sync_state(self.conn(), &id, sync_state)?;
            settled += 1;
        }

        self.pending = still_pending;
        Ok(settled)
    }

    /// Blocking reload from the sheet. Guests of today found on the sheet
    /// are merged with local guests that never reached it (local or failed).
    /// Returns the number of guests after the merge, or None when the sheet
    /// could not be read (the local list is then left untouched).
    pub fn sync_now(
        &mut self,
        state: &mut SessionState,
        now: NaiveDateTime,
    ) -> AppResult<Option<usize>> {
        self.settle(state, true)?;
        let session = state.active_mut()?;

        let outcome = self.adapter.load(&session.event_name, now.date());
        if !outcome.is_ok() {
            outcome.report(self.conn(), "load", &session.event_name);
            return Ok(None);
        }

        let remote = outcome.value;
        let remote_ids: HashSet<&str> = remote.iter().map(|g| g.id.as_str()).collect();
        // a synced guest missing from the sheet was deleted by another desk
        let mut merged: Vec<GuestRecord> = session
            .ledger
            .guests()
            .iter()
            .filter(|g| g.sync_state != SyncState::Synced)
            .filter(|g| !remote_ids.contains(g.id.as_str()))
            .cloned()
            .collect();
        merged.extend(remote.iter().cloned());
        // ids are time-derived, so they sort chronologically
        merged.sort_by(|a, b| b.id.cmp(&a.id));

        let last = session.ledger.last_added_at();
        session.ledger = Ledger::from_parts(merged, last);
        queries::replace_guests(self.conn(), session.ledger.guests())?;

        ttlog_soft(
            self.conn(),
            "sync",
            &session.event_name,
            &format!("{} guests after reload", session.ledger.len()),
        );
        Ok(Some(session.ledger.len()))
    }

    /// Event names with rows dated today on the sheet.
    pub fn active_events(&self, now: NaiveDateTime) -> Vec<String> {
        self.adapter
            .list_active_events(now.date())
            .report(self.conn(), "list", "events")
    }
}
